//! Palletization engine.
//!
//! Turns pre-built loads and loose cargo into 463L pallets.
//!
//! # Pre-built path
//! Each candidate is checked on its own against the height limit and the
//! weight ceiling of its height band. Passing candidates become
//! single-item pallets; failures are reported, never dropped.
//!
//! # Loose path (First-Fit-Decreasing)
//! 1. Loose items are grouped by destination stop, so pallets never mix stops.
//! 2. Each group is sorted by plan area, weight and longer side (all descending).
//! 3. Pallets are built one at a time: every remaining item is offered to the
//!    current [`PalletLayout`]; items that do not fit roll over to the next pallet.
//! 4. A pass that places nothing ends the group; its leftovers are unpalletizable.
//!
//! # Reference
//! Johnson (1974), "Fast algorithms for bin packing" (First-Fit-Decreasing)

mod packer;

pub use packer::{DeckRect, PalletLayout};

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::config::PlannerConfig;
use crate::constants::{pallet_weight_ceiling, PALLET_MAX_HEIGHT};
use crate::models::{MovementItem, Pallet, PalletIdSequence, PlanWarning};

/// Output of the palletization engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PalletizationResult {
    /// Built pallets, pre-built first.
    pub pallets: Vec<Pallet>,
    /// Items that could not go on any pallet.
    pub unpalletizable: Vec<MovementItem>,
    /// One warning per unpalletizable item.
    pub warnings: Vec<PlanWarning>,
}

/// Builds pallets with a configurable packing grid.
#[derive(Debug, Clone)]
pub struct Palletizer {
    coarse_step: f64,
    fine_step: f64,
}

impl Palletizer {
    /// Creates a palletizer with 6in / 2in grid steps.
    pub fn new() -> Self {
        Self {
            coarse_step: 6.0,
            fine_step: 2.0,
        }
    }

    /// Creates a palletizer using the configured grid steps.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            coarse_step: config.coarse_step_in,
            fine_step: config.fine_step_in,
        }
    }

    /// Palletizes pre-built loads and loose items.
    #[instrument(skip_all, fields(prebuilt = prebuilt.len(), loose = loose.len()))]
    pub fn process(
        &self,
        prebuilt: &[MovementItem],
        loose: &[MovementItem],
        ids: &mut PalletIdSequence,
    ) -> PalletizationResult {
        let mut result = PalletizationResult::default();

        for item in prebuilt {
            match check_prebuilt(item) {
                Ok(()) => result
                    .pallets
                    .push(Pallet::from_items(ids.next_id(), vec![item.clone()], true)),
                Err(reason) => {
                    result.warnings.push(PlanWarning::warning(
                        Some(item.id.clone()),
                        format!("Pre-built pallet '{}' rejected: {reason}", item.id),
                    ));
                    result.unpalletizable.push(item.clone());
                }
            }
        }

        let mut groups: BTreeMap<Option<u32>, Vec<MovementItem>> = BTreeMap::new();
        for item in loose {
            groups
                .entry(item.destination_stop)
                .or_default()
                .push(item.clone());
        }
        for (_, group) in groups {
            self.pack_group(group, ids, &mut result);
        }

        debug!(
            pallets = result.pallets.len(),
            unpalletizable = result.unpalletizable.len(),
            "palletization finished"
        );
        result
    }

    fn pack_group(
        &self,
        mut remaining: Vec<MovementItem>,
        ids: &mut PalletIdSequence,
        result: &mut PalletizationResult,
    ) {
        // Items that cannot sit on an empty pallet never will.
        remaining.retain(|item| {
            let mut empty = PalletLayout::new(self.coarse_step, self.fine_step);
            if empty.try_place(item).is_some() {
                return true;
            }
            result.warnings.push(PlanWarning::warning(
                Some(item.id.clone()),
                format!(
                    "Item '{}' ({}x{}x{}in, {}lb) does not fit an empty pallet",
                    item.id, item.length, item.width, item.height, item.weight
                ),
            ));
            result.unpalletizable.push(item.clone());
            false
        });

        remaining.sort_by(ffd_order);

        while !remaining.is_empty() {
            let mut layout = PalletLayout::new(self.coarse_step, self.fine_step);
            let mut on_pallet = Vec::new();
            let mut rolled_over = Vec::new();
            for item in remaining {
                if layout.try_place(&item).is_some() {
                    on_pallet.push(item);
                } else {
                    rolled_over.push(item);
                }
            }

            if on_pallet.is_empty() {
                for item in rolled_over {
                    result.warnings.push(PlanWarning::warning(
                        Some(item.id.clone()),
                        format!("Item '{}' could not be placed on any pallet", item.id),
                    ));
                    result.unpalletizable.push(item);
                }
                return;
            }

            let pallet = Pallet::from_items(ids.next_id(), on_pallet, false);
            debug!(
                pallet = %pallet.id,
                items = pallet.item_count(),
                gross = pallet.gross_weight,
                "pallet built"
            );
            result.pallets.push(pallet);
            remaining = rolled_over;
        }
    }
}

impl Default for Palletizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Palletizes with the default grid.
pub fn process_palletization(
    prebuilt: &[MovementItem],
    loose: &[MovementItem],
    ids: &mut PalletIdSequence,
) -> PalletizationResult {
    Palletizer::new().process(prebuilt, loose, ids)
}

/// Checks a pre-built load against the height limit and its weight band.
pub fn check_prebuilt(item: &MovementItem) -> Result<(), String> {
    if item.height > PALLET_MAX_HEIGHT {
        return Err(format!(
            "height {}in exceeds {}in",
            item.height, PALLET_MAX_HEIGHT
        ));
    }
    let ceiling = pallet_weight_ceiling(item.height);
    if item.weight > ceiling {
        return Err(format!(
            "weight {}lb exceeds {}lb for a {}in load",
            item.weight, ceiling, item.height
        ));
    }
    Ok(())
}

/// First-Fit-Decreasing order: plan area, weight, longer side, all descending.
///
/// Full ties keep input order.
fn ffd_order(a: &MovementItem, b: &MovementItem) -> Ordering {
    b.footprint_area()
        .total_cmp(&a.footprint_area())
        .then_with(|| b.weight.total_cmp(&a.weight))
        .then_with(|| b.longer_side().total_cmp(&a.longer_side()))
}
