//! 463L pallet model.
//!
//! A pallet is a logical airlift unit built by the palletization engine,
//! either from loose items or from a single pre-built load. Pallets are
//! read-only once built.
//!
//! # Invariants
//! - `gross_weight == net_weight + PALLET_TARE`
//! - `net_weight == Σ item weights`
//! - `height == max item height`, `hazmat == OR of item flags`

use serde::{Deserialize, Serialize};

use super::MovementItem;
use crate::constants::{PALLET_LENGTH, PALLET_TARE, PALLET_WIDTH};

/// A built 463L pallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    /// Run-scoped identifier (e.g. `PLT-0001`).
    pub id: String,
    /// Items carried on the pallet.
    pub items: Vec<MovementItem>,
    /// Net weight plus tare (lb).
    pub gross_weight: f64,
    /// Sum of item weights (lb).
    pub net_weight: f64,
    /// Build-up height (in).
    pub height: f64,
    /// Carries hazardous cargo.
    pub hazmat: bool,
    /// Arrived already built up.
    pub prebuilt: bool,
    /// Offload stop shared by every item. `None` = final destination.
    pub destination_stop: Option<u32>,
}

impl Pallet {
    /// Builds a pallet from its items, deriving every aggregate field.
    pub fn from_items(
        id: impl Into<String>,
        items: Vec<MovementItem>,
        prebuilt: bool,
    ) -> Self {
        let net_weight: f64 = items.iter().map(|i| i.weight).sum();
        let height = items.iter().map(|i| i.height).fold(0.0_f64, f64::max);
        let hazmat = items.iter().any(|i| i.hazmat);
        let destination_stop = items.first().and_then(|i| i.destination_stop);
        Self {
            id: id.into(),
            items,
            gross_weight: net_weight + PALLET_TARE,
            net_weight,
            height,
            hazmat,
            prebuilt,
            destination_stop,
        }
    }

    /// Footprint length along the fuselage (in).
    #[inline]
    pub fn length(&self) -> f64 {
        PALLET_LENGTH
    }

    /// Footprint width across the fuselage (in).
    #[inline]
    pub fn width(&self) -> f64 {
        PALLET_WIDTH
    }

    /// Whether any item names weapons or ordnance.
    pub fn is_weapons(&self) -> bool {
        self.items.iter().any(|i| i.is_weapons())
    }

    /// Number of items on the pallet.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Run-scoped pallet identifier generator.
///
/// Each planning run owns one sequence, so identical inputs always yield
/// identical pallet ids and separate runs never share state.
#[derive(Debug, Clone, Default)]
pub struct PalletIdSequence {
    next: u32,
}

impl PalletIdSequence {
    /// Creates a sequence starting at `PLT-0001`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next identifier.
    pub fn next_id(&mut self) -> String {
        self.next += 1;
        format!("PLT-{:04}", self.next)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> u32 {
        self.next
    }

    /// Restarts the sequence.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}
