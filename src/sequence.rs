//! Loading-sequence calculator.
//!
//! Derives the physical loading order of one aircraft from its load plan.
//! The plan is never modified; the sequence is recomputed on demand.
//!
//! # Ordering (First-In-Last-Out)
//!
//! 1. Destination stop, descending. Cargo for the last stop goes deepest
//!    and loads first; cargo without a stop stays aboard to the end and
//!    loads before everything else.
//! 2. Within a stop, longitudinal position, descending (aft-most first).
//! 3. Within a position, non-hazmat before hazmat.
//!
//! Remaining ties keep plan order: vehicles, then pallets by slot.
//!
//! # Timing
//! Each unit takes its handling time (pallet base or vehicle time) plus a
//! repositioning increment, with bonuses for heavy and hazardous units.
//! Start offsets accumulate in sequence order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::LoadingTimeModel;
use crate::models::AircraftLoadPlan;

/// Kind of unit being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SequenceUnit {
    /// A 463L pallet.
    Pallet,
    /// Rolling stock driven or winched aboard.
    Vehicle,
}

/// One step of the loading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingSequenceItem {
    /// Position in the loading order (1-based).
    pub sequence_number: u32,
    /// Pallet id or vehicle item id.
    pub unit_id: String,
    /// Pallet or vehicle.
    pub unit_type: SequenceUnit,
    /// Pallet position index; `None` for vehicles.
    pub target_position: Option<usize>,
    /// Longitudinal arm of the unit center (in).
    pub arm: f64,
    /// Weight (lb); gross for pallets.
    pub weight: f64,
    /// Carries hazardous cargo.
    pub hazmat: bool,
    /// Destination stop, if any.
    pub destination_stop: Option<u32>,
    /// Minutes from the start of loading.
    pub start_offset_minutes: u32,
    /// Minutes this unit takes.
    pub duration_minutes: u32,
    /// Which ordering and timing rules applied.
    pub notes: Vec<String>,
}

/// Computes the loading order with the default timing model.
///
/// # Example
/// ```
/// use u_airlift::allocation::solve_aircraft_allocation;
/// use u_airlift::models::{ClassifiedItems, MovementItem};
/// use u_airlift::sequence::calculate_loading_sequence;
///
/// let mut items = ClassifiedItems::new();
/// for (id, stop) in [("near", 0), ("far", 1)] {
///     items.main.push(
///         MovementItem::palletizable(id)
///             .with_dimensions(40.0, 40.0, 40.0)
///             .with_weight(1_000.0)
///             .with_destination_stop(stop),
///     );
/// }
/// let result = solve_aircraft_allocation(&items, "C-130").unwrap();
/// let sequence = calculate_loading_sequence(&result.load_plans[0]);
/// assert_eq!(sequence[0].destination_stop, Some(1));
/// ```
pub fn calculate_loading_sequence(plan: &AircraftLoadPlan) -> Vec<LoadingSequenceItem> {
    calculate_loading_sequence_with(plan, &LoadingTimeModel::default())
}

/// Computes the loading order with a custom timing model.
pub fn calculate_loading_sequence_with(
    plan: &AircraftLoadPlan,
    timing: &LoadingTimeModel,
) -> Vec<LoadingSequenceItem> {
    let mut steps: Vec<LoadingSequenceItem> = plan
        .vehicles
        .iter()
        .map(|v| LoadingSequenceItem {
            sequence_number: 0,
            unit_id: v.item.id.clone(),
            unit_type: SequenceUnit::Vehicle,
            target_position: None,
            arm: v.position.longitudinal,
            weight: v.item.weight,
            hazmat: v.item.hazmat,
            destination_stop: v.item.destination_stop,
            start_offset_minutes: 0,
            duration_minutes: 0,
            notes: Vec::new(),
        })
        .chain(plan.pallets.iter().map(|p| LoadingSequenceItem {
            sequence_number: 0,
            unit_id: p.pallet.id.clone(),
            unit_type: SequenceUnit::Pallet,
            target_position: Some(p.position_index),
            arm: p.arm,
            weight: p.pallet.gross_weight,
            hazmat: p.pallet.hazmat,
            destination_stop: p.pallet.destination_stop,
            start_offset_minutes: 0,
            duration_minutes: 0,
            notes: Vec::new(),
        }))
        .collect();

    steps.sort_by(loading_order);
    let behind_cargo: Vec<bool> = (0..steps.len())
        .map(|i| {
            steps[i].hazmat
                && steps[..i]
                    .iter()
                    .any(|s| !s.hazmat && shares_station(s, &steps[i]))
        })
        .collect();

    let mut clock = 0u32;
    for (index, step) in steps.iter_mut().enumerate() {
        step.sequence_number = index as u32 + 1;
        step.notes.push(match step.destination_stop {
            None => "Final destination: loads first, unloads last".to_string(),
            Some(stop) => format!("Stop {stop}: loads ahead of earlier stops"),
        });
        step.notes.push(format!("Station {:.0}in: aft units load first", step.arm));

        let mut duration = match step.unit_type {
            SequenceUnit::Pallet => timing.base_minutes,
            SequenceUnit::Vehicle => timing.vehicle_minutes,
        } + timing.increment_minutes;
        if step.weight > timing.heavy_threshold_lb {
            duration += timing.heavy_bonus_minutes;
            step.notes.push("Heavy unit: extra handling time".to_string());
        }
        if step.hazmat {
            duration += timing.hazmat_bonus_minutes;
            if behind_cargo[index] {
                step.notes
                    .push("Hazmat: loads after non-hazmat cargo at this position".to_string());
            }
        }

        step.start_offset_minutes = clock;
        step.duration_minutes = duration;
        clock += duration;
    }
    steps
}

/// Total minutes to load a sequence.
pub fn estimate_total_loading_time(sequence: &[LoadingSequenceItem]) -> u32 {
    sequence.iter().map(|s| s.duration_minutes).sum()
}

/// Sort key: stop descending (none first), arm descending, non-hazmat first.
fn loading_order(a: &LoadingSequenceItem, b: &LoadingSequenceItem) -> Ordering {
    stop_rank(b.destination_stop)
        .cmp(&stop_rank(a.destination_stop))
        .then_with(|| b.arm.total_cmp(&a.arm))
        .then_with(|| a.hazmat.cmp(&b.hazmat))
}

fn shares_station(a: &LoadingSequenceItem, b: &LoadingSequenceItem) -> bool {
    a.destination_stop == b.destination_stop && (a.arm - b.arm).abs() < 1e-9
}

fn stop_rank(stop: Option<u32>) -> u64 {
    stop.map_or(u64::MAX, u64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AircraftSpec, MovementItem, Pallet, PalletPlacement, Phase, Position3D, VehiclePlacement,
    };

    fn placed(id: &str, slot: usize, stop: Option<u32>, hazmat: bool, weight: f64) -> PalletPlacement {
        let mut item = MovementItem::palletizable(format!("{id}-i"))
            .with_dimensions(40.0, 40.0, 40.0)
            .with_weight(weight)
            .with_hazmat(hazmat);
        item.destination_stop = stop;
        PalletPlacement {
            pallet: Pallet::from_items(id, vec![item], false),
            position_index: slot,
            arm: 44.0 + slot as f64 * 88.0,
            is_ramp: false,
            lateral_offset: None,
        }
    }

    fn plan_with(pallets: Vec<PalletPlacement>) -> AircraftLoadPlan {
        let mut plan = AircraftLoadPlan::new("C-130-MAIN-1", &AircraftSpec::c130(), 1, Phase::Main);
        plan.pallets = pallets;
        plan.refresh_metrics();
        plan
    }

    #[test]
    fn test_later_stop_loads_first() {
        let plan = plan_with(vec![
            placed("PLT-0001", 0, Some(0), false, 1_000.0),
            placed("PLT-0002", 1, Some(1), false, 1_000.0),
        ]);
        let seq = calculate_loading_sequence(&plan);
        assert_eq!(seq[0].unit_id, "PLT-0002");
        assert_eq!(seq[0].sequence_number, 1);
        assert_eq!(seq[1].unit_id, "PLT-0001");
    }

    #[test]
    fn test_no_stop_loads_before_all_stops() {
        let plan = plan_with(vec![
            placed("PLT-0001", 0, Some(5), false, 1_000.0),
            placed("PLT-0002", 1, None, false, 1_000.0),
        ]);
        let seq = calculate_loading_sequence(&plan);
        assert_eq!(seq[0].unit_id, "PLT-0002");
    }

    #[test]
    fn test_aft_first_within_stop() {
        let plan = plan_with(vec![
            placed("PLT-0001", 0, None, false, 1_000.0),
            placed("PLT-0002", 3, None, false, 1_000.0),
            placed("PLT-0003", 1, None, false, 1_000.0),
        ]);
        let ids: Vec<_> = calculate_loading_sequence(&plan)
            .into_iter()
            .map(|s| s.unit_id)
            .collect();
        assert_eq!(ids, vec!["PLT-0002", "PLT-0003", "PLT-0001"]);
    }

    #[test]
    fn test_hazmat_after_non_hazmat_at_same_station() {
        let mut a = placed("PLT-0001", 0, None, true, 1_000.0);
        let mut b = placed("PLT-0002", 1, None, false, 1_000.0);
        // side by side in two lanes
        a.arm = 44.0;
        b.arm = 44.0;
        let plan = plan_with(vec![a, b]);
        let seq = calculate_loading_sequence(&plan);
        assert_eq!(seq[0].unit_id, "PLT-0002");
        assert!(seq[1].hazmat);
        assert!(seq[1].notes.iter().any(|n| n.starts_with("Hazmat")));
    }

    #[test]
    fn test_lone_hazmat_gets_no_ordering_note() {
        let plan = plan_with(vec![
            placed("PLT-0001", 0, None, true, 1_000.0),
            placed("PLT-0002", 1, None, false, 1_000.0),
        ]);
        let seq = calculate_loading_sequence(&plan);
        let hazmat = seq.iter().find(|s| s.hazmat).unwrap();
        assert!(hazmat.notes.iter().all(|n| !n.starts_with("Hazmat")));
        // handling time still applies: 5 + 2 + 10
        assert_eq!(hazmat.duration_minutes, 17);
    }

    #[test]
    fn test_vehicle_placed_by_arm() {
        let mut plan = plan_with(vec![placed("PLT-0001", 0, None, false, 1_000.0)]);
        plan.vehicles.push(VehiclePlacement {
            item: MovementItem::rolling_stock("V1").with_weight(9_000.0),
            position: Position3D {
                lateral: 0.0,
                vertical: 0.0,
                longitudinal: 300.0,
            },
            axle_weights: Vec::new(),
        });
        let seq = calculate_loading_sequence(&plan);
        assert_eq!(seq[0].unit_id, "V1");
        assert_eq!(seq[0].unit_type, SequenceUnit::Vehicle);
        assert_eq!(seq[0].target_position, None);
    }

    #[test]
    fn test_timing() {
        let plan = plan_with(vec![
            placed("PLT-0001", 0, None, true, 1_000.0),
            placed("PLT-0002", 1, None, false, 9_000.0),
        ]);
        let seq = calculate_loading_sequence(&plan);
        // PLT-0002: 5 + 2 + 5 (heavy, 9,355lb gross)
        assert_eq!(seq[0].duration_minutes, 12);
        assert_eq!(seq[0].start_offset_minutes, 0);
        // PLT-0001: 5 + 2 + 10 (hazmat)
        assert_eq!(seq[1].duration_minutes, 17);
        assert_eq!(seq[1].start_offset_minutes, 12);
        assert_eq!(estimate_total_loading_time(&seq), 29);
    }

    #[test]
    fn test_plan_untouched() {
        let plan = plan_with(vec![placed("PLT-0001", 0, Some(2), false, 500.0)]);
        let before = plan.clone();
        let _ = calculate_loading_sequence(&plan);
        assert_eq!(plan, before);
    }

    #[test]
    fn test_empty_plan() {
        let plan = plan_with(Vec::new());
        let seq = calculate_loading_sequence(&plan);
        assert!(seq.is_empty());
        assert_eq!(estimate_total_loading_time(&seq), 0);
    }
}
