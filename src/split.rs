//! Flight-split utilities.
//!
//! Operate on copies of load plans that a planner has edited by hand:
//! re-derive weight and validity, re-place pallets around the balance
//! target, and split selected pallets off onto a new aircraft.
//!
//! # Re-placement heuristic
//! The target is the arm whose balance point is the envelope midpoint.
//! Pallet rows are ranked by distance from that arm, which alternates
//! outward from the nearest row. Pallets, heaviest first, take the first
//! free slot in that ranking whose weight limit they satisfy. This is a
//! local heuristic, not a global optimum.

use serde::{Deserialize, Serialize};

use crate::allocation::balance::{arm_for_percent, center_of_balance, CenterOfBalance};
use crate::config::PlannerConfig;
use crate::constants::{PALLET_LENGTH, PALLET_WIDTH};
use crate::models::{AircraftLoadPlan, PalletPlacement};

const EPS: f64 = 1e-9;

/// Validity of an edited load plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitEvaluation {
    /// Cargo weight: pallets plus vehicles (lb).
    pub total_weight: f64,
    /// Passenger weight (lb).
    pub pax_weight: f64,
    /// Pallet positions needed by pallets and vehicle footprint.
    pub positions_required: usize,
    /// Cargo plus passengers exceed max payload.
    pub overweight: bool,
    /// More positions required than the airframe has.
    pub too_many_positions: bool,
    /// Balance point outside the envelope.
    pub out_of_envelope: bool,
    /// A pallet exceeds the weight limit of its slot.
    pub position_overload: bool,
    /// Recomputed balance.
    pub center_of_balance: CenterOfBalance,
    /// No issue found.
    pub is_valid: bool,
    /// Human-readable issues.
    pub issues: Vec<String>,
}

/// Re-derives weight and validity of a plan.
pub fn evaluate_split(plan: &AircraftLoadPlan) -> SplitEvaluation {
    let spec = &plan.spec;
    let total_weight = plan.pallet_weight() + plan.vehicle_weight();
    let pax_weight: f64 = plan.pax.iter().map(|p| p.weight).sum();
    let positions_required = plan.positions_required();
    let cob = center_of_balance(&plan.pallets, &plan.vehicles, spec);

    let mut issues = Vec::new();
    let overweight = total_weight + pax_weight > spec.max_payload + EPS;
    if overweight {
        issues.push(format!(
            "Payload {:.0}lb exceeds {:.0}lb",
            total_weight + pax_weight,
            spec.max_payload
        ));
    }
    let too_many_positions = positions_required > spec.pallet_positions;
    if too_many_positions {
        issues.push(format!(
            "{positions_required} positions required, {} available",
            spec.pallet_positions
        ));
    }
    let out_of_envelope = !cob.in_envelope;
    if out_of_envelope {
        issues.push(format!(
            "Balance {:.1}% outside {:.1}-{:.1}%",
            cob.percent_mac, spec.cob_min_percent, spec.cob_max_percent
        ));
    }
    let mut position_overload = false;
    for p in &plan.pallets {
        let limit = if p.is_ramp {
            spec.ramp_position_limit
        } else {
            spec.per_position_limit
        };
        if p.pallet.gross_weight > limit + EPS {
            position_overload = true;
            issues.push(format!(
                "Pallet {} ({:.0}lb) exceeds the {:.0}lb limit of position {}",
                p.pallet.id, p.pallet.gross_weight, limit, p.position_index
            ));
        }
    }

    SplitEvaluation {
        total_weight,
        pax_weight,
        positions_required,
        overweight,
        too_many_positions,
        out_of_envelope,
        position_overload,
        center_of_balance: cob,
        is_valid: issues.is_empty(),
        issues,
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    index: usize,
    arm: f64,
    lateral: Option<f64>,
    is_ramp: bool,
    limit: f64,
}

/// Returns a copy of the plan with pallets re-placed around the balance target.
///
/// Plans with more pallets than free slots, or with a pallet no free slot
/// can bear, are returned unchanged.
pub fn reoptimize_pallet_placement(
    plan: &AircraftLoadPlan,
    config: &PlannerConfig,
) -> AircraftLoadPlan {
    let mut out = plan.clone();
    let slots = free_slots(plan, config);
    if slots.len() < plan.pallets.len() {
        return out;
    }

    let target = arm_for_percent(plan.spec.cob_midpoint_percent(), &plan.spec);
    let mut ranked = slots;
    ranked.sort_by(|a, b| {
        (a.arm - target)
            .abs()
            .total_cmp(&(b.arm - target).abs())
            .then_with(|| a.arm.total_cmp(&b.arm))
            .then_with(|| a.index.cmp(&b.index))
    });

    let mut pallets: Vec<_> = plan.pallets.iter().map(|p| p.pallet.clone()).collect();
    pallets.sort_by(|a, b| b.gross_weight.total_cmp(&a.gross_weight));

    let mut taken = vec![false; ranked.len()];
    let mut placements = Vec::with_capacity(pallets.len());
    for pallet in pallets {
        let pick = ranked
            .iter()
            .enumerate()
            .position(|(i, s)| !taken[i] && pallet.gross_weight <= s.limit + EPS);
        let Some(i) = pick else {
            return plan.clone();
        };
        taken[i] = true;
        let slot = ranked[i];
        placements.push(PalletPlacement {
            pallet,
            position_index: slot.index,
            arm: slot.arm,
            is_ramp: slot.is_ramp,
            lateral_offset: slot.lateral,
        });
    }
    placements.sort_by_key(|p| p.position_index);

    out.pallets = placements;
    out.refresh_metrics();
    out
}

/// Moves the named pallets from a plan onto a new aircraft.
///
/// Works on copies: returns `(remaining, split_off)`, both re-placed and
/// re-measured. Unknown pallet ids are ignored.
pub fn split_load_plan(
    plan: &AircraftLoadPlan,
    pallet_ids: &[&str],
    config: &PlannerConfig,
) -> (AircraftLoadPlan, AircraftLoadPlan) {
    let (moved, kept): (Vec<_>, Vec<_>) = plan
        .pallets
        .iter()
        .cloned()
        .partition(|p| pallet_ids.contains(&p.pallet.id.as_str()));

    let mut remaining = plan.clone();
    remaining.pallets = kept;
    remaining.refresh_metrics();

    let mut split_off =
        AircraftLoadPlan::new(format!("{}-SPLIT", plan.id), &plan.spec, plan.sequence, plan.phase);
    split_off.pallets = moved;
    split_off.refresh_metrics();

    (
        reoptimize_pallet_placement(&remaining, config),
        reoptimize_pallet_placement(&split_off, config),
    )
}

/// Slots aft of the vehicle footprint, laid out the way the solver lays them.
fn free_slots(plan: &AircraftLoadPlan, config: &PlannerConfig) -> Vec<Slot> {
    let spec = &plan.spec;
    let lanes = spec.pallet_lanes();
    if lanes == 0 {
        return Vec::new();
    }
    let vehicle_end = plan.vehicle_footprint_end();
    let first_row = if vehicle_end > 0.0 {
        vehicle_end + config.pallet_gap_in
    } else {
        0.0
    };
    let ramp_start = spec.cargo_length - config.ramp_zone_length_in;
    let budget = spec
        .pallet_positions
        .saturating_sub(plan.blocked_positions());

    let mut slots = Vec::new();
    let mut ramp_count = 0;
    for index in 0..budget {
        let row = index / lanes;
        let lane = index % lanes;
        let start = first_row + row as f64 * PALLET_LENGTH;
        if start + PALLET_LENGTH > spec.cargo_length + EPS {
            break;
        }
        let is_ramp = start >= ramp_start - EPS;
        if is_ramp {
            if ramp_count >= spec.ramp_positions {
                break;
            }
            ramp_count += 1;
        }
        slots.push(Slot {
            index,
            arm: start + PALLET_LENGTH / 2.0,
            lateral: (lanes > 1)
                .then(|| (lane as f64 - (lanes - 1) as f64 / 2.0) * PALLET_WIDTH),
            is_ramp,
            limit: if is_ramp {
                spec.ramp_position_limit
            } else {
                spec.per_position_limit
            },
        });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AircraftSpec, MovementItem, Pallet, PaxPlacement, Phase, Position3D, VehiclePlacement,
    };

    fn placement(id: &str, slot: usize, weight: f64) -> PalletPlacement {
        PalletPlacement {
            pallet: Pallet::from_items(
                id,
                vec![MovementItem::palletizable(format!("{id}-i"))
                    .with_dimensions(40.0, 40.0, 40.0)
                    .with_weight(weight)],
                false,
            ),
            position_index: slot,
            arm: 44.0 + slot as f64 * 88.0,
            is_ramp: false,
            lateral_offset: None,
        }
    }

    fn c130_plan(pallets: Vec<PalletPlacement>) -> AircraftLoadPlan {
        let mut plan = AircraftLoadPlan::new("C-130-MAIN-1", &AircraftSpec::c130(), 1, Phase::Main);
        plan.pallets = pallets;
        plan.refresh_metrics();
        plan
    }

    #[test]
    fn test_evaluate_valid_plan() {
        let plan = c130_plan(vec![placement("A", 2, 3_000.0), placement("B", 3, 3_000.0)]);
        let eval = evaluate_split(&plan);
        assert!(eval.is_valid, "{:?}", eval.issues);
        assert!((eval.total_weight - 6_710.0).abs() < 1e-6);
        assert_eq!(eval.positions_required, 2);
    }

    #[test]
    fn test_evaluate_overweight() {
        let mut plan = c130_plan(vec![placement("A", 2, 9_000.0)]);
        plan.pax.push(PaxPlacement {
            item_id: "P".into(),
            count: 92,
            weight: 40_000.0,
        });
        let eval = evaluate_split(&plan);
        assert!(eval.overweight);
        assert!(!eval.is_valid);
    }

    #[test]
    fn test_evaluate_too_many_positions() {
        let pallets = (0..7).map(|i| placement(&format!("P{i}"), i, 500.0)).collect();
        let eval = evaluate_split(&c130_plan(pallets));
        assert!(eval.too_many_positions);
    }

    #[test]
    fn test_balance_proxy_clamped_to_envelope() {
        let mut forward = placement("A", 0, 9_000.0);
        forward.arm = 0.0;
        let eval = evaluate_split(&c130_plan(vec![forward]));
        // arm 0 maps to the envelope minimum, still inside
        assert!(!eval.out_of_envelope);
        assert!((eval.center_of_balance.percent_mac - 15.0).abs() < 1e-10);

        let mut spec = AircraftSpec::c130();
        spec.cargo_length = 100.0;
        let mut plan = AircraftLoadPlan::new("X", &spec, 1, Phase::Main);
        let mut aft = placement("B", 0, 1_000.0);
        aft.arm = 500.0;
        plan.pallets.push(aft);
        let eval = evaluate_split(&plan);
        assert!((eval.center_of_balance.normalized - 1.0).abs() < 1e-10);
        assert!(!eval.out_of_envelope);
    }

    #[test]
    fn test_evaluate_ramp_overload() {
        let mut heavy = placement("A", 5, 9_000.0);
        heavy.is_ramp = true;
        let eval = evaluate_split(&c130_plan(vec![heavy]));
        assert!(eval.position_overload);
        assert!(!eval.is_valid);
    }

    #[test]
    fn test_reoptimize_centers_heaviest() {
        let plan = c130_plan(vec![
            placement("LIGHT", 0, 500.0),
            placement("HEAVY", 1, 8_000.0),
        ]);
        let out = reoptimize_pallet_placement(&plan, &PlannerConfig::default());
        let target = arm_for_percent(plan.spec.cob_midpoint_percent(), &plan.spec);
        let heavy = out.pallet("HEAVY").unwrap();
        // rows centered at 44, 132, 220, 308, 396, 484; target 270
        assert!((heavy.arm - 308.0).abs() < 1e-10);
        assert!((heavy.arm - target).abs() <= 44.0);
        let light = out.pallet("LIGHT").unwrap();
        assert!((light.arm - 220.0).abs() < 1e-10);
        assert!(out.center_of_balance.in_envelope);
        assert_eq!(out.pallets.len(), 2);
    }

    #[test]
    fn test_reoptimize_keeps_ramp_limit() {
        let pallets = (0..6)
            .map(|i| placement(&format!("P{i}"), i, if i == 0 { 1_000.0 } else { 6_000.0 }))
            .collect();
        let out = reoptimize_pallet_placement(&c130_plan(pallets), &PlannerConfig::default());
        let ramp: Vec<_> = out.pallets.iter().filter(|p| p.is_ramp).collect();
        assert_eq!(ramp.len(), 1);
        assert_eq!(ramp[0].pallet.id, "P0");
    }

    #[test]
    fn test_reoptimize_never_overloads_a_slot() {
        // six pallets above the 4,664lb ramp limit, five main-deck slots
        let mut pallets: Vec<_> = (0..5)
            .map(|i| placement(&format!("P{i}"), i, 6_000.0))
            .collect();
        let mut heavy = placement("HEAVY", 5, 9_000.0);
        heavy.is_ramp = true;
        pallets.push(heavy);
        let plan = c130_plan(pallets);
        let out = reoptimize_pallet_placement(&plan, &PlannerConfig::default());
        assert_eq!(out, plan);
    }

    #[test]
    fn test_vehicle_rows_counted_once() {
        let mut plan = c130_plan(vec![placement("A", 0, 2_000.0)]);
        plan.vehicles.push(VehiclePlacement {
            item: MovementItem::rolling_stock("V1")
                .with_dimensions(200.0, 96.0, 90.0)
                .with_weight(10_000.0),
            position: Position3D {
                lateral: 0.0,
                vertical: 0.0,
                longitudinal: 100.0,
            },
            axle_weights: Vec::new(),
        });
        plan.refresh_metrics();
        let eval = evaluate_split(&plan);
        assert_eq!(eval.positions_required, 4);
        assert_eq!(eval.positions_required, plan.positions_used);
        assert!(!eval.too_many_positions);

        // three rows left behind the truck
        let out = reoptimize_pallet_placement(&plan, &PlannerConfig::default());
        assert!(out.pallets[0].start() >= 204.0 - 1e-10);
        assert!(out.pallets[0].position_index < 3);
    }

    #[test]
    fn test_split_moves_pallets() {
        let plan = c130_plan(vec![
            placement("A", 0, 2_000.0),
            placement("B", 1, 2_000.0),
            placement("C", 2, 2_000.0),
        ]);
        let (kept, moved) = split_load_plan(&plan, &["B", "ZZZ"], &PlannerConfig::default());
        assert_eq!(kept.pallets.len(), 2);
        assert_eq!(moved.pallets.len(), 1);
        assert_eq!(moved.id, "C-130-MAIN-1-SPLIT");
        assert!(moved.pallet("B").is_some());
        assert!((kept.total_weight + moved.total_weight - plan.total_weight).abs() < 1e-6);
        // the source plan is untouched
        assert_eq!(plan.pallets.len(), 3);
    }
}
