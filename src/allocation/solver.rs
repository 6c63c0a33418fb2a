//! Greedy multi-aircraft allocation.
//!
//! # Algorithm
//!
//! ADVON and MAIN are independent queues, solved in that order. Within a
//! phase, loose cargo is palletized first, then aircraft are filled one at
//! a time until every queue is empty:
//!
//! 1. Rolling stock (weapons first, then heaviest) is laid end to end from
//!    station 0. A vehicle that exceeds the remaining floor length or
//!    payload defers to the next aircraft.
//! 2. Pallets (same ordering) fill pallet slots aft of the vehicle
//!    footprint plus a fixed gap, row by row and lane by lane. Rows the
//!    vehicles touch count against the airframe's positions. Each slot
//!    enforces the remaining length, the remaining payload, and the main
//!    deck or ramp weight limit. A slot goes to the first pallet in order
//!    that satisfies all three.
//! 3. Passengers take the remaining seats and payload; groups may split.
//!
//! An aircraft that takes nothing while cargo remains stops the phase with
//! an error-level warning. The per-phase aircraft cap stops it with a
//! warning. Either way, the remainder is reported as unloaded.
//!
//! # Complexity
//! O(a · (v + p)) for a aircraft, v vehicles and p pallets.

use tracing::{debug, info, instrument, warn};

use crate::config::PlannerConfig;
use crate::constants::{PALLET_LENGTH, PALLET_WIDTH};
use crate::error::Result;
use crate::models::{
    AircraftCatalog, AircraftLoadPlan, AircraftSpec, AllocationResult, ClassifiedItems,
    MovementItem, Pallet, PalletIdSequence, PalletPlacement, PaxPlacement, Phase, PhaseItems,
    PlanWarning, Position3D, VehiclePlacement,
};
use crate::ordering::LoadOrder;
use crate::palletization::Palletizer;

const EPS: f64 = 1e-9;

/// Fills aircraft of one type with classified cargo.
///
/// # Example
///
/// ```
/// use u_airlift::allocation::AllocationSolver;
/// use u_airlift::models::{ClassifiedItems, MovementItem};
///
/// let mut items = ClassifiedItems::new();
/// items.main.push(
///     MovementItem::palletizable("crate")
///         .with_dimensions(40.0, 40.0, 40.0)
///         .with_weight(2_000.0),
/// );
///
/// let result = AllocationSolver::new().solve(&items, "C-130").unwrap();
/// assert_eq!(result.total_aircraft, 1);
/// assert_eq!(result.load_plans[0].id, "C-130-MAIN-1");
/// ```
#[derive(Debug, Clone)]
pub struct AllocationSolver {
    catalog: AircraftCatalog,
    config: PlannerConfig,
    order: LoadOrder,
}

/// Mutable state threaded through one run.
struct RunState {
    ids: PalletIdSequence,
    next_sequence: u32,
}

impl AllocationSolver {
    /// Creates a solver over the standard catalog with default settings.
    pub fn new() -> Self {
        Self {
            catalog: AircraftCatalog::standard(),
            config: PlannerConfig::default(),
            order: LoadOrder::weapons_then_weight(),
        }
    }

    /// Sets the aircraft catalog.
    pub fn with_catalog(mut self, catalog: AircraftCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the planner configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the vehicle and pallet load order.
    pub fn with_load_order(mut self, order: LoadOrder) -> Self {
        self.order = order;
        self
    }

    /// The aircraft catalog.
    pub fn catalog(&self) -> &AircraftCatalog {
        &self.catalog
    }

    /// The planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Solves both phases for one aircraft type.
    ///
    /// # Errors
    /// [`crate::Error::UnknownAircraftType`] for a type missing from the
    /// catalog, [`crate::Error::InvalidConfig`] for an inconsistent
    /// configuration. Cargo that cannot be placed is never an error.
    #[instrument(
        skip(self, classified),
        fields(
            advon = classified.advon.iter().count(),
            main = classified.main.iter().count(),
        )
    )]
    pub fn solve(&self, classified: &ClassifiedItems, aircraft_type: &str) -> Result<AllocationResult> {
        self.config.validate()?;
        let spec = self.catalog.get(aircraft_type)?;

        let mut result = AllocationResult::new(spec.name.clone());
        let mut run = RunState {
            ids: PalletIdSequence::new(),
            next_sequence: 1,
        };
        for phase in [Phase::Advon, Phase::Main] {
            self.solve_phase(phase, classified.phase(phase), spec, &mut run, &mut result);
        }
        result.refresh_totals();

        info!(
            aircraft = result.total_aircraft,
            pallets = result.total_pallets,
            vehicles = result.total_rolling_stock,
            pax = result.total_pax,
            unloaded = result.unloaded_items.len(),
            "allocation finished"
        );
        Ok(result)
    }

    fn solve_phase(
        &self,
        phase: Phase,
        items: &PhaseItems,
        spec: &AircraftSpec,
        run: &mut RunState,
        result: &mut AllocationResult,
    ) {
        if items.is_empty() {
            return;
        }

        let palletized = Palletizer::from_config(&self.config).process(
            &items.prebuilt_pallets,
            &items.loose_items,
            &mut run.ids,
        );
        result.warnings.extend(palletized.warnings);
        result.unloaded_items.extend(palletized.unpalletizable);

        let mut vehicles = self.admissible_vehicles(&items.rolling_stock, spec, result);
        let mut pallets = self.admissible_pallets(palletized.pallets, spec, result);
        let mut pax: Vec<MovementItem> = items.pax.clone();
        self.order.sort(&mut vehicles);
        self.order.sort(&mut pallets);

        let mut flown = 0usize;
        while !(vehicles.is_empty() && pallets.is_empty() && pax.is_empty()) {
            if flown >= self.config.max_aircraft_per_phase {
                warn!(%phase, cap = self.config.max_aircraft_per_phase, "aircraft cap reached");
                result.warnings.push(PlanWarning::warning(
                    None,
                    format!(
                        "{phase} phase reached the limit of {} aircraft; {} units left unloaded",
                        self.config.max_aircraft_per_phase,
                        vehicles.len() + pallets.len() + pax.len()
                    ),
                ));
                break;
            }

            let id = format!("{}-{}-{}", spec.name, phase, run.next_sequence);
            let mut plan = AircraftLoadPlan::new(id, spec, run.next_sequence, phase);
            vehicles = self.load_vehicles(&mut plan, vehicles);
            pallets = self.load_pallets(&mut plan, pallets);
            pax = self.seat_pax(&mut plan, pax);

            if plan.is_empty() {
                warn!(%phase, aircraft = %plan.id, "no progress, stopping phase");
                result.warnings.push(PlanWarning::error(
                    Some(plan.id.clone()),
                    format!(
                        "{phase} phase stopped: aircraft {} could not take any of the {} remaining units",
                        plan.id,
                        vehicles.len() + pallets.len() + pax.len()
                    ),
                ));
                break;
            }

            plan.refresh_metrics();
            debug!(
                aircraft = %plan.id,
                pallets = plan.pallets.len(),
                vehicles = plan.vehicles.len(),
                pax = plan.pax_count,
                payload_percent = plan.payload_used_percent,
                cob_percent = plan.center_of_balance.percent_mac,
                "aircraft loaded"
            );
            self.advise(&plan, result);
            result.load_plans.push(plan);
            run.next_sequence += 1;
            flown += 1;
        }

        if !(vehicles.is_empty() && pallets.is_empty() && pax.is_empty()) {
            warn!(
                %phase,
                vehicles = vehicles.len(),
                pallets = pallets.len(),
                pax_groups = pax.len(),
                "cargo left unloaded"
            );
        }
        result.unloaded_items.extend(vehicles);
        for pallet in pallets {
            result.unloaded_items.extend(pallet.items);
        }
        result.unloaded_items.extend(pax);
    }

    /// Drops vehicles no aircraft of this type can ever carry.
    fn admissible_vehicles(
        &self,
        vehicles: &[MovementItem],
        spec: &AircraftSpec,
        result: &mut AllocationResult,
    ) -> Vec<MovementItem> {
        let mut admissible = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            match vehicle_misfit(vehicle, spec) {
                None => admissible.push(vehicle.clone()),
                Some(reason) => {
                    result.warnings.push(PlanWarning::warning(
                        Some(vehicle.id.clone()),
                        format!("Vehicle '{}' cannot load on a {}: {reason}", vehicle.id, spec.name),
                    ));
                    result.unloaded_items.push(vehicle.clone());
                }
            }
        }
        admissible
    }

    /// Drops pallets no slot of this aircraft type can ever hold.
    fn admissible_pallets(
        &self,
        pallets: Vec<Pallet>,
        spec: &AircraftSpec,
        result: &mut AllocationResult,
    ) -> Vec<Pallet> {
        let slot_limit = spec.per_position_limit.max(if spec.ramp_positions > 0 {
            spec.ramp_position_limit
        } else {
            0.0
        });
        let mut admissible = Vec::with_capacity(pallets.len());
        for pallet in pallets {
            let reason = if pallet.gross_weight > slot_limit + EPS {
                Some(format!(
                    "gross {}lb exceeds the {}lb position limit",
                    pallet.gross_weight, slot_limit
                ))
            } else if pallet.gross_weight > spec.max_payload + EPS {
                Some(format!(
                    "gross {}lb exceeds the {}lb payload",
                    pallet.gross_weight, spec.max_payload
                ))
            } else if pallet.height > spec.ramp_clearance_height + EPS {
                Some(format!(
                    "height {}in exceeds the {}in ramp clearance",
                    pallet.height, spec.ramp_clearance_height
                ))
            } else if spec.pallet_positions == 0 || spec.cargo_length < PALLET_LENGTH {
                Some("the aircraft has no pallet positions".to_string())
            } else {
                None
            };
            match reason {
                None => admissible.push(pallet),
                Some(reason) => {
                    result.warnings.push(PlanWarning::warning(
                        Some(pallet.id.clone()),
                        format!("Pallet '{}' cannot load on a {}: {reason}", pallet.id, spec.name),
                    ));
                    result.unloaded_items.extend(pallet.items);
                }
            }
        }
        admissible
    }

    /// Lays vehicles end to end from station 0; returns the deferred ones.
    fn load_vehicles(
        &self,
        plan: &mut AircraftLoadPlan,
        vehicles: Vec<MovementItem>,
    ) -> Vec<MovementItem> {
        let mut cursor = plan.vehicle_footprint_end();
        let mut deferred = Vec::new();
        for vehicle in vehicles {
            let fits_length = cursor + vehicle.length <= plan.spec.cargo_length + EPS;
            let fits_payload = vehicle.weight <= plan.remaining_payload() + EPS;
            if !(fits_length && fits_payload) {
                deferred.push(vehicle);
                continue;
            }
            let position = Position3D {
                lateral: 0.0,
                vertical: 0.0,
                longitudinal: cursor + vehicle.length / 2.0,
            };
            cursor += vehicle.length;
            plan.total_weight += vehicle.weight;
            plan.vehicles.push(VehiclePlacement {
                axle_weights: vehicle.axle_weights.clone(),
                item: vehicle,
                position,
            });
        }
        deferred
    }

    /// Fills pallet slots aft of the vehicles; returns the deferred pallets.
    fn load_pallets(&self, plan: &mut AircraftLoadPlan, pallets: Vec<Pallet>) -> Vec<Pallet> {
        let spec = plan.spec.clone();
        let lanes = spec.pallet_lanes();
        if lanes == 0 {
            return pallets;
        }
        let vehicle_end = plan.vehicle_footprint_end();
        let first_row = if vehicle_end > 0.0 {
            vehicle_end + self.config.pallet_gap_in
        } else {
            0.0
        };
        let ramp_start = spec.cargo_length - self.config.ramp_zone_length_in;
        let budget = spec
            .pallet_positions
            .saturating_sub(plan.blocked_positions());

        let mut pending = pallets;
        let mut slot = plan.pallets.len();
        let mut ramp_used = plan.pallets.iter().filter(|p| p.is_ramp).count();

        while !pending.is_empty() && slot < budget {
            let row = slot / lanes;
            let lane = slot % lanes;
            let start = first_row + row as f64 * PALLET_LENGTH;
            if start + PALLET_LENGTH > spec.cargo_length + EPS {
                break;
            }
            let is_ramp = start >= ramp_start - EPS;
            if is_ramp && ramp_used >= spec.ramp_positions {
                break;
            }
            let limit = if is_ramp {
                spec.ramp_position_limit
            } else {
                spec.per_position_limit
            };
            let remaining = plan.remaining_payload();

            let Some(index) = pending.iter().position(|p| {
                p.gross_weight <= limit + EPS && p.gross_weight <= remaining + EPS
            }) else {
                break;
            };

            let pallet = pending.remove(index);
            plan.total_weight += pallet.gross_weight;
            plan.pallets.push(PalletPlacement {
                pallet,
                position_index: slot,
                arm: start + PALLET_LENGTH / 2.0,
                is_ramp,
                lateral_offset: lane_offset(lane, lanes),
            });
            if is_ramp {
                ramp_used += 1;
            }
            slot += 1;
        }
        pending
    }

    /// Seats passenger groups in remaining seats and payload.
    fn seat_pax(&self, plan: &mut AircraftLoadPlan, groups: Vec<MovementItem>) -> Vec<MovementItem> {
        let mut unseated = Vec::new();
        for mut group in groups {
            let seats_left = plan.spec.seat_capacity.saturating_sub(plan.pax_count);
            let count = group.pax_count.max(1);
            let per_pax = group.weight / count as f64;
            let affordable = if per_pax > EPS {
                ((plan.remaining_payload() + EPS) / per_pax).floor().max(0.0) as u64
            } else {
                u64::from(count)
            };
            let seated = u64::from(count)
                .min(u64::from(seats_left))
                .min(affordable) as u32;
            if seated == 0 {
                unseated.push(group);
                continue;
            }

            let weight = if seated == count {
                group.weight
            } else {
                per_pax * seated as f64
            };
            plan.pax.push(PaxPlacement {
                item_id: group.id.clone(),
                count: seated,
                weight,
            });
            plan.pax_count += seated;
            plan.pax_weight += weight;

            if seated < count {
                group.pax_count = count - seated;
                group.weight -= weight;
                unseated.push(group);
            }
        }
        unseated
    }

    fn advise(&self, plan: &AircraftLoadPlan, result: &mut AllocationResult) {
        if plan.payload_used_percent < self.config.underutilization_percent {
            result.warnings.push(PlanWarning::info(
                Some(plan.id.clone()),
                format!(
                    "Aircraft {} is underutilized ({:.1}% of payload)",
                    plan.id, plan.payload_used_percent
                ),
            ));
        }
        if plan.has_hazmat() && plan.pax_count > 0 {
            result.warnings.push(PlanWarning::info(
                Some(plan.id.clone()),
                format!(
                    "Aircraft {} carries hazardous cargo with {} passengers aboard",
                    plan.id, plan.pax_count
                ),
            ));
        }
    }
}

impl Default for AllocationSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a vehicle can never load on this aircraft type, if it cannot.
fn vehicle_misfit(vehicle: &MovementItem, spec: &AircraftSpec) -> Option<String> {
    if vehicle.length > spec.cargo_length + EPS {
        Some(format!(
            "length {}in exceeds the {}in cargo floor",
            vehicle.length, spec.cargo_length
        ))
    } else if vehicle.width > spec.ramp_clearance_width + EPS {
        Some(format!(
            "width {}in exceeds the {}in ramp clearance",
            vehicle.width, spec.ramp_clearance_width
        ))
    } else if vehicle.height > spec.ramp_clearance_height + EPS {
        Some(format!(
            "height {}in exceeds the {}in ramp clearance",
            vehicle.height, spec.ramp_clearance_height
        ))
    } else if vehicle.weight > spec.max_payload + EPS {
        Some(format!(
            "weight {}lb exceeds the {}lb payload",
            vehicle.weight, spec.max_payload
        ))
    } else {
        None
    }
}

/// Lateral center of a lane, or `None` on single-lane aircraft.
fn lane_offset(lane: usize, lanes: usize) -> Option<f64> {
    if lanes <= 1 {
        return None;
    }
    let centered = lane as f64 - (lanes - 1) as f64 / 2.0;
    Some(centered * PALLET_WIDTH)
}

/// Solves with the standard catalog and default configuration.
pub fn solve_aircraft_allocation(
    classified: &ClassifiedItems,
    aircraft_type: &str,
) -> Result<AllocationResult> {
    AllocationSolver::new().solve(classified, aircraft_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PALLET_TARE;
    use crate::models::WarningSeverity;

    fn crate_item(id: &str, weight: f64) -> MovementItem {
        MovementItem::palletizable(id)
            .with_dimensions(100.0, 80.0, 60.0)
            .with_weight(weight)
    }

    fn vehicle(id: &str, length: f64, weight: f64) -> MovementItem {
        MovementItem::rolling_stock(id)
            .with_dimensions(length, 96.0, 90.0)
            .with_weight(weight)
    }

    #[test]
    fn test_unknown_aircraft_type() {
        let err = solve_aircraft_allocation(&ClassifiedItems::new(), "A400M").unwrap_err();
        assert!(err.to_string().contains("A400M"));
    }

    #[test]
    fn test_empty_input_flies_nothing() {
        let result = solve_aircraft_allocation(&ClassifiedItems::new(), "C-17").unwrap();
        assert_eq!(result.total_aircraft, 0);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_vehicles_then_pallets_with_gap() {
        let mut items = ClassifiedItems::new();
        items.main.push(vehicle("V1", 200.0, 15_000.0));
        items.main.push(crate_item("C1", 3_000.0));

        let result = solve_aircraft_allocation(&items, "C-17").unwrap();
        let plan = &result.load_plans[0];
        assert!((plan.vehicles[0].start() - 0.0).abs() < 1e-10);
        assert!((plan.vehicles[0].end() - 200.0).abs() < 1e-10);
        assert!((plan.pallets[0].start() - 204.0).abs() < 1e-10);
        assert_eq!(plan.pallets[0].lateral_offset, Some(-54.0));
    }

    #[test]
    fn test_weapons_vehicle_loads_first() {
        let mut items = ClassifiedItems::new();
        items.main.push(vehicle("TRUCK", 200.0, 30_000.0));
        items
            .main
            .push(vehicle("AMMO", 150.0, 5_000.0).with_description("Ammunition trailer"));

        let result = solve_aircraft_allocation(&items, "C-17").unwrap();
        assert_eq!(result.load_plans[0].vehicles[0].item.id, "AMMO");
    }

    #[test]
    fn test_phases_numbered_advon_first() {
        let mut items = ClassifiedItems::new();
        items.advon.push(crate_item("A1", 1_000.0).with_advon(true));
        items.main.push(crate_item("M1", 1_000.0));

        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        assert_eq!(result.advon_aircraft, 1);
        assert_eq!(result.main_aircraft, 1);
        assert_eq!(result.load_plans[0].id, "C-130-ADVON-1");
        assert_eq!(result.load_plans[1].id, "C-130-MAIN-2");
        assert_eq!(result.load_plans[1].sequence, 2);
    }

    #[test]
    fn test_pallets_overflow_to_second_aircraft() {
        // one crate per pallet; a C-130 has six positions
        let mut items = ClassifiedItems::new();
        for i in 0..8 {
            items.main.push(crate_item(&format!("C{i}"), 2_000.0));
        }
        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        assert_eq!(result.total_aircraft, 2);
        assert_eq!(result.total_pallets, 8);
        assert_eq!(result.load_plans[0].pallets.len(), 6);
        assert!(result.unloaded_items.is_empty());
    }

    #[test]
    fn test_vehicle_rows_reduce_pallet_slots() {
        // 200in truck blocks three rows of two lanes: 12 of 18 positions left
        let mut items = ClassifiedItems::new();
        items.main.push(vehicle("V1", 200.0, 15_000.0));
        for i in 0..18 {
            items.main.push(crate_item(&format!("C{i}"), 2_000.0));
        }
        let result = solve_aircraft_allocation(&items, "C-17").unwrap();
        let first = &result.load_plans[0];
        assert_eq!(first.pallets.len(), 12);
        assert_eq!(first.positions_used, 18);
        assert!(first.positions_used <= first.positions_available);
        assert_eq!(result.total_pallets, 18);

        for plan in &result.load_plans {
            let eval = crate::split::evaluate_split(plan);
            assert!(!eval.too_many_positions, "{:?}", eval.issues);
            assert_eq!(eval.positions_required, plan.positions_used);
        }
    }

    #[test]
    fn test_ramp_limit_respected() {
        let mut items = ClassifiedItems::new();
        for i in 0..6 {
            items.main.push(crate_item(&format!("C{i}"), 6_000.0));
        }
        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        for plan in &result.load_plans {
            for placement in &plan.pallets {
                if placement.is_ramp {
                    assert!(placement.pallet.gross_weight <= plan.spec.ramp_position_limit);
                }
            }
        }
        assert_eq!(result.total_pallets, 6);
        assert_eq!(result.total_aircraft, 2);
    }

    #[test]
    fn test_light_pallet_takes_ramp_slot() {
        let mut items = ClassifiedItems::new();
        for i in 0..5 {
            items.main.push(crate_item(&format!("H{i}"), 6_000.0));
        }
        items.main.push(crate_item("L1", 1_000.0));
        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        assert_eq!(result.total_aircraft, 1);
        let ramp: Vec<_> = result.load_plans[0]
            .pallets
            .iter()
            .filter(|p| p.is_ramp)
            .collect();
        assert_eq!(ramp.len(), 1);
        assert_eq!(ramp[0].pallet.items[0].id, "L1");
    }

    #[test]
    fn test_oversize_vehicle_prefiltered() {
        let mut items = ClassifiedItems::new();
        items.main.push(
            MovementItem::rolling_stock("WIDE")
                .with_dimensions(200.0, 130.0, 90.0)
                .with_weight(10_000.0),
        );
        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        assert_eq!(result.total_aircraft, 0);
        assert_eq!(result.unloaded_items[0].id, "WIDE");
        assert!(!result.has_errors());
    }

    #[test]
    fn test_pax_split_across_aircraft() {
        let mut items = ClassifiedItems::new();
        items.main.push(MovementItem::pax("TROOPS", 150).with_weight(150.0 * 225.0));
        let result = solve_aircraft_allocation(&items, "C-130").unwrap();
        assert_eq!(result.total_aircraft, 2);
        assert_eq!(result.load_plans[0].pax_count, 92);
        assert_eq!(result.load_plans[1].pax_count, 58);
        assert!((result.total_pax_weight - 150.0 * 225.0).abs() < 1e-6);
        assert_eq!(result.total_pax, 150);
    }

    #[test]
    fn test_aircraft_cap_warns() {
        let config = PlannerConfig::default().with_max_aircraft_per_phase(1);
        let mut items = ClassifiedItems::new();
        for i in 0..8 {
            items.main.push(crate_item(&format!("C{i}"), 2_000.0));
        }
        let result = AllocationSolver::new()
            .with_config(config)
            .solve(&items, "C-130")
            .unwrap();
        assert_eq!(result.total_aircraft, 1);
        assert_eq!(result.unloaded_items.len(), 2);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Warning && w.message.contains("limit")));
    }

    #[test]
    fn test_per_plan_weight_identity() {
        let mut items = ClassifiedItems::new();
        items.main.push(vehicle("V1", 150.0, 12_000.0));
        items.main.push(crate_item("C1", 2_500.0));
        items.main.push(MovementItem::pax("P", 10).with_weight(2_250.0));
        let result = solve_aircraft_allocation(&items, "C-17").unwrap();
        let plan = &result.load_plans[0];
        let expected = plan.pallets.iter().map(|p| p.pallet.gross_weight).sum::<f64>()
            + plan.vehicles.iter().map(|v| v.item.weight).sum::<f64>();
        assert!((plan.total_weight - expected).abs() < 1e-6);
        assert!((plan.total_weight - (12_000.0 + 2_500.0 + PALLET_TARE)).abs() < 1e-6);
        assert!((plan.pax_weight - 2_250.0).abs() < 1e-6);
    }

    #[test]
    fn test_underutilization_advisory() {
        let mut items = ClassifiedItems::new();
        items.main.push(crate_item("C1", 500.0));
        let result = solve_aircraft_allocation(&items, "C-17").unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Info && w.message.contains("underutilized")));
    }

    #[test]
    fn test_zero_seat_aircraft_stops_with_error() {
        let mut spec = AircraftSpec::c130();
        spec.name = "NOSEAT".into();
        spec.seat_capacity = 0;
        let catalog = AircraftCatalog::new().with_spec(spec);
        let mut items = ClassifiedItems::new();
        items.main.push(MovementItem::pax("P", 5).with_weight(1_125.0));
        let result = AllocationSolver::new()
            .with_catalog(catalog)
            .solve(&items, "NOSEAT")
            .unwrap();
        assert_eq!(result.total_aircraft, 0);
        assert!(result.has_errors());
        assert_eq!(result.unloaded_items[0].id, "P");
    }

    #[test]
    fn test_lane_offsets() {
        assert_eq!(lane_offset(0, 1), None);
        assert_eq!(lane_offset(0, 2), Some(-54.0));
        assert_eq!(lane_offset(1, 2), Some(54.0));
    }
}
