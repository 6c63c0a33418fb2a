//! Aircraft load plan model.
//!
//! A load plan is the solution for one aircraft: where every pallet and
//! vehicle sits, how many passengers ride along, and the resulting
//! weight, utilization and balance figures.

use serde::{Deserialize, Serialize};

use super::{AircraftSpec, MovementItem, Pallet};
use crate::allocation::balance::{center_of_balance, CenterOfBalance};
use crate::constants::PALLET_LENGTH;

/// Deployment phase of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Advance echelon, flown first.
    Advon,
    /// Main body.
    Main,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Advon => write!(f, "ADVON"),
            Phase::Main => write!(f, "MAIN"),
        }
    }
}

/// A pallet placed on a pallet position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalletPlacement {
    /// The placed pallet.
    pub pallet: Pallet,
    /// Pallet position index (0 = forward-most).
    pub position_index: usize,
    /// Longitudinal arm of the pallet center (in from the forward end).
    pub arm: f64,
    /// Sits in the aft ramp zone.
    pub is_ramp: bool,
    /// Lateral offset of the pallet center from the centerline (in), for
    /// aircraft with more than one pallet lane.
    pub lateral_offset: Option<f64>,
}

impl PalletPlacement {
    /// Forward edge station (in).
    #[inline]
    pub fn start(&self) -> f64 {
        self.arm - PALLET_LENGTH / 2.0
    }

    /// Aft edge station (in).
    #[inline]
    pub fn end(&self) -> f64 {
        self.arm + PALLET_LENGTH / 2.0
    }
}

/// A point in the cargo compartment (in).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    /// Offset from the centerline.
    pub lateral: f64,
    /// Height above the floor.
    pub vertical: f64,
    /// Station from the forward end.
    pub longitudinal: f64,
}

/// A rolling-stock item placed on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePlacement {
    /// The vehicle.
    pub item: MovementItem,
    /// Center of the vehicle footprint.
    pub position: Position3D,
    /// Per-axle weights (lb), copied from the item.
    pub axle_weights: Vec<f64>,
}

impl VehiclePlacement {
    /// Forward edge station (in).
    #[inline]
    pub fn start(&self) -> f64 {
        self.position.longitudinal - self.item.length / 2.0
    }

    /// Aft edge station (in).
    #[inline]
    pub fn end(&self) -> f64 {
        self.position.longitudinal + self.item.length / 2.0
    }
}

/// Passengers from one PAX record seated on an aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaxPlacement {
    /// Source PAX record id.
    pub item_id: String,
    /// Passengers seated.
    pub count: u32,
    /// Weight of the seated passengers (lb).
    pub weight: f64,
}

/// The load plan of one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftLoadPlan {
    /// Aircraft identifier (e.g. `C-17-MAIN-2`).
    pub id: String,
    /// Aircraft type key.
    pub aircraft_type: String,
    /// Capacity profile used for this aircraft.
    pub spec: AircraftSpec,
    /// Order of the aircraft within the run (1-based, ADVON first).
    pub sequence: u32,
    /// Deployment phase.
    pub phase: Phase,
    /// Placed pallets.
    pub pallets: Vec<PalletPlacement>,
    /// Placed rolling stock.
    pub vehicles: Vec<VehiclePlacement>,
    /// Seated passengers.
    pub pax: Vec<PaxPlacement>,
    /// Total passengers aboard.
    pub pax_count: u32,
    /// Total passenger weight (lb).
    pub pax_weight: f64,
    /// Cargo weight: pallet gross plus vehicle weight (lb).
    pub total_weight: f64,
    /// Cargo plus passenger weight as a percentage of max payload.
    pub payload_used_percent: f64,
    /// Balance point of the cargo.
    pub center_of_balance: CenterOfBalance,
    /// Pallet positions occupied by pallets or blocked by rolling stock.
    pub positions_used: usize,
    /// Pallet positions on the airframe.
    pub positions_available: usize,
    /// `positions_used / positions_available` as a percentage.
    pub utilization_percent: f64,
}

impl AircraftLoadPlan {
    /// Creates an empty plan for one aircraft.
    pub fn new(id: impl Into<String>, spec: &AircraftSpec, sequence: u32, phase: Phase) -> Self {
        let mut plan = Self {
            id: id.into(),
            aircraft_type: spec.name.clone(),
            spec: spec.clone(),
            sequence,
            phase,
            pallets: Vec::new(),
            vehicles: Vec::new(),
            pax: Vec::new(),
            pax_count: 0,
            pax_weight: 0.0,
            total_weight: 0.0,
            payload_used_percent: 0.0,
            center_of_balance: CenterOfBalance::default(),
            positions_used: 0,
            positions_available: spec.pallet_positions,
            utilization_percent: 0.0,
        };
        plan.refresh_metrics();
        plan
    }

    /// Recomputes every derived figure from the placements.
    pub fn refresh_metrics(&mut self) {
        self.total_weight = self.pallet_weight() + self.vehicle_weight();
        self.pax_count = self.pax.iter().map(|p| p.count).sum();
        self.pax_weight = self.pax.iter().map(|p| p.weight).sum();
        self.payload_used_percent = if self.spec.max_payload > 0.0 {
            (self.total_weight + self.pax_weight) / self.spec.max_payload * 100.0
        } else {
            0.0
        };
        self.center_of_balance = center_of_balance(&self.pallets, &self.vehicles, &self.spec);

        self.positions_available = self.spec.pallet_positions;
        self.positions_used = self.positions_required();
        self.utilization_percent = if self.positions_available > 0 {
            self.positions_used as f64 / self.positions_available as f64 * 100.0
        } else {
            0.0
        };
    }

    /// Gross weight of all pallets (lb).
    pub fn pallet_weight(&self) -> f64 {
        self.pallets.iter().map(|p| p.pallet.gross_weight).sum()
    }

    /// Weight of all rolling stock (lb).
    pub fn vehicle_weight(&self) -> f64 {
        self.vehicles.iter().map(|v| v.item.weight).sum()
    }

    /// Aft-most station occupied by rolling stock (0 if none).
    pub fn vehicle_footprint_end(&self) -> f64 {
        self.vehicles.iter().map(|v| v.end()).fold(0.0_f64, f64::max)
    }

    /// Pallet positions blocked by rolling stock: every row the vehicle
    /// footprint touches, across all lanes, at most every position.
    pub fn blocked_positions(&self) -> usize {
        let vehicle_end = self.vehicle_footprint_end();
        if vehicle_end <= 0.0 {
            return 0;
        }
        let rows = (vehicle_end / PALLET_LENGTH).ceil() as usize;
        (rows * self.spec.pallet_lanes()).min(self.spec.pallet_positions)
    }

    /// Pallet positions taken by pallets and rolling stock together.
    pub fn positions_required(&self) -> usize {
        self.pallets.len() + self.blocked_positions()
    }

    /// Remaining payload (lb).
    pub fn remaining_payload(&self) -> f64 {
        self.spec.max_payload - self.total_weight - self.pax_weight
    }

    /// Whether the plan carries hazardous cargo.
    pub fn has_hazmat(&self) -> bool {
        self.pallets.iter().any(|p| p.pallet.hazmat) || self.vehicles.iter().any(|v| v.item.hazmat)
    }

    /// Whether nothing is aboard.
    pub fn is_empty(&self) -> bool {
        self.pallets.is_empty() && self.vehicles.is_empty() && self.pax.is_empty()
    }

    /// Number of cargo units (pallets plus vehicles).
    pub fn cargo_count(&self) -> usize {
        self.pallets.len() + self.vehicles.len()
    }

    /// Finds a pallet placement by pallet id.
    pub fn pallet(&self, pallet_id: &str) -> Option<&PalletPlacement> {
        self.pallets.iter().find(|p| p.pallet.id == pallet_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pallet(id: &str, weight: f64) -> Pallet {
        Pallet::from_items(
            id,
            vec![MovementItem::palletizable(format!("{id}-i"))
                .with_dimensions(40.0, 40.0, 40.0)
                .with_weight(weight)],
            false,
        )
    }

    #[test]
    fn test_empty_plan() {
        let plan = AircraftLoadPlan::new("C-17-MAIN-1", &AircraftSpec::c17(), 1, Phase::Main);
        assert!(plan.is_empty());
        assert_eq!(plan.positions_available, 18);
        assert_eq!(plan.positions_used, 0);
        assert!((plan.total_weight - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_refresh_metrics() {
        let spec = AircraftSpec::c130();
        let mut plan = AircraftLoadPlan::new("C-130-MAIN-1", &spec, 1, Phase::Main);
        plan.pallets.push(PalletPlacement {
            pallet: pallet("PLT-0001", 4_000.0),
            position_index: 0,
            arm: 44.0,
            is_ramp: false,
            lateral_offset: None,
        });
        plan.pax.push(PaxPlacement {
            item_id: "P1".into(),
            count: 10,
            weight: 2_250.0,
        });
        plan.refresh_metrics();

        assert!((plan.total_weight - 4_355.0).abs() < 1e-10);
        assert_eq!(plan.pax_count, 10);
        let expected = (4_355.0 + 2_250.0) / 42_000.0 * 100.0;
        assert!((plan.payload_used_percent - expected).abs() < 1e-10);
        assert_eq!(plan.positions_used, 1);
        assert!(plan.pallet("PLT-0001").is_some());
    }

    #[test]
    fn test_vehicle_blocks_positions() {
        let spec = AircraftSpec::c17();
        let mut plan = AircraftLoadPlan::new("C-17-MAIN-1", &spec, 1, Phase::Main);
        let truck = MovementItem::rolling_stock("V1")
            .with_dimensions(200.0, 96.0, 90.0)
            .with_weight(20_000.0);
        plan.vehicles.push(VehiclePlacement {
            position: Position3D {
                lateral: 0.0,
                vertical: 0.0,
                longitudinal: 100.0,
            },
            axle_weights: Vec::new(),
            item: truck,
        });
        plan.refresh_metrics();
        // 200in footprint blocks three 88in rows across two lanes
        assert_eq!(plan.positions_used, 6);
        assert_eq!(plan.blocked_positions(), 6);
        assert!((plan.vehicle_footprint_end() - 200.0).abs() < 1e-10);
    }

    #[test]
    fn test_full_length_vehicles_block_every_position() {
        let spec = AircraftSpec::c130();
        let mut plan = AircraftLoadPlan::new("C-130-MAIN-1", &spec, 1, Phase::Main);
        plan.vehicles.push(VehiclePlacement {
            position: Position3D {
                lateral: 0.0,
                vertical: 0.0,
                longitudinal: 270.0,
            },
            axle_weights: Vec::new(),
            item: MovementItem::rolling_stock("V1")
                .with_dimensions(540.0, 96.0, 90.0)
                .with_weight(20_000.0),
        });
        plan.refresh_metrics();
        // seven 88in rows touched, six positions on the airframe
        assert_eq!(plan.blocked_positions(), 6);
        assert_eq!(plan.positions_used, 6);
    }

    #[test]
    fn test_positions_used_not_clamped() {
        let spec = AircraftSpec::c130();
        let mut plan = AircraftLoadPlan::new("C-130-MAIN-1", &spec, 1, Phase::Main);
        for i in 0..7 {
            plan.pallets.push(PalletPlacement {
                pallet: pallet(&format!("PLT-{i:04}"), 500.0),
                position_index: i,
                arm: 44.0 + i as f64 * 88.0,
                is_ramp: false,
                lateral_offset: None,
            });
        }
        plan.refresh_metrics();
        assert_eq!(plan.positions_used, 7);
        assert!(plan.utilization_percent > 100.0);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Advon.to_string(), "ADVON");
        assert_eq!(Phase::Main.to_string(), "MAIN");
    }
}
