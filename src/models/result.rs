//! Allocation inputs and outputs.
//!
//! [`ClassifiedItems`] is the solver input: cargo already split into
//! ADVON and MAIN queues and by handling class. [`AllocationResult`] is
//! the sole externally consumed output; renderers and exporters read it
//! and never mutate it.

use serde::{Deserialize, Serialize};

use super::{AircraftLoadPlan, MovementItem, Phase};

/// Seriousness of a plan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningSeverity {
    /// Informational advisory.
    Info,
    /// Something was corrected or could not be placed.
    Warning,
    /// Processing of a phase stopped early.
    Error,
}

/// A recoverable condition attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWarning {
    /// Seriousness.
    pub severity: WarningSeverity,
    /// Related item, pallet or aircraft id.
    pub entity_id: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl PlanWarning {
    /// Creates an informational advisory.
    pub fn info(entity_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: WarningSeverity::Info,
            entity_id,
            message: message.into(),
        }
    }

    /// Creates a warning.
    pub fn warning(entity_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: WarningSeverity::Warning,
            entity_id,
            message: message.into(),
        }
    }

    /// Creates an error-level warning.
    pub fn error(entity_id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            severity: WarningSeverity::Error,
            entity_id,
            message: message.into(),
        }
    }
}

/// Items of one phase, split by handling class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseItems {
    /// Vehicles and oversize cargo.
    pub rolling_stock: Vec<MovementItem>,
    /// Loads already built up on pallets.
    pub prebuilt_pallets: Vec<MovementItem>,
    /// Loose cargo to palletize.
    pub loose_items: Vec<MovementItem>,
    /// Passenger groups.
    pub pax: Vec<MovementItem>,
}

impl PhaseItems {
    /// Whether the phase carries nothing.
    pub fn is_empty(&self) -> bool {
        self.rolling_stock.is_empty()
            && self.prebuilt_pallets.is_empty()
            && self.loose_items.is_empty()
            && self.pax.is_empty()
    }

    /// Adds an item to the queue matching its type.
    pub fn push(&mut self, item: MovementItem) {
        use super::CargoType;
        match item.cargo_type {
            CargoType::RollingStock => self.rolling_stock.push(item),
            CargoType::PrebuiltPallet => self.prebuilt_pallets.push(item),
            CargoType::Palletizable => self.loose_items.push(item),
            CargoType::Pax => self.pax.push(item),
        }
    }

    /// Total weight of every record (lb).
    pub fn total_weight(&self) -> f64 {
        self.iter().map(|i| i.weight).sum()
    }

    /// Iterates over every record.
    pub fn iter(&self) -> impl Iterator<Item = &MovementItem> {
        self.rolling_stock
            .iter()
            .chain(&self.prebuilt_pallets)
            .chain(&self.loose_items)
            .chain(&self.pax)
    }
}

/// Solver input: cargo pre-split into ADVON and MAIN queues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedItems {
    /// Advance echelon.
    pub advon: PhaseItems,
    /// Main body.
    pub main: PhaseItems,
}

impl ClassifiedItems {
    /// Creates empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Items of a phase.
    pub fn phase(&self, phase: Phase) -> &PhaseItems {
        match phase {
            Phase::Advon => &self.advon,
            Phase::Main => &self.main,
        }
    }

    /// Total weight of both phases (lb).
    pub fn total_weight(&self) -> f64 {
        self.advon.total_weight() + self.main.total_weight()
    }
}

/// The outcome of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Aircraft type used for every plan.
    pub aircraft_type: String,
    /// Aircraft flown in the ADVON phase.
    pub advon_aircraft: usize,
    /// Aircraft flown in the MAIN phase.
    pub main_aircraft: usize,
    /// All aircraft.
    pub total_aircraft: usize,
    /// One plan per aircraft, ADVON first.
    pub load_plans: Vec<AircraftLoadPlan>,
    /// Pallets placed.
    pub total_pallets: usize,
    /// Vehicles placed.
    pub total_rolling_stock: usize,
    /// Passengers seated.
    pub total_pax: u32,
    /// Cargo weight across all plans (lb).
    pub total_weight: f64,
    /// Passenger weight across all plans (lb).
    pub total_pax_weight: f64,
    /// Items that fit nowhere in this run.
    pub unloaded_items: Vec<MovementItem>,
    /// Items no configured aircraft can carry; excluded before solving.
    pub excluded_items: Vec<MovementItem>,
    /// Recoverable conditions, in the order they arose.
    pub warnings: Vec<PlanWarning>,
}

impl AllocationResult {
    /// Creates an empty result for an aircraft type.
    pub fn new(aircraft_type: impl Into<String>) -> Self {
        Self {
            aircraft_type: aircraft_type.into(),
            advon_aircraft: 0,
            main_aircraft: 0,
            total_aircraft: 0,
            load_plans: Vec::new(),
            total_pallets: 0,
            total_rolling_stock: 0,
            total_pax: 0,
            total_weight: 0.0,
            total_pax_weight: 0.0,
            unloaded_items: Vec::new(),
            excluded_items: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Recomputes the counts and totals from the plans.
    pub fn refresh_totals(&mut self) {
        self.advon_aircraft = self.plans_for_phase(Phase::Advon).count();
        self.main_aircraft = self.plans_for_phase(Phase::Main).count();
        self.total_aircraft = self.load_plans.len();
        self.total_pallets = self.load_plans.iter().map(|p| p.pallets.len()).sum();
        self.total_rolling_stock = self.load_plans.iter().map(|p| p.vehicles.len()).sum();
        self.total_pax = self.load_plans.iter().map(|p| p.pax_count).sum();
        self.total_weight = self.load_plans.iter().map(|p| p.total_weight).sum();
        self.total_pax_weight = self.load_plans.iter().map(|p| p.pax_weight).sum();
    }

    /// Plans of one phase.
    pub fn plans_for_phase(&self, phase: Phase) -> impl Iterator<Item = &AircraftLoadPlan> {
        self.load_plans.iter().filter(move |p| p.phase == phase)
    }

    /// Finds a plan by aircraft id.
    pub fn plan(&self, aircraft_id: &str) -> Option<&AircraftLoadPlan> {
        self.load_plans.iter().find(|p| p.id == aircraft_id)
    }

    /// Weight of the unloaded items (lb).
    pub fn unloaded_weight(&self) -> f64 {
        self.unloaded_items.iter().map(|i| i.weight).sum()
    }

    /// Whether any warning stopped a phase early.
    pub fn has_errors(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Error)
    }

    /// Whether every item was placed.
    pub fn is_complete(&self) -> bool {
        self.unloaded_items.is_empty() && self.excluded_items.is_empty()
    }

    /// Aggregate quality indicators.
    pub fn summary(&self) -> AllocationSummary {
        AllocationSummary::calculate(self)
    }
}

/// Aggregate quality indicators of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    /// Aircraft flown.
    pub aircraft: usize,
    /// Mean payload use across aircraft (%).
    pub avg_payload_percent: f64,
    /// Mean position utilization across aircraft (%).
    pub avg_utilization_percent: f64,
    /// Lowest payload use of any aircraft (%).
    pub min_payload_percent: f64,
    /// Every plan is inside its balance envelope.
    pub all_in_envelope: bool,
    /// Unloaded plus excluded items.
    pub items_left_behind: usize,
}

impl AllocationSummary {
    /// Computes the indicators from a result.
    pub fn calculate(result: &AllocationResult) -> Self {
        let plans = &result.load_plans;
        let n = plans.len();
        let (avg_payload_percent, avg_utilization_percent) = if n == 0 {
            (0.0, 0.0)
        } else {
            (
                plans.iter().map(|p| p.payload_used_percent).sum::<f64>() / n as f64,
                plans.iter().map(|p| p.utilization_percent).sum::<f64>() / n as f64,
            )
        };
        let min_payload_percent = plans
            .iter()
            .map(|p| p.payload_used_percent)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
            .unwrap_or(0.0);

        Self {
            aircraft: n,
            avg_payload_percent,
            avg_utilization_percent,
            min_payload_percent,
            all_in_envelope: plans.iter().all(|p| p.center_of_balance.in_envelope),
            items_left_behind: result.unloaded_items.len() + result.excluded_items.len(),
        }
    }
}
