//! Airlift domain models.
//!
//! Provides the data types flowing through the planning pipeline, from
//! manifest records to finished aircraft load plans.
//!
//! # Lifecycle
//!
//! | Type | Produced by | Mutable after |
//! |------|-------------|---------------|
//! | MovementItem | Manifest / validator | Forced type correction only |
//! | Pallet | Palletization engine | Never |
//! | AircraftSpec | Catalog configuration | Never |
//! | AircraftLoadPlan | Allocation solver | Never (edits work on copies) |
//! | AllocationResult | Allocation solver | Never |

mod aircraft;
mod item;
mod pallet;
mod plan;
mod result;

pub use aircraft::{AircraftCatalog, AircraftSpec};
pub use item::{CargoType, MovementItem};
pub use pallet::{Pallet, PalletIdSequence};
pub use plan::{
    AircraftLoadPlan, PalletPlacement, PaxPlacement, Phase, Position3D, VehiclePlacement,
};
pub use result::{
    AllocationResult, AllocationSummary, ClassifiedItems, PhaseItems, PlanWarning,
    WarningSeverity,
};
