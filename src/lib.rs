//! Airlift load planning for the U-Engine ecosystem.
//!
//! Computes how heterogeneous cargo (463L pallets, rolling stock and
//! passengers) is loaded onto a fleet of transport aircraft under weight,
//! dimensional and balance limits, and in which order it goes aboard.
//!
//! # Pipeline
//!
//! 1. **`validation`**: per-item edge cases (reclassification, weight
//!    correction, items no aircraft can carry)
//! 2. **`palletization`**: First-Fit-Decreasing packing onto 463L pallets
//!    with a two-pass grid scan
//! 3. **`allocation`**: greedy multi-aircraft placement with a linear
//!    center-of-balance proxy
//! 4. **`sequence`**: First-In-Last-Out loading order per aircraft
//!
//! [`planner`] chains the stages for a raw manifest; [`split`] re-evaluates
//! hand-edited plans.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `MovementItem`, `Pallet`, `AircraftSpec`,
//!   `AircraftLoadPlan`, `AllocationResult`
//! - **`ordering`**: Load-priority rules shared by vehicles and pallets
//! - **`config`**: Planner tunables (`PlannerConfig`)
//! - **`constants`**: 463L pallet geometry and weight bands
//! - **`error`**: Hard failures for invalid call patterns
//!
//! # Example
//!
//! ```
//! use u_airlift::models::MovementItem;
//! use u_airlift::planner::plan_movement;
//! use u_airlift::sequence::calculate_loading_sequence;
//!
//! let manifest: Vec<_> = (1..=3)
//!     .map(|i| {
//!         MovementItem::palletizable(format!("CRATE-{i}"))
//!             .with_dimensions(40.0, 40.0, 40.0)
//!             .with_weight(2_000.0)
//!     })
//!     .collect();
//!
//! let result = plan_movement(&manifest, "C-17").unwrap();
//! assert_eq!(result.total_pallets, 1);
//! assert_eq!(result.load_plans[0].pallets[0].pallet.gross_weight, 6_355.0);
//!
//! let order = calculate_loading_sequence(&result.load_plans[0]);
//! assert_eq!(order.len(), 1);
//! ```
//!
//! # References
//!
//! - Johnson (1974), "Fast algorithms for bin packing"

pub mod allocation;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod ordering;
pub mod palletization;
pub mod planner;
pub mod sequence;
pub mod split;
pub mod validation;

pub use error::{Error, Result};
