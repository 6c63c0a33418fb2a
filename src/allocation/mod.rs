//! Aircraft allocation.
//!
//! - [`AllocationSolver`]: fills a sequence of aircraft with vehicles, pallets and passengers
//! - [`balance`]: center-of-balance proxy and envelope test
//! - [`estimate`]: pre-solve minimum-aircraft sizing

pub mod balance;
pub mod estimate;
mod solver;

pub use balance::{center_of_balance, CenterOfBalance};
pub use estimate::{estimate_minimum_aircraft, AircraftEstimate};
pub use solver::{solve_aircraft_allocation, AllocationSolver};
