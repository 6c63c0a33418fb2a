//! Pre-solve fleet sizing.
//!
//! A cheap lower bound on the aircraft count:
//! `max(⌈pallets / positions⌉, ⌈weight / max_payload⌉)`.
//! Advisory only; the solver's count is authoritative.

use serde::{Deserialize, Serialize};

use crate::models::{AircraftSpec, Pallet};

/// Lower-bound aircraft counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftEstimate {
    /// Aircraft needed to hold every pallet position.
    pub by_pallets: usize,
    /// Aircraft needed to lift the total weight.
    pub by_weight: usize,
    /// The larger of the two.
    pub minimum: usize,
}

/// Estimates the minimum number of aircraft.
///
/// # Example
/// ```
/// use u_airlift::allocation::estimate_minimum_aircraft;
/// use u_airlift::models::AircraftSpec;
///
/// let estimate = estimate_minimum_aircraft(0, 500_000.0, &AircraftSpec::c17());
/// assert_eq!(estimate.by_weight, 3);
/// ```
pub fn estimate_minimum_aircraft(
    pallet_count: usize,
    total_weight: f64,
    spec: &AircraftSpec,
) -> AircraftEstimate {
    let by_pallets = if spec.pallet_positions == 0 {
        0
    } else {
        pallet_count.div_ceil(spec.pallet_positions)
    };
    let by_weight = if spec.max_payload > 0.0 && total_weight > 0.0 {
        (total_weight / spec.max_payload).ceil() as usize
    } else {
        0
    };
    AircraftEstimate {
        by_pallets,
        by_weight,
        minimum: by_pallets.max(by_weight),
    }
}

/// Estimates from built pallets plus any non-palletized weight.
pub fn estimate_for_pallets(
    pallets: &[Pallet],
    other_weight: f64,
    spec: &AircraftSpec,
) -> AircraftEstimate {
    let weight: f64 = pallets.iter().map(|p| p.gross_weight).sum::<f64>() + other_weight;
    estimate_minimum_aircraft(pallets.len(), weight, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementItem;

    #[test]
    fn test_by_weight() {
        let est = estimate_minimum_aircraft(0, 500_000.0, &AircraftSpec::c17());
        assert_eq!(est.by_weight, 3);
        assert_eq!(est.by_pallets, 0);
        assert_eq!(est.minimum, 3);
    }

    #[test]
    fn test_by_pallets() {
        let est = estimate_minimum_aircraft(19, 10_000.0, &AircraftSpec::c17());
        assert_eq!(est.by_pallets, 2);
        assert_eq!(est.by_weight, 1);
        assert_eq!(est.minimum, 2);
    }

    #[test]
    fn test_nothing_to_move() {
        let est = estimate_minimum_aircraft(0, 0.0, &AircraftSpec::c130());
        assert_eq!(est.minimum, 0);
    }

    #[test]
    fn test_from_pallets() {
        let pallets: Vec<_> = (0..7)
            .map(|i| {
                Pallet::from_items(
                    format!("PLT-{i}"),
                    vec![MovementItem::palletizable("x").with_weight(1_000.0)],
                    false,
                )
            })
            .collect();
        let est = estimate_for_pallets(&pallets, 0.0, &AircraftSpec::c130());
        assert_eq!(est.by_pallets, 2);
        assert_eq!(est.by_weight, 1);
    }
}
