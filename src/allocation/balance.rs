//! Center-of-balance proxy.
//!
//! The balance point is the weight-averaged longitudinal arm of the cargo
//! (pallet arm = start + half pallet length; vehicle arm = footprint
//! center), normalized to `[0, 1]` over the cargo floor length and then
//! mapped linearly into the aircraft's CoB envelope:
//!
//! ```text
//! percent = cob_min + normalized × (cob_max − cob_min)
//! ```
//!
//! This is a planning proxy, not a datum-referenced moment calculation.
//! The envelope test is simply `cob_min ≤ percent ≤ cob_max`.

use serde::{Deserialize, Serialize};

use crate::models::{AircraftSpec, PalletPlacement, VehiclePlacement};

const EPS: f64 = 1e-9;

/// Balance figures for one aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CenterOfBalance {
    /// Weighted mean arm of the cargo (in from the forward end).
    pub arm: f64,
    /// Arm as a fraction of the cargo floor length.
    pub normalized: f64,
    /// Balance point in the envelope's % MAC scale.
    pub percent_mac: f64,
    /// Fuselage station corresponding to `percent_mac` (LEMAC + % × MAC).
    pub station: f64,
    /// Whether `percent_mac` lies within the envelope.
    pub in_envelope: bool,
}

/// Computes the balance point of placed cargo.
///
/// A plan without cargo weight balances at the envelope midpoint.
pub fn center_of_balance(
    pallets: &[PalletPlacement],
    vehicles: &[VehiclePlacement],
    spec: &AircraftSpec,
) -> CenterOfBalance {
    let pallet_moment: f64 = pallets.iter().map(|p| p.arm * p.pallet.gross_weight).sum();
    let vehicle_moment: f64 = vehicles
        .iter()
        .map(|v| v.position.longitudinal * v.item.weight)
        .sum();
    let weight: f64 = pallets.iter().map(|p| p.pallet.gross_weight).sum::<f64>()
        + vehicles.iter().map(|v| v.item.weight).sum::<f64>();

    let arm = if weight > EPS {
        (pallet_moment + vehicle_moment) / weight
    } else {
        spec.cargo_length / 2.0
    };
    from_arm(arm, spec)
}

/// Balance figures for a given cargo arm.
pub fn from_arm(arm: f64, spec: &AircraftSpec) -> CenterOfBalance {
    let normalized = if spec.cargo_length > 0.0 {
        (arm / spec.cargo_length).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let percent_mac = remap_to_envelope(normalized, spec);
    CenterOfBalance {
        arm,
        normalized,
        percent_mac,
        station: spec.lemac_station + percent_mac / 100.0 * spec.mac_length,
        in_envelope: in_envelope(percent_mac, spec),
    }
}

/// Maps a `[0, 1]` position onto the envelope's percent scale.
#[inline]
pub fn remap_to_envelope(normalized: f64, spec: &AircraftSpec) -> f64 {
    spec.cob_min_percent + normalized * (spec.cob_max_percent - spec.cob_min_percent)
}

/// Cargo arm whose balance point is `percent` (inverse of the remap).
pub fn arm_for_percent(percent: f64, spec: &AircraftSpec) -> f64 {
    let span = spec.cob_max_percent - spec.cob_min_percent;
    let normalized = if span.abs() > EPS {
        (percent - spec.cob_min_percent) / span
    } else {
        0.5
    };
    normalized * spec.cargo_length
}

/// Whether a percentage lies within the envelope.
#[inline]
pub fn in_envelope(percent: f64, spec: &AircraftSpec) -> bool {
    percent >= spec.cob_min_percent - EPS && percent <= spec.cob_max_percent + EPS
}
