//! Physical constants for 463L pallets and cargo handling.
//!
//! All lengths are in inches, all weights in pounds.

/// Full 463L pallet length along the fuselage (in).
pub const PALLET_LENGTH: f64 = 88.0;

/// Full 463L pallet width across the fuselage (in).
pub const PALLET_WIDTH: f64 = 108.0;

/// Usable footprint length after tie-down rails (in).
pub const PALLET_USABLE_LENGTH: f64 = 104.0;

/// Usable footprint width after tie-down rails (in).
pub const PALLET_USABLE_WIDTH: f64 = 84.0;

/// Tare weight of a pallet with nets (lb).
pub const PALLET_TARE: f64 = 355.0;

/// Maximum build-up height on a pallet (in).
pub const PALLET_MAX_HEIGHT: f64 = 100.0;

/// Height at or below which the full weight ceiling applies (in).
pub const PALLET_TALL_THRESHOLD: f64 = 96.0;

/// Net weight ceiling for loads up to [`PALLET_TALL_THRESHOLD`] (lb).
pub const PALLET_MAX_WEIGHT: f64 = 10_000.0;

/// Net weight ceiling for loads taller than [`PALLET_TALL_THRESHOLD`] (lb).
pub const PALLET_MAX_WEIGHT_TALL: f64 = 8_000.0;

/// Weight substituted for missing or non-positive item weights (lb).
pub const MIN_ITEM_WEIGHT: f64 = 1.0;

/// Keywords marking weapons or ordnance cargo, matched case-insensitively.
pub const WEAPONS_KEYWORDS: &[&str] = &[
    "weapon",
    "ordnance",
    "ammo",
    "ammunition",
    "munition",
    "missile",
    "rocket",
    "bomb",
    "explosive",
];

/// Net weight ceiling for a pallet whose tallest item is `height` inches.
#[inline]
pub fn pallet_weight_ceiling(height: f64) -> f64 {
    if height <= PALLET_TALL_THRESHOLD {
        PALLET_MAX_WEIGHT
    } else {
        PALLET_MAX_WEIGHT_TALL
    }
}

/// Whether free text names weapons or ordnance.
pub fn mentions_weapons(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    WEAPONS_KEYWORDS.iter().any(|k| lower.contains(k))
}
