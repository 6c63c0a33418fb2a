//! Aircraft capacity profiles.
//!
//! An [`AircraftSpec`] is static configuration describing one airframe's
//! cargo compartment. Stations are measured in inches from the forward
//! end of the cargo floor (coordinate 0) toward the ramp.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::PALLET_WIDTH;
use crate::error::{Error, Result};

/// Static capacity profile for one aircraft type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftSpec {
    /// Catalog key (e.g. `C-17`).
    pub name: String,
    /// Usable cargo floor length including the ramp (in).
    pub cargo_length: f64,
    /// Cargo compartment width (in).
    pub cargo_width: f64,
    /// Cargo compartment height (in).
    pub cargo_height: f64,
    /// Maximum payload (lb).
    pub max_payload: f64,
    /// Weight limit of a main-deck pallet position (lb).
    pub per_position_limit: f64,
    /// Weight limit of a ramp pallet position (lb).
    pub ramp_position_limit: f64,
    /// Clear width through the ramp opening (in).
    pub ramp_clearance_width: f64,
    /// Clear height through the ramp opening (in).
    pub ramp_clearance_height: f64,
    /// Total pallet positions, ramp included.
    pub pallet_positions: usize,
    /// Pallet positions on the ramp.
    pub ramp_positions: usize,
    /// Passenger seats available with cargo aboard.
    pub seat_capacity: u32,
    /// Forward limit of the balance envelope (% MAC).
    pub cob_min_percent: f64,
    /// Aft limit of the balance envelope (% MAC).
    pub cob_max_percent: f64,
    /// Station of the leading edge of the mean aerodynamic chord (in).
    pub lemac_station: f64,
    /// Mean aerodynamic chord length (in).
    pub mac_length: f64,
}

impl AircraftSpec {
    /// Boeing C-17A Globemaster III.
    pub fn c17() -> Self {
        Self {
            name: "C-17".into(),
            cargo_length: 1_056.0,
            cargo_width: 216.0,
            cargo_height: 148.0,
            max_payload: 170_900.0,
            per_position_limit: 10_355.0,
            ramp_position_limit: 7_500.0,
            ramp_clearance_width: 216.0,
            ramp_clearance_height: 142.0,
            pallet_positions: 18,
            ramp_positions: 2,
            seat_capacity: 102,
            cob_min_percent: 16.0,
            cob_max_percent: 40.0,
            lemac_station: 869.7,
            mac_length: 309.5,
        }
    }

    /// Lockheed C-130H Hercules.
    pub fn c130() -> Self {
        Self {
            name: "C-130".into(),
            cargo_length: 540.0,
            cargo_width: 123.0,
            cargo_height: 108.0,
            max_payload: 42_000.0,
            per_position_limit: 10_355.0,
            ramp_position_limit: 4_664.0,
            ramp_clearance_width: 119.0,
            ramp_clearance_height: 102.0,
            pallet_positions: 6,
            ramp_positions: 1,
            seat_capacity: 92,
            cob_min_percent: 15.0,
            cob_max_percent: 30.0,
            lemac_station: 494.5,
            mac_length: 164.5,
        }
    }

    /// Pallets that fit side by side across the floor (at least one).
    pub fn pallet_lanes(&self) -> usize {
        ((self.cargo_width / PALLET_WIDTH).floor() as usize).max(1)
    }

    /// Midpoint of the balance envelope (% MAC).
    pub fn cob_midpoint_percent(&self) -> f64 {
        (self.cob_min_percent + self.cob_max_percent) / 2.0
    }

    /// Checks the profile for values the solver cannot work with.
    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("cargo_length", self.cargo_length),
            ("cargo_width", self.cargo_width),
            ("cargo_height", self.cargo_height),
            ("max_payload", self.max_payload),
            ("per_position_limit", self.per_position_limit),
            ("ramp_position_limit", self.ramp_position_limit),
            ("ramp_clearance_width", self.ramp_clearance_width),
            ("ramp_clearance_height", self.ramp_clearance_height),
            ("mac_length", self.mac_length),
        ];
        for (field, value) in dims {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidCatalog(format!(
                    "{}: {field} must be positive, got {value}",
                    self.name
                )));
            }
        }
        if self.cob_min_percent >= self.cob_max_percent {
            return Err(Error::InvalidCatalog(format!(
                "{}: CoB envelope min {} must be below max {}",
                self.name, self.cob_min_percent, self.cob_max_percent
            )));
        }
        if self.ramp_positions > self.pallet_positions {
            return Err(Error::InvalidCatalog(format!(
                "{}: ramp positions exceed total positions",
                self.name
            )));
        }
        Ok(())
    }
}

/// Table of known aircraft profiles keyed by type name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftCatalog {
    specs: BTreeMap<String, AircraftSpec>,
}

impl AircraftCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog: C-17 and C-130.
    pub fn standard() -> Self {
        Self::new()
            .with_spec(AircraftSpec::c17())
            .with_spec(AircraftSpec::c130())
    }

    /// Loads a catalog from a JSON array of profiles.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let specs: Vec<AircraftSpec> = serde_json::from_str(json)?;
        if specs.is_empty() {
            return Err(Error::InvalidCatalog("catalog is empty".into()));
        }
        let mut catalog = Self::new();
        for spec in specs {
            spec.validate()?;
            catalog = catalog.with_spec(spec);
        }
        Ok(catalog)
    }

    /// Adds or replaces a profile.
    pub fn with_spec(mut self, spec: AircraftSpec) -> Self {
        self.specs.insert(spec.name.clone(), spec);
        self
    }

    /// Looks up a profile by type name.
    pub fn get(&self, aircraft_type: &str) -> Result<&AircraftSpec> {
        self.specs
            .get(aircraft_type)
            .ok_or_else(|| Error::UnknownAircraftType(aircraft_type.to_string()))
    }

    /// The profile with the greatest payload.
    pub fn largest(&self) -> Option<&AircraftSpec> {
        self.specs
            .values()
            .max_by(|a, b| a.max_payload.total_cmp(&b.max_payload))
    }

    /// The profile with the smallest payload.
    pub fn smallest(&self) -> Option<&AircraftSpec> {
        self.specs
            .values()
            .min_by(|a, b| a.max_payload.total_cmp(&b.max_payload))
    }

    /// All profiles in key order.
    pub fn specs(&self) -> impl Iterator<Item = &AircraftSpec> {
        self.specs.values()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalog holds no profiles.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
