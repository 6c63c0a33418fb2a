//! Planner configuration.
//!
//! Every tunable of the pipeline lives here. Defaults reproduce the
//! standard planning rules; a JSON document may override any subset of
//! fields.
//!
//! # Example
//! ```
//! use u_airlift::config::PlannerConfig;
//!
//! let config = PlannerConfig::from_json_str(r#"{ "max_aircraft_per_phase": 10 }"#).unwrap();
//! assert_eq!(config.max_aircraft_per_phase, 10);
//! assert!((config.pallet_gap_in - 4.0).abs() < 1e-10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for palletization, allocation and loading-sequence derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Aircraft cap per phase before the run stops with a warning.
    pub max_aircraft_per_phase: usize,
    /// Longitudinal gap between the rolling-stock footprint and the first pallet (in).
    pub pallet_gap_in: f64,
    /// Length of the aft ramp zone (in).
    pub ramp_zone_length_in: f64,
    /// Coarse grid step for the pallet packer (in).
    pub coarse_step_in: f64,
    /// Fine grid step used when the coarse scan finds nothing (in).
    pub fine_step_in: f64,
    /// Weight per passenger when a PAX record carries none (lb).
    pub default_pax_weight_lb: f64,
    /// Payload percentage below which a plan is flagged as underutilized.
    pub underutilization_percent: f64,
    /// Synthetic timing used by the loading-sequence calculator.
    pub loading_time: LoadingTimeModel,
}

/// Synthetic per-item loading durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadingTimeModel {
    /// Base handling time for a pallet (min).
    pub base_minutes: u32,
    /// Added per position in the sequence (min).
    pub increment_minutes: u32,
    /// Base handling time for rolling stock (min).
    pub vehicle_minutes: u32,
    /// Weight above which an item counts as heavy (lb).
    pub heavy_threshold_lb: f64,
    /// Extra time for heavy items (min).
    pub heavy_bonus_minutes: u32,
    /// Extra time for hazardous cargo (min).
    pub hazmat_bonus_minutes: u32,
}

impl Default for LoadingTimeModel {
    fn default() -> Self {
        Self {
            base_minutes: 5,
            increment_minutes: 2,
            vehicle_minutes: 10,
            heavy_threshold_lb: 8_000.0,
            heavy_bonus_minutes: 5,
            hazmat_bonus_minutes: 10,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_aircraft_per_phase: 50,
            pallet_gap_in: 4.0,
            ramp_zone_length_in: 180.0,
            coarse_step_in: 6.0,
            fine_step_in: 2.0,
            default_pax_weight_lb: 225.0,
            underutilization_percent: 25.0,
            loading_time: LoadingTimeModel::default(),
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the per-phase aircraft cap.
    pub fn with_max_aircraft_per_phase(mut self, max: usize) -> Self {
        self.max_aircraft_per_phase = max;
        self
    }

    /// Sets the rolling-stock to pallet gap.
    pub fn with_pallet_gap(mut self, gap_in: f64) -> Self {
        self.pallet_gap_in = gap_in;
        self
    }

    /// Sets the ramp zone length.
    pub fn with_ramp_zone_length(mut self, length_in: f64) -> Self {
        self.ramp_zone_length_in = length_in;
        self
    }

    /// Sets both packer grid steps.
    pub fn with_grid_steps(mut self, coarse_in: f64, fine_in: f64) -> Self {
        self.coarse_step_in = coarse_in;
        self.fine_step_in = fine_in;
        self
    }

    /// Sets the default passenger weight.
    pub fn with_default_pax_weight(mut self, weight_lb: f64) -> Self {
        self.default_pax_weight_lb = weight_lb;
        self
    }

    /// Sets the underutilization threshold.
    pub fn with_underutilization_percent(mut self, percent: f64) -> Self {
        self.underutilization_percent = percent;
        self
    }

    /// Sets the loading time model.
    pub fn with_loading_time(mut self, model: LoadingTimeModel) -> Self {
        self.loading_time = model;
        self
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_aircraft_per_phase == 0 {
            return Err(Error::InvalidConfig(
                "max_aircraft_per_phase must be at least 1".into(),
            ));
        }
        if !(self.coarse_step_in > 0.0 && self.fine_step_in > 0.0) {
            return Err(Error::InvalidConfig("grid steps must be positive".into()));
        }
        if self.fine_step_in > self.coarse_step_in {
            return Err(Error::InvalidConfig(format!(
                "fine step {} exceeds coarse step {}",
                self.fine_step_in, self.coarse_step_in
            )));
        }
        if self.pallet_gap_in < 0.0 || self.ramp_zone_length_in < 0.0 {
            return Err(Error::InvalidConfig(
                "gap and ramp zone lengths must not be negative".into(),
            ));
        }
        if self.default_pax_weight_lb <= 0.0 {
            return Err(Error::InvalidConfig(
                "default_pax_weight_lb must be positive".into(),
            ));
        }
        Ok(())
    }
}
