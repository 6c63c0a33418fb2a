//! End-to-end movement planning.
//!
//! Runs the whole pipeline on a raw manifest:
//!
//! 1. Manifest integrity (missing or duplicate ids) → warnings
//! 2. Per-item edge-case validation → corrections, warnings, exclusions
//! 3. Classification into ADVON / MAIN queues
//! 4. Palletization and aircraft allocation
//!
//! Items no configured aircraft can carry are returned in
//! [`AllocationResult::excluded_items`]; items that merely did not fit in
//! this run end up in [`AllocationResult::unloaded_items`].

use tracing::{debug, instrument};

use crate::allocation::AllocationSolver;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{AircraftCatalog, AllocationResult, MovementItem, PlanWarning};
use crate::validation::{classify_items, validate_manifest, EdgeCaseValidator};

/// Validates, classifies and allocates a manifest.
///
/// # Example
/// ```
/// use u_airlift::models::MovementItem;
/// use u_airlift::planner::MovementPlanner;
///
/// let manifest = vec![
///     MovementItem::rolling_stock("HMMWV")
///         .with_dimensions(180.0, 86.0, 72.0)
///         .with_weight(5_900.0),
///     MovementItem::palletizable("TOOLS")
///         .with_dimensions(48.0, 40.0, 36.0)
///         .with_weight(800.0),
///     MovementItem::pax("SQUAD", 12),
/// ];
/// let result = MovementPlanner::new().plan(&manifest, "C-17").unwrap();
/// assert_eq!(result.total_aircraft, 1);
/// assert_eq!(result.total_pax, 12);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct MovementPlanner {
    catalog: AircraftCatalog,
    config: PlannerConfig,
}

impl MovementPlanner {
    /// Creates a planner over the standard catalog with default settings.
    pub fn new() -> Self {
        Self {
            catalog: AircraftCatalog::standard(),
            config: PlannerConfig::default(),
        }
    }

    /// Sets the aircraft catalog.
    pub fn with_catalog(mut self, catalog: AircraftCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the planner configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Plans a manifest onto aircraft of one type.
    ///
    /// # Errors
    /// Unknown aircraft type or invalid configuration.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn plan(&self, items: &[MovementItem], aircraft_type: &str) -> Result<AllocationResult> {
        self.config.validate()?;
        self.catalog.get(aircraft_type)?;

        let mut warnings = Vec::new();
        if let Err(errors) = validate_manifest(items) {
            warnings.extend(
                errors
                    .into_iter()
                    .map(|e| PlanWarning::warning(None, e.message)),
            );
        }

        let validator =
            EdgeCaseValidator::new(&self.catalog).with_pax_weight(self.config.default_pax_weight_lb);
        let mut accepted = Vec::with_capacity(items.len());
        let mut excluded = Vec::new();
        for item in items {
            let report = validator.validate(item);
            let id = Some(item.id.clone());
            warnings.extend(
                report
                    .warnings
                    .iter()
                    .map(|w| PlanWarning::warning(id.clone(), w.clone())),
            );
            if report.is_valid {
                accepted.push(report.adjusted_item);
                continue;
            }
            let reason = if report.errors.is_empty() {
                "no configured aircraft can carry it".to_string()
            } else {
                report.errors.join("; ")
            };
            warnings.push(PlanWarning::warning(
                id,
                format!("Item '{}' excluded: {reason}", item.id),
            ));
            excluded.push(report.adjusted_item);
        }
        debug!(
            accepted = accepted.len(),
            excluded = excluded.len(),
            "manifest validated"
        );

        let classified = classify_items(accepted);
        let mut result = AllocationSolver::new()
            .with_catalog(self.catalog.clone())
            .with_config(self.config.clone())
            .solve(&classified, aircraft_type)?;

        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        result.excluded_items = excluded;
        Ok(result)
    }
}

impl Default for MovementPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Plans a manifest with the standard catalog and default configuration.
pub fn plan_movement(items: &[MovementItem], aircraft_type: &str) -> Result<AllocationResult> {
    MovementPlanner::new().plan(items, aircraft_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CargoType, Phase};

    #[test]
    fn test_excluded_distinct_from_unloaded() {
        let manifest = vec![
            MovementItem::palletizable("OK")
                .with_dimensions(40.0, 40.0, 40.0)
                .with_weight(500.0),
            MovementItem::rolling_stock("GIANT")
                .with_dimensions(300.0, 250.0, 120.0)
                .with_weight(20_000.0),
        ];
        let result = plan_movement(&manifest, "C-17").unwrap();
        assert_eq!(result.excluded_items.len(), 1);
        assert_eq!(result.excluded_items[0].id, "GIANT");
        assert!(result.unloaded_items.is_empty());
        assert_eq!(result.total_pallets, 1);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_vehicle_over_ramp_clearance_is_unloaded_not_excluded() {
        let manifest = vec![MovementItem::rolling_stock("MAST")
            .with_dimensions(200.0, 90.0, 145.0)
            .with_weight(10_000.0)];
        let result = plan_movement(&manifest, "C-17").unwrap();
        assert!(result.excluded_items.is_empty());
        assert_eq!(result.unloaded_items.len(), 1);
        assert_eq!(result.unloaded_items[0].id, "MAST");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("ramp clearance")));
    }

    #[test]
    fn test_tall_loose_item_becomes_vehicle() {
        let manifest = vec![MovementItem::palletizable("TALL")
            .with_dimensions(60.0, 60.0, 105.0)
            .with_weight(2_000.0)];
        let result = plan_movement(&manifest, "C-17").unwrap();
        let plan = &result.load_plans[0];
        assert_eq!(plan.vehicles.len(), 1);
        assert_eq!(plan.vehicles[0].item.cargo_type, CargoType::RollingStock);
        assert!(plan.pallets.is_empty());
    }

    #[test]
    fn test_zero_weight_corrected() {
        let manifest = vec![MovementItem::palletizable("Z")
            .with_dimensions(20.0, 20.0, 20.0)
            .with_weight(0.0)];
        let result = plan_movement(&manifest, "C-130").unwrap();
        let pallet = &result.load_plans[0].pallets[0].pallet;
        assert!((pallet.net_weight - 1.0).abs() < 1e-10);
        assert!(result.warnings.iter().any(|w| w.entity_id.as_deref() == Some("Z")));
    }

    #[test]
    fn test_duplicate_ids_warned() {
        let item = MovementItem::palletizable("DUP")
            .with_dimensions(20.0, 20.0, 20.0)
            .with_weight(100.0);
        let result = plan_movement(&[item.clone(), item], "C-130").unwrap();
        assert!(result.warnings[0].message.contains("Duplicate"));
        assert_eq!(result.load_plans[0].pallets[0].pallet.item_count(), 2);
    }

    #[test]
    fn test_advon_flag_routes_phase() {
        let manifest = vec![
            MovementItem::palletizable("A")
                .with_dimensions(20.0, 20.0, 20.0)
                .with_weight(100.0)
                .with_advon(true),
            MovementItem::palletizable("M")
                .with_dimensions(20.0, 20.0, 20.0)
                .with_weight(100.0),
        ];
        let result = plan_movement(&manifest, "C-130").unwrap();
        assert_eq!(result.load_plans[0].phase, Phase::Advon);
        assert_eq!(result.load_plans[1].phase, Phase::Main);
    }

    #[test]
    fn test_unknown_type_fails_fast() {
        assert!(plan_movement(&[], "KC-135").is_err());
    }
}
