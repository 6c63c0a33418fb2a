//! Edge-case validation of manifest items.
//!
//! Checks one movement item against the pallet envelope and the physical
//! envelopes of every configured aircraft. Rules are independent and
//! accumulate; the validator never rejects an item silently.
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | height > 100in | cannot palletize, forced rolling stock |
//! | height > largest cargo height | cannot load |
//! | height > smaller cargo height | largest aircraft only |
//! | width > usable pallet width | cannot palletize |
//! | width > ramp width of every aircraft | cannot load |
//! | width > ramp width of the smaller aircraft only | largest aircraft only |
//! | weight missing or ≤ 0 | corrected to 1lb, warning |
//! | non-positive dimension (non-PAX) | error, item excluded |
//! | hazmat | advisory warning |
//! | weight > per-position limit | forced rolling stock |
//! | weight > smaller payload / larger payload | largest aircraft only / cannot load |
//!
//! A manifest-level pass ([`validate_manifest`]) additionally catches
//! duplicate identifiers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{
    MIN_ITEM_WEIGHT, PALLET_LENGTH, PALLET_MAX_HEIGHT, PALLET_USABLE_LENGTH, PALLET_USABLE_WIDTH,
    PALLET_WIDTH,
};
use crate::models::{AircraftCatalog, CargoType, ClassifiedItems, MovementItem};

/// Outcome of validating one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCaseReport {
    /// No errors and at least one aircraft can carry the item.
    pub is_valid: bool,
    /// The item may go on a 463L pallet.
    pub can_palletize: bool,
    /// The item must travel as rolling stock.
    pub must_be_rolling_stock: bool,
    /// Only the largest configured airframe (the C-17 in the standard
    /// catalog) can carry the item.
    pub requires_c17_only: bool,
    /// No configured aircraft can carry the item.
    pub cannot_load: bool,
    /// Corrections and advisories.
    pub warnings: Vec<String>,
    /// Problems that exclude the item.
    pub errors: Vec<String>,
    /// Copy of the item with corrections applied.
    pub adjusted_item: MovementItem,
}

/// Validates items against a catalog.
///
/// # Example
/// ```
/// use u_airlift::models::{AircraftCatalog, MovementItem};
/// use u_airlift::validation::EdgeCaseValidator;
///
/// let catalog = AircraftCatalog::standard();
/// let validator = EdgeCaseValidator::new(&catalog);
/// let crate_item = MovementItem::palletizable("C1")
///     .with_dimensions(40.0, 40.0, 40.0)
///     .with_weight(0.0);
///
/// let report = validator.validate(&crate_item);
/// assert!(report.is_valid);
/// assert_eq!(report.adjusted_item.weight, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeCaseValidator<'a> {
    catalog: &'a AircraftCatalog,
    pax_weight: f64,
}

impl<'a> EdgeCaseValidator<'a> {
    /// Creates a validator over a catalog.
    pub fn new(catalog: &'a AircraftCatalog) -> Self {
        Self {
            catalog,
            pax_weight: 225.0,
        }
    }

    /// Sets the per-passenger weight substituted for PAX records without one.
    pub fn with_pax_weight(mut self, weight_lb: f64) -> Self {
        self.pax_weight = weight_lb;
        self
    }

    /// Validates one item.
    pub fn validate(&self, item: &MovementItem) -> EdgeCaseReport {
        let mut report = EdgeCaseReport {
            is_valid: true,
            can_palletize: true,
            must_be_rolling_stock: false,
            requires_c17_only: false,
            cannot_load: false,
            warnings: Vec::new(),
            errors: Vec::new(),
            adjusted_item: item.clone(),
        };

        self.check_weight(item, &mut report);

        if item.is_pax() {
            report.can_palletize = false;
            if item.pax_count == 0 {
                report
                    .errors
                    .push(format!("PAX record '{}' has no passengers", item.id));
            }
            return finish(report);
        }

        for (name, value) in [
            ("length", item.length),
            ("width", item.width),
            ("height", item.height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                report.errors.push(format!(
                    "Item '{}' has invalid {name}: {value}",
                    item.id
                ));
            }
        }
        if !report.errors.is_empty() {
            report.can_palletize = false;
            return finish(report);
        }

        if item.hazmat {
            report.warnings.push(format!(
                "Item '{}' is hazardous; segregation applies at loading",
                item.id
            ));
        }

        self.check_height(item, &mut report);
        self.check_width(item, &mut report);
        self.check_length(item, &mut report);
        self.check_load_weight(&mut report);

        if !report.can_palletize && item.cargo_type != CargoType::RollingStock {
            report.must_be_rolling_stock = true;
        }
        if report.must_be_rolling_stock && report.adjusted_item.cargo_type != CargoType::RollingStock
        {
            report.warnings.push(format!(
                "Item '{}' reclassified from {:?} to rolling stock",
                item.id, report.adjusted_item.cargo_type
            ));
            report.adjusted_item.cargo_type = CargoType::RollingStock;
        }

        finish(report)
    }

    fn check_weight(&self, item: &MovementItem, report: &mut EdgeCaseReport) {
        if item.weight.is_finite() && item.weight > 0.0 {
            return;
        }
        let corrected = if item.is_pax() && item.pax_count > 0 {
            item.pax_count as f64 * self.pax_weight
        } else {
            MIN_ITEM_WEIGHT
        };
        report.warnings.push(format!(
            "Item '{}' weight {} corrected to {corrected}lb",
            item.id, item.weight
        ));
        report.adjusted_item.weight = corrected;
    }

    fn check_height(&self, item: &MovementItem, report: &mut EdgeCaseReport) {
        if item.height > PALLET_MAX_HEIGHT {
            report.can_palletize = false;
            report.must_be_rolling_stock = true;
            report.warnings.push(format!(
                "Item '{}' height {}in exceeds pallet maximum {}in",
                item.id, item.height, PALLET_MAX_HEIGHT
            ));
        }
        if let Some(large) = self.catalog.largest() {
            if item.height > large.cargo_height {
                report.cannot_load = true;
                report.errors.push(format!(
                    "Item '{}' height {}in exceeds every aircraft's cargo height",
                    item.id, item.height
                ));
                return;
            }
        }
        if let Some(small) = self.catalog.smallest() {
            if item.height > small.cargo_height {
                report.requires_c17_only = true;
            }
        }
    }

    fn check_width(&self, item: &MovementItem, report: &mut EdgeCaseReport) {
        let fits = if item.cargo_type == CargoType::PrebuiltPallet {
            fits_footprint(item, PALLET_WIDTH, PALLET_LENGTH)
        } else {
            fits_footprint(item, PALLET_USABLE_LENGTH, PALLET_USABLE_WIDTH)
        };
        if !fits {
            report.can_palletize = false;
            report.warnings.push(format!(
                "Item '{}' footprint {}x{}in does not fit a pallet",
                item.id, item.length, item.width
            ));
        }

        if let Some(large) = self.catalog.largest() {
            if item.width > large.ramp_clearance_width {
                report.cannot_load = true;
                report.errors.push(format!(
                    "Item '{}' width {}in exceeds every aircraft's ramp width",
                    item.id, item.width
                ));
                return;
            }
        }
        if let Some(small) = self.catalog.smallest() {
            if item.width > small.ramp_clearance_width {
                report.requires_c17_only = true;
            }
        }
    }

    fn check_length(&self, item: &MovementItem, report: &mut EdgeCaseReport) {
        if let Some(large) = self.catalog.largest() {
            if item.length > large.cargo_length {
                report.cannot_load = true;
                report.errors.push(format!(
                    "Item '{}' length {}in exceeds every aircraft's cargo floor",
                    item.id, item.length
                ));
                return;
            }
        }
        if let Some(small) = self.catalog.smallest() {
            if item.length > small.cargo_length {
                report.requires_c17_only = true;
            }
        }
    }

    fn check_load_weight(&self, report: &mut EdgeCaseReport) {
        let weight = report.adjusted_item.weight;
        let id = report.adjusted_item.id.clone();
        let (Some(large), Some(small)) = (self.catalog.largest(), self.catalog.smallest()) else {
            return;
        };
        if weight > large.per_position_limit {
            report.can_palletize = false;
            report.must_be_rolling_stock = true;
            report.warnings.push(format!(
                "Item '{id}' weight {weight}lb exceeds the {}lb position limit",
                large.per_position_limit
            ));
        }
        if weight > large.max_payload {
            report.cannot_load = true;
            report.errors.push(format!(
                "Item '{id}' weight {weight}lb exceeds every aircraft's payload"
            ));
        } else if weight > small.max_payload {
            report.requires_c17_only = true;
        }
    }
}

fn fits_footprint(item: &MovementItem, max_long: f64, max_short: f64) -> bool {
    (item.length <= max_long && item.width <= max_short)
        || (item.width <= max_long && item.length <= max_short)
}

fn finish(mut report: EdgeCaseReport) -> EdgeCaseReport {
    report.is_valid = report.errors.is_empty() && !report.cannot_load;
    report
}

/// Validates one item with the default passenger weight.
pub fn validate_item(item: &MovementItem, catalog: &AircraftCatalog) -> EdgeCaseReport {
    EdgeCaseValidator::new(catalog).validate(item)
}

/// Splits items into ADVON and MAIN queues by handling class.
pub fn classify_items(items: impl IntoIterator<Item = MovementItem>) -> ClassifiedItems {
    let mut classified = ClassifiedItems::new();
    for item in items {
        if item.advon {
            classified.advon.push(item);
        } else {
            classified.main.push(item);
        }
    }
    classified
}

/// Manifest-level validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A manifest-level validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of manifest errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// An item has an empty ID.
    MissingId,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Checks manifest-wide integrity: every item has a unique, non-empty ID.
pub fn validate_manifest(items: &[MovementItem]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (idx, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Manifest line {idx} has no item ID"),
            ));
            continue;
        }
        if !ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate item ID: {}", item.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
