//! Load-priority rules and the ordering engine.
//!
//! Vehicles and pallets are both loaded "priority cargo first, then
//! heaviest first". Instead of repeating that comparator per cargo kind,
//! each kind implements [`CargoUnit`] (a priority predicate plus a weight
//! extractor) and a single [`LoadOrder`] sorts any of them.
//!
//! # Score Convention
//! **Lower score = loaded earlier**, as with classic dispatching rules.
//!
//! ```
//! use u_airlift::models::MovementItem;
//! use u_airlift::ordering::LoadOrder;
//!
//! let mut vehicles = vec![
//!     MovementItem::rolling_stock("truck").with_weight(20_000.0),
//!     MovementItem::rolling_stock("loader").with_description("Munitions loader").with_weight(8_000.0),
//! ];
//! LoadOrder::weapons_then_weight().sort(&mut vehicles);
//! assert_eq!(vehicles[0].id, "loader");
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{MovementItem, Pallet};

/// Score returned by a load rule. Lower = earlier.
pub type RuleScore = f64;

/// Anything the allocation solver places as a unit.
pub trait CargoUnit {
    /// Identifier, used for deterministic tie-breaking.
    fn unit_id(&self) -> &str;
    /// Whether the unit belongs to the priority class (weapons/ordnance).
    fn is_priority(&self) -> bool;
    /// Weight used for ordering (lb).
    fn load_weight(&self) -> f64;
}

impl CargoUnit for MovementItem {
    fn unit_id(&self) -> &str {
        &self.id
    }

    fn is_priority(&self) -> bool {
        self.is_weapons()
    }

    fn load_weight(&self) -> f64 {
        self.weight
    }
}

impl CargoUnit for Pallet {
    fn unit_id(&self) -> &str {
        &self.id
    }

    fn is_priority(&self) -> bool {
        self.is_weapons()
    }

    fn load_weight(&self) -> f64 {
        self.gross_weight
    }
}

/// A rule scoring one cargo unit.
pub trait LoadRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Scores a unit; lower loads earlier.
    fn evaluate(&self, unit: &dyn CargoUnit) -> RuleScore;
}

/// Weapons and ordnance before everything else.
#[derive(Debug, Clone, Copy)]
pub struct WeaponsFirst;

impl LoadRule for WeaponsFirst {
    fn name(&self) -> &'static str {
        "WEAPONS_FIRST"
    }

    fn evaluate(&self, unit: &dyn CargoUnit) -> RuleScore {
        if unit.is_priority() {
            0.0
        } else {
            1.0
        }
    }
}

/// Heaviest units first.
#[derive(Debug, Clone, Copy)]
pub struct HeaviestFirst;

impl LoadRule for HeaviestFirst {
    fn name(&self) -> &'static str {
        "HEAVIEST_FIRST"
    }

    fn evaluate(&self, unit: &dyn CargoUnit) -> RuleScore {
        -unit.load_weight()
    }
}

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    Stable,
    /// Lexicographic by unit id.
    ById,
}

/// Sequential rule chain: later rules only decide ties of earlier ones.
#[derive(Clone)]
pub struct LoadOrder {
    rules: Vec<Arc<dyn LoadRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl LoadOrder {
    /// Creates an empty chain (keeps input order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
            epsilon: 1e-9,
        }
    }

    /// The solver's ordering: weapons first, then heaviest first.
    pub fn weapons_then_weight() -> Self {
        Self::new().with_rule(WeaponsFirst).with_rule(HeaviestFirst)
    }

    /// Appends a rule.
    pub fn with_rule<R: LoadRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Compares two units.
    pub fn compare<T: CargoUnit>(&self, a: &T, b: &T) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ById => a.unit_id().cmp(b.unit_id()),
        }
    }

    /// Sorts units in place, earliest first. The sort is stable.
    pub fn sort<T: CargoUnit>(&self, units: &mut [T]) {
        units.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for LoadOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for LoadOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadOrder")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
