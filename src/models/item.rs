//! Movement item model.
//!
//! A movement item is one line of a deployment manifest: a vehicle, a
//! pre-built pallet, a loose piece of cargo, or a group of passengers.
//! Dimensions are in inches and weights in pounds.

use serde::{Deserialize, Serialize};

use crate::constants::mentions_weapons;

/// Handling class of a movement item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CargoType {
    /// Wheeled or tracked cargo driven or winched onto the floor.
    RollingStock,
    /// Cargo already built up on a 463L pallet.
    PrebuiltPallet,
    /// Loose cargo to be consolidated onto pallets.
    Palletizable,
    /// Passengers.
    Pax,
}

/// One cargo or passenger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementItem {
    /// Unique item identifier.
    pub id: String,
    /// Free-text description (used for weapons detection).
    pub description: String,
    /// Length along the longest horizontal axis (in).
    pub length: f64,
    /// Width (in).
    pub width: f64,
    /// Height (in).
    pub height: f64,
    /// Weight (lb). For passengers, the weight of the whole group.
    pub weight: f64,
    /// Handling class.
    pub cargo_type: CargoType,
    /// Hazardous materials flag.
    pub hazmat: bool,
    /// Belongs to the advance echelon.
    pub advon: bool,
    /// Index of the route stop where the item is offloaded. `None` = final destination.
    pub destination_stop: Option<u32>,
    /// Per-axle weights for rolling stock (lb).
    pub axle_weights: Vec<f64>,
    /// Number of passengers represented (PAX items only).
    pub pax_count: u32,
}

impl MovementItem {
    /// Creates an item with the given type and no dimensions.
    pub fn new(id: impl Into<String>, cargo_type: CargoType) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            length: 0.0,
            width: 0.0,
            height: 0.0,
            weight: 0.0,
            cargo_type,
            hazmat: false,
            advon: false,
            destination_stop: None,
            axle_weights: Vec::new(),
            pax_count: 0,
        }
    }

    /// Creates a loose, palletizable item.
    pub fn palletizable(id: impl Into<String>) -> Self {
        Self::new(id, CargoType::Palletizable)
    }

    /// Creates a pre-built pallet.
    pub fn prebuilt_pallet(id: impl Into<String>) -> Self {
        Self::new(id, CargoType::PrebuiltPallet)
    }

    /// Creates a rolling-stock item.
    pub fn rolling_stock(id: impl Into<String>) -> Self {
        Self::new(id, CargoType::RollingStock)
    }

    /// Creates a passenger group.
    pub fn pax(id: impl Into<String>, count: u32) -> Self {
        let mut item = Self::new(id, CargoType::Pax);
        item.pax_count = count;
        item
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets length, width and height.
    pub fn with_dimensions(mut self, length: f64, width: f64, height: f64) -> Self {
        self.length = length;
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the hazmat flag.
    pub fn with_hazmat(mut self, hazmat: bool) -> Self {
        self.hazmat = hazmat;
        self
    }

    /// Sets the ADVON flag.
    pub fn with_advon(mut self, advon: bool) -> Self {
        self.advon = advon;
        self
    }

    /// Sets the destination stop.
    pub fn with_destination_stop(mut self, stop: u32) -> Self {
        self.destination_stop = Some(stop);
        self
    }

    /// Sets the axle weights.
    pub fn with_axle_weights(mut self, axles: Vec<f64>) -> Self {
        self.axle_weights = axles;
        self
    }

    /// Plan-view area (in²).
    #[inline]
    pub fn footprint_area(&self) -> f64 {
        self.length * self.width
    }

    /// Volume (in³).
    #[inline]
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// The longer of the two horizontal sides.
    #[inline]
    pub fn longer_side(&self) -> f64 {
        self.length.max(self.width)
    }

    /// Whether the description marks weapons or ordnance.
    pub fn is_weapons(&self) -> bool {
        mentions_weapons(&self.description) || mentions_weapons(&self.id)
    }

    /// Whether this record represents passengers.
    #[inline]
    pub fn is_pax(&self) -> bool {
        self.cargo_type == CargoType::Pax
    }
}
