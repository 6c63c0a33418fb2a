//! Two-pass grid packer for a single pallet footprint.
//!
//! # Algorithm
//! Candidate positions are scanned row by row on a coarse grid; only when
//! no coarse position works is the scan repeated on a fine grid. Each pass
//! tries the natural orientation, then the item rotated by 90°.
//!
//! The first feasible position wins (bottom-left on the grid). This is a
//! heuristic: bounded running time, not an optimal rectangle packing.
//!
//! # Complexity
//! O((L/s)·(W/s)·k) per item for step s and k placed rectangles.

use crate::constants::{
    pallet_weight_ceiling, PALLET_MAX_HEIGHT, PALLET_USABLE_LENGTH, PALLET_USABLE_WIDTH,
};
use crate::models::MovementItem;

const EPS: f64 = 1e-9;

/// An axis-aligned rectangle on the pallet deck (in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckRect {
    /// Offset along the usable length.
    pub x: f64,
    /// Offset along the usable width.
    pub y: f64,
    /// Extent along the usable length.
    pub length: f64,
    /// Extent along the usable width.
    pub width: f64,
}

impl DeckRect {
    /// Whether the interiors of two rectangles intersect. Touching edges do not overlap.
    pub fn overlaps(&self, other: &DeckRect) -> bool {
        self.x < other.x + other.length - EPS
            && other.x < self.x + self.length - EPS
            && self.y < other.y + other.width - EPS
            && other.y < self.y + self.width - EPS
    }

    /// Plan area (in²).
    pub fn area(&self) -> f64 {
        self.length * self.width
    }
}

/// Items laid out on one pallet under construction.
#[derive(Debug, Clone)]
pub struct PalletLayout {
    deck_length: f64,
    deck_width: f64,
    coarse_step: f64,
    fine_step: f64,
    placed: Vec<DeckRect>,
    weight: f64,
    height: f64,
}

impl PalletLayout {
    /// An empty 463L usable deck with the given grid steps.
    pub fn new(coarse_step: f64, fine_step: f64) -> Self {
        Self {
            deck_length: PALLET_USABLE_LENGTH,
            deck_width: PALLET_USABLE_WIDTH,
            coarse_step,
            fine_step,
            placed: Vec::new(),
            weight: 0.0,
            height: 0.0,
        }
    }

    /// Tries to place an item, committing it on success.
    ///
    /// Fails when the item is taller than a pallet allows, when the new
    /// tallest height would lower the weight ceiling below the cumulative
    /// weight, or when no overlap-free position exists in either orientation.
    pub fn try_place(&mut self, item: &MovementItem) -> Option<DeckRect> {
        if item.height > PALLET_MAX_HEIGHT {
            return None;
        }
        let new_height = self.height.max(item.height);
        if self.weight + item.weight > pallet_weight_ceiling(new_height) + EPS {
            return None;
        }

        let rect = self.find_position(item.length, item.width)?;
        self.placed.push(rect);
        self.weight += item.weight;
        self.height = new_height;
        Some(rect)
    }

    fn find_position(&self, length: f64, width: f64) -> Option<DeckRect> {
        let square = (length - width).abs() < EPS;
        for step in [self.coarse_step, self.fine_step] {
            if let Some(rect) = self.scan(length, width, step) {
                return Some(rect);
            }
            if !square {
                if let Some(rect) = self.scan(width, length, step) {
                    return Some(rect);
                }
            }
        }
        None
    }

    fn scan(&self, length: f64, width: f64, step: f64) -> Option<DeckRect> {
        if length > self.deck_length + EPS || width > self.deck_width + EPS {
            return None;
        }
        let mut y = 0.0;
        while y + width <= self.deck_width + EPS {
            let mut x = 0.0;
            while x + length <= self.deck_length + EPS {
                let candidate = DeckRect {
                    x,
                    y,
                    length,
                    width,
                };
                if self.placed.iter().all(|r| !r.overlaps(&candidate)) {
                    return Some(candidate);
                }
                x += step;
            }
            y += step;
        }
        None
    }

    /// Rectangles placed so far.
    pub fn placed(&self) -> &[DeckRect] {
        &self.placed
    }

    /// Cumulative item weight (lb).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Tallest item height (in).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fraction of the usable deck covered.
    pub fn area_utilization(&self) -> f64 {
        let covered: f64 = self.placed.iter().map(DeckRect::area).sum();
        covered / (self.deck_length * self.deck_width)
    }

    /// Whether nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(l: f64, w: f64, h: f64, weight: f64) -> MovementItem {
        MovementItem::palletizable("i")
            .with_dimensions(l, w, h)
            .with_weight(weight)
    }

    #[test]
    fn test_three_cubes_fit() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        for _ in 0..3 {
            assert!(layout.try_place(&item(40.0, 40.0, 40.0, 2_000.0)).is_some());
        }
        let rects = layout.placed();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
        assert!((layout.weight() - 6_000.0).abs() < 1e-10);
    }

    #[test]
    fn test_rotation_used() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        // 84 x 104 only fits rotated
        let rect = layout.try_place(&item(84.0, 104.0, 20.0, 100.0)).unwrap();
        assert!((rect.length - 104.0).abs() < 1e-10);
        assert!((rect.width - 84.0).abs() < 1e-10);
    }

    #[test]
    fn test_fine_grid_fallback() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        layout.try_place(&item(52.0, 84.0, 20.0, 100.0)).unwrap();
        // coarse positions stop at x=48; only the fine grid reaches x=52
        let rect = layout.try_place(&item(52.0, 84.0, 20.0, 100.0)).unwrap();
        assert!((rect.x - 52.0).abs() < 1e-10);
    }

    #[test]
    fn test_weight_ceiling_tightens_with_height() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        assert!(layout.try_place(&item(40.0, 40.0, 50.0, 7_500.0)).is_some());
        // A 98in item drops the ceiling to 8,000lb
        assert!(layout.try_place(&item(20.0, 20.0, 98.0, 600.0)).is_none());
        assert!(layout.try_place(&item(20.0, 20.0, 90.0, 600.0)).is_some());
    }

    #[test]
    fn test_too_tall_rejected() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        assert!(layout.try_place(&item(20.0, 20.0, 101.0, 10.0)).is_none());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_full_deck() {
        let mut layout = PalletLayout::new(6.0, 2.0);
        assert!(layout.try_place(&item(104.0, 84.0, 30.0, 100.0)).is_some());
        assert!(layout.try_place(&item(2.0, 2.0, 2.0, 1.0)).is_none());
        assert!((layout.area_utilization() - 1.0).abs() < 1e-10);
    }
}
