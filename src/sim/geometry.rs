//! Axis-aligned rectangle shared by all level entities
//!
//! World units, origin at the top-left, y grows downward.

use serde::{Deserialize, Serialize};

use crate::aabb_overlap;

/// An axis-aligned rectangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap on both axes (shared edges don't count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(
            (self.x, self.y, self.width, self.height),
            (other.x, other.y, other.width, other.height),
        )
    }

    /// True when the horizontal spans overlap, ignoring y
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }

    /// Non-negative, finite dimensions
    pub fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_overlaps_is_strict() {
        let floor = Rect::new(0.0, 800.0, 800.0, 50.0);
        let standing = Rect::new(100.0, 708.0, 64.0, 92.0);
        assert!(!standing.overlaps(&floor));

        let sunk = Rect::new(100.0, 709.0, 64.0, 92.0);
        assert!(sunk.overlaps(&floor));
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, -1.0, 5.0).is_well_formed());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 5.0).is_well_formed());
    }
}
