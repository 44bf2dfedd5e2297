//! Horizontal scrolling camera

use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Visible area in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A surface that hasn't been sized yet
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Scroll so the player sits mid-screen, never left of the level start
#[inline]
pub fn camera_offset(player_x: f32, viewport_width: f32) -> f32 {
    (player_x - viewport_width / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamped_at_level_start() {
        assert_eq!(camera_offset(100.0, 1920.0), 0.0);
        assert_eq!(camera_offset(960.0, 1920.0), 0.0);
        assert_eq!(camera_offset(1000.0, 1920.0), 40.0);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0.0, 1080.0).is_empty());
        assert!(!Viewport::default().is_empty());
    }

    proptest! {
        #[test]
        fn prop_offset_formula(x in -10_000.0f32..10_000.0, width in 0.0f32..4000.0) {
            let offset = camera_offset(x, width);
            prop_assert!(offset >= 0.0);
            prop_assert_eq!(offset, (x - width / 2.0).max(0.0));
        }
    }
}
