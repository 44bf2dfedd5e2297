//! HUD and screen overlays derived from a snapshot
//!
//! Pure text/layout decisions; the render target does the drawing.

use super::snapshot::RenderSnapshot;
use crate::sim::GamePhase;

/// Background scrolls at this fraction of the camera speed
pub const PARALLAX_FACTOR: f32 = 0.3;

/// Full-screen overlay shown on top of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Title,
    GameOver,
}

impl Overlay {
    pub fn heading(self) -> &'static str {
        match self {
            Overlay::Title => "FOX ADVENTURE",
            Overlay::GameOver => "GAME OVER",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Overlay::Title => "Tap to Start",
            Overlay::GameOver => "Tap to Retry",
        }
    }
}

/// Screen-fixed elements for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub overlay: Option<Overlay>,
    /// Screen x of the first background tile
    pub background_x: f32,
}

impl Hud {
    pub fn from_snapshot(snapshot: &RenderSnapshot) -> Self {
        let overlay = match snapshot.phase {
            GamePhase::StartScreen => Some(Overlay::Title),
            GamePhase::GameOver(_) => Some(Overlay::GameOver),
            GamePhase::Playing => None,
        };
        Self {
            score_text: format!("Score: {}", snapshot.score),
            overlay,
            background_x: background_offset(snapshot.camera_offset_x),
        }
    }
}

/// Screen x where the tiled background starts
#[inline]
pub fn background_offset(camera_offset_x: f32) -> f32 {
    -(camera_offset_x * PARALLAX_FACTOR)
}
