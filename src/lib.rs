//! Fox Adventure - a side-scrolling 2D platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, session state)
//! - `renderer`: Read-only render snapshot and render-target contract
//! - `driver`: Fixed-cadence frame driver thread
//! - `settings`: Runtime configuration
//! - `tuning`: Data-driven physics values

pub mod driver;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, GameHandle};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Frame driver delay between iterations (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;

    /// Downward acceleration applied every tick (units/tick²)
    pub const GRAVITY: f32 = 1.2;
    /// Vertical velocity set by a jump (negative = up)
    pub const JUMP_POWER: f32 = -20.0;
    /// Horizontal speed while a move command is held (units/tick)
    pub const MOVE_SPEED: f32 = 10.0;

    /// Visual sprite bounding box (square)
    pub const SPRITE_SIZE: f32 = 128.0;
    /// Source sprites are 64px, scaled up to SPRITE_SIZE
    pub const SPRITE_SCALE: f32 = SPRITE_SIZE / 64.0;
    pub const HITBOX_WIDTH: f32 = 32.0 * SPRITE_SCALE;
    pub const HITBOX_HEIGHT: f32 = 46.0 * SPRITE_SCALE;
    /// Vertical padding above the hitbox inside the sprite
    pub const HITBOX_OFFSET_Y: f32 = 18.0 * SPRITE_SCALE;
    /// Horizontal inset that centers the hitbox under the sprite
    pub const HITBOX_OFFSET_X: f32 = (SPRITE_SIZE - HITBOX_WIDTH) / 2.0;
    /// Visual correction between hitbox top and sprite draw origin
    pub const SPRITE_DRAW_OFFSET_Y: f32 = -(HITBOX_OFFSET_Y / 2.0) + 20.0;

    /// Ticks each animation frame stays on screen
    pub const FRAME_SPEED: u32 = 5;
    pub const IDLE_FRAMES: usize = 8;
    pub const RUN_FRAMES: usize = 6;
    pub const JUMP_FRAMES: usize = 8;

    /// Respawn point for the player
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 100.0;
    /// Off-screen drops allowed before game over
    pub const MAX_FALLS: u32 = 3;

    /// Coin square footprint
    pub const COIN_SIZE: f32 = 40.0;
    /// Castle (goal) footprint
    pub const GOAL_WIDTH: f32 = 300.0;
    pub const GOAL_HEIGHT: f32 = 550.0;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;
}

/// Strict AABB overlap between two rectangles given as (x, y, w, h).
///
/// Edges that merely touch do not overlap.
#[inline]
pub fn aabb_overlap(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 < b.0 + b.2 && a.0 + a.2 > b.0 && a.1 < b.1 + b.3 && a.1 + a.3 > b.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hitbox_smaller_than_sprite() {
        assert!(consts::HITBOX_WIDTH < consts::SPRITE_SIZE);
        assert!(consts::HITBOX_HEIGHT < consts::SPRITE_SIZE);
        assert_eq!(consts::HITBOX_OFFSET_X, 32.0);
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = (0.0, 0.0, 10.0, 10.0);
        assert!(!aabb_overlap(a, (10.0, 0.0, 10.0, 10.0)));
        assert!(!aabb_overlap(a, (0.0, 10.0, 10.0, 10.0)));
        assert!(aabb_overlap(a, (9.9, 9.9, 10.0, 10.0)));
    }
}
