//! Data-driven physics values
//!
//! Defaults match `consts`; a settings file can override any field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TuningError {
    #[error("gravity must be positive, got {0}")]
    Gravity(f32),

    #[error("jump_power must be negative, got {0}")]
    JumpPower(f32),

    #[error("move_speed must be positive, got {0}")]
    MoveSpeed(f32),

    #[error("frame_speed must be at least 1")]
    FrameSpeed,

    #[error("max_falls must be at least 1")]
    MaxFalls,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity after a jump (negative = up)
    pub jump_power: f32,
    /// Horizontal speed for move commands
    pub move_speed: f32,
    /// Ticks per animation frame
    pub frame_speed: u32,
    /// Off-screen drops before game over
    pub max_falls: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            move_speed: MOVE_SPEED,
            frame_speed: FRAME_SPEED,
            max_falls: MAX_FALLS,
        }
    }
}

impl Tuning {
    /// Reject values that would break the simulation's assumptions
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(TuningError::Gravity(self.gravity));
        }
        if !(self.jump_power.is_finite() && self.jump_power < 0.0) {
            return Err(TuningError::JumpPower(self.jump_power));
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(TuningError::MoveSpeed(self.move_speed));
        }
        if self.frame_speed == 0 {
            return Err(TuningError::FrameSpeed);
        }
        if self.max_falls == 0 {
            return Err(TuningError::MaxFalls);
        }
        Ok(())
    }
}
