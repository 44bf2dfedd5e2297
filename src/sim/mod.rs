//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one frame)
//! - Stable iteration order (level list order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use camera::{Viewport, camera_offset};
pub use collision::{Contacts, is_landing, resolve, resolve_horizontal, resolve_vertical};
pub use geometry::Rect;
pub use level::{
    Coin, Goal, Heading, Level, LevelConfig, LevelError, MovingPlatform, MovingPlatformDef,
    Platform, PlatformKind,
};
pub use player::{AnimState, Animation, Facing, Player, Pose};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::{Command, TickInput, collect_coins, tick};
