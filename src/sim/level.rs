//! Level geometry and level configuration
//!
//! Static platforms, vertically oscillating platforms, coins and the goal
//! castle. A `LevelConfig` is plain serde data; `Level` is the validated
//! runtime form owned by `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Rect;
use crate::consts::*;

/// Errors raised while loading or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{kind} #{index} has a malformed rectangle: {rect:?}")]
    MalformedRect {
        kind: &'static str,
        index: usize,
        rect: Rect,
    },

    #[error("moving platform #{index} has min_y {min_y} above max_y {max_y}")]
    InvertedBounds { index: usize, min_y: f32, max_y: f32 },

    #[error("moving platform #{index} has non-positive speed {speed}")]
    NonPositiveSpeed { index: usize, speed: f32 },

    #[error("moving platform #{index} starts at y={y}, outside [{min_y}, {max_y}]")]
    StartOutOfBounds {
        index: usize,
        y: f32,
        min_y: f32,
        max_y: f32,
    },

    #[error("coin size must be positive, got {0}")]
    InvalidCoinSize(f32),

    #[error("player start {0:?} is not finite")]
    InvalidStart(Vec2),
}

/// How a platform behaves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    Oscillating,
}

/// A static platform. Never changes after level construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

/// Oscillation heading, encoded as a sign on the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Heading {
    /// +1, toward larger y (down the screen)
    #[default]
    Down,
    /// -1, toward smaller y
    Up,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Down => 1.0,
            Heading::Up => -1.0,
        }
    }
}

/// A platform that bounces vertically between two bounds at constant speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub min_y: f32,
    pub max_y: f32,
    /// Units per tick, always > 0
    pub speed: f32,
    pub heading: Heading,
}

impl MovingPlatform {
    pub fn new(rect: Rect, min_y: f32, max_y: f32, speed: f32) -> Self {
        Self {
            rect,
            min_y,
            max_y,
            speed,
            heading: Heading::Down,
        }
    }

    /// Advance one tick. The position is pinned to the bound it reaches and
    /// the heading flips there, so `min_y <= y <= max_y` holds afterward.
    pub fn update(&mut self) {
        self.rect.y += self.speed * self.heading.sign();
        if self.rect.y >= self.max_y && self.heading == Heading::Down {
            self.rect.y = self.max_y;
            self.heading = Heading::Up;
        } else if self.rect.y <= self.min_y && self.heading == Heading::Up {
            self.rect.y = self.min_y;
            self.heading = Heading::Down;
        }
    }
}

/// A collectible coin with a square footprint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// The castle; touching it wins the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
}

/// Serialized moving platform definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub speed: f32,
}

fn default_coin_size() -> f32 {
    COIN_SIZE
}

fn default_start() -> Vec2 {
    Vec2::new(PLAYER_START_X, PLAYER_START_Y)
}

/// Designer-authored level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    #[serde(default = "default_start")]
    pub start: Vec2,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformDef>,
    #[serde(default)]
    pub coins: Vec<Vec2>,
    #[serde(default = "default_coin_size")]
    pub coin_size: f32,
    pub goal: Rect,
}

impl LevelConfig {
    /// Parse a JSON level and validate it
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let config: LevelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), LevelError> {
        if !self.start.is_finite() {
            return Err(LevelError::InvalidStart(self.start));
        }
        if !(self.coin_size.is_finite() && self.coin_size > 0.0) {
            return Err(LevelError::InvalidCoinSize(self.coin_size));
        }
        for (index, rect) in self.platforms.iter().enumerate() {
            if !rect.is_well_formed() {
                return Err(LevelError::MalformedRect {
                    kind: "platform",
                    index,
                    rect: *rect,
                });
            }
        }
        for (index, def) in self.moving_platforms.iter().enumerate() {
            let rect = Rect::new(def.x, def.y, def.width, def.height);
            if !rect.is_well_formed() {
                return Err(LevelError::MalformedRect {
                    kind: "moving platform",
                    index,
                    rect,
                });
            }
            // NaN bounds fail this comparison too
            if !(def.min_y <= def.max_y) {
                return Err(LevelError::InvertedBounds {
                    index,
                    min_y: def.min_y,
                    max_y: def.max_y,
                });
            }
            if !(def.speed > 0.0 && def.speed.is_finite()) {
                return Err(LevelError::NonPositiveSpeed {
                    index,
                    speed: def.speed,
                });
            }
            if def.y < def.min_y || def.y > def.max_y {
                return Err(LevelError::StartOutOfBounds {
                    index,
                    y: def.y,
                    min_y: def.min_y,
                    max_y: def.max_y,
                });
            }
        }
        for (index, pos) in self.coins.iter().enumerate() {
            let rect = Rect::new(pos.x, pos.y, self.coin_size, self.coin_size);
            if !rect.is_well_formed() {
                return Err(LevelError::MalformedRect {
                    kind: "coin",
                    index,
                    rect,
                });
            }
        }
        if !self.goal.is_well_formed() {
            return Err(LevelError::MalformedRect {
                kind: "goal",
                index: 0,
                rect: self.goal,
            });
        }
        Ok(())
    }

    /// The built-in forest level
    pub fn forest() -> Self {
        let platforms = [
            (0.0, 800.0, 800.0),
            (400.0, 670.0, 300.0),
            (900.0, 500.0, 300.0),
            (1400.0, 350.0, 300.0),
            (1800.0, 700.0, 200.0),
            (2100.0, 600.0, 150.0),
            (2300.0, 500.0, 250.0),
            (2400.0, 700.0, 220.0),
            (3000.0, 550.0, 300.0),
            (3300.0, 650.0, 150.0),
            (3600.0, 750.0, 200.0),
            (3900.0, 600.0, 210.0),
            (4200.0, 450.0, 120.0),
            (4500.0, 350.0, 200.0),
            (4800.0, 500.0, 300.0),
            (5100.0, 650.0, 150.0),
            (5400.0, 750.0, 200.0),
            (5700.0, 600.0, 250.0),
            (6000.0, 450.0, 150.0),
            (6300.0, 350.0, 200.0),
            (6600.0, 500.0, 300.0),
            (6900.0, 650.0, 150.0),
            (7100.0, 700.0, 130.0),
        ]
        .into_iter()
        .map(|(x, y, w)| Rect::new(x, y, w, 50.0))
        .collect();

        let moving_platforms = [
            (2800.0, 700.0, 200.0, 650.0, 750.0, 2.0),
            (4000.0, 500.0, 150.0, 450.0, 550.0, 2.5),
            (5500.0, 600.0, 250.0, 550.0, 650.0, 1.8),
            (7350.0, 550.0, 200.0, 500.0, 600.0, 1.8),
        ]
        .into_iter()
        .map(|(x, y, width, min_y, max_y, speed)| MovingPlatformDef {
            x,
            y,
            width,
            height: 50.0,
            min_y,
            max_y,
            speed,
        })
        .collect();

        let coins = [
            (200.0, 750.0),
            (500.0, 600.0),
            (950.0, 450.0),
            (1450.0, 300.0),
            (2600.0, 680.0),
            (3100.0, 530.0),
            (3600.0, 720.0),
            (4200.0, 430.0),
            (4800.0, 480.0),
            (5400.0, 580.0),
        ]
        .into_iter()
        .map(|(x, y)| Vec2::new(x, y))
        .collect();

        Self {
            name: "forest".to_string(),
            start: default_start(),
            platforms,
            moving_platforms,
            coins,
            coin_size: COIN_SIZE,
            goal: Rect::new(7600.0, 150.0, GOAL_WIDTH, GOAL_HEIGHT),
        }
    }
}

/// Validated runtime level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub start: Vec2,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
}

impl Level {
    /// Build a runtime level from a config, validating it first
    pub fn from_config(config: &LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// The built-in forest level
    pub fn forest() -> Self {
        Self::build(&LevelConfig::forest())
    }

    fn build(config: &LevelConfig) -> Self {
        Self {
            name: config.name.clone(),
            start: config.start,
            platforms: config
                .platforms
                .iter()
                .map(|&rect| Platform { rect })
                .collect(),
            moving_platforms: config
                .moving_platforms
                .iter()
                .map(|d| {
                    MovingPlatform::new(
                        Rect::new(d.x, d.y, d.width, d.height),
                        d.min_y,
                        d.max_y,
                        d.speed,
                    )
                })
                .collect(),
            coins: config
                .coins
                .iter()
                .map(|&pos| Coin::new(pos, config.coin_size))
                .collect(),
            goal: Goal { rect: config.goal },
        }
    }

    /// Every solid surface in resolution order: static platforms first,
    /// then moving platforms, each in list order.
    pub fn obstacles(&self) -> impl Iterator<Item = Rect> + Clone + '_ {
        self.platforms
            .iter()
            .map(|p| p.rect)
            .chain(self.moving_platforms.iter().map(|p| p.rect))
    }

    /// Same order as `obstacles`, tagged with the platform kind
    pub fn tagged_obstacles(&self) -> impl Iterator<Item = (PlatformKind, Rect)> + '_ {
        self.platforms
            .iter()
            .map(|p| (PlatformKind::Static, p.rect))
            .chain(
                self.moving_platforms
                    .iter()
                    .map(|p| (PlatformKind::Oscillating, p.rect)),
            )
    }

    pub fn update_moving_platforms(&mut self) {
        for platform in &mut self.moving_platforms {
            platform.update();
        }
    }

    /// Clear every coin's collected flag
    pub fn reset_coins(&mut self) {
        for coin in &mut self.coins {
            coin.collected = false;
        }
    }

    pub fn collected_count(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }
}
