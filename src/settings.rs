//! Runtime settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{GameState, Level, LevelConfig, LevelError, Viewport};
use crate::tuning::{Tuning, TuningError};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),

    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Delay between frame driver iterations
    pub frame_interval_ms: u64,
    /// Open sessions on the title overlay
    pub start_screen: bool,
    /// JSON level to load instead of the built-in forest
    pub level_path: Option<PathBuf>,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            frame_interval_ms: FRAME_INTERVAL_MS,
            start_screen: true,
            level_path: None,
            tuning: Tuning::default(),
        }
    }
}

fn read(path: &Path) -> Result<String, SettingsError> {
    std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match read(path).and_then(|json| Self::from_json(&json)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(err) => {
                log::warn!("Rejected settings {}: {}", path.display(), err);
                Err(err)
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.tuning.validate()?;
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(SettingsError::Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport_width, self.viewport_height)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// The configured level, or the built-in forest
    pub fn load_level(&self) -> Result<Level, SettingsError> {
        match &self.level_path {
            Some(path) => {
                let level = read(path).and_then(|json| -> Result<Level, SettingsError> {
                    let config = LevelConfig::from_json(&json)?;
                    Ok(Level::from_config(&config)?)
                });
                match &level {
                    Ok(level) => {
                        log::info!("Loaded level '{}' from {}", level.name, path.display())
                    }
                    Err(err) => log::warn!("Rejected level {}: {}", path.display(), err),
                }
                level
            }
            None => Ok(Level::forest()),
        }
    }

    /// A fresh game state built from these settings
    pub fn new_game(&self) -> Result<GameState, SettingsError> {
        Ok(GameState::new(
            self.load_level()?,
            self.tuning,
            self.viewport(),
            self.start_screen,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_empty_json_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.frame_interval(), Duration::from_millis(16));
        assert!(settings.start_screen);
        assert_eq!(settings.viewport(), Viewport::default());
    }

    #[test]
    fn test_overrides() {
        let json = r#"{"start_screen": false, "tuning": {"max_falls": 5}}"#;
        let settings = Settings::from_json(json).unwrap();
        let state = settings.new_game().unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.tuning.max_falls, 5);
        assert_eq!(state.tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"viewport_height": 0.0}"#),
            Err(SettingsError::Viewport { .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{"tuning": {"frame_speed": 0}}"#),
            Err(SettingsError::Tuning(TuningError::FrameSpeed))
        ));
        assert!(matches!(
            Settings::from_json("[1, 2]"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_level_file() {
        let settings = Settings {
            level_path: Some(PathBuf::from("/nonexistent/level.json")),
            ..Default::default()
        };
        assert!(matches!(settings.load_level(), Err(SettingsError::Io { .. })));
    }

    #[test]
    fn test_load_level_from_file() {
        let path = std::env::temp_dir().join(format!("fox-level-{}.json", std::process::id()));
        let config = LevelConfig {
            name: "custom".to_string(),
            ..LevelConfig::forest()
        };
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let settings = Settings {
            level_path: Some(path.clone()),
            ..Default::default()
        };
        let level = settings.load_level();
        let _ = std::fs::remove_file(&path);
        let level = level.unwrap();
        assert_eq!(level.name, "custom");
        assert_eq!(level.platforms.len(), 23);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("fox-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"tuning": {"gravity": -2.0}}"#).unwrap();
        let result = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(SettingsError::Tuning(TuningError::Gravity(_)))
        ));
    }

    #[test]
    fn test_load_level_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!("fox-bad-level-{}.json", std::process::id()));
        let mut config = LevelConfig::forest();
        config.moving_platforms[0].speed = -1.0;
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let settings = Settings {
            level_path: Some(path.clone()),
            ..Default::default()
        };
        let result = settings.load_level();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(SettingsError::Level(LevelError::NonPositiveSpeed { index: 0, .. }))
        ));
    }

    #[test]
    fn test_default_level_is_forest() {
        let level = Settings::default().load_level().unwrap();
        assert_eq!(level.name, "forest");
    }
}
