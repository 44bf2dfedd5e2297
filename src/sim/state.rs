//! Game state and core simulation types
//!
//! `GameState` is the single owned world value. It is only mutated by
//! `tick`, which the frame driver calls under its lock.

use serde::{Deserialize, Serialize};

use super::camera::Viewport;
use super::level::Level;
use super::player::Player;
use crate::tuning::Tuning;

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Reached the castle
    Won,
    /// Ran out of falls
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title overlay, waiting for a tap
    StartScreen,
    /// Active gameplay
    Playing,
    /// Session ended; simulation is frozen until restart
    GameOver(Outcome),
}

/// Things that happened during a tick, for observers like audio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    SessionRestarted,
    Jumped,
    /// Player touched down after being airborne
    Landed,
    CoinCollected { index: usize },
    FellOffScreen { falls: u32 },
    LevelWon,
    LevelLost,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: Level,
    pub player: Player,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Coins collected this session
    pub score: u32,
    /// Times the player dropped below the viewport
    pub fall_count: u32,
    /// Horizontal scroll, recomputed every tick
    pub camera_offset_x: f32,
    pub phase: GamePhase,
    /// Whether sessions open on the title overlay
    pub start_screen: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning, viewport: Viewport, start_screen: bool) -> Self {
        let player = Player::new(level.start);
        Self {
            level,
            player,
            tuning,
            viewport,
            score: 0,
            fall_count: 0,
            camera_offset_x: 0.0,
            phase: Self::opening_phase(start_screen),
            start_screen,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// The built-in level with default tuning and viewport
    pub fn forest() -> Self {
        Self::new(Level::forest(), Tuning::default(), Viewport::default(), true)
    }

    fn opening_phase(start_screen: bool) -> GamePhase {
        if start_screen {
            GamePhase::StartScreen
        } else {
            GamePhase::Playing
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Dismiss the start screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::StartScreen {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::SessionStarted);
            log::info!("Session started on level '{}'", self.level.name);
        }
    }

    /// Reset score, falls, player, coins and camera. Moving platforms keep
    /// their current oscillation.
    pub fn restart(&mut self) {
        self.player = Player::new(self.level.start);
        self.level.reset_coins();
        self.score = 0;
        self.fall_count = 0;
        self.camera_offset_x = 0.0;
        self.phase = Self::opening_phase(self.start_screen);
        self.events.push(GameEvent::SessionRestarted);
        log::info!("Session restarted ({:?})", self.phase);
    }

    pub(crate) fn end(&mut self, outcome: Outcome) {
        self.phase = GamePhase::GameOver(outcome);
        self.events.push(match outcome {
            Outcome::Won => GameEvent::LevelWon,
            Outcome::Lost => GameEvent::LevelLost,
        });
        log::info!(
            "Game over: {:?} (score {}, falls {})",
            outcome,
            self.score,
            self.fall_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    #[test]
    fn test_new_opens_on_start_screen() {
        let state = GameState::forest();
        assert_eq!(state.phase, GamePhase::StartScreen);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_new_without_start_screen_plays() {
        let state = GameState::new(Level::forest(), Tuning::default(), Viewport::default(), false);
        assert!(state.is_playing());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::forest();
        state.start();
        state.score = 4;
        state.fall_count = 2;
        state.camera_offset_x = 1234.0;
        state.level.coins[1].collected = true;
        state.player.pos = Vec2::new(5000.0, 300.0);
        state.player.vel = Vec2::new(10.0, -3.0);
        state.end(Outcome::Lost);

        state.restart();
        assert_eq!(state.phase, GamePhase::StartScreen);
        assert_eq!(state.score, 0);
        assert_eq!(state.fall_count, 0);
        assert_eq!(state.camera_offset_x, 0.0);
        assert_eq!(state.level.collected_count(), 0);
        assert_eq!(state.player.pos, state.level.start);
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_start_only_from_start_screen() {
        let mut state = GameState::forest();
        state.end(Outcome::Won);
        state.start();
        assert_eq!(state.phase, GamePhase::GameOver(Outcome::Won));
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::forest();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level.platforms.len(), state.level.platforms.len());
        assert_eq!(back.phase, state.phase);
    }
}
