//! Read-only world snapshot handed to the render sink each frame

use glam::Vec2;
use serde::Serialize;

use crate::sim::{AnimState, GamePhase, GameState, PlatformKind, Rect};

/// Which sprite frame to draw: animation cycle plus index within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameRef {
    pub anim: AnimState,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerSprite {
    /// Top-left of the sprite in world space
    pub origin: Vec2,
    pub frame: FrameRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformView {
    pub kind: PlatformKind,
    pub rect: Rect,
}

/// Everything the renderer needs; it never touches `GameState` directly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub camera_offset_x: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub player: PlayerSprite,
    /// Static platforms first, then moving ones
    pub platforms: Vec<PlatformView>,
    /// Top-left corners of coins still in play
    pub coins: Vec<Vec2>,
    pub coin_size: f32,
    pub goal: Rect,
    pub score: u32,
    pub fall_count: u32,
    pub phase: GamePhase,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            camera_offset_x: state.camera_offset_x,
            viewport_width: state.viewport.width,
            viewport_height: state.viewport.height,
            player: PlayerSprite {
                origin: player.sprite_origin(),
                frame: FrameRef {
                    anim: player.animation.state,
                    index: player.animation.frame_index,
                },
            },
            platforms: state
                .level
                .tagged_obstacles()
                .map(|(kind, rect)| PlatformView { kind, rect })
                .collect(),
            coins: state
                .level
                .coins
                .iter()
                .filter(|c| !c.collected)
                .map(|c| c.pos)
                .collect(),
            coin_size: state
                .level
                .coins
                .first()
                .map(|c| c.size)
                .unwrap_or(crate::consts::COIN_SIZE),
            goal: state.level.goal.rect,
            score: state.score,
            fall_count: state.fall_count,
            phase: state.phase,
        }
    }

    /// Convert a world x coordinate into screen space
    #[inline]
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.camera_offset_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Facing, Pose};

    #[test]
    fn test_capture_hides_collected_coins() {
        let mut state = GameState::forest();
        state.level.coins[0].collected = true;
        state.score = 1;
        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.coins.len(), 9);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.platforms.len(), 27);
        assert_eq!(snapshot.platforms[26].kind, PlatformKind::Oscillating);
    }

    #[test]
    fn test_capture_player_frame() {
        let state = GameState::forest();
        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.player.frame.anim.pose, Pose::Idle);
        assert_eq!(snapshot.player.frame.anim.facing, Facing::Right);
        assert_eq!(snapshot.player.origin, state.player.sprite_origin());
    }

    #[test]
    fn test_to_screen_x() {
        let mut state = GameState::forest();
        state.camera_offset_x = 500.0;
        let snapshot = RenderSnapshot::capture(&state);
        assert_eq!(snapshot.to_screen_x(700.0), 200.0);
    }
}
