//! Player kinematics and animation state machine
//!
//! `pos.y` is the top of the hitbox, not the top of the sprite. The sprite
//! is drawn at `sprite_origin()`, which is offset from the hitbox.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Body pose, chosen from the motion state each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pose {
    Idle,
    Run,
    Jump,
}

impl Pose {
    /// Number of frames in this pose's cycle
    pub fn frame_count(self) -> usize {
        match self {
            Pose::Idle => IDLE_FRAMES,
            Pose::Run => RUN_FRAMES,
            Pose::Jump => JUMP_FRAMES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Which animation is playing (pose × facing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimState {
    pub pose: Pose,
    pub facing: Facing,
}

/// Animation playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub state: AnimState,
    pub frame_index: usize,
    pub frame_timer: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            state: AnimState {
                pose: Pose::Idle,
                facing: Facing::Right,
            },
            frame_index: 0,
            frame_timer: 0,
        }
    }
}

impl Animation {
    /// Switch to `next` (restarting the cycle if it differs) and advance the
    /// frame timer by one tick.
    pub fn advance(&mut self, next: AnimState, frame_speed: u32) {
        if next != self.state {
            self.state = next;
            self.frame_index = 0;
            self.frame_timer = 0;
        }

        self.frame_timer += 1;
        if self.frame_timer >= frame_speed {
            self.frame_timer = 0;
            self.frame_index = (self.frame_index + 1) % self.state.pose.frame_count();
        }
    }
}

/// The player-controlled fox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// x = sprite left edge, y = hitbox top
    pub pos: Vec2,
    pub vel: Vec2,
    /// True whenever no platform supported the player this tick
    pub is_falling: bool,
    pub facing: Facing,
    pub animation: Animation,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            vel: Vec2::ZERO,
            is_falling: true,
            facing: Facing::Right,
            animation: Animation::default(),
        }
    }

    /// Advance kinematics and animation by one tick
    pub fn update(&mut self, tuning: &Tuning) {
        self.pos.x += self.vel.x;
        if self.vel.x > 0.0 {
            self.facing = Facing::Right;
        } else if self.vel.x < 0.0 {
            self.facing = Facing::Left;
        }

        // Applied even while grounded; the collision pass re-pins the player
        self.vel.y += tuning.gravity;
        self.pos.y += self.vel.y;

        let pose = if self.is_falling {
            Pose::Jump
        } else if self.vel.x != 0.0 {
            Pose::Run
        } else {
            Pose::Idle
        };
        let next = AnimState {
            pose,
            facing: self.facing,
        };
        self.animation.advance(next, tuning.frame_speed);
    }

    pub fn move_left(&mut self, tuning: &Tuning) {
        self.vel.x = -tuning.move_speed;
    }

    pub fn move_right(&mut self, tuning: &Tuning) {
        self.vel.x = tuning.move_speed;
    }

    pub fn stop(&mut self) {
        self.vel.x = 0.0;
    }

    /// Jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self, tuning: &Tuning) -> bool {
        if self.is_falling {
            return false;
        }
        self.vel.y = tuning.jump_power;
        self.is_falling = true;
        true
    }

    /// Snap the hitbox bottom onto a surface and stop vertical motion
    pub fn land_on(&mut self, surface_top: f32) {
        self.pos.y = surface_top - HITBOX_HEIGHT;
        self.vel.y = 0.0;
        self.is_falling = false;
    }

    /// Put the player back at `start` at rest
    pub fn respawn(&mut self, start: Vec2) {
        self.pos = start;
        self.vel = Vec2::ZERO;
        self.is_falling = true;
    }

    #[inline]
    pub fn hitbox_left(&self) -> f32 {
        self.pos.x + HITBOX_OFFSET_X
    }

    #[inline]
    pub fn hitbox_right(&self) -> f32 {
        self.hitbox_left() + HITBOX_WIDTH
    }

    #[inline]
    pub fn hitbox_top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn hitbox_bottom(&self) -> f32 {
        self.pos.y + HITBOX_HEIGHT
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.hitbox_left(), self.hitbox_top(), HITBOX_WIDTH, HITBOX_HEIGHT)
    }

    /// Align the hitbox right edge with `edge_x`
    pub fn set_hitbox_right(&mut self, edge_x: f32) {
        self.pos.x = edge_x - HITBOX_WIDTH - HITBOX_OFFSET_X;
    }

    /// Align the hitbox left edge with `edge_x`
    pub fn set_hitbox_left(&mut self, edge_x: f32) {
        self.pos.x = edge_x - HITBOX_OFFSET_X;
    }

    /// Top-left corner where the sprite is drawn
    pub fn sprite_origin(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + SPRITE_DRAW_OFFSET_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded_player() -> Player {
        let mut player = Player::new(Vec2::new(100.0, 100.0));
        player.land_on(800.0);
        player
    }

    #[test]
    fn test_hitbox_centered_under_sprite() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        assert_eq!(player.hitbox_left(), 132.0);
        assert_eq!(player.hitbox_right(), 196.0);
        assert_eq!(player.hitbox_top(), 100.0);
        assert_eq!(player.hitbox_bottom(), 192.0);
        assert_eq!(player.sprite_origin(), Vec2::new(100.0, 102.0));
    }

    #[test]
    fn test_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(0.0, 0.0));
        player.update(&tuning);
        player.update(&tuning);
        assert!((player.vel.y - 2.4).abs() < 1e-5);
        assert!((player.pos.y - 3.6).abs() < 1e-5);
    }

    #[test]
    fn test_facing_follows_velocity_sign() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        player.move_left(&tuning);
        player.update(&tuning);
        assert_eq!(player.facing, Facing::Left);

        player.stop();
        player.update(&tuning);
        assert_eq!(player.facing, Facing::Left);

        player.move_right(&tuning);
        player.update(&tuning);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let mut player = grounded_player();
        assert!(player.jump(&tuning));
        assert!(player.is_falling);
        assert_eq!(player.vel.y, JUMP_POWER);

        player.vel.y = 3.0;
        assert!(!player.jump(&tuning));
        assert_eq!(player.vel.y, 3.0);
    }

    #[test]
    fn test_land_on_snaps_bottom() {
        let mut player = Player::new(Vec2::new(0.0, 650.5));
        player.vel.y = 14.0;
        player.land_on(800.0);
        assert_eq!(player.hitbox_bottom(), 800.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.is_falling);
    }

    #[test]
    fn test_pose_selection() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO);
        player.update(&tuning);
        assert_eq!(player.animation.state.pose, Pose::Jump);

        let mut player = grounded_player();
        player.update(&tuning);
        assert_eq!(player.animation.state.pose, Pose::Idle);

        player.move_left(&tuning);
        player.update(&tuning);
        assert_eq!(
            player.animation.state,
            AnimState {
                pose: Pose::Run,
                facing: Facing::Left
            }
        );
    }

    #[test]
    fn test_frame_advances_and_wraps() {
        let mut anim = Animation::default();
        let run = AnimState {
            pose: Pose::Run,
            facing: Facing::Right,
        };
        // Switch tick counts toward the first frame
        for _ in 0..FRAME_SPEED {
            anim.advance(run, FRAME_SPEED);
        }
        assert_eq!(anim.frame_index, 1);

        for _ in 0..(FRAME_SPEED as usize * (RUN_FRAMES - 1)) {
            anim.advance(run, FRAME_SPEED);
        }
        assert_eq!(anim.frame_index, 0);
    }

    #[test]
    fn test_pose_change_resets_cycle() {
        let mut anim = Animation::default();
        let idle = anim.state;
        for _ in 0..(FRAME_SPEED * 3 + 2) {
            anim.advance(idle, FRAME_SPEED);
        }
        assert_eq!(anim.frame_index, 3);

        let jump = AnimState {
            pose: Pose::Jump,
            facing: Facing::Right,
        };
        anim.advance(jump, FRAME_SPEED);
        assert_eq!(anim.state, jump);
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.frame_timer, 1);
    }

    proptest! {
        #[test]
        fn prop_jump_noop_while_falling(vy in -50.0f32..50.0, x in -1000.0f32..1000.0) {
            let tuning = Tuning::default();
            let mut player = Player::new(Vec2::new(x, 0.0));
            player.vel.y = vy;
            prop_assert!(!player.jump(&tuning));
            prop_assert_eq!(player.vel.y, vy);
            prop_assert!(player.is_falling);
        }

        #[test]
        fn prop_land_on_is_exact(surface in 0.0f32..2000.0, y in -500.0f32..2000.0) {
            let mut player = Player::new(Vec2::new(0.0, y));
            player.land_on(surface);
            prop_assert!((player.hitbox_bottom() - surface).abs() < 1e-3);
            prop_assert!(!player.is_falling);
        }
    }
}
