//! Fixed timestep simulation tick
//!
//! Core game loop step that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::camera::camera_offset;
use super::collision::resolve;
use super::state::{GameEvent, GamePhase, GameState, Outcome};

/// Abstract commands from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    StopHorizontal,
    Jump,
    /// Dismiss the start screen, or restart from game over
    StartOrAdvanceScreen,
    Restart,
}

/// Commands queued since the previous tick, applied in order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

fn apply_command(state: &mut GameState, command: Command) {
    match command {
        Command::StartOrAdvanceScreen => match state.phase {
            GamePhase::StartScreen => state.start(),
            GamePhase::GameOver(_) => state.restart(),
            GamePhase::Playing => {}
        },
        Command::Restart => state.restart(),
        // Movement only applies during play
        _ if !state.is_playing() => {}
        Command::MoveLeft => state.player.move_left(&state.tuning),
        Command::MoveRight => state.player.move_right(&state.tuning),
        Command::StopHorizontal => state.player.stop(),
        Command::Jump => {
            if state.player.jump(&state.tuning) {
                state.events.push(GameEvent::Jumped);
            }
        }
    }
}

/// Collect every uncollected coin overlapping the player hitbox.
/// Returns how many were picked up.
pub fn collect_coins(state: &mut GameState) -> u32 {
    let hitbox = state.player.hitbox();
    let mut picked = 0;
    for (index, coin) in state.level.coins.iter_mut().enumerate() {
        if !coin.collected && hitbox.overlaps(&coin.rect()) {
            coin.collected = true;
            picked += 1;
            state.events.push(GameEvent::CoinCollected { index });
            log::debug!("Coin {} collected", index);
        }
    }
    state.score += picked;
    picked
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for &command in &input.commands {
        apply_command(state, command);
    }

    // Frozen outside of play, or before the surface has a size
    if !state.is_playing() || state.viewport.is_empty() {
        return;
    }

    state.time_ticks += 1;

    state.level.update_moving_platforms();

    let was_falling = state.player.is_falling;
    state.player.update(&state.tuning);

    let contacts = resolve(&mut state.player, state.level.obstacles());
    if contacts.ground.is_some() && was_falling {
        state.events.push(GameEvent::Landed);
    }
    if let Some(wall) = contacts.wall {
        log::trace!("Blocked by platform at x={}", wall.x);
    }

    collect_coins(state);

    if state.player.hitbox().overlaps(&state.level.goal.rect) {
        state.end(Outcome::Won);
    } else if state.player.pos.y > state.viewport.height {
        state.fall_count += 1;
        state.player.respawn(state.level.start);
        state.events.push(GameEvent::FellOffScreen {
            falls: state.fall_count,
        });
        log::debug!("Player fell off screen ({} falls)", state.fall_count);

        if state.fall_count >= state.tuning.max_falls {
            state.end(Outcome::Lost);
        }
    }

    state.camera_offset_x = camera_offset(state.player.pos.x, state.viewport.width);
}
