//! Fox Adventure entry point
//!
//! Headless native runner: drives the simulation on the frame thread with a
//! scripted pilot standing in for touch input, and logs what a renderer
//! would draw.
//!
//! Usage: `fox-adventure [settings.json]`

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use fox_adventure::renderer::{Hud, RenderSnapshot, RenderTarget};
use fox_adventure::sim::{Command, GamePhase};
use fox_adventure::{FrameDriver, GameHandle, Settings};

/// Give up after this long if the pilot neither wins nor loses
const DEMO_TIMEOUT: Duration = Duration::from_secs(60);

/// Render target that logs a one-line frame summary once a second
#[derive(Default)]
struct LogTarget {
    frames: u64,
}

impl RenderTarget for LogTarget {
    type Frame = String;

    fn acquire(&mut self) -> Option<String> {
        Some(String::new())
    }

    fn draw(&mut self, frame: &mut String, snapshot: &RenderSnapshot) {
        let hud = Hud::from_snapshot(snapshot);
        let player = snapshot.player.origin;
        *frame = format!(
            "{} | falls {} | player ({:.0}, {:.0}) {:?} #{} | camera {:.0} | coins left {}",
            hud.score_text,
            snapshot.fall_count,
            player.x,
            player.y,
            snapshot.player.frame.anim.pose,
            snapshot.player.frame.index,
            snapshot.camera_offset_x,
            snapshot.coins.len(),
        );
        if let Some(overlay) = hud.overlay {
            frame.push_str(&format!(" | [{} - {}]", overlay.heading(), overlay.prompt()));
        }
    }

    fn release(&mut self, frame: String) {
        if self.frames % 60 == 0 {
            log::info!("{}", frame);
        }
        self.frames += 1;
    }
}

/// Runs right and hops on a fixed rhythm
fn pilot(handle: &GameHandle, step: u64) {
    match step {
        0 => {
            handle.send(Command::StartOrAdvanceScreen);
            handle.send(Command::MoveRight);
        }
        s if s % 45 == 0 => {
            handle.send(Command::MoveRight);
            handle.send(Command::Jump);
        }
        _ => {}
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fox Adventure (native, headless) starting...");

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let state = settings.new_game().context("building game state")?;
    log::info!(
        "Level '{}': {} platforms, {} moving, {} coins",
        state.level.name,
        state.level.platforms.len(),
        state.level.moving_platforms.len(),
        state.level.coins.len()
    );

    let handle = GameHandle::new(state);
    let interval = settings.frame_interval();
    let mut driver = FrameDriver::start(handle.clone(), LogTarget::default(), interval)
        .context("spawning frame driver")?;

    let started = Instant::now();
    let mut step = 0;
    loop {
        pilot(&handle, step);
        step += 1;

        if let GamePhase::GameOver(outcome) = handle.with_state(|s| s.phase) {
            log::info!("Finished: {:?}", outcome);
            break;
        }
        if started.elapsed() > DEMO_TIMEOUT {
            log::warn!("Demo timed out");
            break;
        }
        thread::sleep(interval);
    }

    let target = driver.stop();
    let (score, falls, ticks) = handle.with_state(|s| (s.score, s.fall_count, s.time_ticks));
    log::info!(
        "Score {} with {} falls over {} ticks ({} frames drawn)",
        score,
        falls,
        ticks,
        target.map(|t| t.frames).unwrap_or(0)
    );
    Ok(())
}
