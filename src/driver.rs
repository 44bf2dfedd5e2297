//! Fixed-cadence frame driver
//!
//! A dedicated thread repeats {acquire frame, tick, draw, release} and then
//! sleeps for the frame interval. Input arrives from other threads through a
//! `GameHandle`, which queues commands under the same lock the driver ticks
//! under; the queue is drained once per tick.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::renderer::{FrameGuard, RenderSnapshot, RenderTarget};
use crate::sim::{Command, GameState, TickInput, tick};

struct Shared {
    state: GameState,
    pending: Vec<Command>,
}

/// Cloneable, thread-safe access to the running game
#[derive(Clone)]
pub struct GameHandle {
    inner: Arc<Mutex<Shared>>,
}

impl GameHandle {
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                state,
                pending: Vec::new(),
            })),
        }
    }

    // State is consistent between ticks, so a panic elsewhere doesn't
    // invalidate it
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a command for the next tick
    pub fn send(&self, command: Command) {
        self.lock().pending.push(command);
    }

    /// Drain queued commands, advance one tick and capture the result
    pub fn step(&self) -> RenderSnapshot {
        let mut shared = self.lock();
        let input = TickInput {
            commands: std::mem::take(&mut shared.pending),
        };
        tick(&mut shared.state, &input);
        RenderSnapshot::capture(&shared.state)
    }

    /// Read the state under the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&GameState) -> R) -> R {
        f(&self.lock().state)
    }
}

/// Owns the frame thread; stopping joins it and hands back the target
pub struct FrameDriver<T: RenderTarget + 'static> {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<T>>,
}

impl<T: RenderTarget + 'static> FrameDriver<T> {
    /// Spawn the frame thread
    pub fn start(handle: GameHandle, mut target: T, interval: Duration) -> io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let thread = thread::Builder::new()
            .name("frame-driver".to_string())
            .spawn(move || {
                log::info!("Frame driver started ({:?} per frame)", interval);
                let mut frames: u64 = 0;
                let mut skipped: u64 = 0;

                while flag.load(Ordering::Acquire) {
                    let guard = FrameGuard::acquire(&mut target);
                    let snapshot = handle.step();
                    match guard {
                        Some(mut guard) => guard.draw(&snapshot),
                        None => {
                            skipped += 1;
                            log::trace!("Render target unavailable, frame {} not drawn", frames);
                        }
                    }
                    frames += 1;
                    thread::sleep(interval);
                }

                log::info!(
                    "Frame driver stopped after {} frames ({} not drawn)",
                    frames,
                    skipped
                );
                target
            })?;

        Ok(Self {
            running,
            thread: Some(thread),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clear the running flag and wait for the in-flight frame to finish.
    /// Returns the render target once the thread has exited.
    pub fn stop(&mut self) -> Option<T> {
        self.running.store(false, Ordering::Release);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(target) => Some(target),
            Err(_) => {
                log::warn!("Frame driver thread panicked");
                None
            }
        }
    }
}

impl<T: RenderTarget + 'static> Drop for FrameDriver<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
