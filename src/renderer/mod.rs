//! Render sink contract
//!
//! The core never draws. Each frame it hands a `RenderSnapshot` to a
//! `RenderTarget`; the target owns pixels, sprites, parallax and text.
//! Frames are acquired through `FrameGuard`, which releases the frame on
//! every exit path.

pub mod hud;
pub mod snapshot;

pub use hud::{Hud, Overlay};
pub use snapshot::{FrameRef, PlatformView, PlayerSprite, RenderSnapshot};

/// A presentation surface that can be locked for one frame at a time
pub trait RenderTarget: Send {
    /// Locked drawing surface for a single frame
    type Frame;

    /// Lock a frame for drawing. `None` means the surface is unavailable
    /// this tick and drawing is skipped.
    fn acquire(&mut self) -> Option<Self::Frame>;

    fn draw(&mut self, frame: &mut Self::Frame, snapshot: &RenderSnapshot);

    /// Unlock and present
    fn release(&mut self, frame: Self::Frame);
}

/// Scoped frame acquisition. The frame is released when the guard drops.
pub struct FrameGuard<'a, T: RenderTarget> {
    target: &'a mut T,
    frame: Option<T::Frame>,
}

impl<'a, T: RenderTarget> FrameGuard<'a, T> {
    /// Try to lock a frame; `None` if the target has nothing to give
    pub fn acquire(target: &'a mut T) -> Option<Self> {
        let frame = target.acquire()?;
        Some(Self {
            target,
            frame: Some(frame),
        })
    }

    pub fn draw(&mut self, snapshot: &RenderSnapshot) {
        if let Some(frame) = self.frame.as_mut() {
            self.target.draw(frame, snapshot);
        }
    }
}

impl<T: RenderTarget> Drop for FrameGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.target.release(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[derive(Default)]
    struct Recorder {
        available: bool,
        drawn: usize,
        acquired: usize,
        released: usize,
    }

    impl RenderTarget for Recorder {
        type Frame = u32;

        fn acquire(&mut self) -> Option<u32> {
            if !self.available {
                return None;
            }
            self.acquired += 1;
            Some(self.acquired as u32)
        }

        fn draw(&mut self, _frame: &mut u32, _snapshot: &RenderSnapshot) {
            self.drawn += 1;
        }

        fn release(&mut self, _frame: u32) {
            self.released += 1;
        }
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let snapshot = RenderSnapshot::capture(&GameState::forest());
        let mut target = Recorder {
            available: true,
            ..Default::default()
        };
        {
            let mut guard = FrameGuard::acquire(&mut target).unwrap();
            guard.draw(&snapshot);
        }
        assert_eq!(target.drawn, 1);
        assert_eq!(target.released, 1);
    }

    #[test]
    fn test_guard_releases_on_early_exit() {
        fn draw_then_bail(target: &mut Recorder) -> Option<()> {
            let _guard = FrameGuard::acquire(target)?;
            None
        }
        let mut target = Recorder {
            available: true,
            ..Default::default()
        };
        assert!(draw_then_bail(&mut target).is_none());
        assert_eq!(target.acquired, 1);
        assert_eq!(target.released, 1);
    }

    #[test]
    fn test_unavailable_target_yields_no_guard() {
        let mut target = Recorder::default();
        assert!(FrameGuard::acquire(&mut target).is_none());
        assert_eq!(target.released, 0);
    }
}
