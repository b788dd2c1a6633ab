//! Callback contract between the simulation and the bridge.
//!
//! The simulation owns game state and the framebuffer. Each tick it calls
//! back into a [`Platform`] to publish a frame, read keys and pace itself.

use crate::error::Result;
use crate::protocol::KeyEvent;

/// Services the bridge provides to the simulation.
pub trait Platform {
    /// Publish a completed framebuffer (`width * height * 4` bytes).
    ///
    /// Also refreshes the key queue from the input stream.
    ///
    /// # Errors
    ///
    /// Output failures are fatal and should end the tick loop.
    fn draw_frame(&mut self, pixels: &[u8]) -> Result<()>;

    /// Sleep for roughly `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Milliseconds since init, wrapping at 2^32.
    fn ticks_ms(&self) -> u32;

    /// Take the oldest pending key event.
    fn poll_key(&mut self) -> Option<KeyEvent>;

    /// Set the window title. The host has no window chrome, so the default
    /// does nothing.
    fn set_window_title(&mut self, title: &str) {
        let _ = title;
    }
}

/// A simulation advanced one tick at a time by a [`crate::LoopDriver`].
pub trait Simulation {
    /// Advance one tick, calling into `platform` as needed.
    ///
    /// # Errors
    ///
    /// An error ends the loop.
    fn tick(&mut self, platform: &mut dyn Platform) -> Result<()>;
}

impl<F> Simulation for F
where
    F: FnMut(&mut dyn Platform) -> Result<()>,
{
    fn tick(&mut self, platform: &mut dyn Platform) -> Result<()> {
        self(platform)
    }
}
