//! # Doombridge
//!
//! Stdio transport between a game simulation loop and a host display
//! process.
//!
//! The simulation owns game state and renders into its own framebuffer.
//! Doombridge gives it the few platform services it needs:
//!
//! - **Frame output**: each finished framebuffer goes to stdout as
//!   `DOOM` + frame counter + raw pixels, flushed immediately
//! - **Key input**: `K` records from stdin are drained without blocking and
//!   queued for the simulation
//! - **Timing**: process-relative milliseconds and sleep
//!
//! ## Example
//!
//! ```rust,ignore
//! use doombridge::{Bridge, BridgeConfig, LoopDriver, Platform};
//!
//! let mut bridge = Bridge::stdio(BridgeConfig::default())?;
//! let mut pixels = vec![0u8; 640 * 400 * 4];
//!
//! let mut sim = |p: &mut dyn Platform| {
//!     while let Some(key) = p.poll_key() {
//!         // feed the key to the game
//!     }
//!     // render into `pixels`
//!     p.draw_frame(&pixels)
//! };
//! LoopDriver::new().run(&mut sim, &mut bridge)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod input;
pub mod keys;
pub mod output;
pub mod platform;
pub mod protocol;
pub mod timing;

// Re-exports for convenience
pub use actor::{Bridge, BridgeConfig, LoopDriver, RunSummary, StopHandle, StopReason};
pub use error::{BridgeError, ProtocolError, Result};
pub use input::{InputPoller, KeyQueue, PollStats};
pub use output::FrameEncoder;
pub use platform::{Platform, Simulation};
pub use protocol::{FrameHeader, KeyEvent};
pub use timing::Clock;
