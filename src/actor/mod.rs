//! Actors and the tick loop.
//!
//! - **Input Actor**: reads stdin on its own thread, forwards raw bytes
//! - **Bridge**: per-run state handed to the simulation as its [`Platform`]
//! - **Loop Driver**: calls the simulation's tick until stopped
//!
//! # Architecture
//!
//! ```text
//!   host ──stdin──▶ ┌──────────────┐  InputMessage  ┌──────────────┐
//!                   │ Input Thread │ ─────────────▶ │ ChannelReader│
//!                   └──────────────┘                └──────┬───────┘
//!                                                          │ poll (after each frame)
//!  ┌─────────────┐   tick    ┌────────────────────────────▼───────┐
//!  │ Loop Driver │ ────────▶ │ Simulation ◀──▶ Bridge (Platform)  │
//!  └─────────────┘           └────────────────────────────┬───────┘
//!                                                          │ DOOM frames
//!                                                          ▼
//!                                                   host ◀──stdout
//! ```
//!
//! The key queue is only touched on the tick thread; the input thread only
//! ever sees the channel.
//!
//! [`Platform`]: crate::Platform

mod driver;
mod engine;
mod input;
mod messages;

pub use driver::{LoopDriver, RunSummary, StopHandle, StopReason};
pub use engine::{Bridge, BridgeConfig};
pub use input::{ChannelReader, InputActor};
pub use messages::InputMessage;
