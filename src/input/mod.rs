//! Input side of the bridge: key records in, queued events out.
//!
//! The [`InputPoller`] drains whatever key records are available on the
//! input stream and pushes them into a [`KeyQueue`]. The simulation pops
//! from the queue through [`crate::Platform::poll_key`]. Both run on the
//! tick thread, so the queue needs no locking.

mod poller;
mod queue;

pub use poller::{InputPoller, PollStats};
pub use queue::{KeyQueue, KEY_QUEUE_SLOTS};
