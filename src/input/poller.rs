//! Input poller: drains key records from a non-blocking byte source.

use super::KeyQueue;
use crate::protocol::{decode_key_record, KEY_RECORD_LEN};
use std::io::{ErrorKind, Read};

/// Counts from one [`InputPoller::poll`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    /// Records decoded and queued.
    pub accepted: usize,
    /// Complete records dropped because the tag byte was not `'K'`.
    pub rejected: usize,
}

/// Reads `K` records from `source` and queues the decoded key events.
///
/// `source` must not block: it should return `WouldBlock`, a short count,
/// or `Ok(0)` when nothing more is available. [`crate::actor::ChannelReader`]
/// provides this for stdin.
///
/// A record split across reads is kept and completed on a later poll.
/// A complete record with the wrong tag is dropped whole and polling
/// continues with the next three bytes; there is no byte-level resync.
#[derive(Debug)]
pub struct InputPoller<R> {
    /// Byte source (stdin reader in production, a cursor in tests).
    source: R,
    /// Partially received record.
    pending: [u8; KEY_RECORD_LEN],
    /// Bytes of `pending` filled so far.
    filled: usize,
}

impl<R: Read> InputPoller<R> {
    /// Create a poller over `source`.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            pending: [0; KEY_RECORD_LEN],
            filled: 0,
        }
    }

    /// Drain every complete record currently available into `queue`.
    ///
    /// Never blocks on a well-behaved source and never fails: short reads,
    /// end of stream and I/O errors all just end this call.
    pub fn poll(&mut self, queue: &mut KeyQueue) -> PollStats {
        let mut stats = PollStats::default();

        loop {
            match self.source.read(&mut self.pending[self.filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    self.filled += n;
                    if self.filled < KEY_RECORD_LEN {
                        // Short read: nothing more right now.
                        break;
                    }
                    self.filled = 0;

                    if let Some(event) = decode_key_record(&self.pending) {
                        queue.push(event);
                        stats.accepted += 1;
                    } else {
                        tracing::debug!(record = ?self.pending, "dropping key record with bad tag");
                        stats.rejected += 1;
                    }
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!(error = %e, "input read failed");
                    break;
                }
            }
        }

        stats
    }

    /// Bytes of an incomplete record held over for the next poll.
    #[inline]
    pub const fn pending_len(&self) -> usize {
        self.filled
    }

    /// Get a reference to the underlying source.
    pub const fn get_ref(&self) -> &R {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }
}
