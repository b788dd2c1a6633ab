//! Key queue: fixed ring of pending key events.

use crate::protocol::KeyEvent;

/// Number of slots in the ring. One slot is always kept free so that
/// `write == read` means empty, leaving `KEY_QUEUE_SLOTS - 1` usable.
pub const KEY_QUEUE_SLOTS: usize = 32;

/// Ring buffer of packed key events with overwrite-on-full semantics.
///
/// Pushing never fails. Once 31 events are unread, each further push
/// silently drops the oldest unread event.
#[derive(Debug, Clone)]
pub struct KeyQueue {
    /// Packed events (`pressed << 8 | code`).
    slots: [u16; KEY_QUEUE_SLOTS],
    /// Next slot to write.
    write: usize,
    /// Next slot to read.
    read: usize,
}

impl KeyQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            slots: [0; KEY_QUEUE_SLOTS],
            write: 0,
            read: 0,
        }
    }

    /// Usable capacity before old events are overwritten.
    #[inline]
    pub const fn capacity(&self) -> usize {
        KEY_QUEUE_SLOTS - 1
    }

    /// Number of unread events.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.write + KEY_QUEUE_SLOTS - self.read) % KEY_QUEUE_SLOTS
    }

    /// Check if there is nothing to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// Check if the next push will drop the oldest unread event.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Append an event, dropping the oldest unread one if the ring is full.
    pub fn push(&mut self, event: KeyEvent) {
        self.slots[self.write] = event.pack();
        self.write = (self.write + 1) % KEY_QUEUE_SLOTS;

        // Writer caught up with the reader: the slot under `read` was just
        // overwritten, so skip past it or the whole ring would read as empty.
        if self.write == self.read {
            self.read = (self.read + 1) % KEY_QUEUE_SLOTS;
        }
    }

    /// Take the oldest unread event.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        if self.is_empty() {
            return None;
        }
        let slot = self.slots[self.read];
        self.read = (self.read + 1) % KEY_QUEUE_SLOTS;
        Some(KeyEvent::unpack(slot))
    }

    /// Discard all unread events.
    pub const fn clear(&mut self) {
        self.read = self.write;
    }
}

impl Default for KeyQueue {
    fn default() -> Self {
        Self::new()
    }
}
