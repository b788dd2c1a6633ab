//! Message types for the stdin reader thread.

/// Messages from the stdin reader thread to the tick thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMessage {
    /// Raw bytes, in the order they arrived on stdin.
    Bytes(Vec<u8>),

    /// Stdin reached end of stream (host closed its end).
    Eof,

    /// Reading stdin failed; the reader thread has stopped.
    Error(String),
}
