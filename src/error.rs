//! Error types for the bridge.

use std::io;
use thiserror::Error;

/// Errors that end a bridge operation.
///
/// Input faults are never reported here: a short or failed read just means
/// "no more input right now". Output faults are fatal because there is no
/// host left to receive frames.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Writing or flushing the frame stream failed (e.g. broken pipe).
    #[error("frame output failed: {0}")]
    Output(#[source] io::Error),

    /// The stdin reader thread could not be started.
    #[error("input reader failed to start: {0}")]
    Input(#[source] io::Error),

    /// The pixel buffer handed to `draw_frame` has the wrong length.
    #[error("pixel buffer is {actual} bytes, expected {expected}")]
    FrameSize {
        /// Bytes required for one frame (`width * height * 4`).
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },

    /// Invalid bridge configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The simulation reported a fault from its tick.
    #[error("simulation failed: {0}")]
    Simulation(String),
}

/// Errors from decoding wire records.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes than a frame header.
    #[error("truncated frame header: {0} bytes")]
    Truncated(usize),

    /// The first four bytes were not `DOOM`.
    #[error("bad frame magic: {0:02x?}")]
    BadMagic([u8; 4]),
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
