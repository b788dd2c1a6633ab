//! `FrameEncoder`: writes framebuffer records to the output stream.

use crate::error::{BridgeError, Result};
use crate::protocol::{pixel_len, FrameHeader, FRAME_HEADER_LEN};
use std::io::{BufWriter, Write};

/// Default output buffer size. One 640x400 frame is ~1 MiB, so a frame
/// goes out in at most a couple of `write()` syscalls.
pub const DEFAULT_OUTPUT_CAPACITY: usize = 2 * 1024 * 1024;

/// Serializes frames as `DOOM` + counter + pixels and flushes each one.
///
/// A full pipe blocks `draw_frame` until the host catches up; that is the
/// only backpressure in the protocol.
#[derive(Debug)]
pub struct FrameEncoder<W: Write> {
    /// Buffered output sink.
    sink: BufWriter<W>,
    /// Counter stamped on the next frame.
    frame: u32,
    /// Framebuffer width in pixels.
    width: usize,
    /// Framebuffer height in pixels.
    height: usize,
}

impl<W: Write> FrameEncoder<W> {
    /// Create an encoder with the default output buffer size.
    pub fn new(sink: W, width: usize, height: usize) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_CAPACITY, sink, width, height)
    }

    /// Create an encoder with an explicit output buffer size.
    pub fn with_capacity(capacity: usize, sink: W, width: usize, height: usize) -> Self {
        Self {
            sink: BufWriter::with_capacity(capacity, sink),
            frame: 0,
            width,
            height,
        }
    }

    /// Start counting from `frame` instead of zero.
    #[must_use]
    pub fn with_start_frame(mut self, frame: u32) -> Self {
        self.frame = frame;
        self
    }

    /// Counter that the next frame will carry.
    #[inline]
    pub const fn frame_count(&self) -> u32 {
        self.frame
    }

    /// Framebuffer dimensions as `(width, height)`.
    #[inline]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Expected pixel buffer length.
    #[inline]
    pub const fn pixel_len(&self) -> usize {
        pixel_len(self.width, self.height)
    }

    /// Total bytes of one frame record.
    #[inline]
    pub const fn frame_len(&self) -> usize {
        FRAME_HEADER_LEN + self.pixel_len()
    }

    /// Write one frame and flush it.
    ///
    /// The counter advances only after the flush succeeds.
    ///
    /// # Errors
    ///
    /// [`BridgeError::FrameSize`] if `pixels` has the wrong length (nothing
    /// is written), [`BridgeError::Output`] if the sink fails.
    pub fn draw_frame(&mut self, pixels: &[u8]) -> Result<()> {
        let expected = self.pixel_len();
        if pixels.len() != expected {
            return Err(BridgeError::FrameSize {
                expected,
                actual: pixels.len(),
            });
        }

        let header = FrameHeader::new(self.frame).encode();
        self.sink.write_all(&header).map_err(BridgeError::Output)?;
        self.sink.write_all(pixels).map_err(BridgeError::Output)?;
        self.sink.flush().map_err(BridgeError::Output)?;

        self.frame = self.frame.wrapping_add(1);
        Ok(())
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        self.sink.get_ref()
    }

    /// Flush and return the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Output`] if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.sink
            .into_inner()
            .map_err(|e| BridgeError::Output(e.into_error()))
    }
}
