//! Bridge: the platform context handed to the simulation.
//!
//! The Bridge owns every piece of per-run state (key queue, frame counter,
//! clock) so several instances can coexist, e.g. one per test. It
//! implements [`Platform`], the callback surface the simulation drives.

use super::input::{ChannelReader, InputActor};
use crate::error::{BridgeError, Result};
use crate::input::{InputPoller, KeyQueue, PollStats};
use crate::output::{FrameEncoder, DEFAULT_OUTPUT_CAPACITY};
use crate::platform::Platform;
use crate::protocol::KeyEvent;
use crate::timing::Clock;
use std::io::{self, Read, StdoutLock, Write};

/// Configuration for the Bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Framebuffer width in pixels.
    pub width: usize,
    /// Framebuffer height in pixels.
    pub height: usize,
    /// Output buffer size in bytes.
    pub output_buffer_capacity: usize,
    /// Maximum bytes per stdin read on the input thread.
    pub input_chunk_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
            output_buffer_capacity: DEFAULT_OUTPUT_CAPACITY,
            input_chunk_size: 4096,
        }
    }
}

impl BridgeConfig {
    /// Set the framebuffer dimensions.
    #[must_use]
    pub const fn with_resolution(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the output buffer size.
    #[must_use]
    pub const fn with_output_buffer_capacity(mut self, capacity: usize) -> Self {
        self.output_buffer_capacity = capacity;
        self
    }

    /// Set the stdin read chunk size.
    #[must_use]
    pub const fn with_input_chunk_size(mut self, size: usize) -> Self {
        self.input_chunk_size = size;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] for a zero dimension or a frame that
    /// does not fit in memory.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BridgeError::Config(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self
            .width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .is_none()
        {
            return Err(BridgeError::Config(format!(
                "resolution {}x{} overflows the pixel buffer size",
                self.width, self.height
            )));
        }
        if self.input_chunk_size == 0 {
            return Err(BridgeError::Config("input chunk size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Transport between the simulation and the host process.
#[derive(Debug)]
pub struct Bridge<R: Read, W: Write> {
    /// Configuration.
    config: BridgeConfig,
    /// Pending key events for the simulation.
    queue: KeyQueue,
    /// Key record reader.
    poller: InputPoller<R>,
    /// Frame writer.
    encoder: FrameEncoder<W>,
    /// Process-relative time.
    clock: Clock,
    /// Stdin reader thread, when wired to stdio.
    input_actor: Option<InputActor>,
}

impl<R: Read, W: Write> Bridge<R, W> {
    /// Initialize a bridge over the given streams.
    ///
    /// This captures the clock epoch; `input` must already be non-blocking.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the configuration is invalid.
    pub fn new(config: BridgeConfig, input: R, output: W) -> Result<Self> {
        config.validate()?;

        let encoder = FrameEncoder::with_capacity(
            config.output_buffer_capacity,
            output,
            config.width,
            config.height,
        );

        tracing::debug!(
            width = config.width,
            height = config.height,
            frame_len = encoder.frame_len(),
            "bridge initialized"
        );

        Ok(Self {
            config,
            queue: KeyQueue::new(),
            poller: InputPoller::new(input),
            encoder,
            clock: Clock::start(),
            input_actor: None,
        })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Counter the next frame will carry.
    pub const fn frame_count(&self) -> u32 {
        self.encoder.frame_count()
    }

    /// Get a reference to the key queue.
    pub const fn queue(&self) -> &KeyQueue {
        &self.queue
    }

    /// Get a reference to the clock.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &W {
        self.encoder.get_ref()
    }

    /// Check if a stdin reader thread is attached and still reading.
    pub fn input_thread_running(&self) -> bool {
        self.input_actor.as_ref().is_some_and(|actor| !actor.is_finished())
    }

    /// Start frame numbering at `frame`.
    #[must_use]
    pub fn with_start_frame(mut self, frame: u32) -> Self {
        self.encoder = self.encoder.with_start_frame(frame);
        self
    }

    /// Drain available key records into the queue now.
    ///
    /// [`Platform::draw_frame`] already does this after every frame.
    pub fn poll_input(&mut self) -> PollStats {
        self.poller.poll(&mut self.queue)
    }

    /// Flush and return the output sink.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Output`] if the final flush fails.
    pub fn into_output(self) -> Result<W> {
        self.encoder.into_inner()
    }
}

impl Bridge<ChannelReader, StdoutLock<'static>> {
    /// Initialize a bridge over the process's stdin and stdout.
    ///
    /// Stdin is read on a background [`InputActor`] thread so that polling
    /// never blocks the tick thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the reader
    /// thread cannot be spawned.
    pub fn stdio(config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        let (actor, reader) =
            InputActor::spawn_stdin(config.input_chunk_size).map_err(BridgeError::Input)?;

        let mut bridge = Self::new(config, reader, io::stdout().lock())?;
        bridge.input_actor = Some(actor);
        Ok(bridge)
    }
}

impl<R: Read, W: Write> Platform for Bridge<R, W> {
    fn draw_frame(&mut self, pixels: &[u8]) -> Result<()> {
        self.encoder.draw_frame(pixels)?;
        let stats = self.poll_input();
        if stats.rejected > 0 {
            tracing::debug!(rejected = stats.rejected, "misaligned key records dropped");
        }
        Ok(())
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.clock.sleep_ms(ms);
    }

    fn ticks_ms(&self) -> u32 {
        self.clock.elapsed_ms()
    }

    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.queue.pop()
    }

    fn set_window_title(&mut self, title: &str) {
        tracing::trace!(title, "window title ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{frame_len, FrameHeader};
    use std::io::Cursor;

    fn bridge(input: Vec<u8>, width: usize, height: usize) -> Bridge<Cursor<Vec<u8>>, Vec<u8>> {
        let config = BridgeConfig::default().with_resolution(width, height);
        Bridge::new(config, Cursor::new(input), Vec::new()).unwrap()
    }

    #[test]
    fn test_config_default() {
        let config = BridgeConfig::default();
        assert_eq!((config.width, config.height), (640, 400));
        assert_eq!(config.output_buffer_capacity, 2 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_resolution() {
        let config = BridgeConfig::default().with_resolution(0, 400);
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
        assert!(Bridge::new(config, Cursor::new(Vec::<u8>::new()), Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_config_rejects_overflowing_resolution() {
        let config = BridgeConfig::default().with_resolution(usize::MAX, 2);
        assert!(matches!(config.validate(), Err(BridgeError::Config(_))));
    }

    #[test]
    fn test_first_frame_end_to_end() {
        let mut bridge = bridge(Vec::new(), 4, 4);
        bridge.draw_frame(&[0u8; 64]).unwrap();
        assert_eq!(bridge.frame_count(), 1);

        let out = bridge.into_output().unwrap();
        assert_eq!(out.len(), 8 + 64);
        assert_eq!(&out[..4], b"DOOM");
        assert_eq!(&out[4..8], &0u32.to_ne_bytes());
        assert!(out[8..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_frame_polls_input() {
        let mut bridge = bridge(vec![b'K', 1, 0x2A], 1, 1);
        assert_eq!(bridge.poll_key(), None);

        bridge.draw_frame(&[0; 4]).unwrap();
        assert_eq!(bridge.poll_key(), Some(KeyEvent::down(0x2A)));
        assert_eq!(bridge.poll_key(), None);
    }

    #[test]
    fn test_partial_key_record_yields_nothing() {
        let mut bridge = bridge(vec![b'K', 1], 1, 1);
        bridge.draw_frame(&[0; 4]).unwrap();
        assert_eq!(bridge.poll_key(), None);
    }

    #[test]
    fn test_frame_sequence_with_wraparound() {
        let mut bridge = bridge(Vec::new(), 2, 2).with_start_frame(u32::MAX - 2);
        for _ in 0..5 {
            bridge.draw_frame(&[7; 16]).unwrap();
        }
        let out = bridge.into_output().unwrap();
        let frames: Vec<u32> = out
            .chunks(frame_len(2, 2))
            .map(|record| FrameHeader::decode(record).unwrap().frame)
            .collect();
        assert_eq!(frames, vec![u32::MAX - 2, u32::MAX - 1, u32::MAX, 0, 1]);
    }

    #[test]
    fn test_size_mismatch_leaves_counter_alone() {
        let mut bridge = bridge(vec![b'K', 1, 3], 2, 2);
        assert!(matches!(
            bridge.draw_frame(&[0; 4]),
            Err(BridgeError::FrameSize { expected: 16, actual: 4 })
        ));
        assert_eq!(bridge.frame_count(), 0);
        assert!(bridge.output().is_empty());
    }

    #[test]
    fn test_ticks_start_near_zero() {
        let bridge = bridge(Vec::new(), 1, 1);
        assert!(bridge.ticks_ms() < 50);
    }

    #[test]
    fn test_no_input_thread_without_stdio() {
        let bridge = bridge(Vec::new(), 1, 1);
        assert!(!bridge.input_thread_running());
    }

    #[test]
    fn test_window_title_is_noop() {
        let mut bridge = bridge(Vec::new(), 1, 1);
        bridge.set_window_title("DOOM Shareware");
        assert!(bridge.output().is_empty());
    }
}
