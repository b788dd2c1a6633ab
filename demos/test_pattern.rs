//! Test pattern: a stand-in simulation that exercises the bridge.
//!
//! Renders a scrolling gradient with a square the host can move with the
//! arrow keys. Escape stops the loop. Frames go to stdout, so run it with
//! a host attached or pipe it somewhere:
//!
//! ```text
//! printf 'K\x01\xaeK\x00\xae' | cargo run --example test_pattern > frames.bin
//! RUST_LOG=doombridge=debug cargo run --example test_pattern > /dev/null
//! ```

use doombridge::keys::{KEY_DOWNARROW, KEY_ESCAPE, KEY_LEFTARROW, KEY_RIGHTARROW, KEY_UPARROW};
use doombridge::{Bridge, BridgeConfig, BridgeError, LoopDriver, Platform, Simulation, StopHandle};
use tracing_subscriber::EnvFilter;

/// Target frame time (35 Hz, the classic game tic rate).
const FRAME_MS: u32 = 1000 / 35;

const SQUARE: usize = 24;

struct TestPattern {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    x: usize,
    y: usize,
    /// Arrow keys currently held: left, right, up, down.
    held: [bool; 4],
    stop: StopHandle,
}

impl TestPattern {
    fn new(config: &BridgeConfig, stop: StopHandle) -> Self {
        Self {
            width: config.width,
            height: config.height,
            pixels: vec![0; config.width * config.height * 4],
            x: config.width / 2,
            y: config.height / 2,
            held: [false; 4],
            stop,
        }
    }

    fn handle_keys(&mut self, platform: &mut dyn Platform) {
        while let Some(key) = platform.poll_key() {
            let slot = match key.code {
                KEY_LEFTARROW => 0,
                KEY_RIGHTARROW => 1,
                KEY_UPARROW => 2,
                KEY_DOWNARROW => 3,
                KEY_ESCAPE if key.pressed => {
                    tracing::info!("escape pressed, stopping");
                    self.stop.stop();
                    continue;
                }
                _ => continue,
            };
            self.held[slot] = key.pressed;
        }

        let step = 4;
        if self.held[0] {
            self.x = self.x.saturating_sub(step);
        }
        if self.held[1] {
            self.x = (self.x + step).min(self.width - SQUARE);
        }
        if self.held[2] {
            self.y = self.y.saturating_sub(step);
        }
        if self.held[3] {
            self.y = (self.y + step).min(self.height - SQUARE);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ticks: u32) {
        let shift = (ticks / 10) as usize;
        for (i, px) in self.pixels.chunks_exact_mut(4).enumerate() {
            let (col, row) = (i % self.width, i / self.width);
            let inside = (self.x..self.x + SQUARE).contains(&col)
                && (self.y..self.y + SQUARE).contains(&row);
            if inside {
                px.copy_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
            } else {
                // BGRA
                px.copy_from_slice(&[
                    ((col + shift) & 0xFF) as u8,
                    ((row + shift / 2) & 0xFF) as u8,
                    0x40,
                    0xFF,
                ]);
            }
        }
    }
}

impl Simulation for TestPattern {
    fn tick(&mut self, platform: &mut dyn Platform) -> doombridge::Result<()> {
        let start = platform.ticks_ms();

        if self.x + SQUARE > self.width || self.y + SQUARE > self.height {
            return Err(BridgeError::Simulation(format!(
                "square at ({}, {}) left the {}x{} screen",
                self.x, self.y, self.width, self.height
            )));
        }

        self.handle_keys(platform);
        self.render(start);
        platform.draw_frame(&self.pixels)?;

        let spent = platform.ticks_ms().wrapping_sub(start);
        if spent < FRAME_MS {
            platform.sleep_ms(FRAME_MS - spent);
        }
        Ok(())
    }
}

fn main() -> doombridge::Result<()> {
    // stdout is the frame stream: logs must go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BridgeConfig::default().with_resolution(320, 200);
    let mut bridge = Bridge::stdio(config.clone())?;
    bridge.set_window_title("doombridge test pattern");
    tracing::debug!(input_thread = bridge.input_thread_running(), "bridge ready");

    let driver = LoopDriver::new();
    let mut sim = TestPattern::new(&config, driver.stop_handle());

    let summary = driver.run(&mut sim, &mut bridge)?;
    tracing::info!(ticks = summary.ticks, reason = ?summary.reason, "done");
    Ok(())
}
