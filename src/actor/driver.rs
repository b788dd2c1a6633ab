//! Loop Driver: runs the simulation's tick loop until told to stop.
//!
//! Without a stop request the loop runs forever. A [`StopHandle`] can end
//! it from a signal handler or another thread.

use crate::error::Result;
use crate::platform::{Platform, Simulation};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle that asks a running [`LoopDriver`] to stop.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request a stop. Takes effect before the next tick.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check if a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks completed.
    pub ticks: u64,
    /// Why the loop ended.
    pub reason: StopReason,
}

/// Why [`LoopDriver::run`] returned without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`StopHandle`] requested the stop.
    Requested,
    /// The tick limit was reached.
    TickLimit,
}

/// Drives [`Simulation::tick`] in a loop on the calling thread.
#[derive(Debug, Default)]
pub struct LoopDriver {
    /// Stop flag shared with handles.
    stop: Arc<AtomicBool>,
    /// Optional tick limit.
    max_ticks: Option<u64>,
}

impl LoopDriver {
    /// Create a driver that runs until stopped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the run to `ticks` ticks.
    #[must_use]
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    /// Get a handle that can stop this driver.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: self.stop.clone(),
        }
    }

    /// Run the tick loop.
    ///
    /// # Errors
    ///
    /// Returns the first error a tick reports (e.g. a broken output pipe).
    pub fn run<S, P>(&self, simulation: &mut S, platform: &mut P) -> Result<RunSummary>
    where
        S: Simulation + ?Sized,
        P: Platform,
    {
        let mut ticks = 0u64;
        tracing::debug!(max_ticks = ?self.max_ticks, "tick loop starting");

        loop {
            if self.stop.load(Ordering::Relaxed) {
                tracing::debug!(ticks, "tick loop stopped");
                return Ok(RunSummary {
                    ticks,
                    reason: StopReason::Requested,
                });
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                return Ok(RunSummary {
                    ticks,
                    reason: StopReason::TickLimit,
                });
            }

            if let Err(e) = simulation.tick(platform) {
                tracing::error!(ticks, error = %e, "tick loop ended");
                return Err(e);
            }
            ticks += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Bridge, BridgeConfig};
    use crate::error::BridgeError;
    use crate::protocol::{frame_len, FrameHeader, KeyEvent};
    use std::io::{self, Cursor, Write};
    use std::thread;
    use std::time::Duration;

    fn test_bridge(input: Vec<u8>) -> Bridge<Cursor<Vec<u8>>, Vec<u8>> {
        let config = BridgeConfig::default().with_resolution(2, 2);
        Bridge::new(config, Cursor::new(input), Vec::new()).unwrap()
    }

    #[test]
    fn test_run_with_tick_limit() {
        let mut bridge = test_bridge(Vec::new());
        let mut sim = |p: &mut dyn Platform| p.draw_frame(&[0; 16]);

        let summary = LoopDriver::new()
            .with_max_ticks(3)
            .run(&mut sim, &mut bridge)
            .unwrap();
        assert_eq!(summary, RunSummary { ticks: 3, reason: StopReason::TickLimit });

        let out = bridge.into_output().unwrap();
        assert_eq!(out.len(), 3 * frame_len(2, 2));
        let last = FrameHeader::decode(&out[2 * frame_len(2, 2)..]).unwrap();
        assert_eq!(last.frame, 2);
    }

    #[test]
    fn test_stop_handle_from_inside_tick() {
        let driver = LoopDriver::new();
        let handle = driver.stop_handle();
        let mut bridge = test_bridge(vec![b'K', 1, 27]);
        let mut keys = Vec::new();

        let mut sim = |p: &mut dyn Platform| -> Result<()> {
            p.draw_frame(&[0; 16])?;
            while let Some(key) = p.poll_key() {
                keys.push(key);
                handle.stop();
            }
            Ok(())
        };

        let summary = driver.run(&mut sim, &mut bridge).unwrap();
        assert_eq!(summary, RunSummary { ticks: 1, reason: StopReason::Requested });
        assert_eq!(keys, vec![KeyEvent::down(27)]);
    }

    #[test]
    fn test_stop_handle_from_other_thread() {
        let driver = LoopDriver::new();
        let handle = driver.stop_handle();
        let mut bridge = test_bridge(Vec::new());
        let mut sim = |p: &mut dyn Platform| -> Result<()> {
            p.draw_frame(&[0; 16])?;
            p.sleep_ms(1);
            Ok(())
        };

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.stop();
        });
        let summary = driver.run(&mut sim, &mut bridge).unwrap();
        stopper.join().unwrap();

        assert_eq!(summary.reason, StopReason::Requested);
        assert!(summary.ticks > 0);
        assert_eq!(u64::from(bridge.frame_count()), summary.ticks);
    }

    #[test]
    fn test_simulation_error_ends_loop() {
        let mut bridge = test_bridge(Vec::new());
        let mut sim = |p: &mut dyn Platform| -> Result<()> {
            p.draw_frame(&[0; 16])?;
            Err(BridgeError::Simulation("level data missing".to_string()))
        };

        let err = LoopDriver::new().run(&mut sim, &mut bridge).unwrap_err();
        assert!(matches!(err, BridgeError::Simulation(ref msg) if msg == "level data missing"));
        assert_eq!(bridge.frame_count(), 1);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_output_failure_ends_loop() {
        let config = BridgeConfig::default().with_resolution(1, 1);
        let mut bridge = Bridge::new(config, Cursor::new(Vec::<u8>::new()), ClosedPipe).unwrap();
        let mut sim = |p: &mut dyn Platform| p.draw_frame(&[0; 4]);

        let err = LoopDriver::new().run(&mut sim, &mut bridge).unwrap_err();
        assert!(matches!(err, BridgeError::Output(_)));
    }
}
