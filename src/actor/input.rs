//! Input Actor: Dedicated thread for reading stdin.
//!
//! Rust's stdin cannot portably be put into non-blocking mode, so this
//! actor does the blocking reads on its own thread and forwards raw chunks
//! over a channel. The tick thread sees them through [`ChannelReader`],
//! which never blocks.

use super::messages::InputMessage;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::io::{self, ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Input actor that reads a byte stream on a background thread.
#[derive(Debug)]
pub struct InputActor {
    /// Handle to the reader thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn a reader over the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn_stdin(chunk_size: usize) -> io::Result<(Self, ChannelReader)> {
        Self::spawn(io::stdin(), chunk_size)
    }

    /// Spawn a reader thread over any blocking source.
    ///
    /// # Arguments
    ///
    /// * `source` - Stream to read; moved onto the reader thread.
    /// * `chunk_size` - Maximum bytes per read.
    ///
    /// # Returns
    ///
    /// The actor handle and the non-blocking reader for the tick thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn<R>(source: R, chunk_size: usize) -> io::Result<(Self, ChannelReader)>
    where
        R: Read + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Unbounded: the reader must never drop bytes.
        let (tx, rx) = unbounded::<InputMessage>();
        let chunk_size = chunk_size.max(1);

        let handle = thread::Builder::new()
            .name("doombridge-input".to_string())
            .spawn(move || {
                Self::run_loop(source, &tx, &shutdown_clone, chunk_size);
            })?;

        let actor = Self {
            handle: Some(handle),
            shutdown,
        };
        Ok((actor, ChannelReader::new(rx)))
    }

    /// Signal the reader thread to stop after its current read.
    ///
    /// A read already blocked on stdin only returns when the host writes or
    /// closes the pipe.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if the reader thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the reader thread to finish.
    ///
    /// Over stdin this can hang until the host writes or closes the pipe,
    /// since a read already in progress is not interrupted by
    /// [`InputActor::shutdown`]. Dropping the actor signals shutdown
    /// without waiting.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main read loop.
    fn run_loop<R: Read>(
        mut source: R,
        tx: &Sender<InputMessage>,
        shutdown: &Arc<AtomicBool>,
        chunk_size: usize,
    ) {
        let mut buf = vec![0u8; chunk_size];

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            match source.read(&mut buf) {
                Ok(0) => {
                    tracing::debug!("input stream closed");
                    let _ = tx.send(InputMessage::Eof);
                    break;
                }
                Ok(n) => {
                    if tx.send(InputMessage::Bytes(buf[..n].to_vec())).is_err() {
                        // Receiver dropped, exit
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    let _ = tx.send(InputMessage::Error(e.to_string()));
                    break;
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        // Not joined: the thread may be parked in a blocking read.
        self.shutdown();
    }
}

/// Non-blocking [`Read`] over chunks forwarded by an [`InputActor`].
///
/// Returns `WouldBlock` while no bytes are queued and `Ok(0)` once the
/// reader thread has stopped and everything it sent has been consumed.
#[derive(Debug)]
pub struct ChannelReader {
    /// Chunks from the reader thread.
    rx: Receiver<InputMessage>,
    /// Chunk currently being consumed.
    chunk: Vec<u8>,
    /// Read offset into `chunk`.
    offset: usize,
    /// Reader thread has stopped.
    closed: bool,
}

impl ChannelReader {
    /// Wrap the receiving end of an input channel.
    pub const fn new(rx: Receiver<InputMessage>) -> Self {
        Self {
            rx,
            chunk: Vec::new(),
            offset: 0,
            closed: false,
        }
    }

    /// Check if the input stream has ended.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Bytes received but not yet read.
    pub fn buffered(&self) -> usize {
        self.chunk.len() - self.offset
    }

    /// Pull messages until a non-empty chunk is current or nothing is left.
    fn refill(&mut self) {
        while self.offset >= self.chunk.len() && !self.closed {
            match self.rx.try_recv() {
                Ok(InputMessage::Bytes(bytes)) => {
                    self.chunk = bytes;
                    self.offset = 0;
                }
                Ok(InputMessage::Eof) => self.closed = true,
                Ok(InputMessage::Error(e)) => {
                    tracing::warn!(error = %e, "input reader stopped");
                    self.closed = true;
                }
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => self.closed = true,
            }
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut n = 0;
        while n < buf.len() {
            self.refill();
            let available = &self.chunk[self.offset..];
            if available.is_empty() {
                break;
            }
            let take = available.len().min(buf.len() - n);
            buf[n..n + take].copy_from_slice(&available[..take]);
            self.offset += take;
            n += take;
        }

        // Short count only once the channel has nothing more queued.
        if n == 0 && !self.closed {
            return Err(ErrorKind::WouldBlock.into());
        }
        Ok(n)
    }
}
