//! Line framing for the serial byte stream.
//!
//! [`FrameAssembler`] collects bytes until a `\n` or `\r` terminator and hands
//! back the completed [`Frame`]. The buffer is a fixed-capacity
//! [`heapless::Vec`]: a line that does not fit is dropped as a whole, and a
//! partial line that stops receiving bytes is dropped after a timeout.

use crate::time::{TimeDuration, TimeInstant};
use heapless::Vec;

/// Default frame buffer capacity, including the reserved terminator slot.
pub const FRAME_CAPACITY: usize = 256;

/// Conditions that cause the assembler to drop its buffer.
///
/// Both are recoverable: the assembler is empty afterwards and the stream
/// continues with the next byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A line exceeded the buffer capacity.
    BufferOverflow,
    /// A partial line received no bytes for longer than the timeout.
    FrameTimeout,
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::BufferOverflow => write!(f, "frame buffer overflow"),
            FrameError::FrameTimeout => write!(f, "partial frame timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// One complete line of input, without its terminator.
///
/// Never empty and never longer than `CAP - 1` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<const CAP: usize = FRAME_CAPACITY> {
    bytes: Vec<u8, CAP>,
}

impl<const CAP: usize> Frame<CAP> {
    /// Returns the raw frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the frame as text, or `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Returns the frame length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for frames produced by [`FrameAssembler`].
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Accumulates bytes into newline-delimited frames.
///
/// # Type Parameters
/// * `I` - Time instant type used to timestamp received bytes
/// * `CAP` - Buffer capacity; frames hold at most `CAP - 1` bytes
pub struct FrameAssembler<I: TimeInstant, const CAP: usize = FRAME_CAPACITY> {
    buffer: Vec<u8, CAP>,
    last_receive: Option<I>,
    timeout: I::Duration,
}

impl<I: TimeInstant, const CAP: usize> FrameAssembler<I, CAP> {
    /// Longest frame the assembler will hold. One slot is kept for the terminator.
    pub const MAX_LEN: usize = {
        assert!(CAP > 1, "frame capacity must leave room for the terminator slot");
        CAP - 1
    };

    /// Creates an empty assembler that drops partial frames idle for longer than `timeout`.
    pub fn new(timeout: I::Duration) -> Self {
        Self {
            buffer: Vec::new(),
            last_receive: None,
            timeout,
        }
    }

    /// Feeds a single byte received at `now`.
    ///
    /// Returns `Ok(Some(frame))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed, or `Err(BufferOverflow)` when the
    /// line no longer fits. On overflow the offending byte is discarded along
    /// with the buffer.
    pub fn feed(&mut self, byte: u8, now: I) -> Result<Option<Frame<CAP>>, FrameError> {
        if byte == b'\n' || byte == b'\r' {
            // A bare terminator (second half of CRLF, blank line) is not a frame.
            if self.buffer.is_empty() {
                return Ok(None);
            }

            let bytes = core::mem::replace(&mut self.buffer, Vec::new());
            self.last_receive = None;
            trace!("frame complete: {} bytes", bytes.len());
            return Ok(Some(Frame { bytes }));
        }

        if self.buffer.len() >= Self::MAX_LEN {
            warn!("frame buffer overflow, dropping {} bytes", self.buffer.len());
            self.reset();
            return Err(FrameError::BufferOverflow);
        }

        // Cannot fail: MAX_LEN < CAP.
        let _ = self.buffer.push(byte);
        self.last_receive = Some(now);
        Ok(None)
    }

    /// Drops a partial frame that has been idle for longer than the timeout.
    ///
    /// Call once per loop iteration, including iterations where no bytes
    /// arrived. A frame idle for exactly the timeout is kept.
    pub fn check_timeout(&mut self, now: I) -> Result<(), FrameError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let Some(last) = self.last_receive else {
            return Ok(());
        };

        if now.duration_since(last).as_millis() > self.timeout.as_millis() {
            warn!("frame timeout, dropping {} bytes", self.buffer.len());
            self.reset();
            return Err(FrameError::FrameTimeout);
        }

        Ok(())
    }

    /// Discards any buffered bytes.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_receive = None;
    }

    /// Returns the bytes of the partial frame buffered so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no partial frame is buffered.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the configured inactivity timeout.
    pub fn timeout(&self) -> I::Duration {
        self.timeout
    }
}
