use crate::foundation::error::{VoxError, VoxResult};
use crate::render::raster::MonochromeBuffer;

/// Destination for packed panel frames.
///
/// Each call to `send_frame` transmits one whole 256-byte buffer as a single unit. Any error is
/// fatal for the playback session that issued it; implementations do not retry.
pub trait FrameTransport {
    /// Transmit one frame.
    fn send_frame(&mut self, frame: &MonochromeBuffer) -> VoxResult<()>;
    /// Release the underlying connection. Further sends fail.
    fn close(&mut self) -> VoxResult<()>;
}

impl<T: FrameTransport + ?Sized> FrameTransport for Box<T> {
    fn send_frame(&mut self, frame: &MonochromeBuffer) -> VoxResult<()> {
        (**self).send_frame(frame)
    }

    fn close(&mut self) -> VoxResult<()> {
        (**self).close()
    }
}

/// In-memory transport for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    frames: Vec<MonochromeBuffer>,
    fail_after: Option<usize>,
    closed: bool,
}

impl InMemoryTransport {
    /// An open transport that accepts every frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` frames, then fail every following send like a dropped connection.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    /// Frames received so far, in send order.
    pub fn frames(&self) -> &[MonochromeBuffer] {
        &self.frames
    }

    /// Whether `close` was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameTransport for InMemoryTransport {
    fn send_frame(&mut self, frame: &MonochromeBuffer) -> VoxResult<()> {
        if self.closed {
            return Err(VoxError::transport("in-memory transport is closed"));
        }
        if self.fail_after.is_some_and(|n| self.frames.len() >= n) {
            return Err(VoxError::transport("simulated connection reset"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> VoxResult<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/sink.rs"]
mod tests;
