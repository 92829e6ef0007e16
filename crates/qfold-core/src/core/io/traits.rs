use crate::core::models::frame::Frame;
use std::error::Error;

/// Defines the interface for streaming trajectory frames.
///
/// A frame source yields frames in *file order*, which need not be
/// monotonic in frame id; ordering and duplicate handling are the
/// trajectory scanner's concern. Sources are one-shot: once `next_frame`
/// returns `Ok(None)` the source is exhausted.
pub trait FrameSource {
    /// The error type for read failures.
    type Error: Error + Send + Sync + 'static;

    /// Returns the next frame in source order, or `None` when exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying file cannot be read or a
    /// structural record is malformed.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}
