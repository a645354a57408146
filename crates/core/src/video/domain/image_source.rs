use crate::shared::frame::Frame;

/// Supplies the current preview frame, one call per display refresh.
///
/// Implementations handle decoding and I/O; the pipeline only sees
/// [`Frame`]s with increasing indices.
pub trait ImageSource: Send {
    /// Returns the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Total frame count when known up front.
    fn len_hint(&self) -> Option<usize> {
        None
    }
}
