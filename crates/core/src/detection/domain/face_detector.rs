use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Implementations may be stateful (e.g., tracking across frames),
/// hence `&mut self`. `threshold` is the minimum confidence in `[0, 1]`.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        frame: &Frame,
        threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;

    /// Releases model or device resources. Called at most once, by
    /// [`DetectorLease`](super::detector_lease::DetectorLease).
    fn release(&mut self) {}
}
