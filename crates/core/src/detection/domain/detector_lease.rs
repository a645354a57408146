use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Scoped ownership of a face detector.
///
/// The wrapped detector is released exactly once: either through an
/// explicit [`release`](Self::release) or when the lease is dropped,
/// whichever comes first. Detection after release is an error.
pub struct DetectorLease {
    detector: Option<Box<dyn FaceDetector>>,
}

impl DetectorLease {
    pub fn acquire(detector: Box<dyn FaceDetector>) -> Self {
        log::debug!("Face detector acquired");
        Self {
            detector: Some(detector),
        }
    }

    pub fn detect(
        &mut self,
        frame: &Frame,
        threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        match self.detector.as_mut() {
            Some(detector) => detector.detect(frame, threshold),
            None => Err("face detector has already been released".into()),
        }
    }

    pub fn is_released(&self) -> bool {
        self.detector.is_none()
    }

    /// Releases the detector. Subsequent calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut detector) = self.detector.take() {
            detector.release();
            log::debug!("Face detector released");
        }
    }
}

impl Drop for DetectorLease {
    fn drop(&mut self) {
        self.release();
    }
}
