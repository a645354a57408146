use std::collections::HashMap;
use std::sync::Arc;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Replays recorded detection results by frame index.
///
/// Stands in for a live model when detections were produced offline by an
/// external tool. Only detections scoring at or above the threshold are
/// returned, preserving their recorded order.
pub struct ReplayFaceDetector {
    recorded: Arc<HashMap<usize, Vec<Detection>>>,
}

impl ReplayFaceDetector {
    pub fn new(recorded: Arc<HashMap<usize, Vec<Detection>>>) -> Self {
        Self { recorded }
    }
}

impl FaceDetector for ReplayFaceDetector {
    fn detect(
        &mut self,
        frame: &Frame,
        threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        Ok(self
            .recorded
            .get(&frame.index())
            .map(|detections| {
                detections
                    .iter()
                    .filter(|d| d.score >= threshold)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}
