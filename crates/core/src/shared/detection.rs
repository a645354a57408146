use serde::{Deserialize, Serialize};

/// A face detection in normalized frame coordinates.
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right, both
/// as fractions of the source frame, with Y growing downward. Ordering of
/// the corners is the detector's responsibility and is not checked here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(default = "default_score")]
    pub score: f32,
}

fn default_score() -> f32 {
    1.0
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            score: default_score(),
        }
    }

    pub fn with_score(self, score: f32) -> Self {
        Self { score, ..self }
    }

    /// Normalized width. Negative for inverted detections.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Normalized height. Negative for inverted detections.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn is_inverted(&self) -> bool {
        self.x1 > self.x2 || self.y1 > self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_defaults_score_to_one() {
        assert_relative_eq!(Detection::new(0.1, 0.2, 0.3, 0.4).score, 1.0);
    }

    #[test]
    fn test_extent() {
        let d = Detection::new(0.25, 0.1, 0.75, 0.6);
        assert_relative_eq!(d.width(), 0.5);
        assert_relative_eq!(d.height(), 0.5);
        assert!(!d.is_inverted());
    }

    #[test]
    fn test_inverted_detection_has_negative_extent() {
        let d = Detection::new(0.8, 0.5, 0.2, 0.6);
        assert!(d.width() < 0.0);
        assert!(d.is_inverted());
    }

    #[test]
    fn test_deserialize_without_score() {
        let d: Detection =
            serde_json::from_str(r#"{"x1":0.1,"y1":0.2,"x2":0.3,"y2":0.4}"#).unwrap();
        assert_eq!(d, Detection::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_deserialize_with_score() {
        let d: Detection =
            serde_json::from_str(r#"{"x1":0,"y1":0,"x2":1,"y2":1,"score":0.42}"#).unwrap();
        assert_relative_eq!(d.score, 0.42);
    }
}
