use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::detection::Detection;

#[derive(Error, Debug)]
pub enum DetectionLogError {
    #[error("failed to read detection log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse detection log {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("frame {0} appears more than once in the detection log")]
    DuplicateFrame(usize),
}

/// Detections recorded for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameDetections {
    pub index: usize,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// On-disk JSON document of recorded detections:
///
/// ```json
/// {"frames": [{"index": 0, "detections": [{"x1": 0.1, "y1": 0.2, "x2": 0.3, "y2": 0.4, "score": 0.9}]}]}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionLog {
    #[serde(default)]
    pub frames: Vec<FrameDetections>,
}

impl DetectionLog {
    pub fn load(path: &Path) -> Result<Self, DetectionLogError> {
        let json = fs::read_to_string(path).map_err(|source| DetectionLogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| DetectionLogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Indexes the log by frame, rejecting duplicate frame entries.
    pub fn into_frame_map(self) -> Result<HashMap<usize, Vec<Detection>>, DetectionLogError> {
        let mut map = HashMap::with_capacity(self.frames.len());
        for entry in self.frames {
            if map.insert(entry.index, entry.detections).is_some() {
                return Err(DetectionLogError::DuplicateFrame(entry.index));
            }
        }
        Ok(map)
    }
}
