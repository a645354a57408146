use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::Frame;
use crate::video::domain::image_source::ImageSource;

#[derive(Error, Debug)]
pub enum ImageSourceError {
    #[error("input not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no images found in {0}")]
    Empty(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Plays back a still image or a directory of images as a frame sequence.
///
/// Directory entries are filtered by extension and sorted by file name;
/// the frame index is the position in that order. Every frame is decoded
/// to RGB on demand.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    cursor: usize,
}

impl ImageSequenceSource {
    pub fn open(input: &Path) -> Result<Self, ImageSourceError> {
        if !input.exists() {
            return Err(ImageSourceError::NotFound(input.to_path_buf()));
        }

        let paths = if input.is_dir() {
            list_images(input)?
        } else {
            vec![input.to_path_buf()]
        };
        if paths.is_empty() {
            return Err(ImageSourceError::Empty(input.to_path_buf()));
        }

        log::info!("Opened {} image(s) from {}", paths.len(), input.display());
        Ok(Self { paths, cursor: 0 })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ImageSourceError> {
    let entries = fs::read_dir(dir).map_err(|source| ImageSourceError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ImageSourceError::ListDir {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        } else {
            log::debug!("Skipping non-image entry {}", path.display());
        }
    }
    paths.sort();
    Ok(paths)
}

impl ImageSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        let Some(path) = self.paths.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.cursor += 1;

        let img = image::open(path)
            .map_err(|source| ImageSourceError::Decode {
                path: path.clone(),
                source,
            })?
            .to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Some(Frame::new(img.into_raw(), width, height, 3, index)))
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.paths.len())
    }
}
