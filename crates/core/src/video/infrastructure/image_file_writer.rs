use std::path::Path;

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes annotated frames with the `image` crate; the format follows the
/// file extension.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = frame.data().to_vec();
        match frame.channels() {
            3 => image::RgbImage::from_raw(frame.width(), frame.height(), data)
                .ok_or("Failed to create RGB image from frame data")?
                .save(path)?,
            4 => image::RgbaImage::from_raw(frame.width(), frame.height(), data)
                .ok_or("Failed to create RGBA image from frame data")?
                .save(path)?,
            n => return Err(format!("Unsupported channel count for image output: {n}").into()),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &Frame::filled(100, 80, [50, 100, 200], 0))
            .unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_roundtrip_preserves_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        ImageFileWriter::new()
            .write(&path, &Frame::filled(50, 50, [50, 100, 200], 0))
            .unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(0, 0).0, [50, 100, 200]);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frames").join("0.png");
        ImageFileWriter::new()
            .write(&path, &Frame::filled(4, 4, [0, 0, 0], 0))
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unsupported_channel_count_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::new(vec![0u8; 8], 2, 2, 2, 0);
        let result = ImageFileWriter::new().write(&dir.path().join("out.png"), &frame);
        assert!(result.is_err());
    }
}
