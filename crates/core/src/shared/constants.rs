/// Default minimum detection confidence passed to the face detector.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// Bytes per mebibyte, used for memory usage reporting.
pub const BYTES_PER_MEBIBYTE: u64 = 1024 * 1024;

pub const MEMORY_TEXT_PREFIX: &str = "Total Allocated Memory:";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Overlay fill color (opaque red, RGBA).
pub const DEFAULT_OVERLAY_COLOR: [u8; 4] = [255, 0, 0, 255];

pub const DEFAULT_OUTLINE_THICKNESS: u32 = 2;

/// Upper bound accepted for configured outline thickness, in pixels.
pub const MAX_OUTLINE_THICKNESS: u32 = 256;
