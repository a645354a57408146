use crate::overlay::domain::overlay_style::{Color, FillMode};
use crate::overlay::infrastructure::retained_scene::{RetainedScene, SceneNode};
use crate::shared::display_surface::DisplaySurface;
use crate::shared::frame::Frame;

/// Pixel-space rectangle, half-open on the right and bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

/// Rasterizes the visible nodes of a [`RetainedScene`] onto a preview frame.
///
/// The scene is laid out in display units on `surface`; the frame may have a
/// different resolution, so every node is scaled by `frame / surface` on
/// each axis. The anchor's upward Y axis is flipped back to image rows.
pub struct FrameCompositor;

impl FrameCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Returns a copy of `frame` with every visible node drawn on top.
    pub fn compose(
        &self,
        frame: &Frame,
        scene: &RetainedScene,
        surface: &DisplaySurface,
    ) -> Frame {
        let mut out = frame.clone();
        if surface.is_degenerate() {
            log::debug!("Skipping composition onto degenerate surface {surface:?}");
            return out;
        }
        for node in scene.visible_nodes() {
            if let Some(rect) = self.pixel_rect(node, surface, frame.width(), frame.height()) {
                paint(&mut out, rect, node.style.color, node.style.fill);
            }
        }
        out
    }

    /// Converts a node's display geometry into frame pixels, clipped to the
    /// frame. Returns `None` for empty, inverted or fully off-frame nodes.
    pub fn pixel_rect(
        &self,
        node: &SceneNode,
        surface: &DisplaySurface,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<PixelRect> {
        let sx = frame_width as f32 / surface.width;
        let sy = frame_height as f32 / surface.height;
        let g = node.geometry;

        let left = g.pos_x * sx;
        let top = -g.pos_y * sy;
        let right = left + g.width * sx;
        let bottom = top + g.height * sy;

        let clip = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
        let rect = PixelRect {
            x0: clip(left, frame_width),
            y0: clip(top, frame_height),
            x1: clip(right, frame_width),
            y1: clip(bottom, frame_height),
        };
        if rect.x0 >= rect.x1 || rect.y0 >= rect.y1 {
            return None;
        }
        Some(rect)
    }
}

impl Default for FrameCompositor {
    fn default() -> Self {
        Self::new()
    }
}

fn paint(frame: &mut Frame, rect: PixelRect, color: Color, fill: FillMode) {
    let color_channels = (frame.channels() as usize).min(3);
    let rgb = color.rgb();
    let alpha = color.alpha() as u32;
    let mut pixels = frame.as_ndarray_mut();

    for row in rect.y0..rect.y1 {
        for col in rect.x0..rect.x1 {
            if !covers(rect, fill, col, row) {
                continue;
            }
            for (c, &value) in rgb.iter().enumerate().take(color_channels) {
                let px = &mut pixels[[row as usize, col as usize, c]];
                *px = blend(*px, value, alpha);
            }
        }
    }
}

fn covers(rect: PixelRect, fill: FillMode, col: u32, row: u32) -> bool {
    match fill {
        FillMode::Fill => true,
        FillMode::Outline { thickness } => {
            // Distances to each edge; `rect` is non-empty and contains (col, row).
            let t = thickness.max(1);
            col - rect.x0 < t || rect.x1 - 1 - col < t || row - rect.y0 < t || rect.y1 - 1 - row < t
        }
    }
}

fn blend(under: u8, over: u8, alpha: u32) -> u8 {
    ((over as u32 * alpha + under as u32 * (255 - alpha) + 127) / 255) as u8
}
