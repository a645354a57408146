use crate::shared::detection::Detection;
use crate::shared::display_surface::DisplaySurface;

/// Position and size of an overlay rectangle in display units, relative to
/// its top-left anchor.
///
/// `pos_y` lives in the parent's layout space where positive Y points up,
/// so a rectangle further down the surface has a more negative `pos_y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectGeometry {
    pub pos_x: f32,
    pub pos_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Maps a normalized detection into display space.
///
/// Pure and deterministic. Inverted detections map to negative sizes;
/// nothing is clamped.
pub fn map_to_display(d: &Detection, surface: &DisplaySurface) -> RectGeometry {
    RectGeometry {
        pos_x: d.x1 * surface.width,
        pos_y: -(d.y1 * surface.height),
        width: (d.x2 - d.x1) * surface.width,
        height: (d.y2 - d.y1) * surface.height,
    }
}
