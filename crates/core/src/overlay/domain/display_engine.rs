use crate::overlay::domain::coordinate_mapper::RectGeometry;
use crate::overlay::domain::overlay_style::OverlayStyle;

/// Port to the engine that owns native visual objects.
///
/// Rectangles are parented to a single fixed display container. The
/// engine hands out opaque handles; destroying consumes the handle so a
/// rectangle cannot be touched after it is gone.
pub trait DisplayEngine {
    type Handle;

    /// Creates a hidden rectangle with the given style.
    fn create_rectangle(&mut self, style: &OverlayStyle) -> Self::Handle;

    fn set_geometry(&mut self, handle: &Self::Handle, geometry: RectGeometry);

    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);

    fn destroy(&mut self, handle: Self::Handle);
}
