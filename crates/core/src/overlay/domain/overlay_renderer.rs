use crate::overlay::domain::coordinate_mapper::map_to_display;
use crate::overlay::domain::display_engine::DisplayEngine;
use crate::overlay::domain::overlay_set::{LiveOverlay, OverlaySet};
use crate::overlay::domain::overlay_style::OverlayStyle;
use crate::shared::detection::Detection;
use crate::shared::display_surface::DisplaySurface;

/// Keeps the on-screen annotation set equal to the latest frame's detections.
///
/// Every [`render`](Self::render) destroys all rectangles from the previous
/// call before creating one per detection, so the live count always equals
/// the most recent detection count. Rectangles are never reused.
pub struct OverlayRenderer<E: DisplayEngine> {
    engine: E,
    style: OverlayStyle,
    overlays: OverlaySet<E::Handle>,
}

impl<E: DisplayEngine> OverlayRenderer<E> {
    pub fn new(engine: E, style: OverlayStyle) -> Self {
        Self {
            engine,
            style,
            overlays: OverlaySet::new(),
        }
    }

    /// Replaces the live overlay set with one rectangle per detection,
    /// in sequence order.
    pub fn render(&mut self, detections: &[Detection], surface: &DisplaySurface) {
        self.clear();
        self.overlays.reserve(detections.len());

        for d in detections {
            let handle = self.engine.create_rectangle(&self.style);
            let geometry = map_to_display(d, surface);
            self.engine.set_geometry(&handle, geometry);
            self.engine.set_visible(&handle, true);
            self.overlays.push(LiveOverlay { handle, geometry });
        }

        log::trace!("Rendered {} overlay(s)", self.overlays.len());
    }

    /// Destroys every live rectangle.
    pub fn clear(&mut self) {
        for overlay in self.overlays.drain() {
            self.engine.destroy(overlay.handle);
        }
    }

    pub fn overlays(&self) -> &OverlaySet<E::Handle> {
        &self.overlays
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: DisplayEngine> Drop for OverlayRenderer<E> {
    fn drop(&mut self) {
        self.clear();
    }
}
