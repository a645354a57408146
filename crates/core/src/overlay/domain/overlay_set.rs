use crate::overlay::domain::coordinate_mapper::RectGeometry;

/// A live overlay rectangle: the engine handle plus the geometry applied to it.
#[derive(Debug)]
pub struct LiveOverlay<H> {
    pub handle: H,
    pub geometry: RectGeometry,
}

/// Ordered collection of the rectangles currently on screen.
///
/// Only the renderer mutates it; everyone else gets a read-only view.
#[derive(Debug)]
pub struct OverlaySet<H> {
    live: Vec<LiveOverlay<H>>,
}

impl<H> OverlaySet<H> {
    pub(crate) fn new() -> Self {
        Self { live: Vec::new() }
    }

    pub(crate) fn push(&mut self, overlay: LiveOverlay<H>) {
        self.live.push(overlay);
    }

    /// Removes every overlay, yielding them in creation order.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, LiveOverlay<H>> {
        self.live.drain(..)
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.live.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LiveOverlay<H>> {
        self.live.iter()
    }

    pub fn geometries(&self) -> Vec<RectGeometry> {
        self.live.iter().map(|o| o.geometry).collect()
    }
}

impl<'a, H> IntoIterator for &'a OverlaySet<H> {
    type Item = &'a LiveOverlay<H>;
    type IntoIter = std::slice::Iter<'a, LiveOverlay<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
