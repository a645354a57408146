use std::collections::BTreeMap;

use crate::overlay::domain::coordinate_mapper::RectGeometry;
use crate::overlay::domain::display_engine::DisplayEngine;
use crate::overlay::domain::overlay_style::OverlayStyle;

/// Opaque handle to a node in a [`RetainedScene`].
///
/// Not `Clone`: destroying a node consumes its only handle.
#[derive(Debug, PartialEq, Eq)]
pub struct NodeHandle(u64);

impl NodeHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: u64,
    pub style: OverlayStyle,
    pub geometry: RectGeometry,
    pub visible: bool,
}

/// In-memory retained-mode display container.
///
/// Stores one node per live rectangle, ordered by creation, and counts
/// every creation and destruction so leaks show up as
/// `created - destroyed != live`.
#[derive(Debug, Default)]
pub struct RetainedScene {
    nodes: BTreeMap<u64, SceneNode>,
    next_id: u64,
    created: u64,
    destroyed: u64,
}

impl RetainedScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn visible_nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values().filter(|n| n.visible)
    }

    pub fn node(&self, handle: &NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle.0)
    }

    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn destroyed(&self) -> u64 {
        self.destroyed
    }
}

impl DisplayEngine for RetainedScene {
    type Handle = NodeHandle;

    fn create_rectangle(&mut self, style: &OverlayStyle) -> NodeHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.created += 1;
        self.nodes.insert(
            id,
            SceneNode {
                id,
                style: *style,
                geometry: RectGeometry::default(),
                visible: false,
            },
        );
        NodeHandle(id)
    }

    fn set_geometry(&mut self, handle: &NodeHandle, geometry: RectGeometry) {
        match self.nodes.get_mut(&handle.0) {
            Some(node) => node.geometry = geometry,
            None => log::warn!("set_geometry on unknown scene node {}", handle.0),
        }
    }

    fn set_visible(&mut self, handle: &NodeHandle, visible: bool) {
        match self.nodes.get_mut(&handle.0) {
            Some(node) => node.visible = visible,
            None => log::warn!("set_visible on unknown scene node {}", handle.0),
        }
    }

    fn destroy(&mut self, handle: NodeHandle) {
        if self.nodes.remove(&handle.0).is_some() {
            self.destroyed += 1;
        } else {
            log::warn!("destroy on unknown scene node {}", handle.0);
        }
    }
}
