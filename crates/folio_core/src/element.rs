//! Element tree
//!
//! Renderable nodes are owned by the component that mounts them and are
//! addressed through [`ElementId`], a generational key. A handle to an
//! unmounted node stays safe to hold: lookups through it simply fail.
//!
//! Each node carries its page-space bounds and an `active` marker. The marker
//! is the only channel through which the reveal engine talks to the
//! rendering layer (think of it as the `active` class in a stylesheet).

use crate::geometry::Rect;
use slotmap::{new_key_type, Key, SlotMap};

new_key_type! {
    /// Handle to a mounted element
    pub struct ElementId;
}

impl ElementId {
    /// Convert to raw u64 for logging and serialization
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// A mounted element
#[derive(Clone, Debug)]
pub struct ElementNode {
    /// Page-space bounding box
    pub bounds: Rect,
    /// Marker toggled by the reveal engine
    pub active: bool,
    /// Optional human-readable label (section name, card title)
    pub label: Option<String>,
}

/// Owner of all mounted elements
#[derive(Default)]
pub struct ElementTree {
    nodes: SlotMap<ElementId, ElementNode>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount an element with the given bounds
    pub fn mount(&mut self, bounds: Rect) -> ElementId {
        self.nodes.insert(ElementNode {
            bounds,
            active: false,
            label: None,
        })
    }

    /// Mount an element with a label used in logs and timelines
    pub fn mount_labeled(&mut self, bounds: Rect, label: impl Into<String>) -> ElementId {
        self.nodes.insert(ElementNode {
            bounds,
            active: false,
            label: Some(label.into()),
        })
    }

    /// Remove an element; returns the node if it was mounted
    pub fn unmount(&mut self, id: ElementId) -> Option<ElementNode> {
        self.nodes.remove(id)
    }

    pub fn is_mounted(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.nodes.get(id)
    }

    pub fn bounds(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.bounds)
    }

    /// Update bounds after a layout change; ignored for detached handles
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.bounds = bounds;
        }
    }

    pub fn label(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.label.as_deref())
    }

    pub fn is_active(&self, id: ElementId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.active)
    }

    /// Toggle the `active` marker; returns whether the marker changed
    pub fn set_active(&mut self, id: ElementId, active: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.active != active => {
                node.active = active;
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &ElementNode)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_is_detached() {
        let mut tree = ElementTree::new();
        let a = tree.mount(Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.unmount(a);

        // Reusing the slot must not revive the stale handle
        let b = tree.mount(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(!tree.is_mounted(a));
        assert!(tree.is_mounted(b));
        assert!(tree.bounds(a).is_none());
        assert!(!tree.set_active(a, true));
    }

    #[test]
    fn test_active_marker_reports_changes() {
        let mut tree = ElementTree::new();
        let id = tree.mount_labeled(Rect::new(0.0, 0.0, 10.0, 10.0), "hero");

        assert!(tree.set_active(id, true));
        assert!(!tree.set_active(id, true));
        assert!(tree.is_active(id));
        assert_eq!(tree.label(id), Some("hero"));
        assert!(tree.set_active(id, false));
    }
}
