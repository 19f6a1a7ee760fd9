//! R-tree index over marker positions.
//!
//! Backs the manual clustering fallback: when the widget exposes no cluster
//! introspection, the renderer queries the viewport here instead of scanning
//! every marker. Rebuilt lazily after each marker rebuild.

use rstar::{RTree, RTreeObject, AABB};

use crate::Bounds;

use super::marker_store::MarkerStore;

/// Marker index entry keyed by position.
#[derive(Debug, Clone)]
struct IndexedMarker {
    /// Index into the marker store.
    index: usize,
    /// [lng, lat] to match the x/y convention of the tree.
    position: [f64; 2],
}

impl RTreeObject for IndexedMarker {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Lazily rebuilt R-tree over marker positions.
#[derive(Debug, Default)]
pub struct MarkerSpatialIndex {
    tree: RTree<IndexedMarker>,
    dirty: bool,
}

impl MarkerSpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            dirty: false,
        }
    }

    /// Mark the index stale. Next query rebuilds it.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Rebuild from the marker store if stale.
    pub fn ensure_built(&mut self, markers: &MarkerStore) {
        if !self.dirty && self.tree.size() == markers.len() {
            return;
        }

        let entries: Vec<IndexedMarker> = markers
            .iter()
            .enumerate()
            .map(|(index, e)| IndexedMarker {
                index,
                position: [e.position.lng, e.position.lat],
            })
            .collect();

        self.tree = RTree::bulk_load(entries);
        self.dirty = false;
    }

    /// Indices of markers whose position falls inside `bounds`.
    pub fn query_viewport(&self, bounds: &Bounds) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );
        self.tree
            .locate_in_envelope(&envelope)
            .map(|e| e.index)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
