//! Marker storage and visible-sublist derivation.
//!
//! One [`MarkerEntity`] exists per location group. Entities survive filter
//! and search changes; only their icon, title, and clusterer attachment are
//! mutated in place, so a filter tweak never tears the marker set down.

use std::collections::{HashMap, HashSet};

use crate::map::MarkerHandle;
use crate::{GeoPoint, LocationGroup, Merchant};

/// Which merchants count as visible under the active mode.
///
/// Derivation is a pure function of (group members, mode); the stored
/// per-marker sublist is just the memoized result of the latest refresh.
#[derive(Debug, Clone)]
pub enum Visibility {
    /// Filter mode: merchants whose business type is in the selected set.
    Types(HashSet<String>),
    /// Search mode: merchants whose identity appears in the search results.
    Identities(HashSet<String>),
}

impl Visibility {
    pub fn for_filters(filters: &[String]) -> Self {
        Self::Types(filters.iter().cloned().collect())
    }

    pub fn for_search_results(results: &[Merchant]) -> Self {
        Self::Identities(results.iter().map(Merchant::identity).collect())
    }

    /// Derive the visible sublist of a group's members.
    pub fn visible_members(&self, members: &[Merchant]) -> Vec<Merchant> {
        members
            .iter()
            .filter(|m| match self {
                Self::Types(types) => types.contains(&m.business_type),
                Self::Identities(ids) => ids.contains(&m.identity()),
            })
            .cloned()
            .collect()
    }
}

/// One marker per location group.
#[derive(Debug, Clone)]
pub struct MarkerEntity {
    /// Stable location key (stringified group centroid).
    pub key: String,
    pub position: GeoPoint,
    /// Full member list, independent of filter/search state.
    pub members: Vec<Merchant>,
    /// Visible sublist as of the latest refresh.
    pub visible: Vec<Merchant>,
    /// Widget handle, assigned when the marker is created.
    pub handle: Option<MarkerHandle>,
    /// Whether the marker is currently handed to the native clusterer.
    pub attached: bool,
}

/// Storage for marker entities with handle lookup.
#[derive(Debug, Default)]
pub struct MarkerStore {
    markers: Vec<MarkerEntity>,
    by_handle: HashMap<MarkerHandle, usize>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entities with fresh ones built from location groups.
    /// Handles are unassigned until the engine creates widget markers.
    pub fn rebuild(&mut self, groups: Vec<LocationGroup>) {
        self.by_handle.clear();
        self.markers = groups
            .into_iter()
            .map(|g| MarkerEntity {
                key: g.key,
                position: g.centroid,
                members: g.members,
                visible: Vec::new(),
                handle: None,
                attached: false,
            })
            .collect();
    }

    /// Record the widget handle for the entity at `index`.
    pub fn assign_handle(&mut self, index: usize, handle: MarkerHandle) {
        if let Some(e) = self.markers.get_mut(index) {
            e.handle = Some(handle);
            self.by_handle.insert(handle, index);
        }
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.by_handle.clear();
    }

    pub fn get(&self, index: usize) -> Option<&MarkerEntity> {
        self.markers.get(index)
    }

    /// Record a clusterer attachment change made outside the visibility
    /// pass (marker selection detaches and re-attaches on the widget).
    pub fn set_attached(&mut self, handle: MarkerHandle, attached: bool) {
        if let Some(&i) = self.by_handle.get(&handle) {
            self.markers[i].attached = attached;
        }
    }

    pub fn get_by_handle(&self, handle: MarkerHandle) -> Option<&MarkerEntity> {
        self.by_handle.get(&handle).map(|&i| &self.markers[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerEntity> {
        self.markers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MarkerEntity> {
        self.markers.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of markers currently attached to the clusterer.
    pub fn attached_count(&self) -> usize {
        self.markers.iter().filter(|e| e.attached).count()
    }
}

/// Marker hover/click title: the first visible merchant's name, with a
/// "외 {n}곳" suffix when others share the location.
pub fn marker_title(visible: &[Merchant]) -> String {
    match visible {
        [] => String::new(),
        [only] => only.name.clone(),
        [first, rest @ ..] => format!("{} 외 {}곳", first.name, rest.len()),
    }
}
