//! View synchronization engine.
//!
//! [`MapViewEngine`] owns all map-side state (markers, cluster overlays, the
//! selection) and reconciles it with the data-side state (merchant set,
//! filters, search results). The host forwards widget events to the `on_*`
//! entry points and pushes data changes through the setters; every call
//! receives the widget as `&mut dyn MapWidget` and leaves it consistent.
//!
//! Two invariants shape the update paths:
//! - Only a merchant *set* change regroups and rebuilds markers. Filter and
//!   search changes patch icons, titles, and clusterer attachment in place.
//! - Filter mode and search mode are mutually exclusive; search ignores the
//!   selected categories entirely.

mod marker_store;
mod spatial_index;

pub use marker_store::{marker_title, MarkerEntity, MarkerStore, Visibility};
pub use spatial_index::MarkerSpatialIndex;

use log::{debug, warn};
use serde::Serialize;

use crate::cluster::ClusterOverlayRenderer;
use crate::grouping::group_merchants;
use crate::icon::MarkerIconFactory;
use crate::map::{MapWidget, MarkerSpec, NativeCluster};
use crate::repository::DEFAULT_CATEGORIES;
use crate::selection::SelectionHighlighter;
use crate::{MapConfig, Merchant, Result};

/// Which visibility mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    Filter,
    Search,
}

#[derive(Debug)]
struct SearchState {
    query: String,
    results: Vec<Merchant>,
}

/// Snapshot of engine state for status displays and assertions.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub merchant_count: usize,
    pub marker_count: usize,
    pub attached_marker_count: usize,
    pub overlay_count: usize,
    /// Distinct icons rendered since the last marker rebuild.
    pub distinct_icons: usize,
    /// Times the grouping pass has run. Filter and search changes must not
    /// bump this.
    pub grouping_runs: u64,
    pub mode: ViewMode,
}

/// The engine. One instance per map view.
pub struct MapViewEngine {
    config: MapConfig,
    merchants: Vec<Merchant>,
    markers: MarkerStore,
    icons: MarkerIconFactory,
    overlays: ClusterOverlayRenderer,
    selection: SelectionHighlighter,
    spatial: MarkerSpatialIndex,
    filters: Vec<String>,
    search: Option<SearchState>,
    grouping_runs: u64,
}

impl MapViewEngine {
    pub fn new(config: MapConfig) -> Self {
        Self {
            overlays: ClusterOverlayRenderer::new(&config),
            selection: SelectionHighlighter::new(&config),
            config,
            merchants: Vec::new(),
            markers: MarkerStore::new(),
            icons: MarkerIconFactory::new(),
            spatial: MarkerSpatialIndex::new(),
            filters: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            search: None,
            grouping_runs: 0,
        }
    }

    /// Point the camera at the configured initial view.
    pub fn reset_camera(&self, map: &mut dyn MapWidget) {
        map.set_center(self.config.initial_center);
        map.set_zoom_level(self.config.initial_level, None);
    }

    // ----- data-side changes -----

    /// Replace the merchant set: full teardown, regroup, and rebuild.
    ///
    /// This is the only path that re-runs grouping. Selection and cluster
    /// overlays are destroyed first so no widget artifact outlives the
    /// marker it points at.
    pub fn set_merchants(&mut self, map: &mut dyn MapWidget, merchants: Vec<Merchant>) -> Result<()> {
        self.overlays.clear(map);
        self.selection.teardown(map);
        for entity in self.markers.iter() {
            if let Some(handle) = entity.handle {
                map.remove_marker(handle);
            }
        }
        self.markers.clear();
        self.icons.clear_cache();

        self.merchants = merchants;

        let groups = group_merchants(&self.merchants, self.config.snap_radius_m);
        self.grouping_runs += 1;
        debug!(
            "grouped {} merchants into {} locations",
            self.merchants.len(),
            groups.len()
        );
        self.markers.rebuild(groups);
        self.spatial.mark_dirty();

        // Create one widget marker per group, initially detached. The icon
        // and attachment are settled by the visibility pass right after.
        for index in 0..self.markers.len() {
            let spec = match self.markers.get(index) {
                Some(entity) => MarkerSpec {
                    position: entity.position,
                    title: marker_title(&entity.members),
                    icon: self.icons.marker_icon(&entity.members, &entity.key)?,
                },
                None => continue,
            };
            let handle = map.add_marker(spec);
            self.markers.assign_handle(index, handle);
        }

        self.refresh_visibility(map)
    }

    /// Change the selected filter categories.
    ///
    /// An empty selection is ignored so the map never goes blank through the
    /// filter UI. Over-long selections are clamped to the configured
    /// maximum. The active selection is cleared because the highlighted
    /// marker's visible set may no longer include it.
    pub fn set_filters(&mut self, map: &mut dyn MapWidget, filters: Vec<String>) -> Result<()> {
        if filters.is_empty() {
            debug!("ignoring empty filter selection");
            return Ok(());
        }

        let mut filters = filters;
        if filters.len() > self.config.max_filters {
            warn!(
                "clamping filter selection from {} to {}",
                filters.len(),
                self.config.max_filters
            );
            filters.truncate(self.config.max_filters);
        }

        self.clear_selection(map);
        self.filters = filters;
        self.search = None;
        self.refresh_visibility(map)
    }

    /// Enter search mode with the delivered results.
    ///
    /// Visibility switches from category filtering to result-set membership,
    /// and the camera jumps to the configured search view.
    pub fn apply_search(
        &mut self,
        map: &mut dyn MapWidget,
        query: &str,
        results: Vec<Merchant>,
    ) -> Result<()> {
        self.clear_selection(map);
        self.search = Some(SearchState {
            query: query.to_string(),
            results,
        });
        map.set_center(self.config.search_center);
        map.set_zoom_level(self.config.search_level, None);
        self.refresh_visibility(map)
    }

    /// Leave search mode and restore category-filtered visibility.
    pub fn clear_search(&mut self, map: &mut dyn MapWidget) -> Result<()> {
        if self.search.take().is_none() {
            return Ok(());
        }
        self.clear_selection(map);
        self.refresh_visibility(map)
    }

    // ----- widget events -----

    /// A marker was clicked: highlight it. Clicks on markers with no visible
    /// merchants (or unknown handles) are ignored.
    pub fn on_marker_click(&mut self, map: &mut dyn MapWidget, handle: u64) -> Result<()> {
        let Some(entity) = self.markers.get_by_handle(handle) else {
            debug!("click on unknown marker handle {handle}");
            return Ok(());
        };
        if entity.visible.is_empty() {
            return Ok(());
        }
        let key = entity.key.clone();
        let position = entity.position;
        let visible = entity.visible.clone();

        let previous = self.selection.current().map(|s| s.handle);
        self.selection
            .select(map, &self.icons, &key, handle, position, &visible)?;

        // Mirror the widget-side attach/detach into the store so the
        // fallback clusterer and the stats see the selected marker as out
        // of the base layer.
        if let Some(previous) = previous.filter(|&p| p != handle) {
            self.markers.set_attached(previous, true);
        }
        self.markers.set_attached(handle, false);
        Ok(())
    }

    /// The map background was clicked: dismiss the selection.
    pub fn on_background_click(&mut self, map: &mut dyn MapWidget) {
        self.clear_selection(map);
    }

    /// The details panel was closed by the user.
    pub fn on_panel_closed(&mut self, map: &mut dyn MapWidget) {
        self.clear_selection(map);
    }

    /// The native clusterer finished a recompute.
    pub fn on_clustered(&mut self, map: &mut dyn MapWidget, clusters: &[NativeCluster]) {
        if map.zoom_level() < self.config.min_cluster_level {
            self.overlays.clear(map);
            return;
        }
        self.overlays.render(map, clusters, &self.markers);
    }

    /// The zoom level changed: resync overlays against the new level.
    pub fn on_zoom_changed(&mut self, map: &mut dyn MapWidget) {
        self.spatial.ensure_built(&self.markers);
        self.overlays.sync(map, &self.markers, &self.spatial);
    }

    // ----- reads -----

    /// Merchants shown in the details panel for the current selection.
    pub fn selected_merchants(&self) -> Option<&[Merchant]> {
        self.selection.current().map(|s| s.merchants.as_slice())
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_ref().map(|s| s.query.as_str())
    }

    pub fn mode(&self) -> ViewMode {
        if self.search.is_some() {
            ViewMode::Search
        } else {
            ViewMode::Filter
        }
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            merchant_count: self.merchants.len(),
            marker_count: self.markers.len(),
            attached_marker_count: self.markers.attached_count(),
            overlay_count: self.overlays.overlay_count(),
            distinct_icons: self.icons.cached_count(),
            grouping_runs: self.grouping_runs,
            mode: self.mode(),
        }
    }

    // ----- internals -----

    /// Dismiss the selection and mirror the re-attachment into the store.
    fn clear_selection(&mut self, map: &mut dyn MapWidget) {
        if let Some(handle) = self.selection.current().map(|s| s.handle) {
            self.selection.clear(map);
            self.markers.set_attached(handle, true);
        }
    }

    /// Patch every marker's icon, title, and attachment to match the active
    /// mode. Never regroups; never destroys markers.
    fn refresh_visibility(&mut self, map: &mut dyn MapWidget) -> Result<()> {
        let visibility = match &self.search {
            Some(s) => Visibility::for_search_results(&s.results),
            None => Visibility::for_filters(&self.filters),
        };

        let markers = &mut self.markers;
        let icons = &mut self.icons;

        for entity in markers.iter_mut() {
            let Some(handle) = entity.handle else {
                continue;
            };
            let visible = visibility.visible_members(&entity.members);

            if visible.is_empty() {
                if entity.attached {
                    map.detach_from_clusterer(handle);
                    entity.attached = false;
                }
            } else {
                let icon = icons.marker_icon(&visible, &entity.key)?;
                map.update_marker(handle, icon, marker_title(&visible));
                if !entity.attached {
                    map.attach_to_clusterer(handle);
                    entity.attached = true;
                }
            }
            entity.visible = visible;
        }

        // The widget will re-cluster and fire its own event; sync now so
        // widgets without native introspection still get fresh rings.
        self.spatial.ensure_built(&self.markers);
        self.overlays.sync(map, &self.markers, &self.spatial);
        Ok(())
    }
}
