//! Cluster ring overlay synchronization.
//!
//! The widget's native clusterer collapses attached markers into grid
//! clusters on its own schedule and fires a "clustered" event when it is
//! done. This renderer reacts to that event by destroying every ring overlay
//! it owns and recreating the set from the current cluster membership.
//! Destroy-all/recreate keeps overlay state trivially consistent with
//! cluster state at the cost of rebuilding a few dozen overlays per event.
//!
//! Each ring tallies only the *visible* merchants of its member markers, so
//! a cluster of markers whose merchants are all filtered out draws nothing.

use std::collections::HashMap;

use log::debug;

use crate::categories::{self, BRAND_COLOR};
use crate::engine::{MarkerSpatialIndex, MarkerStore};
use crate::icon::cluster_ring_icon;
use crate::map::{MapWidget, NativeCluster, OverlayClick, OverlayHandle, OverlaySpec};
use crate::{GeoPoint, MapConfig};

/// Per-category visible-merchant tally across one cluster.
#[derive(Debug, Default)]
struct CategoryTally {
    counts: HashMap<String, usize>,
    total: usize,
}

impl CategoryTally {
    fn add(&mut self, business_type: &str) {
        *self.counts.entry(business_type.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Ring color: the category color when exactly one business type is
    /// present, the brand color otherwise.
    fn ring_color(&self) -> &'static str {
        if self.counts.len() == 1 {
            let only = self.counts.keys().next().map(String::as_str).unwrap_or("");
            categories::color_for(only)
        } else {
            BRAND_COLOR
        }
    }
}

/// Owns the ring overlays drawn on top of native clusters.
#[derive(Debug, Default)]
pub struct ClusterOverlayRenderer {
    overlays: Vec<OverlayHandle>,
    grid_px: f64,
    min_cluster_level: i32,
}

impl ClusterOverlayRenderer {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            overlays: Vec::new(),
            grid_px: config.cluster_grid_px,
            min_cluster_level: config.min_cluster_level,
        }
    }

    /// Number of ring overlays currently alive.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Destroy every owned overlay.
    pub fn clear(&mut self, map: &mut dyn MapWidget) {
        for handle in self.overlays.drain(..) {
            map.remove_overlay(handle);
        }
    }

    /// Reconcile overlays with the widget's current state.
    ///
    /// Below the minimum cluster level everything is torn down. Otherwise
    /// native cluster membership drives the rings, with manual grid
    /// bucketing as the fallback when the widget exposes no introspection.
    pub fn sync(
        &mut self,
        map: &mut dyn MapWidget,
        markers: &MarkerStore,
        spatial: &MarkerSpatialIndex,
    ) {
        if map.zoom_level() < self.min_cluster_level {
            self.clear(map);
            return;
        }

        match map.native_clusters() {
            Some(clusters) => self.render(map, &clusters, markers),
            None => self.render_fallback(map, markers, spatial),
        }
    }

    /// Destroy all rings and recreate one per native cluster of two or more
    /// markers.
    pub fn render(
        &mut self,
        map: &mut dyn MapWidget,
        clusters: &[NativeCluster],
        markers: &MarkerStore,
    ) {
        self.clear(map);

        for cluster in clusters {
            if cluster.markers.len() < 2 {
                continue;
            }

            let mut tally = CategoryTally::default();
            for &handle in &cluster.markers {
                let Some(entity) = markers.get_by_handle(handle) else {
                    debug!("cluster references unknown marker handle {handle}");
                    continue;
                };
                for m in &entity.visible {
                    tally.add(&m.business_type);
                }
            }

            self.draw_ring(map, cluster.bounds.center(), &tally);
        }
    }

    /// Manual grid bucketing over the viewport, used when the widget cannot
    /// report native cluster membership. Buckets attached markers by their
    /// projected pixel cell and rings every bucket of two or more.
    fn render_fallback(
        &mut self,
        map: &mut dyn MapWidget,
        markers: &MarkerStore,
        spatial: &MarkerSpatialIndex,
    ) {
        self.clear(map);

        let in_view = spatial.query_viewport(&map.viewport_bounds());

        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        let marker_list: Vec<_> = markers.iter().collect();

        for index in in_view {
            let entity = marker_list[index];
            if !entity.attached || entity.visible.is_empty() {
                continue;
            }
            let screen = map.project(&entity.position);
            let cell = (
                (screen.x / self.grid_px).floor() as i64,
                (screen.y / self.grid_px).floor() as i64,
            );
            buckets.entry(cell).or_default().push(index);
        }

        for members in buckets.into_values() {
            if members.len() < 2 {
                continue;
            }

            let mut tally = CategoryTally::default();
            let mut lat_sum = 0.0;
            let mut lng_sum = 0.0;
            for &index in &members {
                let entity = marker_list[index];
                lat_sum += entity.position.lat;
                lng_sum += entity.position.lng;
                for m in &entity.visible {
                    tally.add(&m.business_type);
                }
            }

            let n = members.len() as f64;
            self.draw_ring(map, GeoPoint::new(lat_sum / n, lng_sum / n), &tally);
        }
    }

    fn draw_ring(&mut self, map: &mut dyn MapWidget, center: GeoPoint, tally: &CategoryTally) {
        // All merchants filtered out: no ring.
        if tally.total == 0 {
            return;
        }

        let icon = cluster_ring_icon(tally.ring_color(), tally.total);
        let handle = map.add_overlay(OverlaySpec {
            position: center,
            icon,
            anchor: (0.5, 0.5),
            z_index: 10,
            on_click: Some(OverlayClick::ZoomInAt(center)),
        });
        self.overlays.push(handle);
    }
}
