//! Selected-marker highlight.
//!
//! A two-state machine: idle, or exactly one marker highlighted. Selecting
//! detaches the marker from the native clusterer (so the base layer cannot
//! swallow it) and hangs an enlarged pin overlay above it; clearing reverses
//! both. At every quiescent point at most one marker is detached, which the
//! transition order below preserves even when switching straight from one
//! selection to another.

use crate::icon::MarkerIconFactory;
use crate::map::{MapWidget, MarkerHandle, OverlayHandle, OverlaySpec};
use crate::{GeoPoint, MapConfig, Merchant, Result};

/// The active selection, if any.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Location key of the selected group.
    pub key: String,
    /// Handle of the detached marker.
    pub handle: MarkerHandle,
    /// Handle of the pin overlay.
    pub overlay: OverlayHandle,
    /// Visible merchants at selection time, as shown in the details panel.
    pub merchants: Vec<Merchant>,
}

/// Owns the selection state and its widget-side artifacts.
#[derive(Debug, Default)]
pub struct SelectionHighlighter {
    current: Option<Selection>,
    panel_fraction: f64,
}

impl SelectionHighlighter {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            current: None,
            panel_fraction: config.panel_fraction,
        }
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Highlight a marker.
    ///
    /// Re-attaches the previously selected marker *before* detaching the new
    /// one, so the detached set never holds two markers. Selecting the
    /// already-selected marker refreshes its pin in place.
    pub fn select(
        &mut self,
        map: &mut dyn MapWidget,
        icons: &MarkerIconFactory,
        key: &str,
        handle: MarkerHandle,
        position: GeoPoint,
        visible: &[Merchant],
    ) -> Result<()> {
        if let Some(prev) = self.current.take() {
            map.remove_overlay(prev.overlay);
            if prev.handle != handle {
                map.attach_to_clusterer(prev.handle);
            }
        }

        map.detach_from_clusterer(handle);

        let pin = icons.selected_pin(visible, key)?;
        let overlay = map.add_overlay(OverlaySpec {
            position,
            icon: pin,
            anchor: (0.5, 1.0),
            z_index: 100,
            on_click: None,
        });

        // Pan the marker into the upper part of the viewport so the details
        // panel sliding up from the bottom does not cover it.
        let span = map.viewport_bounds().lat_span();
        let offset = span * (0.5 - self.panel_fraction);
        map.pan_to(GeoPoint::new(position.lat - offset, position.lng));

        self.current = Some(Selection {
            key: key.to_string(),
            handle,
            overlay,
            merchants: visible.to_vec(),
        });

        Ok(())
    }

    /// Return to idle: destroy the pin and re-attach the marker.
    /// No-op when already idle.
    pub fn clear(&mut self, map: &mut dyn MapWidget) {
        if let Some(sel) = self.current.take() {
            map.remove_overlay(sel.overlay);
            map.attach_to_clusterer(sel.handle);
        }
    }

    /// Drop the selection as part of a full marker teardown.
    ///
    /// Destroys the pin overlay but does not touch the marker, which the
    /// caller is about to remove anyway.
    pub fn teardown(&mut self, map: &mut dyn MapWidget) {
        if let Some(sel) = self.current.take() {
            map.remove_overlay(sel.overlay);
        }
    }
}
