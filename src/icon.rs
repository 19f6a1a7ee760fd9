//! Marker icon rendering.
//!
//! Turns the visible merchants of a location group into a renderable icon
//! resource. The same decision table drives three visual variants: the base
//! 36x36 marker, the enlarged selected pin, and the 52x52 cluster ring.
//!
//! Icons are plain SVG rasterized by the map widget via a `data:` URI.

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::categories::{self, BRAND_COLOR, STAR_ICON_PATH};
use crate::error::{Result, StoreMapError};
use crate::Merchant;

/// Base marker size in pixels.
const MARKER_SIZE: u32 = 36;
/// Selected pin size in pixels.
const PIN_WIDTH: u32 = 48;
const PIN_HEIGHT: u32 = 60;
/// Cluster ring size in pixels.
const RING_SIZE: u32 = 52;
const RING_RADIUS: f64 = 20.0;
const RING_STROKE: f64 = 6.0;

/// An opaque renderable icon: SVG text plus pixel size and anchor point.
#[derive(Debug, Clone, PartialEq)]
pub struct IconResource {
    pub svg: String,
    pub width: u32,
    pub height: u32,
    /// Anchor in pixel coordinates from the top-left corner.
    pub anchor: (f64, f64),
}

impl IconResource {
    /// Address the icon as a `data:image/svg+xml` URI.
    pub fn data_uri(&self) -> String {
        let encoded = utf8_percent_encode(&self.svg, NON_ALPHANUMERIC);
        format!("data:image/svg+xml;charset=utf-8,{encoded}")
    }
}

/// Which of the three marker renderings a location group gets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerRendering {
    /// Exactly one visible merchant: category circle, no badge.
    Single { business_type: String },
    /// Two or more visible merchants, all the same business type:
    /// category circle plus a corner count badge.
    SingleWithBadge {
        business_type: String,
        count: usize,
    },
    /// Two or more visible merchants across distinct business types:
    /// brand-colored circle with the star glyph plus a count badge.
    Multi { count: usize },
}

/// Classify a group's visible merchants into a rendering.
///
/// Returns an error for an empty slice; callers detach empty markers
/// instead of rendering them.
pub fn classify(visible: &[Merchant], key: &str) -> Result<MarkerRendering> {
    if visible.is_empty() {
        return Err(StoreMapError::EmptyLocation {
            key: key.to_string(),
        });
    }

    if visible.len() == 1 {
        return Ok(MarkerRendering::Single {
            business_type: visible[0].business_type.clone(),
        });
    }

    let first_type = &visible[0].business_type;
    let mixed = visible.iter().any(|m| &m.business_type != first_type);

    if mixed {
        Ok(MarkerRendering::Multi {
            count: visible.len(),
        })
    } else {
        Ok(MarkerRendering::SingleWithBadge {
            business_type: first_type.clone(),
            count: visible.len(),
        })
    }
}

/// Icon factory with a per-rebuild cache.
///
/// Equivalent renderings (same business type, same count bucket) serialize
/// to identical SVG, so the factory caches by rendering key and hands out
/// clones. The cache is discarded on every full marker rebuild.
#[derive(Debug, Default)]
pub struct MarkerIconFactory {
    cache: HashMap<MarkerRendering, IconResource>,
}

impl MarkerIconFactory {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Drop all cached icons. Called at the start of a marker rebuild.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of distinct icons rendered since the last rebuild.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Build (or reuse) the base marker icon for a group's visible merchants.
    pub fn marker_icon(&mut self, visible: &[Merchant], key: &str) -> Result<IconResource> {
        let rendering = classify(visible, key)?;

        if let Some(cached) = self.cache.get(&rendering) {
            return Ok(cached.clone());
        }

        let icon = match &rendering {
            MarkerRendering::Single { business_type } => circle_marker_svg(
                categories::color_for(business_type),
                categories::icon_path_for(business_type),
            ),
            MarkerRendering::SingleWithBadge {
                business_type,
                count,
            } => badge_marker_svg(
                categories::color_for(business_type),
                categories::icon_path_for(business_type),
                *count,
            ),
            MarkerRendering::Multi { count } => multi_marker_svg(*count),
        };

        self.cache.insert(rendering, icon.clone());
        Ok(icon)
    }

    /// Build the enlarged selected-pin variant for a group's visible
    /// merchants. Not cached: at most one exists at a time.
    pub fn selected_pin(&self, visible: &[Merchant], key: &str) -> Result<IconResource> {
        let rendering = classify(visible, key)?;

        let icon = match &rendering {
            MarkerRendering::Single { business_type }
            | MarkerRendering::SingleWithBadge { business_type, .. } => selected_pin_svg(
                categories::color_for(business_type),
                categories::icon_path_for(business_type),
            ),
            MarkerRendering::Multi { .. } => selected_pin_svg(BRAND_COLOR, STAR_ICON_PATH),
        };

        Ok(icon)
    }
}

/// Cluster ring icon: a single-color ring around the visible-merchant count.
///
/// `color` is the category color when every visible merchant in the cluster
/// shares one business type, and the brand color otherwise.
pub fn cluster_ring_icon(color: &str, total: usize) -> IconResource {
    let center = RING_SIZE as f64 / 2.0;
    let outer = RING_RADIUS + RING_STROKE / 2.0 + 2.0;
    let inner = RING_RADIUS - RING_STROKE / 2.0 - 1.0;
    let label = count_label(total);
    let font_size = count_font_size(total);

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<defs><filter id="shadow" x="-30%" y="-30%" width="160%" height="160%">"#,
            r#"<feDropShadow dx="0" dy="2" stdDeviation="3" flood-opacity="0.15"/></filter></defs>"#,
            r##"<circle cx="{c}" cy="{c}" r="{outer}" fill="white" filter="url(#shadow)"/>"##,
            r#"<circle cx="{c}" cy="{c}" r="{r}" fill="none" stroke="{color}" stroke-width="{stroke}"/>"#,
            r#"<circle cx="{c}" cy="{c}" r="{inner}" fill="white"/>"#,
            r#"<text x="{c}" y="{c}" text-anchor="middle" dominant-baseline="central" "#,
            r#"font-family="'Noto Sans KR', sans-serif" font-size="{font}" font-weight="bold" fill="{color}">{label}</text>"#,
            "</svg>"
        ),
        size = RING_SIZE,
        c = center,
        outer = outer,
        r = RING_RADIUS,
        color = color,
        stroke = RING_STROKE,
        inner = inner,
        font = font_size,
        label = label,
    );

    IconResource {
        svg,
        width: RING_SIZE,
        height: RING_SIZE,
        anchor: (center, center),
    }
}

/// Count text shown inside badges and rings: abbreviated as "{n}k" at 1000+.
pub fn count_label(total: usize) -> String {
    if total >= 1000 {
        format!("{}k", total / 1000)
    } else {
        total.to_string()
    }
}

/// Ring font size steps down as the count grows.
fn count_font_size(total: usize) -> u32 {
    if total >= 1000 {
        11
    } else if total >= 100 {
        13
    } else {
        15
    }
}

fn circle_marker_svg(color: &str, icon_path: &str) -> IconResource {
    let size = MARKER_SIZE as f64;
    let center = size / 2.0;

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<defs><filter id="shadow" x="-30%" y="-30%" width="160%" height="160%">"#,
            r#"<feDropShadow dx="0" dy="2" stdDeviation="2" flood-opacity="0.25"/></filter></defs>"#,
            r##"<circle cx="{c}" cy="{c}" r="{r}" fill="{color}" filter="url(#shadow)"/>"##,
            r#"<g transform="translate({g},{g}) scale(0.75)"><path d="{path}" fill="white"/></g>"#,
            "</svg>"
        ),
        size = MARKER_SIZE,
        c = center,
        r = center - 2.0,
        color = color,
        g = center - 9.0,
        path = icon_path,
    );

    IconResource {
        svg,
        width: MARKER_SIZE,
        height: MARKER_SIZE,
        anchor: (center, center),
    }
}

fn badge_marker_svg(color: &str, icon_path: &str, count: usize) -> IconResource {
    let size = MARKER_SIZE as f64;
    let center = size / 2.0;
    let badge = size - 8.0;

    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#,
            r#"<defs><filter id="shadow" x="-30%" y="-30%" width="160%" height="160%">"#,
            r#"<feDropShadow dx="0" dy="2" stdDeviation="2" flood-opacity="0.25"/></filter></defs>"#,
            r##"<circle cx="{c}" cy="{c}" r="{r}" fill="{color}" filter="url(#shadow)"/>"##,
            r#"<g transform="translate({g},{g}) scale(0.75)"><path d="{path}" fill="white"/></g>"#,
            r#"<circle cx="{b}" cy="{b}" r="8" fill="white"/>"#,
            r#"<text x="{b}" y="{b}" text-anchor="middle" dominant-baseline="central" "#,
            r##"font-family="'Noto Sans KR', sans-serif" font-size="10" font-weight="bold" fill="#333">{label}</text>"##,
            "</svg>"
        ),
        size = MARKER_SIZE,
        c = center,
        r = center - 2.0,
        color = color,
        g = center - 9.0,
        path = icon_path,
        b = badge,
        label = count_label(count),
    );

    IconResource {
        svg,
        width: MARKER_SIZE,
        height: MARKER_SIZE,
        anchor: (center, center),
    }
}

// Same template as the badge marker, in the brand color with the star glyph.
fn multi_marker_svg(count: usize) -> IconResource {
    badge_marker_svg(BRAND_COLOR, STAR_ICON_PATH, count)
}

fn selected_pin_svg(color: &str, icon_path: &str) -> IconResource {
    let svg = format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<defs><filter id="pinShadow" x="-50%" y="-20%" width="200%" height="150%">"#,
            r#"<feDropShadow dx="0" dy="3" stdDeviation="3" flood-opacity="0.3"/></filter></defs>"#,
            r##"<path d="M24 0C10.745 0 0 10.745 0 24c0 18 24 36 24 36s24-18 24-36C48 10.745 37.255 0 24 0z" fill="{color}" filter="url(#pinShadow)"/>"##,
            r#"<circle cx="24" cy="22" r="17" fill="white" opacity="0.95"/>"#,
            r#"<g transform="translate(12,10)"><path d="{path}" fill="{color}"/></g>"#,
            "</svg>"
        ),
        w = PIN_WIDTH,
        h = PIN_HEIGHT,
        color = color,
        path = icon_path,
    );

    IconResource {
        svg,
        width: PIN_WIDTH,
        height: PIN_HEIGHT,
        // Tip of the teardrop sits on the marker position.
        anchor: (PIN_WIDTH as f64 / 2.0, PIN_HEIGHT as f64),
    }
}
