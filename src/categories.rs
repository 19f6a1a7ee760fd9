//! Category style table.
//!
//! Fixed configuration mapping each business type to a chip label, a marker
//! color, and an SVG glyph path (24x24 viewBox). This is data, not logic:
//! the icon factory and cluster renderer only look colors and paths up here.

/// Brand color used for multi-category markers, pins, and cluster rings.
pub const BRAND_COLOR: &str = "#FF9F40";

/// Fallback color when a business type is missing from the table.
pub const DEFAULT_COLOR: &str = "#FF6B6B";

/// Star glyph shown on multi-category markers (a hotspot of mixed benefits).
pub const STAR_ICON_PATH: &str =
    "M12 17.27L18.18 21l-1.64-7.03L22 9.24l-7.19-.61L12 2 9.19 8.63 2 9.24l5.46 4.73L5.82 21z";

/// Style entry for one business type.
#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    /// Business type key as stored on merchant records.
    pub key: &'static str,
    /// Short chip label.
    pub label: &'static str,
    /// Marker / ring color.
    pub color: &'static str,
    /// Glyph path data, 24x24 viewBox.
    pub icon_path: &'static str,
}

/// The full business type table (11 categories).
pub const BUSINESS_TYPE_STYLES: &[CategoryStyle] = &[
    CategoryStyle {
        key: "음식점",
        label: "음식점",
        color: "#FF6B6B",
        icon_path: "M11 9H9V2H7v7H5V2H3v7c0 2.12 1.66 3.84 3.75 3.97V22h2.5v-9.03C11.34 12.84 13 11.12 13 9V2h-2v7zm5-3v8h2.5v8H21V2c-2.76 0-5 2.24-5 4z",
    },
    CategoryStyle {
        key: "마트/슈퍼마켓",
        label: "마트",
        color: "#4ECDC4",
        icon_path: "M7 18c-1.1 0-1.99.9-1.99 2S5.9 22 7 22s2-.9 2-2-.9-2-2-2zM1 2v2h2l3.6 7.59-1.35 2.45c-.16.28-.25.61-.25.96 0 1.1.9 2 2 2h12v-2H7.42c-.14 0-.25-.11-.25-.25l.03-.12.9-1.63h7.45c.75 0 1.41-.41 1.75-1.03l3.58-6.49c.08-.14.12-.31.12-.48 0-.55-.45-1-1-1H5.21l-.94-2H1zm16 16c-1.1 0-1.99.9-1.99 2s.89 2 1.99 2 2-.9 2-2-.9-2-2-2z",
    },
    CategoryStyle {
        key: "교육/서점",
        label: "교육/서점",
        color: "#9B59B6",
        icon_path: "M18 2H6c-1.1 0-2 .9-2 2v16c0 1.1.9 2 2 2h12c1.1 0 2-.9 2-2V4c0-1.1-.9-2-2-2zM6 4h5v8l-2.5-1.5L6 12V4z",
    },
    CategoryStyle {
        key: "식품",
        label: "식품",
        color: "#F39C12",
        icon_path: "M12 6c1.11 0 2-.9 2-2 0-.38-.1-.73-.29-1.03L12 0l-1.71 2.97c-.19.3-.29.65-.29 1.03 0 1.1.9 2 2 2zm4.6 9.99l-1.07-1.07-1.08 1.07c-1.3 1.3-3.58 1.31-4.89 0l-1.07-1.07-1.09 1.07C6.75 16.64 5.88 17 4.96 17c-.73 0-1.4-.23-1.96-.61V21c0 .55.45 1 1 1h16c.55 0 1-.45 1-1v-4.61c-.56.38-1.23.61-1.96.61-.92 0-1.79-.36-2.44-1.01zM18 9h-5V7h-2v2H6c-1.66 0-3 1.34-3 3v1.54c0 1.08.88 1.96 1.96 1.96.52 0 1.02-.2 1.38-.57l2.14-2.13 2.13 2.13c.74.74 2.03.74 2.77 0l2.14-2.13 2.13 2.13c.37.37.86.57 1.38.57 1.08 0 1.96-.88 1.96-1.96V12C21 10.34 19.66 9 18 9z",
    },
    CategoryStyle {
        key: "제과점/커피",
        label: "제과점/커피",
        color: "#795548",
        icon_path: "M2 21h18v-2H2v2zm2-3h14c1.1 0 2-.9 2-2V5h2V3H2v2h2v11c0 1.1.9 2 2 2zm2-5V5h10v8H6zm10.5-4c-.83 0-1.5.67-1.5 1.5s.67 1.5 1.5 1.5 1.5-.67 1.5-1.5-.67-1.5-1.5-1.5z",
    },
    CategoryStyle {
        key: "병원/약국",
        label: "병원/약국",
        color: "#E91E63",
        icon_path: "M19 3H5c-1.1 0-1.99.9-1.99 2L3 19c0 1.1.9 2 2 2h14c1.1 0 2-.9 2-2V5c0-1.1-.9-2-2-2zm-1 11h-4v4h-4v-4H6v-4h4V6h4v4h4v4z",
    },
    CategoryStyle {
        key: "의류/잡화",
        label: "의류/잡화",
        color: "#3F8EFC",
        icon_path: "M21.6 5.29l-4-2.3a1 1 0 0 0-.5-.13H15a3 3 0 0 1-6 0H6.9a1 1 0 0 0-.5.13l-4 2.3L4 9.5l2-1.14V21h12V8.36l2 1.14z",
    },
    CategoryStyle {
        key: "미용",
        label: "미용",
        color: "#FF8FB1",
        icon_path: "M9.64 7.64A3 3 0 1 0 6 9.46L8.54 12 6 14.54a3 3 0 1 0 3.64 1.82L12 14l7 7h3v-1L9.64 7.64zM6 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2zm0 10a1 1 0 1 1 0-2 1 1 0 0 1 0 2zm6-5.5a.5.5 0 1 1 0-1 .5.5 0 0 1 0 1zM19 3l-6 6 2 2 7-7V3z",
    },
    CategoryStyle {
        key: "스포츠/문화",
        label: "스포츠/문화",
        color: "#2ECC71",
        icon_path: "M20.57 14.86L22 13.43 20.57 12 17 15.57 8.43 7 12 3.43 10.57 2 9.14 3.43 7.71 2 5.57 4.14 4.14 2.71 2.71 4.14l1.43 1.43L2 7.71l1.43 1.43L2 10.57 3.43 12 7 8.43 15.57 17 12 20.57 13.43 22l1.43-1.43L16.29 22l2.14-2.14 1.43 1.43 1.43-1.43-1.43-1.43L22 16.29z",
    },
    CategoryStyle {
        key: "숙박/여행",
        label: "숙박/여행",
        color: "#5C6BC0",
        icon_path: "M7 13c1.66 0 3-1.34 3-3S8.66 7 7 7s-3 1.34-3 3 1.34 3 3 3zm12-6h-8v7H3V5H1v15h2v-3h18v3h2v-9c0-2.21-1.79-4-4-4z",
    },
    CategoryStyle {
        key: "생활/기타",
        label: "생활/기타",
        color: "#95A5A6",
        icon_path: "M10 20v-6h4v6h5v-8h3L12 3 2 12h3v8z",
    },
];

/// Look up the style entry for a business type.
pub fn style_for(business_type: &str) -> Option<&'static CategoryStyle> {
    BUSINESS_TYPE_STYLES.iter().find(|s| s.key == business_type)
}

/// Marker color for a business type, falling back to [`DEFAULT_COLOR`].
pub fn color_for(business_type: &str) -> &'static str {
    style_for(business_type).map_or(DEFAULT_COLOR, |s| s.color)
}

/// Glyph path for a business type, falling back to an empty path.
pub fn icon_path_for(business_type: &str) -> &'static str {
    style_for(business_type).map_or("", |s| s.icon_path)
}
