use storemap::icon::{classify, cluster_ring_icon, count_label, MarkerIconFactory, MarkerRendering};
use storemap::{Merchant, StoreMapError, BRAND_COLOR};

fn merchant(name: &str, business_type: &str) -> Merchant {
    Merchant::new(name, business_type, business_type, "성남대로 1")
}

#[test]
fn test_classify_empty_is_an_error() {
    let err = classify(&[], "37.38,127.12").unwrap_err();
    assert!(matches!(err, StoreMapError::EmptyLocation { .. }));
}

#[test]
fn test_classify_single_merchant() {
    let visible = vec![merchant("A", "음식점")];
    let rendering = classify(&visible, "k").unwrap();
    assert_eq!(
        rendering,
        MarkerRendering::Single {
            business_type: "음식점".to_string()
        }
    );
}

#[test]
fn test_classify_same_type_gets_badge() {
    let visible = vec![
        merchant("A", "음식점"),
        merchant("B", "음식점"),
        merchant("C", "음식점"),
    ];
    let rendering = classify(&visible, "k").unwrap();
    assert_eq!(
        rendering,
        MarkerRendering::SingleWithBadge {
            business_type: "음식점".to_string(),
            count: 3
        }
    );
}

#[test]
fn test_classify_mixed_types_is_multi() {
    let visible = vec![
        merchant("A", "음식점"),
        merchant("B", "음식점"),
        merchant("C", "미용"),
    ];
    let rendering = classify(&visible, "k").unwrap();
    assert_eq!(rendering, MarkerRendering::Multi { count: 3 });
}

#[test]
fn test_factory_caches_equivalent_renderings() {
    let mut factory = MarkerIconFactory::new();
    let a = vec![merchant("A", "음식점")];
    let b = vec![merchant("B", "음식점")];

    let icon_a = factory.marker_icon(&a, "k1").unwrap();
    let icon_b = factory.marker_icon(&b, "k2").unwrap();

    assert_eq!(factory.cached_count(), 1);
    assert_eq!(icon_a, icon_b);
}

#[test]
fn test_factory_distinguishes_renderings() {
    let mut factory = MarkerIconFactory::new();
    factory.marker_icon(&[merchant("A", "음식점")], "k1").unwrap();
    factory.marker_icon(&[merchant("B", "미용")], "k2").unwrap();
    factory
        .marker_icon(&[merchant("C", "음식점"), merchant("D", "음식점")], "k3")
        .unwrap();

    assert_eq!(factory.cached_count(), 3);
}

#[test]
fn test_clear_cache_empties_the_factory() {
    let mut factory = MarkerIconFactory::new();
    factory.marker_icon(&[merchant("A", "음식점")], "k").unwrap();
    factory.clear_cache();
    assert_eq!(factory.cached_count(), 0);
}

#[test]
fn test_badge_icon_carries_the_count() {
    let mut factory = MarkerIconFactory::new();
    let visible = vec![merchant("A", "음식점"), merchant("B", "음식점")];
    let icon = factory.marker_icon(&visible, "k").unwrap();
    assert!(icon.svg.contains(">2</text>"), "svg: {}", icon.svg);
}

#[test]
fn test_multi_icon_uses_brand_color() {
    let mut factory = MarkerIconFactory::new();
    let visible = vec![merchant("A", "음식점"), merchant("B", "미용")];
    let icon = factory.marker_icon(&visible, "k").unwrap();
    assert!(icon.svg.contains(BRAND_COLOR));
}

#[test]
fn test_marker_icon_is_center_anchored() {
    let mut factory = MarkerIconFactory::new();
    let icon = factory.marker_icon(&[merchant("A", "음식점")], "k").unwrap();
    assert_eq!((icon.width, icon.height), (36, 36));
    assert_eq!(icon.anchor, (18.0, 18.0));
}

#[test]
fn test_selected_pin_is_tip_anchored() {
    let factory = MarkerIconFactory::new();
    let icon = factory.selected_pin(&[merchant("A", "음식점")], "k").unwrap();
    assert_eq!((icon.width, icon.height), (48, 60));
    assert_eq!(icon.anchor, (24.0, 60.0));
}

#[test]
fn test_selected_pin_multi_uses_brand_color() {
    let factory = MarkerIconFactory::new();
    let visible = vec![merchant("A", "음식점"), merchant("B", "미용")];
    let icon = factory.selected_pin(&visible, "k").unwrap();
    assert!(icon.svg.contains(BRAND_COLOR));
}

#[test]
fn test_badge_text_is_dark_on_white() {
    let mut factory = MarkerIconFactory::new();
    let visible = vec![merchant("A", "음식점"), merchant("B", "음식점")];
    let icon = factory.marker_icon(&visible, "k").unwrap();
    assert!(icon.svg.contains(r##"fill="#333""##), "svg: {}", icon.svg);
}

#[test]
fn test_icons_carry_drop_shadows() {
    let mut factory = MarkerIconFactory::new();
    let single = factory.marker_icon(&[merchant("A", "음식점")], "k1").unwrap();
    let badge = factory
        .marker_icon(&[merchant("A", "음식점"), merchant("B", "음식점")], "k2")
        .unwrap();
    let pin = factory.selected_pin(&[merchant("A", "음식점")], "k1").unwrap();
    let ring = cluster_ring_icon("#FF6B6B", 3);

    for icon in [&single, &badge, &pin, &ring] {
        assert!(icon.svg.contains("feDropShadow"), "svg: {}", icon.svg);
        assert!(icon.svg.contains("filter=\"url(#"), "svg: {}", icon.svg);
    }
}

#[test]
fn test_count_label_abbreviates_thousands() {
    assert_eq!(count_label(7), "7");
    assert_eq!(count_label(999), "999");
    assert_eq!(count_label(1000), "1k");
    assert_eq!(count_label(2500), "2k");
}

#[test]
fn test_cluster_ring_icon_shape() {
    let icon = cluster_ring_icon("#FF6B6B", 12);
    assert_eq!((icon.width, icon.height), (52, 52));
    assert_eq!(icon.anchor, (26.0, 26.0));
    assert!(icon.svg.contains("#FF6B6B"));
    assert!(icon.svg.contains(">12</text>"));
}

#[test]
fn test_data_uri_is_fully_encoded() {
    let mut factory = MarkerIconFactory::new();
    let icon = factory.marker_icon(&[merchant("A", "음식점")], "k").unwrap();
    let uri = icon.data_uri();
    assert!(uri.starts_with("data:image/svg+xml;charset=utf-8,"));
    let payload = &uri["data:image/svg+xml;charset=utf-8,".len()..];
    assert!(!payload.contains('<'));
    assert!(!payload.contains('"'));
}
