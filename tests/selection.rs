mod common;

use common::{merchant, FakeMap};
use storemap::icon::MarkerIconFactory;
use storemap::{GeoPoint, MapConfig, MapWidget, MarkerSpec, SelectionHighlighter};

fn add_marker(map: &mut FakeMap, factory: &mut MarkerIconFactory, lat: f64, lng: f64) -> u64 {
    let visible = vec![merchant("가게", "음식점", lat, lng)];
    let icon = factory.marker_icon(&visible, "k").unwrap();
    let handle = map.add_marker(MarkerSpec {
        position: GeoPoint::new(lat, lng),
        title: "가게".to_string(),
        icon,
    });
    map.attach_to_clusterer(handle);
    handle
}

#[test]
fn test_select_detaches_marker_and_adds_pin() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let handle = add_marker(&mut map, &mut factory, 37.38, 127.12);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let visible = vec![merchant("가게", "음식점", 37.38, 127.12)];
    highlighter
        .select(
            &mut map,
            &factory,
            "37.38,127.12",
            handle,
            GeoPoint::new(37.38, 127.12),
            &visible,
        )
        .unwrap();

    assert!(!map.attached.contains(&handle));
    assert_eq!(map.overlays.len(), 1);
    let pin = map.overlays.values().next().unwrap();
    assert_eq!(pin.anchor, (0.5, 1.0));
    assert_eq!(pin.z_index, 100);
    assert_eq!(highlighter.current().unwrap().key, "37.38,127.12");
}

#[test]
fn test_switching_selection_reattaches_previous_first() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let m1 = add_marker(&mut map, &mut factory, 37.38, 127.12);
    let m2 = add_marker(&mut map, &mut factory, 37.40, 127.14);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let v1 = vec![merchant("가게1", "음식점", 37.38, 127.12)];
    let v2 = vec![merchant("가게2", "음식점", 37.40, 127.14)];

    highlighter
        .select(&mut map, &factory, "k1", m1, GeoPoint::new(37.38, 127.12), &v1)
        .unwrap();
    highlighter
        .select(&mut map, &factory, "k2", m2, GeoPoint::new(37.40, 127.14), &v2)
        .unwrap();

    // M1 is back in the base layer, M2 is the only detached marker, and the
    // old pin is gone.
    assert!(map.attached.contains(&m1));
    assert!(!map.attached.contains(&m2));
    assert_eq!(map.overlays.len(), 1);
    assert_eq!(map.attach_call_count(m1), 2);
}

#[test]
fn test_reselecting_same_marker_replaces_pin_in_place() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let handle = add_marker(&mut map, &mut factory, 37.38, 127.12);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let visible = vec![merchant("가게", "음식점", 37.38, 127.12)];
    let position = GeoPoint::new(37.38, 127.12);

    highlighter
        .select(&mut map, &factory, "k", handle, position, &visible)
        .unwrap();
    highlighter
        .select(&mut map, &factory, "k", handle, position, &visible)
        .unwrap();

    // Still selected and still detached; it was never bounced through the
    // clusterer in between.
    assert!(!map.attached.contains(&handle));
    assert_eq!(map.overlays.len(), 1);
    assert_eq!(map.attach_call_count(handle), 1);
}

#[test]
fn test_clear_restores_idle_state() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let handle = add_marker(&mut map, &mut factory, 37.38, 127.12);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let visible = vec![merchant("가게", "음식점", 37.38, 127.12)];
    highlighter
        .select(&mut map, &factory, "k", handle, GeoPoint::new(37.38, 127.12), &visible)
        .unwrap();

    highlighter.clear(&mut map);
    assert!(map.attached.contains(&handle));
    assert!(map.overlays.is_empty());
    assert!(highlighter.current().is_none());

    // Clearing again is a no-op.
    highlighter.clear(&mut map);
    assert_eq!(map.attach_call_count(handle), 2);
}

#[test]
fn test_select_pans_marker_into_upper_third() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let handle = add_marker(&mut map, &mut factory, 37.38, 127.12);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let visible = vec![merchant("가게", "음식점", 37.38, 127.12)];
    highlighter
        .select(&mut map, &factory, "k", handle, GeoPoint::new(37.38, 127.12), &visible)
        .unwrap();

    // Viewport spans 0.2 degrees of latitude; centering one sixth of the
    // span below the marker puts it a third of the way down the screen.
    let target = map.pan_targets.last().unwrap();
    assert!((target.lat - (37.38 - 0.2 / 6.0)).abs() < 1e-9);
    assert_eq!(target.lng, 127.12);
}

#[test]
fn test_teardown_drops_pin_but_not_marker_state() {
    let mut map = FakeMap::new();
    let mut factory = MarkerIconFactory::new();
    let handle = add_marker(&mut map, &mut factory, 37.38, 127.12);

    let mut highlighter = SelectionHighlighter::new(&MapConfig::default());
    let visible = vec![merchant("가게", "음식점", 37.38, 127.12)];
    highlighter
        .select(&mut map, &factory, "k", handle, GeoPoint::new(37.38, 127.12), &visible)
        .unwrap();

    highlighter.teardown(&mut map);
    assert!(map.overlays.is_empty());
    assert!(highlighter.current().is_none());
    // The marker was not re-attached; the caller is about to remove it.
    assert!(!map.attached.contains(&handle));
}
