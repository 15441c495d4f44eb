mod common;

use common::*;
use maplet_canvas_markers::prelude::*;
use serde_json::json;

#[test]
fn test_pane_option_before_attach() {
    let mut map = map();
    map.create_pane("customPane").unwrap();

    let mut layer = layer(CanvasLayerOptions::default());
    layer.set_options(json!({ "pane": "customPane" }), None).unwrap();
    let id = layer.add_to(&mut map).unwrap();

    let layer = get(&map, &id);
    let element = layer.canvas().unwrap().element();
    assert_eq!(layer.pane(), Some("customPane"));
    assert_eq!(map.pane_children("customPane"), Some(&[element][..]));
    assert_eq!(map.pane_children("overlayPane"), Some(&[][..]));
}

#[test]
fn test_attach_into_missing_pane_fails() {
    let mut map = map();
    let layer = layer(CanvasLayerOptions::with_pane("nowhere"));
    assert!(layer.add_to(&mut map).is_err());
    assert!(map.layer_ids().is_empty());
}

#[test]
fn test_set_options_merges_and_redraws() {
    let mut map = map();
    let id = attach(&mut map);
    let repaints = get(&map, &id).stats().repaints;

    map.set_layer_options(&id, json!({ "unrelated": 3 })).unwrap();
    let layer = get(&map, &id);
    assert_eq!(layer.options(), json!({ "pane": null }));
    assert_eq!(layer.stats().repaints, repaints + 1);
    assert_eq!(layer.pane(), Some("overlayPane"));

    assert!(map.set_layer_options(&id, json!("markerPane")).is_err());
}

#[test]
fn test_moving_an_attached_layer_needs_the_map() {
    let mut map = map();
    let id = attach(&mut map);
    let result = with(&mut map, &id, |layer| {
        layer.set_options(json!({ "pane": "markerPane" }), None)
    });
    assert!(result.is_err());
    assert_eq!(get(&map, &id).pane(), Some("overlayPane"));

    map.set_layer_options(&id, json!({ "pane": "markerPane" })).unwrap();
    let element = get(&map, &id).canvas().unwrap().element();
    assert_eq!(map.pane_children("markerPane"), Some(&[element][..]));
}

#[test]
fn test_add_layer_accepts_only_icon_markers() {
    let mut map = map();
    let id = attach(&mut map);
    let good = marker_at(&map, 10.0, 10.0, icon(RED, 8.0));
    let iconless = Marker::new(LatLng::new(0.0, 0.0), MarkerOptions::default());
    let wrong_pane = Marker::new(
        LatLng::new(0.0, 0.0),
        MarkerOptions::with_icon(icon(RED, 8.0)).pane("overlayPane"),
    );

    with(&mut map, &id, |layer| {
        assert!(layer.add_layer(&good).is_some());
        assert!(layer.add_layer(&iconless).is_none());
        assert!(layer.add_layer(&wrong_pane).is_none());
    });
    assert_eq!(get(&map, &id).marker_count(), 1);
}

#[test]
fn test_removing_unknown_marker_is_noop() {
    let mut map = map();
    let id = attach(&mut map);
    let stranger = marker_at(&map, 10.0, 10.0, icon(RED, 8.0));
    let repaints = get(&map, &id).stats().repaints;

    let removed = with(&mut map, &id, |layer| {
        layer.remove_marker(&stranger, true) || layer.remove_layer(&stranger)
    });
    assert!(!removed);
    assert_eq!(get(&map, &id).stats().repaints, repaints);
}

#[test]
fn test_readded_marker_gets_a_new_handle() {
    let mut map = map();
    let id = attach(&mut map);
    let marker = marker_at(&map, 10.0, 10.0, icon(RED, 8.0));

    let first = with(&mut map, &id, |layer| layer.add_marker(&marker));
    with(&mut map, &id, |layer| layer.remove_marker(&marker, false));
    let second = with(&mut map, &id, |layer| layer.add_marker(&marker));
    assert!(second > first);
    assert_eq!(marker.listener_count(MarkerEventKind::Move), 1);
}

#[test]
fn test_detach_removes_canvas_and_tolerates_late_work() {
    let mut map = map();
    let id = attach(&mut map);
    let titled = Marker::new(
        map.viewport().container_point_to_lat_lng(&Point::new(40.0, 40.0)),
        MarkerOptions::with_icon(icon(RED, 10.0)).title("Late"),
    );
    with(&mut map, &id, |layer| layer.add_marker(&titled));
    map.animation_frame().unwrap();
    map.mouse_move(Point::new(40.0, 40.0)).unwrap();
    assert_eq!(map.pane_children("overlayPane").map(<[_]>::len), Some(2));

    // A load queued right before detaching
    let late = marker_at(&map, 100.0, 100.0, icon(BLUE, 10.0));
    with(&mut map, &id, |layer| layer.add_marker(&late));

    let mut removed = map.remove_layer(&id).unwrap().unwrap();
    assert_eq!(map.pane_children("overlayPane"), Some(&[][..]));

    let layer = removed
        .as_any_mut()
        .downcast_mut::<CanvasIconLayer>()
        .unwrap();
    assert!(!layer.is_attached());
    let repaints = layer.stats().repaints;

    titled.set_lat_lng(LatLng::new(1.0, 1.0));
    assert!(!layer.tick());
    layer.redraw();
    assert_eq!(layer.stats().repaints, repaints);
    assert!(layer.icon_cache().is_ready(BLUE));
    assert!(layer.marker_at(&Point::new(40.0, 40.0)).is_none());

    // Events after detaching do not reach the layer
    map.pan_by(Point::new(5.0, 5.0)).unwrap();
    map.animation_frame().unwrap();
}

#[test]
fn test_zoom_animation_transforms_canvas() {
    let mut map = HeadlessMap::new(LatLng::new(0.0, 0.0), 3.0, Point::new(400.0, 300.0));
    let id = attach(&mut map);
    let canvas = get(&map, &id).canvas().unwrap();
    assert!(canvas.has_class("leaflet-zoom-animated"));
    assert_eq!(canvas.transform(), Transform::translation(Point::new(-200.0, -150.0)));

    map.fire(MapEvent::ZoomAnim {
        center: LatLng::new(0.0, 0.0),
        zoom: 4.0,
    })
    .unwrap();
    let transform = get(&map, &id).canvas().unwrap().transform();
    assert_eq!(transform.scale, 2.0);
    assert_eq!(transform.translate, Point::new(-400.0, -300.0));
    assert_eq!(transform.to_css(), "translate3d(-400px,-300px,0) scale(2)");

    // Settling the zoom resets the canvas to a plain translation
    let repaints = get(&map, &id).stats().repaints;
    map.zoom_to(4.0, true).unwrap();
    let layer = get(&map, &id);
    assert_eq!(
        layer.canvas().unwrap().transform(),
        Transform::translation(Point::new(-200.0, -150.0))
    );
    assert!(layer.stats().repaints > repaints);
}

#[test]
fn test_zoom_without_animation_hides_canvas() {
    let mut map = map().with_zoom_animation(false);
    let id = attach(&mut map);
    let layer = get(&map, &id);
    assert!(layer.canvas().unwrap().has_class("leaflet-zoom-hide"));
    assert!(!layer.events().contains(&MapEventKind::ZoomAnim));

    let before = layer.canvas().unwrap().transform();
    map.fire(MapEvent::ZoomAnim {
        center: LatLng::new(0.0, 0.0),
        zoom: 5.0,
    })
    .unwrap();
    assert_eq!(get(&map, &id).canvas().unwrap().transform(), before);
}

#[test]
fn test_zoom_repositions_markers() {
    let mut map = map();
    let id = attach(&mut map);
    let marker = marker_at(&map, 150.0, 100.0, icon(RED, 6.0));
    with(&mut map, &id, |layer| layer.add_marker(&marker));
    map.animation_frame().unwrap();
    assert_eq!(pixel(&map, &id, 150, 100), RED_PX);

    map.zoom_to(4.0, false).unwrap();
    // 50px right of center becomes 100px right of center
    assert_eq!(pixel(&map, &id, 199, 100), RED_PX);
    assert_eq!(pixel(&map, &id, 150, 100), CLEAR_PX);
}
