#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use maplet_canvas_markers::prelude::*;
use maplet_canvas_markers::StaticIconSource;

pub const RED: &str = "red.png";
pub const BLUE: &str = "blue.png";
pub const SHEET: &str = "sheet.png";
pub const GARBAGE: &str = "garbage.png";
pub const MISSING: &str = "missing.png";

pub const RED_PX: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const BLUE_PX: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const GREEN_PX: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const CLEAR_PX: Rgba<u8> = Rgba([0, 0, 0, 0]);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Red and blue squares, plus a sprite sheet whose left half is red and
/// right half green
pub fn icon_source() -> Arc<StaticIconSource> {
    let source = StaticIconSource::new();
    source
        .insert_image(RED, &RgbaImage::from_pixel(4, 4, RED_PX))
        .unwrap();
    source
        .insert_image(BLUE, &RgbaImage::from_pixel(4, 4, BLUE_PX))
        .unwrap();

    let mut sheet = RgbaImage::from_pixel(8, 4, RED_PX);
    for y in 0..4 {
        for x in 4..8 {
            sheet.put_pixel(x, y, GREEN_PX);
        }
    }
    source.insert_image(SHEET, &sheet).unwrap();
    source.insert(GARBAGE, b"not an image".to_vec());
    Arc::new(source)
}

/// 200x200 map centered on null island
pub fn map() -> HeadlessMap {
    init_logging();
    HeadlessMap::new(LatLng::new(0.0, 0.0), 3.0, Point::new(200.0, 200.0))
}

pub fn layer(options: CanvasLayerOptions) -> CanvasIconLayer {
    CanvasIconLayer::with_source(options, icon_source(), IconLoadingConfig::immediate())
}

/// Attach a default layer, returning its id
pub fn attach(map: &mut HeadlessMap) -> String {
    layer(CanvasLayerOptions::default()).add_to(map).unwrap()
}

pub fn icon(url: &str, size: f64) -> Icon {
    Icon::new(url, (size, size))
}

/// Marker whose position projects onto container pixel (x, y)
pub fn marker_at(map: &HeadlessMap, x: f64, y: f64, icon: Icon) -> Marker {
    let lat_lng = map.viewport().container_point_to_lat_lng(&Point::new(x, y));
    Marker::new(lat_lng, MarkerOptions::with_icon(icon))
}

pub fn get<'a>(map: &'a HeadlessMap, id: &str) -> &'a CanvasIconLayer {
    map.layer::<CanvasIconLayer>(id).unwrap()
}

pub fn with<R>(map: &mut HeadlessMap, id: &str, f: impl FnOnce(&mut CanvasIconLayer) -> R) -> R {
    map.with_layer_mut::<CanvasIconLayer, R>(id, f).unwrap()
}

pub fn pixel(map: &HeadlessMap, id: &str, x: u32, y: u32) -> Rgba<u8> {
    get(map, id).canvas().unwrap().pixel(x, y).unwrap()
}

/// Count clicks delivered to `marker`
pub fn click_counter(marker: &Marker) -> Rc<Cell<u32>> {
    let clicks = Rc::new(Cell::new(0));
    let seen = Rc::clone(&clicks);
    marker.on(MarkerEventKind::Click, move |_| seen.set(seen.get() + 1));
    clicks
}
