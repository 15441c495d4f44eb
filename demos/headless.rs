//! Paints a few thousand markers on a headless map and reports what the
//! canvas layer did.
//!
//! Run with `RUST_LOG=debug cargo run --example headless` to see the layer's
//! log output.

use image::{Rgba, RgbaImage};
use maplet_canvas_markers::prelude::*;
use maplet_canvas_markers::StaticIconSource;

fn pin(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_fn(12, 20, |x, y| {
        let dx = x as i32 - 6;
        if y < 12 || dx.abs() <= (20 - y as i32) / 3 {
            Rgba(color)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let source = StaticIconSource::new();
    source.insert_image("pins/red.png", &pin([220, 40, 40, 255]))?;
    source.insert_image("pins/blue.png", &pin([40, 80, 220, 255]))?;
    let source = Arc::new(source);

    let mut map = HeadlessMap::new(LatLng::new(48.8566, 2.3522), 11.0, Point::new(800.0, 600.0));
    let id = CanvasIconLayer::with_source(
        CanvasLayerOptions::default(),
        source,
        IconLoadingConfig::default(),
    )
    .add_to(&mut map)?;

    let icons = [
        Rc::new(Icon::new("pins/red.png", (12.0, 20.0)).with_anchor((6.0, 20.0))),
        Rc::new(Icon::new("pins/blue.png", (12.0, 20.0)).with_anchor((6.0, 20.0))),
    ];
    let clicked = Rc::new(Cell::new(None));

    let mut markers = Vec::new();
    for i in 0..2000 {
        let lat = 48.70 + (i % 50) as f64 * 0.007;
        let lng = 2.10 + (i / 50) as f64 * 0.0125;
        let options = MarkerOptions {
            icon: Some(Rc::clone(&icons[i % 2])),
            title: Some(format!("Stop #{i}")),
            ..MarkerOptions::default()
        };
        let marker = Marker::new(LatLng::new(lat, lng), options);
        let seen = Rc::clone(&clicked);
        marker.on(MarkerEventKind::Click, move |_| seen.set(Some(i)));
        markers.push(marker);
    }

    map.with_layer_mut::<CanvasIconLayer, _>(&id, |layer| {
        for marker in &markers {
            layer.add_layer(marker);
        }
    });

    // Wait for both icons to load in the background
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        map.animation_frame()?;
        let ready = map
            .layer::<CanvasIconLayer>(&id)
            .map(|layer| icons.iter().all(|icon| layer.icon_cache().is_ready(&icon.url)))
            .unwrap_or(false);
        if ready || std::time::Instant::now() > deadline {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
    map.animation_frame()?;

    let target = map.viewport().lat_lng_to_container_point(&markers[1234].lat_lng());
    map.click(target.add(&Point::new(0.0, -10.0)))?;
    map.mouse_move(target.add(&Point::new(0.0, -10.0)))?;

    map.pan_by(Point::new(120.0, -40.0))?;
    map.zoom_to(12.0, true)?;

    if let Some(layer) = map.layer::<CanvasIconLayer>(&id) {
        let stats = layer.stats();
        println!("markers:     {}", layer.marker_count());
        println!("repaints:    {}", stats.repaints);
        println!("draw calls:  {}", stats.draw_calls);
        println!("culled:      {}", stats.culled);
        println!("not ready:   {}", stats.not_ready);
        println!("icon cache:  {:?}", layer.icon_cache().cache_stats());
        if let Some(canvas) = layer.canvas() {
            println!(
                "canvas:      {}x{} at {}",
                canvas.width(),
                canvas.height(),
                canvas.transform().to_css()
            );
        }
        if let Some(tooltip) = layer.tooltip() {
            println!("tooltip:     {:?} (visible: {})", tooltip.text(), tooltip.is_visible());
        }
    }
    println!("clicked:     {:?}", clicked.get());
    println!("cursor:      {:?}", map.cursor());
    Ok(())
}
