//! Marker layer that paints every icon onto one shared canvas
//!
//! Instead of one element per marker, the layer owns a single [`Canvas`]
//! sized to the map view. Marker moves and icon loads only request a repaint;
//! requests are coalesced and served on the next animation frame. Pans and
//! zooms reposition, resize and repaint the canvas synchronously so it never
//! shows stale pixels.

use crate::{
    core::{
        bounds::Bounds,
        config::{CanvasLayerOptions, IconLoadingConfig},
        constants::{CANVAS_CLASSES, CANVAS_Z_INDEX, MARKER_PANE, ZOOM_ANIMATED_CLASS, ZOOM_HIDE_CLASS},
        geo::{LatLng, Point},
        map::HeadlessMap,
        viewport::{Transform, Viewport},
    },
    icons::{cache::IconCache, loader::IconLoader, source::IconSource},
    input::events::{Cursor, MapEvent, MapEventKind},
    layers::{
        base::{ElementId, MapHost, MapLayer},
        marker::{Marker, MarkerEvent, MarkerEventKind},
        registry::{MarkerId, MarkerRegistry},
    },
    prelude::Arc,
    rendering::{canvas::Canvas, scheduler::FrameScheduler},
    spatial::{culling::Culling, hit::HitTest},
    traits::Configurable,
    ui::tooltip::Tooltip,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(0);

/// Counters accumulated over the lifetime of a layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintStats {
    /// Full repaints that reached the canvas
    pub repaints: u64,
    /// Icons actually drawn
    pub draw_calls: u64,
    /// Icons skipped because they were too far outside the canvas
    pub culled: u64,
    /// Icons skipped because their image was loading or failed
    pub not_ready: u64,
}

#[derive(Debug)]
pub struct CanvasIconLayer {
    id: String,
    options: CanvasLayerOptions,
    registry: MarkerRegistry,
    icons: IconCache,
    loader: IconLoader,
    scheduler: FrameScheduler,
    canvas: Option<Canvas>,
    /// Snapshot of the host view; `None` while detached
    view: Option<Viewport>,
    /// Pane the canvas currently sits in
    pane: Option<String>,
    tooltip: Option<Tooltip>,
    events: Vec<MapEventKind>,
    z_counter: u32,
    stats: PaintStats,
}

impl CanvasIconLayer {
    /// Layer fetching icons with the default source (HTTP when available)
    pub fn new(options: CanvasLayerOptions) -> Self {
        Self::with_source(options, default_source(), IconLoadingConfig::default())
    }

    pub fn with_source(
        options: CanvasLayerOptions,
        source: Arc<dyn IconSource>,
        loading: IconLoadingConfig,
    ) -> Self {
        let id = format!(
            "canvas-icon-layer-{}",
            NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed)
        );
        Self {
            id,
            options,
            registry: MarkerRegistry::new(),
            icons: IconCache::new(),
            loader: IconLoader::new(source, loading),
            scheduler: FrameScheduler::new(),
            canvas: None,
            view: None,
            pane: None,
            tooltip: None,
            events: Vec::new(),
            z_counter: 0,
            stats: PaintStats::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Hand the layer to `map`, returning the id to reach it again
    pub fn add_to(self, map: &mut HeadlessMap) -> Result<String> {
        map.add_layer(Box::new(self))
    }

    /// Register `marker` and draw it right away if its icon is ready.
    /// Adding a marker that is already registered only redraws it.
    pub fn add_marker(&mut self, marker: &Marker) -> MarkerId {
        let (id, added) = self.registry.insert(marker);
        if added {
            let scheduler = self.scheduler.clone();
            let listener = marker.on(MarkerEventKind::Move, move |_| {
                scheduler.request();
            });
            if let Some(entry) = self.registry.get_mut(id) {
                entry.move_listener = Some(listener);
            }
            log::debug!("{} registered {}", self.id, id);
        }

        if let Some(view) = self.view.clone() {
            self.draw_marker(id, &view);
        }
        id
    }

    /// Checked registration: only markers in the marker pane that declare an
    /// icon are accepted
    pub fn add_layer(&mut self, marker: &Marker) -> Option<MarkerId> {
        if marker.pane() == MARKER_PANE && marker.icon().is_some() {
            Some(self.add_marker(marker))
        } else {
            log::error!("{}: layer isn't a marker, ignoring it", self.id);
            None
        }
    }

    /// Unregister `marker`, optionally repainting at once to erase it.
    /// Returns `false` (and does nothing) for unknown markers.
    pub fn remove_marker(&mut self, marker: &Marker, redraw: bool) -> bool {
        let Some((id, entry)) = self.registry.remove(marker) else {
            return false;
        };
        if let Some(listener) = entry.move_listener {
            marker.off(listener);
        }
        log::debug!("{} removed {}", self.id, id);

        if redraw {
            self.redraw();
        }
        true
    }

    /// Remove `marker` and repaint immediately
    pub fn remove_layer(&mut self, marker: &Marker) -> bool {
        self.remove_marker(marker, true)
    }

    /// Ask for a repaint on the next animation frame. Returns `false` when
    /// one was already pending.
    pub fn schedule_redraw(&self) -> bool {
        self.scheduler.request()
    }

    /// Unconditional clear-and-repaint
    pub fn redraw(&mut self) {
        self.repaint(true);
    }

    /// Apply finished icon loads. Each icon that became drawable schedules a
    /// repaint. Returns how many did.
    pub fn pump_loads(&mut self) -> usize {
        let mut ready = 0;
        for loaded in self.loader.drain() {
            if self.icons.complete(&loaded.url, loaded.result) {
                ready += 1;
                self.scheduler.request();
            }
        }
        ready
    }

    /// Animation-frame work: apply finished loads, then run the pending
    /// repaint if there is one. Returns `true` if the canvas was repainted.
    pub fn tick(&mut self) -> bool {
        self.pump_loads();
        if self.scheduler.take() {
            self.repaint(true)
        } else {
            false
        }
    }

    /// Topmost marker whose icon covers the container pixel `pixel`.
    /// Transparent markers are never hit.
    pub fn marker_at(&self, pixel: &Point) -> Option<Marker> {
        let view = self.view.as_ref()?;
        HitTest::topmost(self.registry.iter().filter_map(|(_, entry)| {
            let marker = &entry.marker;
            if marker.opacity() <= 0.0 {
                return None;
            }
            let icon = marker.icon()?;
            let point = view.lat_lng_to_container_point(&marker.lat_lng());
            HitTest::hits(&point, &icon, pixel).then(|| (entry.z_index, marker.clone()))
        }))
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    /// Pane the canvas is attached to
    pub fn pane(&self) -> Option<&str> {
        self.pane.as_deref()
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.registry.len()
    }

    pub fn contains_marker(&self, marker: &Marker) -> bool {
        self.registry.contains(marker)
    }

    pub fn marker_id(&self, marker: &Marker) -> Option<MarkerId> {
        self.registry.id_of(marker)
    }

    /// Draw order `marker` received in the latest paint
    pub fn z_index_of(&self, marker: &Marker) -> Option<u32> {
        let id = self.registry.id_of(marker)?;
        self.registry.get(id)?.z_index
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn icon_cache(&self) -> &IconCache {
        &self.icons
    }

    pub fn stats(&self) -> &PaintStats {
        &self.stats
    }

    pub fn has_pending_frame(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn create_canvas(element: ElementId, size: Point, animated: bool) -> Canvas {
        let (width, height) = canvas_dimensions(size);
        let mut canvas = Canvas::new(element, width, height);
        for class in CANVAS_CLASSES {
            canvas.add_class(class);
        }
        canvas.add_class(if animated {
            ZOOM_ANIMATED_CLASS
        } else {
            ZOOM_HIDE_CLASS
        });
        canvas.set_z_index(CANVAS_Z_INDEX);
        canvas
    }

    /// Returns `true` if anything reached the canvas
    fn repaint(&mut self, clear: bool) -> bool {
        self.scheduler.cancel();
        self.z_counter = 0;
        self.registry.clear_z_indices();

        let Some(view) = self.view.clone() else {
            return false;
        };
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        if clear {
            canvas.reset_commands();
            canvas.clear();
        }
        self.stats.repaints += 1;

        for id in self.registry.ids() {
            self.draw_marker(id, &view);
        }
        true
    }

    fn draw_marker(&mut self, id: MarkerId, view: &Viewport) {
        let Some(marker) = self.registry.get(id).map(|entry| entry.marker.clone()) else {
            return;
        };
        let Some(icon) = marker.icon() else {
            return;
        };
        let Some(canvas_size) = self.canvas.as_ref().map(Canvas::size) else {
            return;
        };
        let point = view.lat_lng_to_container_point(&marker.lat_lng());

        if self.icons.begin_load(&icon.url) {
            self.loader.request(&icon.url);
            self.stats.not_ready += 1;
            return;
        }
        let Some(image) = self.icons.get_ready(&icon.url) else {
            self.stats.not_ready += 1;
            return;
        };

        let z_index = self.z_counter;
        self.z_counter += 1;
        if let Some(entry) = self.registry.get_mut(id) {
            entry.z_index = Some(z_index);
        }

        if Culling::is_culled(&point, icon.size, canvas_size) {
            self.stats.culled += 1;
            return;
        }

        let source = icon
            .origin
            .map(|origin| Bounds::from_origin_and_size(origin, icon.size.x, icon.size.y));
        let dest = HitTest::icon_bounds(&point, &icon);
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set_global_alpha(marker.opacity());
            canvas.draw_image(&icon.url, &image, source, dest);
            canvas.set_global_alpha(1.0);
            self.stats.draw_calls += 1;
        }
    }

    /// Match the canvas to the current view, then repaint
    fn reset(&mut self) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let top_left = view.container_point_to_layer_point(&Point::default());
        let (width, height) = canvas_dimensions(view.size);
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set_position(top_left);
            canvas.resize(width, height);
        }
        self.repaint(true);
    }

    fn animate_zoom(&mut self, center: &LatLng, zoom: f64) {
        let (Some(view), Some(canvas)) = (self.view.as_ref(), self.canvas.as_mut()) else {
            return;
        };
        let scale = view.zoom_scale(zoom);
        let offset = view.zoom_animation_offset(center, zoom);
        canvas.set_transform(Transform::new(offset, scale, Point::default()));
    }

    fn update_hover(&mut self, pixel: &Point, host: &mut dyn MapHost) -> Result<()> {
        match self.marker_at(pixel) {
            Some(marker) => {
                host.set_cursor(Cursor::Pointer);
                match marker.title() {
                    Some(title) => self.show_tooltip(&marker, &title, host)?,
                    None => self.hide_tooltip(),
                }
            }
            None => {
                host.set_cursor(Cursor::Default);
                self.hide_tooltip();
            }
        }
        Ok(())
    }

    fn show_tooltip(&mut self, marker: &Marker, title: &str, host: &mut dyn MapHost) -> Result<()> {
        let (Some(view), Some(canvas), Some(pane)) =
            (self.view.as_ref(), self.canvas.as_ref(), self.pane.as_ref())
        else {
            return Ok(());
        };

        if self.tooltip.is_none() {
            let element = host.create_element();
            host.insert_after(pane, canvas.element(), element)?;
            self.tooltip = Some(Tooltip::new(element, pane.clone()));
        }

        let position = view.lat_lng_to_container_point(&marker.lat_lng());
        let transform = canvas.transform();
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.show(title, position, transform);
        }
        Ok(())
    }

    fn hide_tooltip(&mut self) {
        if let Some(tooltip) = self.tooltip.as_mut() {
            tooltip.hide();
        }
    }

    fn move_to_pane(&mut self, from: &str, to: &str, host: &mut dyn MapHost) -> Result<()> {
        if !host.has_pane(to) {
            return Err(MapError::Pane(format!("map has no pane named '{}'", to)).into());
        }
        let Some(canvas) = self.canvas.as_ref() else {
            return Ok(());
        };

        host.remove_from_pane(from, canvas.element())?;
        host.append_to_pane(to, canvas.element())?;
        if let Some(tooltip) = self.tooltip.as_mut() {
            host.remove_from_pane(from, tooltip.element())?;
            host.insert_after(to, canvas.element(), tooltip.element())?;
            tooltip.set_pane(to);
        }
        self.pane = Some(to.to_string());
        log::debug!("{} moved from {} to {}", self.id, from, to);
        Ok(())
    }
}

impl MapLayer for CanvasIconLayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_add(&mut self, host: &mut dyn MapHost) -> Result<()> {
        let pane = self.options.pane_name().to_string();
        if !host.has_pane(&pane) {
            return Err(MapError::Pane(format!("map has no pane named '{}'", pane)).into());
        }

        let view = host.viewport().clone();
        if self.canvas.is_none() {
            let animated = host.zoom_animation_enabled();
            self.canvas = Some(Self::create_canvas(host.create_element(), view.size, animated));
            self.events = subscriptions(animated);
        }
        if let Some(canvas) = &self.canvas {
            host.append_to_pane(&pane, canvas.element())?;
        }

        log::debug!("{} attached to {}", self.id, pane);
        self.pane = Some(pane);
        self.view = Some(view);
        self.reset();
        Ok(())
    }

    fn on_remove(&mut self, host: &mut dyn MapHost) -> Result<()> {
        if let Some(pane) = self.pane.take() {
            if let Some(tooltip) = self.tooltip.take() {
                host.remove_from_pane(&pane, tooltip.element())?;
            }
            if let Some(canvas) = &self.canvas {
                host.remove_from_pane(&pane, canvas.element())?;
            }
            log::debug!("{} detached from {}", self.id, pane);
        }
        self.view = None;
        self.scheduler.cancel();
        Ok(())
    }

    fn events(&self) -> &[MapEventKind] {
        &self.events
    }

    fn handle_event(&mut self, event: &MapEvent, host: &mut dyn MapHost) -> Result<()> {
        if !self.is_attached() {
            return Ok(());
        }

        match event {
            MapEvent::Move { .. } | MapEvent::Zoom { .. } => {
                self.view = Some(host.viewport().clone());
                self.reset();
            }
            MapEvent::ZoomAnim { center, zoom } => self.animate_zoom(center, *zoom),
            MapEvent::Click { pixel, .. } => {
                if let Some(marker) = self.marker_at(pixel) {
                    marker.fire(&MarkerEvent::Click);
                }
            }
            MapEvent::MouseMove { pixel, .. } => self.update_hover(pixel, host)?,
        }
        Ok(())
    }

    fn on_animation_frame(&mut self, _host: &mut dyn MapHost) -> Result<()> {
        self.tick();
        Ok(())
    }

    fn options(&self) -> serde_json::Value {
        serde_json::to_value(&self.options).unwrap_or(serde_json::Value::Null)
    }

    fn set_options(&mut self, options: serde_json::Value, host: Option<&mut dyn MapHost>) -> Result<()> {
        let merged = self.options.merged(&options)?;

        if let Some(current) = self.pane.clone() {
            let target = merged.pane_name().to_string();
            if target != current {
                let host = host.ok_or_else(|| {
                    MapError::Layer(format!("{} is attached, moving it to '{}' needs its map", self.id, target))
                })?;
                self.move_to_pane(&current, &target, host)?;
            }
        }

        self.options = merged;
        log::debug!("{} options now {:?}", self.id, self.options);
        self.redraw();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl Configurable for CanvasIconLayer {
    type Config = CanvasLayerOptions;

    fn config(&self) -> &CanvasLayerOptions {
        &self.options
    }

    fn set_config(&mut self, config: CanvasLayerOptions) -> Result<()> {
        MapLayer::set_options(self, serde_json::to_value(&config)?, None)
    }
}

impl Drop for CanvasIconLayer {
    fn drop(&mut self) {
        for (_, entry) in self.registry.iter() {
            if let Some(listener) = entry.move_listener {
                entry.marker.off(listener);
            }
        }
    }
}

fn subscriptions(animated: bool) -> Vec<MapEventKind> {
    let mut kinds = vec![
        MapEventKind::Move,
        MapEventKind::Zoom,
        MapEventKind::Click,
        MapEventKind::MouseMove,
    ];
    if animated {
        kinds.push(MapEventKind::ZoomAnim);
    }
    kinds
}

fn canvas_dimensions(size: Point) -> (u32, u32) {
    (size.x.max(0.0).round() as u32, size.y.max(0.0).round() as u32)
}

fn default_source() -> Arc<dyn IconSource> {
    #[cfg(feature = "http")]
    let source: Arc<dyn IconSource> = Arc::new(crate::icons::source::HttpIconSource::new());
    #[cfg(not(feature = "http"))]
    let source: Arc<dyn IconSource> = Arc::new(crate::icons::source::StaticIconSource::new());
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::config::IconLoadingConfig,
        icons::source::StaticIconSource,
        layers::marker::{Icon, MarkerOptions},
        prelude::{Cell, Rc},
    };
    use image::{Rgba, RgbaImage};

    const RED: &str = "red.png";

    fn source() -> Arc<StaticIconSource> {
        let source = StaticIconSource::new();
        source
            .insert_image(RED, &RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])))
            .unwrap();
        Arc::new(source)
    }

    fn layer() -> CanvasIconLayer {
        CanvasIconLayer::with_source(
            CanvasLayerOptions::default(),
            source(),
            IconLoadingConfig::immediate(),
        )
    }

    fn map() -> HeadlessMap {
        HeadlessMap::new(LatLng::new(0.0, 0.0), 3.0, Point::new(200.0, 100.0))
    }

    fn marker_at(map: &HeadlessMap, pixel: Point) -> Marker {
        let lat_lng = map.viewport().container_point_to_lat_lng(&pixel);
        Marker::new(lat_lng, MarkerOptions::with_icon(Icon::new(RED, (10.0, 10.0))))
    }

    #[test]
    fn test_detached_layer_is_inert() {
        let mut layer = layer();
        let marker = Marker::new(LatLng::new(0.0, 0.0), MarkerOptions::with_icon(Icon::new(RED, (8.0, 8.0))));
        layer.add_marker(&marker);
        layer.redraw();
        assert!(!layer.tick());
        assert!(layer.canvas().is_none());
        assert_eq!(layer.stats().repaints, 0);
        assert!(layer.icon_cache().is_empty());
        assert!(layer.marker_at(&Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_attach_creates_sized_canvas() {
        let mut map = map();
        let id = layer().add_to(&mut map).unwrap();
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();

        let canvas = layer.canvas().unwrap();
        assert_eq!(canvas.size(), Point::new(200.0, 100.0));
        assert_eq!(canvas.z_index(), 600);
        assert!(canvas.has_class("leaflet-canvas-icon-layer"));
        assert!(canvas.has_class("leaflet-layer"));
        assert!(canvas.has_class("leaflet-zoom-animated"));
        assert_eq!(canvas.position(), Point::new(-100.0, -50.0));
        assert_eq!(layer.pane(), Some("overlayPane"));
        assert_eq!(map.pane_children("overlayPane"), Some(&[canvas.element()][..]));
        assert!(layer.events().contains(&MapEventKind::ZoomAnim));
    }

    #[test]
    fn test_icon_draws_after_load_frame() {
        let mut map = map();
        let id = layer().add_to(&mut map).unwrap();
        let marker = marker_at(&map, Point::new(50.0, 50.0));

        map.with_layer_mut::<CanvasIconLayer, _>(&id, |layer| layer.add_marker(&marker));
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();
        assert!(layer.canvas().unwrap().is_blank());
        assert_eq!(layer.z_index_of(&marker), None);

        map.animation_frame().unwrap();
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();
        let canvas = layer.canvas().unwrap();
        assert_eq!(canvas.pixel(50, 50), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(canvas.pixel(40, 40), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(canvas.draw_call_count(), 1);
        assert_eq!(layer.z_index_of(&marker), Some(0));
    }

    #[test]
    fn test_marker_moves_coalesce() {
        let mut map = map();
        let id = layer().add_to(&mut map).unwrap();
        let marker = marker_at(&map, Point::new(50.0, 50.0));
        map.with_layer_mut::<CanvasIconLayer, _>(&id, |layer| layer.add_marker(&marker));
        map.animation_frame().unwrap();
        let before = map.layer::<CanvasIconLayer>(&id).unwrap().stats().repaints;

        for step in 0..5 {
            let lat_lng = map
                .viewport()
                .container_point_to_lat_lng(&Point::new(60.0 + step as f64, 50.0));
            marker.set_lat_lng(lat_lng);
        }
        assert!(map.layer::<CanvasIconLayer>(&id).unwrap().has_pending_frame());

        map.animation_frame().unwrap();
        map.animation_frame().unwrap();
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();
        assert_eq!(layer.stats().repaints, before + 1);
        assert_eq!(layer.canvas().unwrap().pixel(64, 50), Some(Rgba([255, 0, 0, 255])));
    }

    #[test]
    fn test_remove_unsubscribes_move_listener() {
        let mut map = map();
        let id = layer().add_to(&mut map).unwrap();
        let marker = marker_at(&map, Point::new(20.0, 20.0));

        map.with_layer_mut::<CanvasIconLayer, _>(&id, |layer| {
            layer.add_marker(&marker);
            layer.add_marker(&marker);
        });
        assert_eq!(marker.listener_count(MarkerEventKind::Move), 1);

        let removed = map
            .with_layer_mut::<CanvasIconLayer, _>(&id, |layer| layer.remove_marker(&marker, false))
            .unwrap();
        assert!(removed);
        assert_eq!(marker.listener_count(MarkerEventKind::Move), 0);

        marker.set_lat_lng(LatLng::new(1.0, 1.0));
        assert!(!map.layer::<CanvasIconLayer>(&id).unwrap().has_pending_frame());
    }

    #[test]
    fn test_drop_releases_listeners() {
        let marker = Marker::new(LatLng::new(0.0, 0.0), MarkerOptions::with_icon(Icon::new(RED, (8.0, 8.0))));
        {
            let mut layer = layer();
            layer.add_marker(&marker);
            assert_eq!(marker.listener_count(MarkerEventKind::Move), 1);
        }
        assert_eq!(marker.listener_count(MarkerEventKind::Move), 0);
    }

    #[test]
    fn test_click_listener_runs_once() {
        let mut map = map();
        let id = layer().add_to(&mut map).unwrap();
        let marker = marker_at(&map, Point::new(100.0, 50.0));
        let clicks = Rc::new(Cell::new(0));
        let seen = Rc::clone(&clicks);
        marker.on(MarkerEventKind::Click, move |_| seen.set(seen.get() + 1));

        map.with_layer_mut::<CanvasIconLayer, _>(&id, |layer| layer.add_marker(&marker));
        map.animation_frame().unwrap();

        map.click(Point::new(102.0, 48.0)).unwrap();
        map.click(Point::new(150.0, 20.0)).unwrap();
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_set_options_moves_attached_canvas() {
        let mut map = map();
        map.create_pane("customPane").unwrap();
        let id = layer().add_to(&mut map).unwrap();

        map.set_layer_options(&id, serde_json::json!({ "pane": "customPane" }))
            .unwrap();
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();
        let element = layer.canvas().unwrap().element();
        assert_eq!(layer.pane(), Some("customPane"));
        assert_eq!(map.pane_children("customPane"), Some(&[element][..]));
        assert_eq!(map.pane_children("overlayPane"), Some(&[][..]));

        let err = map.set_layer_options(&id, serde_json::json!({ "pane": "nowhere" }));
        assert!(err.is_err());
        let layer = map.layer::<CanvasIconLayer>(&id).unwrap();
        assert_eq!(layer.pane(), Some("customPane"));
    }

    #[test]
    fn test_configurable_round_trip() {
        let mut layer = layer();
        layer
            .update_config(|config| config.pane = Some("shadowPane".to_string()))
            .unwrap();
        assert_eq!(layer.config().pane_name(), "shadowPane");
        assert_eq!(layer.options(), serde_json::json!({ "pane": "shadowPane" }));
    }
}
