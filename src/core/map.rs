use crate::{
    core::{
        constants::DEFAULT_PANES,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::{
        events::{Cursor, MapEvent, MapEventKind},
        handler::EventManager,
    },
    layers::base::{ElementId, MapHost, MapLayer},
    MapError, Result,
};

/// The host side of a map: view, panes and the container cursor.
///
/// Panes are kept in stacking order, each with its children in document
/// order.
#[derive(Debug, Clone)]
pub struct MapContainer {
    viewport: Viewport,
    panes: Vec<(String, Vec<ElementId>)>,
    next_element: u64,
    cursor: Cursor,
    zoom_animation: bool,
}

impl MapContainer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            panes: DEFAULT_PANES
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
            next_element: 0,
            cursor: Cursor::Default,
            zoom_animation: true,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn pane_children(&self, pane: &str) -> Option<&[ElementId]> {
        self.pane(pane).map(Vec::as_slice)
    }

    pub fn pane_names(&self) -> Vec<&str> {
        self.panes.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn pane(&self, name: &str) -> Option<&Vec<ElementId>> {
        self.panes
            .iter()
            .find(|(pane, _)| pane == name)
            .map(|(_, children)| children)
    }

    fn pane_mut(&mut self, name: &str) -> Result<&mut Vec<ElementId>> {
        self.panes
            .iter_mut()
            .find(|(pane, _)| pane == name)
            .map(|(_, children)| children)
            .ok_or_else(|| MapError::Pane(format!("map has no pane named '{}'", name)).into())
    }
}

impl MapHost for MapContainer {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn zoom_animation_enabled(&self) -> bool {
        self.zoom_animation
    }

    fn create_element(&mut self) -> ElementId {
        self.next_element += 1;
        ElementId(self.next_element)
    }

    fn has_pane(&self, pane: &str) -> bool {
        self.pane(pane).is_some()
    }

    fn append_to_pane(&mut self, pane: &str, element: ElementId) -> Result<()> {
        let children = self.pane_mut(pane)?;
        children.retain(|child| *child != element);
        children.push(element);
        Ok(())
    }

    fn insert_after(&mut self, pane: &str, anchor: ElementId, element: ElementId) -> Result<()> {
        let children = self.pane_mut(pane)?;
        children.retain(|child| *child != element);
        let index = children
            .iter()
            .position(|child| *child == anchor)
            .ok_or_else(|| MapError::Pane(format!("{} is not in pane '{}'", anchor, pane)))?;
        children.insert(index + 1, element);
        Ok(())
    }

    fn remove_from_pane(&mut self, pane: &str, element: ElementId) -> Result<()> {
        let children = self.pane_mut(pane)?;
        let index = children
            .iter()
            .position(|child| *child == element)
            .ok_or_else(|| MapError::Pane(format!("{} is not in pane '{}'", element, pane)))?;
        children.remove(index);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }
}

/// A map without a window: it owns the view and the layers, dispatches
/// events synchronously and pumps animation frames on request.
pub struct HeadlessMap {
    container: MapContainer,
    layers: Vec<Box<dyn MapLayer>>,
    event_manager: EventManager,
    frames: u64,
}

impl HeadlessMap {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            container: MapContainer::new(viewport),
            layers: Vec::new(),
            event_manager: EventManager::new(),
            frames: 0,
        }
    }

    /// Toggle CSS-style zoom animation. Layers read this when they attach.
    pub fn with_zoom_animation(mut self, enabled: bool) -> Self {
        self.container.zoom_animation = enabled;
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.container.viewport
    }

    pub fn container(&self) -> &MapContainer {
        &self.container
    }

    pub fn cursor(&self) -> Cursor {
        self.container.cursor
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn create_pane(&mut self, name: &str) -> Result<()> {
        if self.container.has_pane(name) {
            return Err(MapError::Pane(format!("pane '{}' already exists", name)).into());
        }
        self.container.panes.push((name.to_string(), Vec::new()));
        Ok(())
    }

    pub fn pane_children(&self, pane: &str) -> Option<&[ElementId]> {
        self.container.pane_children(pane)
    }

    /// Attach `layer`, returning its id
    pub fn add_layer(&mut self, mut layer: Box<dyn MapLayer>) -> Result<String> {
        let id = layer.id().to_string();
        if self.layers.iter().any(|existing| existing.id() == id) {
            return Err(MapError::Layer(format!("layer '{}' is already on the map", id)).into());
        }

        layer.on_add(&mut self.container)?;
        log::debug!("added layer {}", id);
        self.layers.push(layer);
        Ok(id)
    }

    /// Detach and return the layer with `layer_id`
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<Option<Box<dyn MapLayer>>> {
        let Some(index) = self.layers.iter().position(|layer| layer.id() == layer_id) else {
            return Ok(None);
        };
        let mut layer = self.layers.remove(index);
        layer.on_remove(&mut self.container)?;
        log::debug!("removed layer {}", layer_id);
        Ok(Some(layer))
    }

    pub fn layer_ids(&self) -> Vec<String> {
        self.layers.iter().map(|layer| layer.id().to_string()).collect()
    }

    pub fn layer<T: MapLayer + 'static>(&self, layer_id: &str) -> Option<&T> {
        self.layers
            .iter()
            .find(|layer| layer.id() == layer_id)
            .and_then(|layer| layer.as_any().downcast_ref::<T>())
    }

    pub fn with_layer_mut<T: MapLayer + 'static, R>(
        &mut self,
        layer_id: &str,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id() == layer_id)
            .and_then(|layer| layer.as_any_mut().downcast_mut::<T>())
            .map(f)
    }

    /// Merge options into an attached layer, letting it move between panes
    pub fn set_layer_options(&mut self, layer_id: &str, options: serde_json::Value) -> Result<()> {
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.id() == layer_id)
            .ok_or_else(|| MapError::Layer(format!("no layer '{}' on the map", layer_id)))?;
        let host: &mut dyn MapHost = &mut self.container;
        layer.set_options(options, Some(host))
    }

    /// Register a map-level listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + 'static,
    {
        self.event_manager.on(kind, callback);
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        let old_center = self.container.viewport.center;
        let old_zoom = self.container.viewport.zoom;

        self.container.viewport.set_zoom(zoom);
        self.container.viewport.set_center(center);

        if self.container.viewport.zoom != old_zoom {
            self.fire(MapEvent::Zoom {
                zoom: self.container.viewport.zoom,
            })?;
        }
        if self.container.viewport.center != old_center || self.container.viewport.zoom != old_zoom {
            self.fire(MapEvent::Move {
                center: self.container.viewport.center,
            })?;
        }
        Ok(())
    }

    /// Pan by a container-pixel offset
    pub fn pan_by(&mut self, delta: Point) -> Result<()> {
        self.container.viewport.pan_by(delta);
        self.fire(MapEvent::Move {
            center: self.container.viewport.center,
        })
    }

    /// Resize the container, keeping the center
    pub fn set_size(&mut self, size: Point) -> Result<()> {
        self.container.viewport.set_size(size);
        self.fire(MapEvent::Move {
            center: self.container.viewport.center,
        })
    }

    /// Zoom around the current center. With `animate` and zoom animation
    /// enabled, layers first get a `ZoomAnim` event while the view is still
    /// at the old zoom.
    pub fn zoom_to(&mut self, zoom: f64, animate: bool) -> Result<()> {
        let viewport = &self.container.viewport;
        let target = zoom.clamp(viewport.min_zoom, viewport.max_zoom);
        if target == viewport.zoom {
            return Ok(());
        }

        if animate && self.container.zoom_animation {
            self.fire(MapEvent::ZoomAnim {
                center: self.container.viewport.center,
                zoom: target,
            })?;
        }

        let center = self.container.viewport.center;
        self.set_view(center, target)
    }

    pub fn click(&mut self, pixel: Point) -> Result<()> {
        let lat_lng = self.container.viewport.container_point_to_lat_lng(&pixel);
        self.fire(MapEvent::Click { lat_lng, pixel })
    }

    pub fn mouse_move(&mut self, pixel: Point) -> Result<()> {
        let lat_lng = self.container.viewport.container_point_to_lat_lng(&pixel);
        self.fire(MapEvent::MouseMove { lat_lng, pixel })
    }

    /// Run one animation frame on every layer
    pub fn animation_frame(&mut self) -> Result<()> {
        self.frames += 1;
        for layer in self.layers.iter_mut() {
            layer.on_animation_frame(&mut self.container)?;
        }
        Ok(())
    }

    /// Dispatch `event` to the subscribed layers, then to map listeners
    pub fn fire(&mut self, event: MapEvent) -> Result<()> {
        let kind = event.kind();
        for layer in self.layers.iter_mut() {
            if layer.events().contains(&kind) {
                layer.handle_event(&event, &mut self.container)?;
            }
        }

        self.event_manager.emit(event);
        self.event_manager.process_events();
        Ok(())
    }
}

impl std::fmt::Debug for HeadlessMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessMap")
            .field("container", &self.container)
            .field("layers", &self.layer_ids())
            .field("frames", &self.frames)
            .finish()
    }
}
