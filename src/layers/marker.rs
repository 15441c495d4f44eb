use crate::{
    core::{
        constants::{MARKER_ICON_ANCHOR, MARKER_ICON_SIZE, MARKER_PANE},
        geo::{LatLng, Point},
    },
    prelude::{Rc, RefCell},
};
use serde::{Deserialize, Serialize};

/// Image description drawn for a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    /// URL the image is loaded from
    pub url: String,
    /// Drawn size in pixels
    pub size: Point,
    /// Pixel of the icon that sits on the marker position
    pub anchor: Point,
    /// Top-left of the icon inside a sprite sheet
    pub origin: Option<Point>,
}

impl Icon {
    /// Icon anchored at its center, like Leaflet icons without `iconAnchor`
    pub fn new(url: impl Into<String>, size: impl Into<Point>) -> Self {
        let size = size.into();
        Self {
            url: url.into(),
            size,
            anchor: size.multiply(0.5),
            origin: None,
        }
    }

    /// Leaflet's default pin dimensions, anchored at the tip
    pub fn default_marker(url: impl Into<String>) -> Self {
        let (width, height) = MARKER_ICON_SIZE;
        let (anchor_x, anchor_y) = MARKER_ICON_ANCHOR;
        Self::new(url, (width as f64, height as f64)).with_anchor((anchor_x as f64, anchor_y as f64))
    }

    pub fn with_anchor(mut self, anchor: impl Into<Point>) -> Self {
        self.anchor = anchor.into();
        self
    }

    /// Draw the `size` sub-rectangle starting at `origin` of a sprite sheet
    pub fn with_origin(mut self, origin: impl Into<Point>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Per-marker options
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub icon: Option<Rc<Icon>>,
    pub opacity: f64,
    /// Text of the hover tooltip
    pub title: Option<String>,
    pub pane: String,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            icon: None,
            opacity: 1.0,
            title: None,
            pane: MARKER_PANE.to_string(),
        }
    }
}

impl MarkerOptions {
    pub fn with_icon(icon: impl Into<Rc<Icon>>) -> Self {
        Self {
            icon: Some(icon.into()),
            ..Self::default()
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn pane(mut self, pane: impl Into<String>) -> Self {
        self.pane = pane.into();
        self
    }
}

/// Events a marker notifies its listeners about
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerEvent {
    Move { old: LatLng, new: LatLng },
    Click,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerEventKind {
    Move,
    Click,
}

impl MarkerEvent {
    pub fn kind(&self) -> MarkerEventKind {
        match self {
            MarkerEvent::Move { .. } => MarkerEventKind::Move,
            MarkerEvent::Click => MarkerEventKind::Click,
        }
    }
}

/// Handle returned by [`Marker::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type MarkerCallback = Rc<dyn Fn(&MarkerEvent)>;

struct MarkerState {
    lat_lng: LatLng,
    options: MarkerOptions,
    listeners: Vec<(ListenerId, MarkerEventKind, MarkerCallback)>,
    next_listener: u64,
}

/// A point on the map with an icon.
///
/// `Marker` is a cheap, clonable handle: clones refer to the same marker, and
/// layers key their bookkeeping by that shared identity.
#[derive(Clone)]
pub struct Marker {
    inner: Rc<RefCell<MarkerState>>,
}

impl Marker {
    pub fn new(lat_lng: LatLng, options: MarkerOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MarkerState {
                lat_lng,
                options,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        self.inner.borrow().lat_lng
    }

    /// Moves the marker and notifies `Move` listeners
    pub fn set_lat_lng(&self, lat_lng: LatLng) {
        let old = {
            let mut state = self.inner.borrow_mut();
            std::mem::replace(&mut state.lat_lng, lat_lng)
        };
        self.fire(&MarkerEvent::Move { old, new: lat_lng });
    }

    pub fn options(&self) -> MarkerOptions {
        self.inner.borrow().options.clone()
    }

    pub fn icon(&self) -> Option<Rc<Icon>> {
        self.inner.borrow().options.icon.clone()
    }

    pub fn set_icon(&self, icon: Option<Rc<Icon>>) {
        self.inner.borrow_mut().options.icon = icon;
    }

    pub fn opacity(&self) -> f64 {
        self.inner.borrow().options.opacity
    }

    pub fn set_opacity(&self, opacity: f64) {
        self.inner.borrow_mut().options.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn title(&self) -> Option<String> {
        self.inner.borrow().options.title.clone()
    }

    pub fn pane(&self) -> String {
        self.inner.borrow().options.pane.clone()
    }

    /// Subscribe to events of one kind
    pub fn on<F>(&self, kind: MarkerEventKind, callback: F) -> ListenerId
    where
        F: Fn(&MarkerEvent) + 'static,
    {
        let mut state = self.inner.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.push((id, kind, Rc::new(callback)));
        id
    }

    /// Unsubscribe; returns false if the listener was not registered
    pub fn off(&self, listener: ListenerId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(id, _, _)| *id != listener);
        state.listeners.len() != before
    }

    pub fn listener_count(&self, kind: MarkerEventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Notify listeners of `event`. The marker is not borrowed while the
    /// callbacks run, so they may freely read or modify it.
    pub fn fire(&self, event: &MarkerEvent) {
        let kind = event.kind();
        let callbacks: Vec<MarkerCallback> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }

    /// Whether both handles refer to the same marker
    pub fn ptr_eq(&self, other: &Marker) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Stable identity of the underlying marker while any handle is alive
    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Marker")
            .field("lat_lng", &state.lat_lng)
            .field("options", &state.options)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}
