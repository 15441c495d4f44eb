use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Map event types that can be emitted by the map and routed to layers
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The view moved (pan, resize, or the settle after a zoom)
    Move { center: LatLng },
    /// The zoom level changed
    Zoom { zoom: f64 },
    /// An animated zoom towards `zoom` around `center` is starting
    ZoomAnim { center: LatLng, zoom: f64 },
    /// Mouse/touch click on the map
    Click { lat_lng: LatLng, pixel: Point },
    /// Mouse/touch move over the map
    MouseMove { lat_lng: LatLng, pixel: Point },
}

/// Discriminant of [`MapEvent`], used for subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapEventKind {
    Move,
    Zoom,
    ZoomAnim,
    Click,
    MouseMove,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::Move { .. } => MapEventKind::Move,
            MapEvent::Zoom { .. } => MapEventKind::Zoom,
            MapEvent::ZoomAnim { .. } => MapEventKind::ZoomAnim,
            MapEvent::Click { .. } => MapEventKind::Click,
            MapEvent::MouseMove { .. } => MapEventKind::MouseMove,
        }
    }

    /// Container pixel of pointer events
    pub fn container_point(&self) -> Option<Point> {
        match self {
            MapEvent::Click { pixel, .. } | MapEvent::MouseMove { pixel, .. } => Some(*pixel),
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(self, MapEvent::Click { .. } | MapEvent::MouseMove { .. })
    }
}

impl std::fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapEventKind::Move => write!(f, "move"),
            MapEventKind::Zoom => write!(f, "zoom"),
            MapEventKind::ZoomAnim => write!(f, "zoomanim"),
            MapEventKind::Click => write!(f, "click"),
            MapEventKind::MouseMove => write!(f, "mousemove"),
        }
    }
}

/// Cursor style of the map container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    /// Whatever the container's stylesheet says
    #[default]
    Default,
    /// Pointing hand over something clickable
    Pointer,
}
