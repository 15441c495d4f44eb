pub mod base;
pub mod canvas;
pub mod marker;
pub mod registry;

pub use base::{ElementId, MapHost, MapLayer};
pub use canvas::{CanvasIconLayer, PaintStats};
pub use marker::{Icon, ListenerId, Marker, MarkerEvent, MarkerEventKind, MarkerOptions};
pub use registry::{MarkerEntry, MarkerId, MarkerRegistry};
