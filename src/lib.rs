//! # maplet-canvas-markers
//!
//! A canvas-backed marker layer for maplet, inspired by Leaflet's
//! `CanvasIconLayer` plugin.
//!
//! Instead of one element per marker, every marker icon is painted onto a
//! single shared canvas that tracks the map viewport. Repaints are coalesced
//! onto animation frames, icon images are loaded once per URL, and pointer
//! events are resolved to the topmost marker under the cursor.

pub mod core;
pub mod icons;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Bounds,
    config::{CanvasLayerOptions, IconLoadingConfig, LoaderMode},
    geo::{LatLng, LatLngBounds, Point},
    map::{HeadlessMap, MapContainer},
    viewport::{Transform, Viewport},
};

pub use layers::{
    base::{ElementId, MapHost, MapLayer},
    canvas::{CanvasIconLayer, PaintStats},
    marker::{Icon, ListenerId, Marker, MarkerEvent, MarkerEventKind, MarkerOptions},
    registry::{MarkerId, MarkerRegistry},
};

pub use icons::{
    cache::{IconCache, IconState},
    loader::{IconLoader, LoadedIcon},
    source::{IconSource, StaticIconSource},
};

#[cfg(feature = "http")]
pub use icons::source::HttpIconSource;

pub use input::{
    events::{Cursor, MapEvent, MapEventKind},
    handler::EventManager,
};

pub use rendering::{
    canvas::{Canvas, DrawCommand},
    scheduler::FrameScheduler,
};

pub use ui::tooltip::Tooltip;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Pane error: {0}")]
    Pane(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
