//! Prelude module for common maplet-canvas-markers types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_canvas_markers::prelude::*;`

pub use crate::core::{
    bounds::Bounds,
    config::{CanvasLayerOptions, IconLoadingConfig, LoaderMode},
    geo::{LatLng, LatLngBounds, Point},
    map::{HeadlessMap, MapContainer},
    viewport::{Transform, Viewport},
};

pub use crate::layers::{
    base::{ElementId, MapHost, MapLayer},
    canvas::{CanvasIconLayer, PaintStats},
    marker::{Icon, Marker, MarkerEvent, MarkerEventKind, MarkerOptions},
    registry::{MarkerId, MarkerRegistry},
};

pub use crate::icons::{
    cache::{IconCache, IconState},
    loader::IconLoader,
    source::{IconSource, StaticIconSource},
};

pub use crate::input::events::{Cursor, MapEvent, MapEventKind};

pub use crate::rendering::{
    canvas::{Canvas, DrawCommand},
    scheduler::FrameScheduler,
};

pub use crate::traits::{CacheStats, Cacheable, Configurable};

pub use crate::{Error as MapError, Result};

pub use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
    sync::Arc,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
