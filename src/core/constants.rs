//! Constants derived from Leaflet defaults and the canvas icon layer plugin.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Pane the canvas goes into when no pane option is given.
pub const OVERLAY_PANE: &str = "overlayPane";

/// Pane a marker must declare to be accepted by `add_layer`.
pub const MARKER_PANE: &str = "markerPane";

/// Panes every map is created with, in stacking order.
pub const DEFAULT_PANES: [&str; 6] = [
    "tilePane",
    OVERLAY_PANE,
    "shadowPane",
    MARKER_PANE,
    "tooltipPane",
    "popupPane",
];

/// Canvas z-index, matching the default marker pane.
pub const CANVAS_Z_INDEX: i32 = 600;

/// Hover tooltip z-index, above the canvas.
pub const TOOLTIP_Z_INDEX: i32 = 700;

/// CSS classes of the canvas element.
pub const CANVAS_CLASSES: [&str; 2] = ["leaflet-canvas-icon-layer", "leaflet-layer"];

/// Class added when the canvas follows zoom animations with a transform.
pub const ZOOM_ANIMATED_CLASS: &str = "leaflet-zoom-animated";

/// Class added when the canvas is hidden during zooms instead.
pub const ZOOM_HIDE_CLASS: &str = "leaflet-zoom-hide";

/// CSS class of the hover tooltip element.
pub const TOOLTIP_CLASS: &str = "leaflet-canvas-tooltip";

/// Markers further outside the canvas than this many icon sizes are not drawn.
pub const CULL_ICON_FACTOR: f64 = 2.0;

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the default icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);
