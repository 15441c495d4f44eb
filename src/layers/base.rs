//! Plugin contract between a map widget and the layers drawn on it
//!
//! The host owns panes, the viewport and the container; a layer only ever
//! sees the host through [`MapHost`] while one of its hooks runs.

use crate::{
    core::viewport::Viewport,
    input::events::{Cursor, MapEvent, MapEventKind},
    Result,
};
use serde::{Deserialize, Serialize};

/// Handle of an element (canvas, tooltip, ...) placed into a host pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

/// What a map widget provides to the layers attached to it
pub trait MapHost {
    /// Current view: size and projection
    fn viewport(&self) -> &Viewport;

    /// Whether zooms are animated with CSS-style transforms
    fn zoom_animation_enabled(&self) -> bool;

    /// Allocate a fresh element handle
    fn create_element(&mut self) -> ElementId;

    fn has_pane(&self, pane: &str) -> bool;

    /// Append `element` as the last child of `pane`
    fn append_to_pane(&mut self, pane: &str, element: ElementId) -> Result<()>;

    /// Insert `element` into `pane` directly after `anchor`
    fn insert_after(&mut self, pane: &str, anchor: ElementId, element: ElementId) -> Result<()>;

    fn remove_from_pane(&mut self, pane: &str, element: ElementId) -> Result<()>;

    /// Set the cursor of the map container
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Lifecycle hooks of a layer pluggable into a [`MapHost`]
pub trait MapLayer {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Called once the host accepted the layer
    fn on_add(&mut self, host: &mut dyn MapHost) -> Result<()>;

    /// Called when the host drops the layer
    fn on_remove(&mut self, host: &mut dyn MapHost) -> Result<()>;

    /// Map events this layer wants routed to [`MapLayer::handle_event`]
    fn events(&self) -> &[MapEventKind] {
        &[]
    }

    /// Handle a map event the layer subscribed to
    fn handle_event(&mut self, _event: &MapEvent, _host: &mut dyn MapHost) -> Result<()> {
        Ok(())
    }

    /// Animation-frame callback
    fn on_animation_frame(&mut self, _host: &mut dyn MapHost) -> Result<()> {
        Ok(())
    }

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Merge layer options. `host` is required when an attached layer has to
    /// move between panes.
    fn set_options(&mut self, options: serde_json::Value, host: Option<&mut dyn MapHost>) -> Result<()>;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
