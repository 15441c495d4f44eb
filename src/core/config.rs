//! Configuration for the canvas icon layer and its icon loader
//!
//! Layer options are plain serde structs so they can be merged key by key
//! from JSON the way Leaflet's `setOptions` merges option objects.

use crate::{core::constants::OVERLAY_PANE, MapError, Result};
use serde::{Deserialize, Serialize};

/// Options recognised by [`crate::CanvasIconLayer`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasLayerOptions {
    /// Pane the canvas is appended to; `None` means the overlay pane
    pub pane: Option<String>,
}

impl CanvasLayerOptions {
    pub fn with_pane(pane: impl Into<String>) -> Self {
        Self {
            pane: Some(pane.into()),
        }
    }

    /// Name of the pane the canvas belongs in
    pub fn pane_name(&self) -> &str {
        self.pane.as_deref().unwrap_or(OVERLAY_PANE)
    }

    /// Shallow merge: keys present in `patch` replace the current values,
    /// everything else is kept. Unknown keys are ignored.
    pub fn merged(&self, patch: &serde_json::Value) -> Result<Self> {
        let patch = patch.as_object().ok_or_else(|| {
            MapError::Config(format!("layer options must be an object, got {patch}"))
        })?;

        let mut current = serde_json::to_value(self)?;
        if let Some(fields) = current.as_object_mut() {
            for (key, value) in patch {
                fields.insert(key.clone(), value.clone());
            }
        }

        Ok(serde_json::from_value(current)?)
    }
}

/// How icon images are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderMode {
    /// One detached thread per URL
    #[default]
    Background,
    /// Fetch and decode inside the request call. The completion is still
    /// delivered through the loader channel, so it is observed on the next
    /// pump like a background load.
    Immediate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IconLoadingConfig {
    pub mode: LoaderMode,
}

impl IconLoadingConfig {
    pub fn immediate() -> Self {
        Self {
            mode: LoaderMode::Immediate,
        }
    }
}
