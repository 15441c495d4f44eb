use crate::{prelude::HashMap, MapError, Result};
use image::RgbaImage;
use std::sync::RwLock;

#[cfg(feature = "http")]
use once_cell::sync::Lazy;
#[cfg(feature = "http")]
use reqwest::blocking::Client;

/// Anything that can produce the encoded bytes of an icon image
pub trait IconSource: Send + Sync {
    /// Fetch the raw (still encoded) image stored at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Shared blocking HTTP client. Some image hosts reject requests without a
/// User-Agent.
#[cfg(feature = "http")]
pub(crate) static HTTP_CLIENT: Lazy<Option<Client>> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("maplet-canvas-markers/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| log::error!("failed to build HTTP client: {}", e))
        .ok()
});

/// Fetches icons over HTTP(S)
#[cfg(feature = "http")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpIconSource;

#[cfg(feature = "http")]
impl HttpIconSource {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "http")]
impl IconSource for HttpIconSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let client = HTTP_CLIENT
            .as_ref()
            .ok_or_else(|| MapError::Render("HTTP client unavailable".to_string()))?;
        let resp = client.get(url).send().map_err(MapError::from)?;
        if !resp.status().is_success() {
            return Err(format!("HTTP {} for {}", resp.status(), url).into());
        }
        Ok(resp.bytes().map_err(MapError::from)?.to_vec())
    }
}

/// In-memory icon store keyed by URL. Useful for bundled icons and tests.
#[derive(Debug, Default)]
pub struct StaticIconSource {
    images: RwLock<HashMap<String, Vec<u8>>>,
}

impl StaticIconSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register already encoded bytes for `url`
    pub fn insert(&self, url: impl Into<String>, bytes: Vec<u8>) {
        if let Ok(mut images) = self.images.write() {
            images.insert(url.into(), bytes);
        }
    }

    /// Encode `image` as PNG and register it for `url`
    pub fn insert_image(&self, url: impl Into<String>, image: &RgbaImage) -> Result<()> {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image.clone()).write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )?;
        self.insert(url, bytes);
        Ok(())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.images
            .read()
            .map(|images| images.contains_key(url))
            .unwrap_or(false)
    }
}

impl IconSource for StaticIconSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let images = self
            .images
            .read()
            .map_err(|_| MapError::Render("icon store poisoned".to_string()))?;
        images
            .get(url)
            .cloned()
            .ok_or_else(|| format!("no icon registered for {}", url).into())
    }
}
