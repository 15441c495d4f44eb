use crate::{
    core::config::{IconLoadingConfig, LoaderMode},
    icons::source::IconSource,
    prelude::Arc,
    Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use image::RgbaImage;
use std::thread;

/// Outcome of one icon fetch
#[derive(Debug)]
pub struct LoadedIcon {
    pub url: String,
    pub result: Result<RgbaImage>,
}

/// Fetches and decodes icon images, reporting completions over a channel.
///
/// In background mode each request runs on a detached thread so the caller
/// never blocks. Completions are only observed when the owner calls
/// [`IconLoader::drain`], which keeps all state changes on the owner's thread.
pub struct IconLoader {
    source: Arc<dyn IconSource>,
    config: IconLoadingConfig,
    tx: Sender<LoadedIcon>,
    rx: Receiver<LoadedIcon>,
}

impl IconLoader {
    pub fn new(source: Arc<dyn IconSource>, config: IconLoadingConfig) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source,
            config,
            tx,
            rx,
        }
    }

    pub fn config(&self) -> &IconLoadingConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: IconLoadingConfig) {
        self.config = config;
    }

    /// Start loading `url`
    pub fn request(&self, url: &str) {
        let url = url.to_string();
        match self.config.mode {
            LoaderMode::Immediate => {
                let result = fetch_and_decode(self.source.as_ref(), &url);
                let _ = self.tx.send(LoadedIcon { url, result });
            }
            LoaderMode::Background => {
                let source = Arc::clone(&self.source);
                let tx = self.tx.clone();
                thread::spawn(move || {
                    let result = fetch_and_decode(source.as_ref(), &url);
                    if tx.send(LoadedIcon { url, result }).is_err() {
                        log::debug!("icon loader dropped before a load finished");
                    }
                });
            }
        }
    }

    /// Completions received since the last call, without blocking
    pub fn drain(&self) -> Vec<LoadedIcon> {
        self.rx.try_iter().collect()
    }

    /// Block until one completion arrives or `timeout` elapses
    pub fn wait(&self, timeout: std::time::Duration) -> Option<LoadedIcon> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl std::fmt::Debug for IconLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconLoader")
            .field("config", &self.config)
            .field("queued", &self.rx.len())
            .finish()
    }
}

fn fetch_and_decode(source: &dyn IconSource, url: &str) -> Result<RgbaImage> {
    log::debug!("fetch icon {}", url);
    let bytes = match source.fetch(url) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("icon {} fetch failed: {}", url, e);
            return Err(e);
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(decoded) => {
            let image = decoded.to_rgba8();
            log::info!(
                "loaded icon {} ({}x{}, {} bytes)",
                url,
                image.width(),
                image.height(),
                bytes.len()
            );
            Ok(image)
        }
        Err(e) => {
            log::warn!("icon {} could not be decoded: {}", url, e);
            Err(e.into())
        }
    }
}
