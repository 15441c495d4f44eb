use crate::{
    prelude::{Cell, HashMap, Rc},
    traits::{CacheStats, Cacheable},
    Result,
};
use image::RgbaImage;

/// Load state of one icon URL
#[derive(Debug, Clone)]
pub enum IconState {
    /// A fetch is in flight
    Loading,
    /// Decoded and drawable
    Ready(Rc<RgbaImage>),
    /// Fetch or decode failed, or the image has no width
    Failed,
}

impl IconState {
    pub fn is_ready(&self) -> bool {
        matches!(self, IconState::Ready(_))
    }
}

/// Per-layer image cache keyed by icon URL.
///
/// Entries are never evicted while the layer lives, and at most one fetch per
/// URL is ever started: failed URLs stay failed.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: HashMap<String, IconState>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `url` has never been requested, marking it as
    /// loading. The caller is then responsible for starting the fetch.
    pub fn begin_load(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_string(), IconState::Loading);
        true
    }

    /// Record the outcome of a fetch. Returns `true` if the icon became
    /// drawable.
    pub fn complete(&mut self, url: &str, result: Result<RgbaImage>) -> bool {
        let state = match result {
            Ok(image) if image.width() > 0 => IconState::Ready(Rc::new(image)),
            Ok(_) => {
                log::warn!("icon {} has zero width, it will not be drawn", url);
                IconState::Failed
            }
            Err(_) => IconState::Failed,
        };
        let ready = state.is_ready();
        self.entries.insert(url.to_string(), state);
        ready
    }

    /// Decoded image for `url`, if it finished loading
    pub fn get_ready(&self, url: &str) -> Option<Rc<RgbaImage>> {
        match self.entries.get(url) {
            Some(IconState::Ready(image)) => {
                self.hits.set(self.hits.get() + 1);
                Some(Rc::clone(image))
            }
            _ => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    pub fn state(&self, url: &str) -> Option<&IconState> {
        self.entries.get(url)
    }

    pub fn is_ready(&self, url: &str) -> bool {
        self.entries.get(url).map_or(false, IconState::is_ready)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Cacheable for IconCache {
    type Key = String;
    type Value = IconState;

    fn get_cached(&self, key: &String) -> Option<IconState> {
        self.entries.get(key).cloned()
    }

    fn cache(&mut self, key: String, value: IconState) {
        self.entries.insert(key, value);
    }

    fn invalidate(&mut self, key: &String) {
        self.entries.remove(key);
    }

    fn clear_cache(&mut self) {
        self.entries.clear();
    }

    fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
            size: self.entries.len(),
        }
    }
}
