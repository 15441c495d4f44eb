//! Shared trait abstractions for common patterns
//!
//! Configuration and caching follow the same shape across the crate, so the
//! layer and the icon cache expose them through these traits.

use crate::Result;

/// Trait for configurable components
pub trait Configurable {
    type Config: Clone;

    /// Get the current configuration
    fn config(&self) -> &Self::Config;

    /// Set new configuration
    fn set_config(&mut self, config: Self::Config) -> Result<()>;

    /// Validate configuration
    fn validate_config(config: &Self::Config) -> Result<()> {
        let _ = config; // Default implementation accepts all configs
        Ok(())
    }

    /// Update configuration with a partial change
    fn update_config<F>(&mut self, updater: F) -> Result<()>
    where
        F: FnOnce(&mut Self::Config),
    {
        let mut config = self.config().clone();
        updater(&mut config);
        Self::validate_config(&config)?;
        self.set_config(config)
    }
}

/// Trait for cacheable operations
pub trait Cacheable {
    type Key: Clone + Eq + std::hash::Hash;
    type Value: Clone;

    /// Get cached value
    fn get_cached(&self, key: &Self::Key) -> Option<Self::Value>;

    /// Cache a value
    fn cache(&mut self, key: Self::Key, value: Self::Value);

    /// Invalidate cache entry
    fn invalidate(&mut self, key: &Self::Key);

    /// Clear entire cache
    fn clear_cache(&mut self);

    /// Get cache statistics
    fn cache_stats(&self) -> CacheStats {
        CacheStats::default()
    }
}

/// Cache statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}
