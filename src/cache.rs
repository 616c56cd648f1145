//! In-memory pricing config cache using moka
//!
//! Holds the active [`PricingConfig`] as a single `Arc` entry. Callers clone
//! the `Arc` and price against that snapshot; a reload builds a new config and
//! swaps the entry, so in-flight requests keep the config they started with.

use moka::future::Cache;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::pricing::config::{ConfigError, PricingConfig};

const CURRENT_KEY: &str = "current";

/// Application cache holding the active pricing config
#[derive(Clone)]
pub struct ConfigCache {
    /// Where the config document is read from
    path: Arc<PathBuf>,
    /// Active config (single entry, never expires)
    configs: Cache<String, Arc<PricingConfig>>,
    reloads: Arc<AtomicU64>,
}

impl ConfigCache {
    /// Create an empty cache; the config loads on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            configs: Cache::builder().max_capacity(1).build(),
            reloads: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Create a cache already holding `config`
    pub async fn with_config(path: impl Into<PathBuf>, config: PricingConfig) -> Self {
        let cache = Self::new(path);
        cache
            .configs
            .insert(CURRENT_KEY.to_string(), Arc::new(config))
            .await;
        cache
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Active config, loading it (with fallback to defaults) on first use
    pub async fn current(&self) -> Arc<PricingConfig> {
        if let Some(config) = self.configs.get(CURRENT_KEY).await {
            debug!("Cache HIT for pricing config '{}'", config.version);
            return config;
        }

        let path = Arc::clone(&self.path);
        self.configs
            .get_with(CURRENT_KEY.to_string(), async move {
                Arc::new(PricingConfig::load_or_default(path.as_path()))
            })
            .await
    }

    /// Re-read the config document and swap it in.
    ///
    /// On failure the active config stays in place and the error is returned.
    pub async fn reload(&self) -> Result<Arc<PricingConfig>, ConfigError> {
        let config = Arc::new(PricingConfig::load_from_path(self.path.as_path())?);
        self.configs
            .insert(CURRENT_KEY.to_string(), Arc::clone(&config))
            .await;
        self.reloads.fetch_add(1, Ordering::Relaxed);
        info!(
            "Pricing config reloaded: version '{}' from {}",
            config.version,
            self.path.display()
        );
        Ok(config)
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            config_loaded: self.configs.contains_key(CURRENT_KEY),
            reloads: self.reloads.load(Ordering::Relaxed),
            config_path: self.path.display().to_string(),
        }
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub config_loaded: bool,
    pub reloads: u64,
    pub config_path: String,
}
