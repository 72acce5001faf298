//! Builder for composing repositories with middleware layers.
//!
//! Layers are stored outermost-first and applied in reverse during `build()`,
//! so the last layer added ends up outermost.

use std::sync::Arc;

use opchain_core::{CacheConfig, Middleware, OpchainError, OptionRepository};

/// Generic middleware builder for composing a repository with layered wrappers.
pub struct RepositoryBuilder {
    raw: Arc<dyn OptionRepository>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
}

impl RepositoryBuilder {
    /// Create a new builder from a raw, unwrapped repository.
    #[must_use]
    pub fn new(raw: Arc<dyn OptionRepository>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace the listing cache.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != "CachingRepository");
        self.layers
            .insert(0, Box::new(crate::cache::CacheMiddleware::new(*cfg)));
        self
    }

    /// Remove the listing cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CachingRepository");
        self
    }

    /// Names of the configured layers, outermost first.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|m| m.name()).collect()
    }

    /// Apply every layer and return the composed repository.
    ///
    /// # Errors
    /// Returns `InvalidArg` if an enabled cache is configured with zero capacity.
    pub fn build(self) -> Result<Arc<dyn OptionRepository>, OpchainError> {
        for layer in &self.layers {
            let cfg = layer.config_json();
            let ttl = cfg.get("ttl_ms").and_then(serde_json::Value::as_u64);
            let cap = cfg.get("max_entries").and_then(serde_json::Value::as_u64);
            if ttl.is_some_and(|t| t > 0) && cap == Some(0) {
                return Err(OpchainError::InvalidArg(format!(
                    "{}: max_entries must be positive when caching is enabled",
                    layer.name()
                )));
            }
        }
        let mut wrapped = self.raw;
        for layer in self.layers.into_iter().rev() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "opchain::middleware", layer = layer.name(), "applying middleware");
            wrapped = layer.apply(wrapped);
        }
        Ok(wrapped)
    }
}
