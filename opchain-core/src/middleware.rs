//! Middleware trait for wrapping `OptionRepository` implementations.

use std::sync::Arc;

use crate::connector::OptionRepository;

/// Trait implemented by repository middleware layers.
///
/// A middleware consumes an inner repository and returns a wrapped repository
/// that augments its behavior (e.g., caching).
pub trait Middleware: Send + Sync {
    /// Apply this middleware to wrap an inner repository and return the wrapped one.
    fn apply(self: Box<Self>, inner: Arc<dyn OptionRepository>) -> Arc<dyn OptionRepository>;

    /// Human-readable middleware name for introspection/logging.
    fn name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    fn config_json(&self) -> serde_json::Value;
}
