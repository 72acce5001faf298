//! opchain-middleware
//!
//! Wrappers layered around an `OptionRepository`, and the builder that composes them.

mod builder;
mod cache;

pub use crate::builder::RepositoryBuilder;
pub use crate::cache::{CacheMiddleware, CachingRepository};
