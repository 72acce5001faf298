use std::sync::Arc;

use opchain_core::{Clock, MemoryRepository, OptionChainSource, OptionRepository, SystemClock};
use opchain_middleware::RepositoryBuilder;
use opchain_types::{CacheConfig, ExpirationFilter, OpchainConfig, OpchainError};
use tokio::sync::Mutex;

/// Option ingestion and query service.
pub struct OptionService {
    pub(crate) source: Arc<dyn OptionChainSource>,
    pub(crate) repository: Arc<dyn OptionRepository>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: OpchainConfig,
    // Serializes find-then-save so one identity never gains two rows.
    pub(crate) reconcile_lock: Mutex<()>,
}

/// Builder for constructing an [`OptionService`].
pub struct OptionServiceBuilder {
    source: Option<Arc<dyn OptionChainSource>>,
    repository: Option<Arc<dyn OptionRepository>>,
    clock: Arc<dyn Clock>,
    cfg: OpchainConfig,
}

impl Default for OptionServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionServiceBuilder {
    /// Create a new builder with defaults.
    ///
    /// - No chain source; one must be registered via [`with_source`](Self::with_source).
    /// - An empty [`MemoryRepository`] unless one is supplied.
    /// - The wall clock, the `ExpiredOnly` filter, and the default listing cache.
    ///
    /// `ExpiredOnly` keeps only contracts whose expiration is before midnight UTC
    /// today. A live provider lists only current and future expirations, so with
    /// the default filter a service over live data loads and ingests nothing.
    /// Select [`ExpirationFilter::ActiveOnly`] (or `All`) via
    /// [`expiration_filter`](Self::expiration_filter) to keep tradable contracts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            repository: None,
            clock: Arc::new(SystemClock),
            cfg: OpchainConfig::default(),
        }
    }

    /// Register the upstream chain source.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn OptionChainSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Use `repository` for storage instead of a fresh in-memory one.
    #[must_use]
    pub fn with_repository(mut self, repository: Arc<dyn OptionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Replace the clock used to compute the start of the current day.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the whole service configuration.
    #[must_use]
    pub fn config(mut self, cfg: OpchainConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select which expirations survive ingestion.
    #[must_use]
    pub const fn expiration_filter(mut self, filter: ExpirationFilter) -> Self {
        self.cfg.expiration_filter = filter;
        self
    }

    /// Cache `find_all_by_stock_listing` with the given settings.
    #[must_use]
    pub const fn cache(mut self, cfg: CacheConfig) -> Self {
        self.cfg.cache = Some(cfg);
        self
    }

    /// Serve every listing lookup straight from the repository.
    #[must_use]
    pub const fn without_cache(mut self) -> Self {
        self.cfg.cache = None;
        self
    }

    /// Build the service.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no chain source was registered or the cache
    /// configuration is invalid.
    pub fn build(self) -> Result<OptionService, OpchainError> {
        let source = self.source.ok_or_else(|| {
            OpchainError::InvalidArg(
                "no chain source registered; add one via with_source(...)".to_string(),
            )
        })?;
        let raw = self
            .repository
            .unwrap_or_else(|| Arc::new(MemoryRepository::new()));
        let mut stack = RepositoryBuilder::new(raw);
        if let Some(cache) = &self.cfg.cache {
            stack = stack.with_cache(cache);
        }
        Ok(OptionService {
            source,
            repository: stack.build()?,
            clock: self.clock,
            cfg: self.cfg,
            reconcile_lock: Mutex::new(()),
        })
    }
}

impl OptionService {
    /// Start building a new service.
    #[must_use]
    pub fn builder() -> OptionServiceBuilder {
        OptionServiceBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &OpchainConfig {
        &self.cfg
    }

    /// Name of the registered chain source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}
