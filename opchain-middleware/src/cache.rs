//! TTL cache for per-symbol listing lookups.
//!
//! Only `find_all_by_stock_listing` is cached. Entries expire after the
//! configured TTL and are invalidated whenever a record for the symbol is saved
//! through this wrapper. Writes that bypass the wrapper are only observed after
//! expiry.
//!
//! A listing read that overlaps a save for the same symbol is returned to its
//! caller but not cached, so a completed save is never shadowed by rows read
//! before it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use opchain_core::{
    CacheConfig, Middleware, OpchainError, OptionId, OptionIdentity, OptionRecord,
    OptionRepository,
};
use tokio::sync::Mutex;

/// Declarative wrapper that applies caching when building a repository stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Wrap repositories with the given cache settings.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn OptionRepository>) -> Arc<dyn OptionRepository> {
        let Self { cfg } = *self;
        Arc::new(CachingRepository::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingRepository"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ttl_ms": self.cfg.ttl_ms,
            "max_entries": self.cfg.max_entries,
        })
    }
}

// Write generations; bumped under the lock together with the invalidation.
#[derive(Default)]
struct Generations {
    epoch: u64,
    per_symbol: HashMap<String, u64>,
}

impl Generations {
    fn token(&self, stock_listing: &str) -> (u64, u64) {
        (
            self.epoch,
            self.per_symbol.get(stock_listing).copied().unwrap_or(0),
        )
    }

    fn bump(&mut self, stock_listing: &str) {
        let g = self.per_symbol.entry(stock_listing.to_string()).or_insert(0);
        *g = g.wrapping_add(1);
    }
}

/// Repository wrapper caching listing lookups by symbol.
pub struct CachingRepository {
    inner: Arc<dyn OptionRepository>,
    // `None` means disabled (TTL=0).
    listings: Option<Cache<String, Arc<Vec<OptionRecord>>>>,
    generations: Mutex<Generations>,
}

impl CachingRepository {
    /// Wrap `inner` using `cfg`; a zero TTL passes every call through.
    #[must_use]
    pub fn new(inner: Arc<dyn OptionRepository>, cfg: &CacheConfig) -> Self {
        let listings = cfg.ttl().map(|ttl| {
            Cache::builder()
                .max_capacity(cfg.max_entries.max(1))
                .time_to_live(ttl)
                .build()
        });
        Self {
            inner,
            listings,
            generations: Mutex::new(Generations::default()),
        }
    }

    /// Access the wrapped repository.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn OptionRepository> {
        &self.inner
    }

    /// Drop the cached listing for one symbol.
    ///
    /// Listing reads already in flight for the symbol will not be cached.
    pub async fn invalidate(&self, stock_listing: &str) {
        if let Some(cache) = &self.listings {
            let mut gens = self.generations.lock().await;
            gens.bump(stock_listing);
            cache.invalidate(stock_listing).await;
        }
    }

    /// Drop every cached listing.
    pub async fn invalidate_all(&self) {
        if let Some(cache) = &self.listings {
            let mut gens = self.generations.lock().await;
            gens.epoch = gens.epoch.wrapping_add(1);
            cache.invalidate_all();
        }
    }
}

#[async_trait]
impl OptionRepository for CachingRepository {
    async fn find_all(&self) -> Result<Vec<OptionRecord>, OpchainError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: OptionId) -> Result<Option<OptionRecord>, OpchainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Vec<OptionRecord>, OpchainError> {
        let Some(cache) = &self.listings else {
            return self.inner.find_all_by_stock_listing(stock_listing).await;
        };
        if let Some(hit) = cache.get(stock_listing).await {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "opchain::cache", symbol = stock_listing, "listing cache hit");
            return Ok((*hit).clone());
        }
        let before = self.generations.lock().await.token(stock_listing);
        let rows = self.inner.find_all_by_stock_listing(stock_listing).await?;
        let gens = self.generations.lock().await;
        if gens.token(stock_listing) == before {
            cache
                .insert(stock_listing.to_string(), Arc::new(rows.clone()))
                .await;
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "opchain::cache", symbol = stock_listing, "listing changed during read; not cached");
        }
        drop(gens);
        Ok(rows)
    }

    async fn find_first_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Option<OptionRecord>, OpchainError> {
        self.inner.find_first_by_stock_listing(stock_listing).await
    }

    async fn find_option(
        &self,
        identity: &OptionIdentity,
    ) -> Result<Option<OptionRecord>, OpchainError> {
        self.inner.find_option(identity).await
    }

    async fn save(&self, record: OptionRecord) -> Result<OptionRecord, OpchainError> {
        // A replaced row may move between symbols; drop both listings.
        let previous_listing = match (record.id, &self.listings) {
            (Some(id), Some(_)) => self
                .inner
                .find_by_id(id)
                .await?
                .map(|r| r.stock_listing)
                .filter(|s| *s != record.stock_listing),
            _ => None,
        };
        let saved = self.inner.save(record).await?;
        self.invalidate(&saved.stock_listing).await;
        if let Some(old) = previous_listing {
            self.invalidate(&old).await;
        }
        Ok(saved)
    }
}
