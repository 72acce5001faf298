//! Configuration types shared by the connector, the middleware, and the service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the outbound option-chain provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the provider; the option-chain path is joined onto it.
    pub base_url: String,
    /// Path template for the option-chain endpoint; `{symbol}` is substituted.
    pub options_path: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Default Yahoo Finance host.
    pub const DEFAULT_BASE_URL: &'static str = "https://query1.finance.yahoo.com/";
    /// Default option-chain path template.
    pub const DEFAULT_OPTIONS_PATH: &'static str = "v6/finance/options/{symbol}";
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            options_path: Self::DEFAULT_OPTIONS_PATH.to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Cache settings for per-symbol listing lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for a cached entry in milliseconds. `0` disables caching.
    pub ttl_ms: u64,
    /// Maximum number of symbols held at once.
    pub max_entries: u64,
}

impl CacheConfig {
    /// Effective TTL, or `None` when caching is disabled.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        if self.ttl_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.ttl_ms))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        // Matches the default ingestion cadence.
        Self {
            ttl_ms: 15 * 60 * 1000,
            max_entries: 1_024,
        }
    }
}

/// Which contracts survive ingestion, relative to the start of the current UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExpirationFilter {
    /// Keep only contracts that expired before today (`expiration < start_of_today`).
    ///
    /// This is the long-standing ingestion rule; see `ActiveOnly` for the opposite.
    /// Live chains list no past expirations, so this keeps nothing from them.
    #[default]
    ExpiredOnly,
    /// Keep only contracts expiring today or later (`expiration >= start_of_today`).
    ActiveOnly,
    /// Keep every contract.
    All,
}

impl ExpirationFilter {
    /// Returns true if a contract expiring at `expiration_ms` is kept.
    #[must_use]
    pub const fn keeps(self, start_of_today_ms: i64, expiration_ms: i64) -> bool {
        match self {
            Self::ExpiredOnly => expiration_ms < start_of_today_ms,
            Self::ActiveOnly => expiration_ms >= start_of_today_ms,
            Self::All => true,
        }
    }
}

/// Periodic ingestion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Symbols ingested on every tick, in order.
    pub symbols: Vec<String>,
    /// Delay between passes.
    pub interval: Duration,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
    /// Reconcile loaded records into the repository; when false they are discarded.
    pub persist: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            interval: Duration::from_secs(15 * 60),
            jitter_percent: 10,
            persist: true,
        }
    }
}

/// Global configuration for the option service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpchainConfig {
    /// Expiration filter applied while loading.
    pub expiration_filter: ExpirationFilter,
    /// Cache for `find_all_by_stock_listing`; `None` leaves lookups uncached.
    pub cache: Option<CacheConfig>,
}

impl Default for OpchainConfig {
    fn default() -> Self {
        Self {
            expiration_filter: ExpirationFilter::default(),
            cache: Some(CacheConfig::default()),
        }
    }
}
