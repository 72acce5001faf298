//! opchain loads option chains from an upstream provider, reconciles them into a
//! repository, and serves read queries over the stored records.
//!
//! Overview
//! - [`OptionService`] owns a chain source, a repository (optionally wrapped in the
//!   listing cache), a clock, and the expiration filter.
//! - Ingestion is one GET per symbol: the chain is walked into records, filtered
//!   by expiration relative to the start of the current UTC day, and returned.
//! - Reconciliation merges each record into storage by identity
//!   (listing, settlement date, strike, side): existing rows get their open
//!   interest and implied volatility overwritten, new ones are inserted.
//! - [`IngestionScheduler`] is a separate component that runs ingestion for a set
//!   of symbols on a fixed interval.
//!
//! Error behavior
//! - `find_by_id` and `find_by_stock_listing` surface `NotFound`.
//! - `load_options` degrades every failure to an empty list (logged at `warn`);
//!   `try_load_options` and `ingest` surface the failure instead.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use opchain::{ExpirationFilter, OptionService};
//!
//! let yahoo = Arc::new(opchain_yahoo::YahooConnector::try_new_default()?);
//! let service = OptionService::builder()
//!     .with_source(yahoo)
//!     .expiration_filter(ExpirationFilter::ActiveOnly)
//!     .build()?;
//!
//! let report = service.ingest("AAPL").await?;
//! let stored = service.find_all_by_stock_listing("AAPL").await?;
//! ```

mod core;
mod scheduler;
mod service;

pub use crate::core::{OptionService, OptionServiceBuilder};
pub use crate::scheduler::{IngestionScheduler, SchedulerHandle};

pub use opchain_core::{
    Clock, FixedClock, MemoryRepository, OptionChainSource, OptionRepository, SystemClock,
};
pub use opchain_types::{
    CacheConfig, ExpirationFilter, IngestReport, OpchainConfig, OpchainError, OptionId,
    OptionIdentity, OptionRecord, OptionTransfer, OptionType, ScheduleConfig, ScheduledRun,
};
