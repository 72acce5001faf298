//! Option-chain records, transfer objects, errors, and configuration primitives
//! shared across the opchain workspace.
#![warn(missing_docs)]

mod chain;
mod config;
mod error;
mod option;
mod reports;

pub use chain::{ContractQuote, ExpirationBatch, OptionChainSnapshot, QuoteLocale};
pub use config::{CacheConfig, ExpirationFilter, OpchainConfig, ProviderConfig, ScheduleConfig};
pub use error::OpchainError;
pub use option::{OptionId, OptionIdentity, OptionRecord, OptionTransfer, OptionType};
pub use reports::{IngestReport, ScheduledRun};
