//! opchain-core
//!
//! Contracts and shared machinery for option-chain ingestion.
//!
//! - `connector`: the `OptionChainSource` and `OptionRepository` role traits.
//! - `middleware`: the `Middleware` trait implemented by repository wrappers.
//! - `chain`: walks a provider snapshot into staged `OptionTransfer`s.
//! - `clock`: UTC clock abstraction used to compute the start of the current day.
//! - `memory`: the in-memory `OptionRepository`.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `MemoryRepository` guards its state with `tokio::sync::RwLock`; callers must
//! run under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Walks provider snapshots into transfer objects.
pub mod chain;
/// Clock abstraction and day-boundary helpers.
pub mod clock;
/// Role traits for chain sources and repositories.
pub mod connector;
/// In-memory repository.
pub mod memory;
/// Middleware trait implemented by repository wrappers.
pub mod middleware;

pub use chain::chain_to_transfers;
pub use clock::{Clock, FixedClock, SystemClock, start_of_day_ms};
pub use connector::{OptionChainSource, OptionRepository};
pub use memory::MemoryRepository;
pub use middleware::Middleware;
pub use opchain_types::*;
