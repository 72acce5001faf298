use serde::{Deserialize, Serialize};

use crate::OpchainError;

/// Outcome of loading and reconciling one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Symbol that was ingested.
    pub symbol: String,
    /// Records produced by the load step (after expiration filtering).
    pub fetched: usize,
    /// Records stored fresh.
    pub inserted: usize,
    /// Existing records whose market fields were overwritten.
    pub updated: usize,
}

/// Per-symbol result of one scheduler pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledRun {
    /// Records were loaded and reconciled into the repository.
    Persisted(IngestReport),
    /// Records were loaded and discarded; carries how many.
    Loaded {
        /// Symbol that was loaded.
        symbol: String,
        /// Number of records produced.
        count: usize,
    },
    /// Ingestion failed for the symbol.
    Failed {
        /// Symbol that failed.
        symbol: String,
        /// The surfaced error.
        error: OpchainError,
    },
}

impl ScheduledRun {
    /// Symbol this outcome belongs to.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Persisted(r) => &r.symbol,
            Self::Loaded { symbol, .. } | Self::Failed { symbol, .. } => symbol,
        }
    }
}
