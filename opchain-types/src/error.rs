use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the opchain workspace.
///
/// Lookups surface `NotFound`; ingestion paths produce `Connector` and `Data`
/// failures which the service may choose to swallow.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OpchainError {
    /// A record or provider resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "option with id: 7".
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned payload (malformed JSON, missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// The upstream data provider failed (transport error or non-success status).
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The repository rejected or failed a read/write.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl OpchainError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Returns true for a benign not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this error came from fetching or decoding provider data.
    ///
    /// These are the failures ingestion degrades to an empty result.
    #[must_use]
    pub const fn is_ingestion_failure(&self) -> bool {
        matches!(self, Self::Connector { .. } | Self::Data(_))
    }
}
