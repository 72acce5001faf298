//! Mock option-chain sources for tests and demos.
//!
//! [`MockChainSource`] serves static fixtures; [`dynamic::DynamicMockSource`]
//! is scripted per symbol from the outside.

use async_trait::async_trait;
use opchain_core::{OpchainError, OptionChainSnapshot, OptionChainSource};

/// Scriptable mock driven through a controller handle.
pub mod dynamic;
/// Static fixture data.
pub mod fixtures;

/// Mock source for CI-safe demos. Provides deterministic data from static fixtures.
///
/// Reserved symbols: `FAIL` yields a connector error, `BADDATA` a data error,
/// `MISSING` a not-found, and `EMPTY` a chain without contracts.
pub struct MockChainSource;

impl Default for MockChainSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChainSource {
    /// Create the mock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OptionChainSource for MockChainSource {
    fn name(&self) -> &'static str {
        "opchain-mock"
    }

    async fn option_chain(&self, symbol: &str) -> Result<OptionChainSnapshot, OpchainError> {
        match symbol {
            "FAIL" => Err(OpchainError::connector(
                "opchain-mock",
                "forced failure: option chain",
            )),
            "BADDATA" => Err(OpchainError::data("forced malformed payload")),
            "MISSING" => Err(OpchainError::not_found(format!("option chain for {symbol}"))),
            "EMPTY" => Ok(fixtures::options::empty_chain(symbol)),
            _ => Ok(fixtures::options::chain_by_symbol(symbol)),
        }
    }
}
