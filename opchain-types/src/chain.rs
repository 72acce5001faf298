//! Provider-neutral option chain snapshot, as returned by a chain source.

use serde::{Deserialize, Serialize};

/// Locale hints the provider attaches to the underlying quote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuoteLocale {
    /// Language tag, e.g. "en-US".
    pub language: String,
    /// Region code, e.g. "US".
    pub region: String,
}

/// One call or put as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractQuote {
    /// Provider contract symbol, e.g. "AAPL231117C00150000".
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Market-implied volatility.
    pub implied_volatility: f64,
    /// Outstanding contracts.
    pub open_interest: f64,
}

/// All contracts sharing one expiration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationBatch {
    /// Expiration timestamp in epoch milliseconds.
    pub expiration_date: i64,
    /// Whether mini (10-share) contracts are listed for this expiration.
    pub has_mini_options: bool,
    /// Call contracts.
    pub calls: Vec<ContractQuote>,
    /// Put contracts.
    pub puts: Vec<ContractQuote>,
}

/// Option chain for a single underlying at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChainSnapshot {
    /// Symbol the provider resolved the request to.
    pub underlying_symbol: String,
    /// Every listed expiration in epoch milliseconds.
    pub expiration_dates: Vec<i64>,
    /// Every listed strike.
    pub strikes: Vec<f64>,
    /// Quote locale.
    pub quote: QuoteLocale,
    /// Contracts grouped by expiration.
    pub options: Vec<ExpirationBatch>,
}

impl OptionChainSnapshot {
    /// Total number of calls and puts across all batches.
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.options
            .iter()
            .map(|b| b.calls.len() + b.puts.len())
            .sum()
    }
}
