//! Wire shapes of the Yahoo option-chain endpoint.
//!
//! Only the fields the connector reads are modeled; unknown fields are ignored.
//! Every modeled field is required, so a payload missing one fails to decode.

use serde::Deserialize;

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainEnvelope {
    /// The chain body.
    pub option_chain: OptionChainBody,
}

/// `optionChain` object.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionChainBody {
    /// One entry per requested underlying; the connector reads the first.
    pub result: Vec<OptionChainResult>,
    /// Error object Yahoo fills in for unknown symbols.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Error object embedded in the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Short code, e.g. "Not Found".
    #[serde(default)]
    pub code: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// `optionChain.result[n]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChainResult {
    /// Resolved underlying symbol.
    pub underlying_symbol: String,
    /// Listed expirations, epoch seconds.
    pub expiration_dates: Vec<i64>,
    /// Listed strikes.
    pub strikes: Vec<f64>,
    /// Underlying quote; only locale fields are read.
    pub quote: RawQuote,
    /// Contracts grouped by expiration.
    pub options: Vec<RawExpiration>,
}

/// `quote` object.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuote {
    /// Language tag.
    pub language: String,
    /// Region code.
    pub region: String,
}

/// `options[n]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpiration {
    /// Expiration, epoch seconds.
    pub expiration_date: i64,
    /// Mini contracts listed.
    pub has_mini_options: bool,
    /// Calls.
    pub calls: Vec<RawContract>,
    /// Puts.
    pub puts: Vec<RawContract>,
}

/// `calls[n]` / `puts[n]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContract {
    /// OCC-style contract symbol.
    pub contract_symbol: String,
    /// Strike price.
    pub strike: f64,
    /// Implied volatility.
    pub implied_volatility: f64,
    /// Open interest.
    pub open_interest: f64,
}
