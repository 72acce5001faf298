use async_trait::async_trait;
use opchain_core::{
    ContractQuote, ExpirationBatch, OpchainError, OptionChainSnapshot, ProviderConfig,
    QuoteLocale,
};
use reqwest::StatusCode;
use url::Url;

use crate::raw::{OptionChainEnvelope, RawContract};

pub(crate) const CONNECTOR: &str = "opchain-yahoo";
const SYMBOL_SLOT: &str = "__opchain_symbol__";

/// Options abstraction: fetch and decode the raw option-chain envelope.
#[async_trait]
pub trait YahooOptions: Send + Sync {
    /// Fetch the option chain envelope for `symbol`.
    async fn chain(&self, symbol: &str) -> Result<OptionChainEnvelope, OpchainError>;
}

/// Production adapter issuing real HTTP requests.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
    options_path: String,
}

impl RealAdapter {
    /// Build an adapter with its own `reqwest::Client` from a provider config.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable base URL and `Other` if the HTTP
    /// client cannot be constructed.
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, OpchainError> {
        let http = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| OpchainError::Other(e.to_string()))?;
        Self::with_client(http, &cfg.base_url, &cfg.options_path)
    }

    /// Build an adapter around a caller-provided `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `base_url` does not parse or the path template lacks `{symbol}`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        options_path: &str,
    ) -> Result<Self, OpchainError> {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base = Url::parse(&base_url)
            .map_err(|e| OpchainError::InvalidArg(format!("base url {base_url}: {e}")))?;
        if !options_path.contains("{symbol}") {
            return Err(OpchainError::InvalidArg(format!(
                "options path must contain {{symbol}}: {options_path}"
            )));
        }
        Ok(Self {
            http,
            base,
            options_path: options_path.trim_start_matches('/').to_string(),
        })
    }

    // The symbol is always a single, percent-encoded path segment.
    pub(crate) fn endpoint(&self, symbol: &str) -> Result<Url, OpchainError> {
        if symbol.is_empty() || symbol == "." || symbol == ".." {
            return Err(OpchainError::InvalidArg(format!(
                "symbol {symbol:?} is not a valid path segment"
            )));
        }
        let template = self
            .base
            .join(&self.options_path.replace("{symbol}", SYMBOL_SLOT))
            .map_err(|e| OpchainError::InvalidArg(format!("options path: {e}")))?;
        let segments: Vec<String> = template
            .path_segments()
            .map(|it| it.map(|seg| seg.replace(SYMBOL_SLOT, symbol)).collect())
            .unwrap_or_default();
        let mut url = template;
        url.path_segments_mut()
            .map_err(|()| OpchainError::InvalidArg(format!("base url {} cannot carry a path", self.base)))?
            .clear()
            .extend(segments.iter().map(String::as_str));
        Ok(url)
    }
}

fn map_transport_err(e: &reqwest::Error, what: &str) -> OpchainError {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    OpchainError::connector(CONNECTOR, format!("{what}: {kind}: {e}"))
}

#[async_trait]
impl YahooOptions for RealAdapter {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "opchain::yahoo", skip(self), fields(url))
    )]
    async fn chain(&self, symbol: &str) -> Result<OptionChainEnvelope, OpchainError> {
        let what = format!("option chain for {symbol}");
        let url = self.endpoint(symbol)?;
        #[cfg(feature = "tracing")]
        tracing::Span::current().record("url", tracing::field::display(&url));

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_err(&e, &what))?;
        let status = resp.status();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "opchain::yahoo", %status, "provider responded");

        if status == StatusCode::NOT_FOUND {
            return Err(OpchainError::not_found(what));
        }
        if !status.is_success() {
            return Err(OpchainError::connector(
                CONNECTOR,
                format!("{what}: HTTP {status}"),
            ));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| map_transport_err(&e, &what))?;
        serde_json::from_str(&body).map_err(|e| OpchainError::data(format!("{what}: {e}")))
    }
}

const fn seconds_to_millis(secs: i64) -> i64 {
    secs.saturating_mul(1_000)
}

fn contract(raw: RawContract) -> ContractQuote {
    ContractQuote {
        contract_symbol: raw.contract_symbol,
        strike: raw.strike,
        implied_volatility: raw.implied_volatility,
        open_interest: raw.open_interest,
    }
}

/// Convert a decoded envelope into a provider-neutral snapshot.
///
/// Reads `result[0]` and rescales every expiration from epoch seconds to epoch
/// milliseconds.
///
/// # Errors
/// Returns `NotFound` when Yahoo reports a "not found" error object and `Data`
/// when the result array is empty or carries another error.
pub fn snapshot_from_envelope(
    envelope: OptionChainEnvelope,
    symbol: &str,
) -> Result<OptionChainSnapshot, OpchainError> {
    let body = envelope.option_chain;
    if let Some(err) = body.error {
        let msg = format!("{}: {}", err.code, err.description);
        if crate::YahooConnector::looks_like_not_found(&msg) {
            return Err(OpchainError::not_found(format!("option chain for {symbol}")));
        }
        return Err(OpchainError::data(format!("option chain for {symbol}: {msg}")));
    }
    let first = body
        .result
        .into_iter()
        .next()
        .ok_or_else(|| OpchainError::data(format!("option chain for {symbol}: empty result")))?;

    Ok(OptionChainSnapshot {
        underlying_symbol: first.underlying_symbol,
        expiration_dates: first
            .expiration_dates
            .into_iter()
            .map(seconds_to_millis)
            .collect(),
        strikes: first.strikes,
        quote: QuoteLocale {
            language: first.quote.language,
            region: first.quote.region,
        },
        options: first
            .options
            .into_iter()
            .map(|batch| ExpirationBatch {
                expiration_date: seconds_to_millis(batch.expiration_date),
                has_mini_options: batch.has_mini_options,
                calls: batch.calls.into_iter().map(contract).collect(),
                puts: batch.puts.into_iter().map(contract).collect(),
            })
            .collect(),
    })
}

#[cfg(feature = "test-adapters")]
impl dyn YahooOptions {
    /// Build a `YahooOptions` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> std::sync::Arc<dyn YahooOptions>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<OptionChainEnvelope, OpchainError>,
    {
        struct FnOptions<F> {
            f: F,
        }
        #[async_trait]
        impl<F> YahooOptions for FnOptions<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<OptionChainEnvelope, OpchainError>,
        {
            async fn chain(&self, symbol: &str) -> Result<OptionChainEnvelope, OpchainError> {
                (self.f)(symbol.to_string())
            }
        }
        std::sync::Arc::new(FnOptions { f })
    }
}
