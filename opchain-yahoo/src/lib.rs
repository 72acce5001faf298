//! opchain-yahoo
//!
//! Option-chain connector that implements `OptionChainSource` against the Yahoo
//! Finance options endpoint. One GET per call; no authentication, retry, or rate
//! limiting.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Wire shapes of the provider payload.
pub mod raw;

use std::sync::Arc;
use std::time::Duration;

use adapter::{RealAdapter, YahooOptions};
use async_trait::async_trait;
use opchain_core::{OpchainError, OptionChainSnapshot, OptionChainSource, ProviderConfig};

/// Public connector type. Production users construct it with
/// [`YahooConnector::try_new_default`] or [`YahooConnector::builder`].
pub struct YahooConnector {
    options: Arc<dyn YahooOptions>,
}

impl YahooConnector {
    /// Static connector name used in error tagging.
    pub const NAME: &'static str = adapter::CONNECTOR;

    pub(crate) fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no data") || m.contains("no matches")
    }

    fn normalize_error(e: OpchainError, what: &str) -> OpchainError {
        match e {
            OpchainError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    OpchainError::not_found(what.to_string())
                } else {
                    OpchainError::connector(Self::NAME, msg)
                }
            }
            OpchainError::Other(msg) => OpchainError::connector(Self::NAME, msg),
            other => other,
        }
    }

    /// Build against the public Yahoo endpoint with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, OpchainError> {
        Self::builder().build()
    }

    /// Start configuring a connector.
    #[must_use]
    pub fn builder() -> YahooConnectorBuilder {
        YahooConnectorBuilder::default()
    }

    /// Build from a concrete adapter.
    #[must_use]
    pub fn from_adapter(adapter: RealAdapter) -> Self {
        Self {
            options: Arc::new(adapter),
        }
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_options(options: Arc<dyn YahooOptions>) -> Self {
        Self { options }
    }
}

/// Builder for [`YahooConnector`].
#[derive(Default)]
pub struct YahooConnectorBuilder {
    cfg: ProviderConfig,
    http: Option<reqwest::Client>,
}

impl YahooConnectorBuilder {
    /// Replace the whole provider configuration.
    #[must_use]
    pub fn config(mut self, cfg: ProviderConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Override the provider host, e.g. to point at a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.cfg.base_url = url.into();
        self
    }

    /// Override the option-chain path template (must contain `{symbol}`).
    #[must_use]
    pub fn options_path(mut self, path: impl Into<String>) -> Self {
        self.cfg.options_path = path.into();
        self
    }

    /// Override the user agent. Ignored when a custom client is supplied.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.cfg.user_agent = ua.into();
        self
    }

    /// Override the per-request timeout. Ignored when a custom client is supplied.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = timeout;
        self
    }

    /// Use a caller-provided HTTP client.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a bad base URL or path template, or `Other`
    /// if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<YahooConnector, OpchainError> {
        let adapter = match self.http {
            Some(http) => RealAdapter::with_client(http, &self.cfg.base_url, &self.cfg.options_path)?,
            None => RealAdapter::from_config(&self.cfg)?,
        };
        Ok(YahooConnector::from_adapter(adapter))
    }
}

#[async_trait]
impl OptionChainSource for YahooConnector {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn option_chain(&self, symbol: &str) -> Result<OptionChainSnapshot, OpchainError> {
        let what = format!("option chain for {symbol}");
        let raw = self
            .options
            .chain(symbol)
            .await
            .map_err(|e| Self::normalize_error(e, &what))?;
        adapter::snapshot_from_envelope(raw, symbol)
    }
}
