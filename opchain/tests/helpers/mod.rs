#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use opchain::{
    ExpirationFilter, FixedClock, MemoryRepository, OptionChainSource, OptionRecord,
    OptionService, OptionType,
};
use opchain_mock::MockChainSource;
use opchain_mock::fixtures::options::{FAR_EXPIRY_MS, NEAR_EXPIRY_MS};

pub use opchain_mock::fixtures::options::chain_by_symbol;

/// Common symbol constants used across tests.
pub const AAPL: &str = "AAPL";
pub const MSFT: &str = "MSFT";

pub const NEAR: i64 = NEAR_EXPIRY_MS;
pub const FAR: i64 = FAR_EXPIRY_MS;

/// 2023-11-20T13:30:00Z: after the near fixture expiry, before the far one.
pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(Utc.with_ymd_and_hms(2023, 11, 20, 13, 30, 0).unwrap()))
}

pub fn service_with(source: Arc<dyn OptionChainSource>, filter: ExpirationFilter) -> OptionService {
    OptionService::builder()
        .with_source(source)
        .clock(clock())
        .expiration_filter(filter)
        .build()
        .expect("valid service")
}

pub fn mock_service(filter: ExpirationFilter) -> OptionService {
    service_with(Arc::new(MockChainSource::new()), filter)
}

/// Service over a caller-held repository so tests can inspect raw storage.
pub fn service_over(repo: Arc<MemoryRepository>) -> OptionService {
    OptionService::builder()
        .with_source(Arc::new(MockChainSource::new()))
        .with_repository(repo)
        .clock(clock())
        .build()
        .expect("valid service")
}

pub fn record(
    symbol: &str,
    settlement_date: i64,
    strike: f64,
    option_type: OptionType,
    open_interest: f64,
) -> OptionRecord {
    OptionRecord {
        id: None,
        stock_listing: symbol.to_string(),
        settlement_date,
        strike_price: strike,
        implied_volatility: 0.2,
        open_interest,
        option_type,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
