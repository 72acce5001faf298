use std::sync::Arc;

use httpmock::prelude::*;
use opchain::{ExpirationFilter, OptionType};
use opchain_yahoo::YahooConnector;

use crate::helpers::{approx, service_with};

// One expiration batch (2023-11-17) with one call and one put.
const PAYLOAD: &str = r#"{
  "optionChain": {
    "result": [{
      "underlyingSymbol": "AAPL",
      "expirationDates": [1700179200],
      "strikes": [150.0],
      "quote": { "language": "en-US", "region": "US" },
      "options": [{
        "expirationDate": 1700179200,
        "hasMiniOptions": false,
        "calls": [{ "contractSymbol": "AAPL231117C00150000", "strike": 150.0, "impliedVolatility": 0.84, "openInterest": 5120 }],
        "puts":  [{ "contractSymbol": "AAPL231117P00150000", "strike": 150.0, "impliedVolatility": 0.53, "openInterest": 17843 }]
      }]
    }],
    "error": null
  }
}"#;

fn yahoo(base: &str) -> Arc<YahooConnector> {
    Arc::new(
        YahooConnector::builder()
            .base_url(base)
            .request_timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap(),
    )
}

#[tokio::test]
async fn well_formed_payload_yields_call_and_put() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v6/finance/options/AAPL");
            then.status(200).body(PAYLOAD);
        })
        .await;

    let svc = service_with(yahoo(&server.base_url()), ExpirationFilter::All);
    let records = svc.load_options("AAPL").await;
    mock.assert_async().await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].option_type, OptionType::Call);
    assert_eq!(records[1].option_type, OptionType::Put);
    assert_eq!(records[0].settlement_date, 1_700_179_200_000);
    assert!(approx(records[0].strike_price, 150.0));
    assert!(approx(records[0].implied_volatility, 0.84));
    assert!(approx(records[0].open_interest, 5_120.0));
    assert!(approx(records[1].implied_volatility, 0.53));
    assert!(approx(records[1].open_interest, 17_843.0));
}

#[tokio::test]
async fn malformed_json_yields_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v6/finance/options/AAPL");
            then.status(200).body("<html>rate limited</html>");
        })
        .await;

    let svc = service_with(yahoo(&server.base_url()), ExpirationFilter::All);
    assert!(svc.load_options("AAPL").await.is_empty());
}

#[tokio::test]
async fn connection_refused_yields_empty() {
    let svc = service_with(yahoo("http://127.0.0.1:1"), ExpirationFilter::All);
    assert!(svc.load_options("AAPL").await.is_empty());
    assert!(svc.try_load_options("AAPL").await.is_err());
}
