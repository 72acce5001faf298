use opchain_core::{ContractQuote, ExpirationBatch, OptionChainSnapshot, QuoteLocale};

/// 2023-11-17T00:00:00Z in epoch milliseconds.
pub const NEAR_EXPIRY_MS: i64 = 1_700_179_200_000;
/// 2023-11-24T00:00:00Z in epoch milliseconds.
pub const FAR_EXPIRY_MS: i64 = 1_700_784_000_000;

fn quote(symbol: &str, expiry: &str, side: char, strike: f64, iv: f64, oi: f64) -> ContractQuote {
    ContractQuote {
        contract_symbol: format!("{symbol}{expiry}{side}{:08}", (strike * 1000.0) as u64),
        strike,
        implied_volatility: iv,
        open_interest: oi,
    }
}

/// Two expirations, each with one call and one put at strikes 145 and 150.
pub fn chain_by_symbol(symbol: &str) -> OptionChainSnapshot {
    OptionChainSnapshot {
        underlying_symbol: symbol.to_string(),
        expiration_dates: vec![NEAR_EXPIRY_MS, FAR_EXPIRY_MS],
        strikes: vec![145.0, 150.0],
        quote: QuoteLocale {
            language: "en-US".into(),
            region: "US".into(),
        },
        options: vec![
            ExpirationBatch {
                expiration_date: NEAR_EXPIRY_MS,
                has_mini_options: false,
                calls: vec![quote(symbol, "231117", 'C', 150.0, 0.25, 1_200.0)],
                puts: vec![quote(symbol, "231117", 'P', 145.0, 0.31, 800.0)],
            },
            ExpirationBatch {
                expiration_date: FAR_EXPIRY_MS,
                has_mini_options: false,
                calls: vec![quote(symbol, "231124", 'C', 150.0, 0.27, 640.0)],
                puts: vec![quote(symbol, "231124", 'P', 145.0, 0.33, 410.0)],
            },
        ],
    }
}

/// A chain with listed metadata but no contracts.
pub fn empty_chain(symbol: &str) -> OptionChainSnapshot {
    OptionChainSnapshot {
        underlying_symbol: symbol.to_string(),
        expiration_dates: vec![],
        strikes: vec![],
        quote: QuoteLocale::default(),
        options: vec![],
    }
}
