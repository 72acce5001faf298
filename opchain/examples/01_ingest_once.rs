mod common;
use opchain::{ExpirationFilter, OptionService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Service over the selected source (mock in CI when OPCHAIN_EXAMPLES_USE_MOCK is set).
    let service = OptionService::builder()
        .with_source(common::get_source())
        .expiration_filter(ExpirationFilter::ActiveOnly)
        .build()?;

    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());

    // 2. Fetch and reconcile.
    let report = service.ingest(&symbol).await?;
    println!(
        "{}: fetched {}, inserted {}, updated {}",
        report.symbol, report.fetched, report.inserted, report.updated
    );

    // 3. Read back what was stored.
    println!("\n{:<6} | {:<14} | {:<8} | {:<8} | OI", "Id", "Settles", "Strike", "IV");
    println!("{:-<7}|{:-<16}|{:-<10}|{:-<10}|{:-<10}", "", "", "", "", "");
    for r in service.find_all_by_stock_listing(&symbol).await?.iter().take(10) {
        println!(
            "{:<6} | {:<14} | {:<8.2} | {:<8.4} | {} {}",
            r.id.map(|id| id.to_string()).unwrap_or_default(),
            r.settlement_date,
            r.strike_price,
            r.implied_volatility,
            r.open_interest,
            r.option_type,
        );
    }

    let first = service.find_by_stock_listing(&symbol).await?;
    println!("\nfirst stored contract: {first:?}");
    Ok(())
}
