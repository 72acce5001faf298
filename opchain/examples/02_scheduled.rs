mod common;
use std::sync::Arc;
use std::time::Duration;

use opchain::{IngestionScheduler, OptionService, ScheduleConfig, ScheduledRun};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let service = Arc::new(
        OptionService::builder()
            .with_source(common::get_source())
            .build()?,
    );

    let scheduler = IngestionScheduler::new(ScheduleConfig {
        symbols: vec!["AAPL".into(), "MSFT".into()],
        interval: Duration::from_secs(5),
        jitter_percent: 10,
        persist: true,
    })?;

    println!("Starting scheduler... (running for ~12s)");
    let handle = scheduler.start(Arc::clone(&service));
    let mut rx = handle.subscribe();

    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            for run in rx.borrow_and_update().iter() {
                match run {
                    ScheduledRun::Persisted(r) => println!(
                        "{}: +{} inserted, {} updated",
                        r.symbol, r.inserted, r.updated
                    ),
                    ScheduledRun::Loaded { symbol, count } => println!("{symbol}: {count} loaded"),
                    ScheduledRun::Failed { symbol, error } => eprintln!("{symbol}: {error}"),
                }
            }
        }
    });

    tokio::time::sleep(Duration::from_secs(12)).await;
    let passes = handle.passes();
    handle.stop().await;
    watcher.abort();

    println!(
        "\n{passes} passes; {} contracts stored",
        service.find_all().await?.len()
    );
    Ok(())
}
