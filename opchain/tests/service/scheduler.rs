use std::sync::Arc;
use std::time::Duration;

use opchain::{
    ExpirationFilter, IngestionScheduler, OpchainError, ScheduleConfig, ScheduledRun,
};
use opchain_mock::dynamic::{DynamicMockSource, MockBehavior};

use crate::helpers::{AAPL, MSFT, chain_by_symbol, mock_service, service_with};

fn schedule(symbols: &[&str], persist: bool) -> ScheduleConfig {
    ScheduleConfig {
        symbols: symbols.iter().map(|s| (*s).to_string()).collect(),
        interval: Duration::from_secs(60),
        jitter_percent: 0,
        persist,
    }
}

#[test]
fn rejects_unusable_schedules() {
    let blank = IngestionScheduler::new(schedule(&["", "  "], true)).unwrap_err();
    assert!(matches!(blank, OpchainError::InvalidArg(_)));

    let mut zero = schedule(&[AAPL], true);
    zero.interval = Duration::ZERO;
    assert!(IngestionScheduler::new(zero).is_err());

    let mut wild = schedule(&[AAPL], true);
    wild.jitter_percent = 101;
    assert!(IngestionScheduler::new(wild).is_err());
}

#[test]
fn trims_symbols() {
    let s = IngestionScheduler::new(schedule(&[" AAPL ", "", "MSFT"], true)).unwrap();
    assert_eq!(s.config().symbols, vec![AAPL.to_string(), MSFT.to_string()]);
}

#[tokio::test]
async fn persisting_pass_reports_per_symbol() {
    let svc = mock_service(ExpirationFilter::All);
    let sched = IngestionScheduler::new(schedule(&[AAPL, "FAIL", MSFT], true)).unwrap();

    let runs = sched.run_once(&svc).await;
    assert_eq!(runs.len(), 3);
    assert!(matches!(&runs[0], ScheduledRun::Persisted(r) if r.inserted == 4));
    assert!(matches!(&runs[1], ScheduledRun::Failed { symbol, .. } if symbol == "FAIL"));
    assert_eq!(runs[2].symbol(), MSFT);
    assert_eq!(svc.find_all().await.unwrap().len(), 8);
}

#[tokio::test]
async fn discarding_pass_leaves_storage_empty() {
    let svc = mock_service(ExpirationFilter::All);
    let sched = IngestionScheduler::new(schedule(&[AAPL], false)).unwrap();

    let runs = sched.run_once(&svc).await;
    assert_eq!(
        runs,
        vec![ScheduledRun::Loaded {
            symbol: AAPL.to_string(),
            count: 4,
        }]
    );
    assert!(svc.find_all().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn runs_immediately_then_on_interval() {
    let svc = Arc::new(mock_service(ExpirationFilter::All));
    let handle = IngestionScheduler::new(schedule(&[AAPL], true))
        .unwrap()
        .start(Arc::clone(&svc));
    let mut rx = handle.subscribe();

    rx.changed().await.unwrap();
    assert_eq!(handle.passes(), 1);
    assert!(matches!(&handle.last_runs()[0], ScheduledRun::Persisted(r) if r.inserted == 4));

    rx.changed().await.unwrap();
    assert_eq!(handle.passes(), 2);
    assert!(matches!(&handle.last_runs()[0], ScheduledRun::Persisted(r) if r.updated == 4));

    handle.stop().await;
    assert_eq!(svc.find_all().await.unwrap().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn stop_interrupts_a_stalled_pass() {
    let (source, controller) = DynamicMockSource::new_with_controller();
    controller.set_chain_behavior(AAPL, MockBehavior::Hang).await;
    let svc = Arc::new(service_with(source, ExpirationFilter::All));

    let handle = IngestionScheduler::new(schedule(&[AAPL], true))
        .unwrap()
        .start(svc);
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert_eq!(handle.passes(), 0);
    assert!(handle.last_runs().is_empty());

    tokio::time::timeout(Duration::from_secs(1), handle.stop())
        .await
        .expect("scheduler stops while a pass hangs");
    assert_eq!(controller.calls(AAPL).await, 1);
}

#[tokio::test(start_paused = true)]
async fn recovers_after_a_failed_pass() {
    let (source, controller) = DynamicMockSource::new_with_controller();
    let svc = Arc::new(service_with(source, ExpirationFilter::All));
    let handle = IngestionScheduler::new(schedule(&[AAPL], true))
        .unwrap()
        .start(Arc::clone(&svc));
    let mut rx = handle.subscribe();

    // Unscripted symbols are reported as not found.
    rx.changed().await.unwrap();
    assert!(matches!(&handle.last_runs()[0], ScheduledRun::Failed { error, .. } if error.is_not_found()));

    controller
        .set_chain_behavior(AAPL, MockBehavior::Return(chain_by_symbol(AAPL)))
        .await;
    rx.changed().await.unwrap();
    assert!(matches!(&handle.last_runs()[0], ScheduledRun::Persisted(_)));
    drop(handle);
    assert_eq!(svc.find_all().await.unwrap().len(), 4);
}
