use std::sync::Arc;

use opchain::{ExpirationFilter, MemoryRepository, OptionType};

use crate::helpers::{AAPL, approx, mock_service, record, service_over};

const SETTLE: i64 = 1_700_000_000_000;

#[tokio::test]
async fn unseen_identity_is_inserted() {
    let svc = mock_service(ExpirationFilter::All);
    let stored = svc
        .check_if_option_exists_and_update(record(AAPL, SETTLE, 150.0, OptionType::Call, 100.0))
        .await
        .unwrap();
    assert!(stored.id.is_some());
    assert_eq!(svc.find_all().await.unwrap(), vec![stored]);
}

#[tokio::test]
async fn known_identity_is_updated_in_place() {
    let svc = mock_service(ExpirationFilter::All);
    let first = svc
        .check_if_option_exists_and_update(record(AAPL, SETTLE, 150.0, OptionType::Call, 100.0))
        .await
        .unwrap();

    let mut refresh = record(AAPL, SETTLE, 150.0, OptionType::Call, 500.0);
    refresh.implied_volatility = 0.41;
    let second = svc.check_if_option_exists_and_update(refresh).await.unwrap();

    assert_eq!(second.id, first.id);
    assert!(approx(second.open_interest, 500.0));
    assert!(approx(second.implied_volatility, 0.41));

    let all = svc.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(approx(all[0].open_interest, 500.0));
}

#[tokio::test]
async fn differing_side_or_strike_is_a_new_identity() {
    let svc = mock_service(ExpirationFilter::All);
    for (strike, side) in [
        (150.0, OptionType::Call),
        (150.0, OptionType::Put),
        (155.0, OptionType::Call),
    ] {
        svc.check_if_option_exists_and_update(record(AAPL, SETTLE, strike, side, 1.0))
            .await
            .unwrap();
    }
    svc.check_if_option_exists_and_update(record(AAPL, SETTLE + 1, 150.0, OptionType::Call, 1.0))
        .await
        .unwrap();
    assert_eq!(svc.find_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn candidate_id_is_ignored_on_insert() {
    let repo = Arc::new(MemoryRepository::new());
    let svc = service_over(Arc::clone(&repo));
    let mut candidate = record(AAPL, SETTLE, 150.0, OptionType::Call, 1.0);
    candidate.id = Some(opchain::OptionId(42));

    let stored = svc.check_if_option_exists_and_update(candidate).await.unwrap();
    assert_eq!(stored.id, Some(opchain::OptionId(1)));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reconciles_of_one_identity_store_one_row() {
    let svc = Arc::new(mock_service(ExpirationFilter::All));
    let mut tasks = Vec::new();
    for oi in 0..16 {
        let svc = Arc::clone(&svc);
        tasks.push(tokio::spawn(async move {
            svc.check_if_option_exists_and_update(record(
                AAPL,
                SETTLE,
                150.0,
                OptionType::Call,
                f64::from(oi),
            ))
            .await
        }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }
    assert_eq!(svc.find_all().await.unwrap().len(), 1);
}
