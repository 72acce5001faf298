use std::sync::Arc;

use opchain::{
    ExpirationFilter, MemoryRepository, OptionId, OptionRepository, OptionType,
};

use crate::helpers::{AAPL, MSFT, NEAR, mock_service, record, service_over};

#[tokio::test]
async fn find_all_on_empty_store_is_empty() {
    let svc = mock_service(ExpirationFilter::All);
    assert!(svc.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn find_all_returns_exactly_what_was_stored() {
    let repo = Arc::new(MemoryRepository::new());
    let a = repo.save(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0)).await.unwrap();
    let b = repo.save(record(MSFT, NEAR, 300.0, OptionType::Put, 20.0)).await.unwrap();
    let svc = service_over(repo);

    assert_eq!(svc.find_all().await.unwrap(), vec![a, b]);
}

#[tokio::test]
async fn find_by_id_hits_and_misses() {
    let repo = Arc::new(MemoryRepository::new());
    let stored = repo.save(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0)).await.unwrap();
    let id = stored.id.unwrap();
    let svc = service_over(repo);

    assert_eq!(svc.find_by_id(id).await.unwrap(), stored);

    let err = svc.find_by_id(OptionId(id.0 + 1)).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains(&format!("option with id: {}", id.0 + 1)));
}

#[tokio::test]
async fn find_by_stock_listing_picks_first_inserted() {
    let repo = Arc::new(MemoryRepository::new());
    let first = repo.save(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0)).await.unwrap();
    repo.save(record(AAPL, NEAR, 150.0, OptionType::Put, 11.0)).await.unwrap();
    repo.save(record(MSFT, NEAR, 300.0, OptionType::Call, 12.0)).await.unwrap();
    let svc = service_over(repo);

    assert_eq!(svc.find_by_stock_listing(AAPL).await.unwrap(), first);

    let err = svc.find_by_stock_listing("TSLA").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn listing_query_filters_by_symbol() {
    let repo = Arc::new(MemoryRepository::new());
    repo.save(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0)).await.unwrap();
    repo.save(record(MSFT, NEAR, 300.0, OptionType::Call, 12.0)).await.unwrap();
    repo.save(record(AAPL, NEAR, 155.0, OptionType::Put, 13.0)).await.unwrap();
    let svc = service_over(repo);

    let aapl = svc.find_all_by_stock_listing(AAPL).await.unwrap();
    assert_eq!(aapl.len(), 2);
    assert!(aapl.iter().all(|r| r.stock_listing == AAPL));
    assert!(svc.find_all_by_stock_listing("TSLA").await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_cache_sees_reconciled_writes() {
    let svc = mock_service(ExpirationFilter::All);
    assert!(svc.find_all_by_stock_listing(AAPL).await.unwrap().is_empty());

    svc.check_if_option_exists_and_update(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0))
        .await
        .unwrap();
    assert_eq!(svc.find_all_by_stock_listing(AAPL).await.unwrap().len(), 1);
}

#[tokio::test]
async fn direct_repository_writes_are_hidden_by_a_warm_cache() {
    let repo = Arc::new(MemoryRepository::new());
    let svc = service_over(Arc::clone(&repo));
    assert!(svc.find_all_by_stock_listing(AAPL).await.unwrap().is_empty());

    // Bypasses the caching layer, so the cached listing stays until its TTL.
    repo.save(record(AAPL, NEAR, 150.0, OptionType::Call, 10.0)).await.unwrap();
    assert!(svc.find_all_by_stock_listing(AAPL).await.unwrap().is_empty());
    assert_eq!(svc.find_all().await.unwrap().len(), 1);
}
