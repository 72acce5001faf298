use proptest::prelude::*;

use opchain::{ExpirationFilter, OptionRecord, OptionType};

use crate::helpers::{mock_service, record};

fn candidate() -> impl Strategy<Value = OptionRecord> {
    (
        prop::sample::select(vec!["AAPL", "MSFT", "TSLA"]),
        0i64..4,
        prop::sample::select(vec![100.0, 150.0, 152.5]),
        prop::bool::ANY,
        0.0f64..100_000.0,
    )
        .prop_map(|(symbol, day, strike, call, oi)| {
            let side = if call { OptionType::Call } else { OptionType::Put };
            record(symbol, 1_700_000_000_000 + day * 86_400_000, strike, side, oi)
        })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn one_row_per_identity(batch in prop::collection::vec(candidate(), 0..40)) {
        let rt = runtime();
        let (rows, identities) = rt.block_on(async {
            let svc = mock_service(ExpirationFilter::All);
            for c in &batch {
                svc.check_if_option_exists_and_update(c.clone()).await.unwrap();
            }
            let rows = svc.find_all().await.unwrap();
            let identities: std::collections::HashSet<_> =
                batch.iter().map(OptionRecord::identity).collect();
            (rows, identities)
        });
        prop_assert_eq!(rows.len(), identities.len());
    }

    #[test]
    fn reapplying_a_batch_is_idempotent(batch in prop::collection::vec(candidate(), 1..20)) {
        let rt = runtime();
        let (once, twice) = rt.block_on(async {
            let svc = mock_service(ExpirationFilter::All);
            for c in &batch {
                svc.check_if_option_exists_and_update(c.clone()).await.unwrap();
            }
            let once = svc.find_all().await.unwrap();
            for c in &batch {
                svc.check_if_option_exists_and_update(c.clone()).await.unwrap();
            }
            (once, svc.find_all().await.unwrap())
        });
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn missing_ids_are_not_found(extra in 1u64..10_000) {
        let rt = runtime();
        let err = rt.block_on(async {
            let svc = mock_service(ExpirationFilter::All);
            svc.ingest("AAPL").await.unwrap();
            svc.find_by_id(opchain::OptionId(4 + extra)).await.unwrap_err()
        });
        prop_assert!(err.is_not_found());
    }
}
