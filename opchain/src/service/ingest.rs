use opchain_core::chain_to_transfers;
use opchain_types::{IngestReport, OpchainError, OptionRecord};

use crate::OptionService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reconciled {
    Inserted,
    Updated,
}

impl OptionService {
    /// Load the current option chain for `symbol` as records.
    ///
    /// Any failure (transport, status, malformed payload, missing field, empty
    /// symbol) degrades to an empty list; the cause is only logged. Use
    /// [`try_load_options`](Self::try_load_options) to observe it. Nothing is
    /// written to the repository.
    pub async fn load_options(&self, symbol: &str) -> Vec<OptionRecord> {
        match self.try_load_options(symbol).await {
            Ok(records) => records,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "opchain::ingest",
                    symbol,
                    source = self.source.name(),
                    error = %_e,
                    "option load failed; returning no options"
                );
                Vec::new()
            }
        }
    }

    /// Load the current option chain for `symbol`, surfacing failures.
    ///
    /// Contracts are kept or skipped per the configured expiration filter,
    /// evaluated against midnight UTC of the current day.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty symbol and otherwise whatever the
    /// chain source reports.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "opchain::ingest",
            skip(self),
            fields(source = self.source.name(), filter = ?self.cfg.expiration_filter),
        )
    )]
    pub async fn try_load_options(&self, symbol: &str) -> Result<Vec<OptionRecord>, OpchainError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(OpchainError::InvalidArg("empty stock listing".to_string()));
        }
        let snapshot = self.source.option_chain(symbol).await?;
        let today = self.clock.start_of_today_ms();
        let records: Vec<OptionRecord> =
            chain_to_transfers(&snapshot, self.cfg.expiration_filter, today)
                .into_iter()
                .map(OptionRecord::from)
                .collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "opchain::ingest",
            contracts = snapshot.contract_count(),
            kept = records.len(),
            "option chain loaded"
        );
        Ok(records)
    }

    /// Merge `candidate` into storage by identity.
    ///
    /// If a record with the same listing, settlement date, strike and side
    /// exists, its open interest and implied volatility are overwritten and it
    /// is saved; otherwise the candidate is inserted under a fresh id. Returns
    /// the stored record.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn check_if_option_exists_and_update(
        &self,
        candidate: OptionRecord,
    ) -> Result<OptionRecord, OpchainError> {
        let _guard = self.reconcile_lock.lock().await;
        let (stored, _) = self.reconcile_locked(candidate).await?;
        Ok(stored)
    }

    /// Load `symbol` and reconcile every record into storage.
    ///
    /// # Errors
    /// Returns the load failure, or the first repository failure (records
    /// reconciled before it stay stored).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "opchain::ingest", skip(self))
    )]
    pub async fn ingest(&self, symbol: &str) -> Result<IngestReport, OpchainError> {
        let records = self.try_load_options(symbol).await?;
        let mut report = IngestReport {
            symbol: symbol.trim().to_string(),
            fetched: records.len(),
            ..IngestReport::default()
        };
        let _guard = self.reconcile_lock.lock().await;
        for record in records {
            match self.reconcile_locked(record).await?.1 {
                Reconciled::Inserted => report.inserted += 1,
                Reconciled::Updated => report.updated += 1,
            }
        }
        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "opchain::ingest",
            fetched = report.fetched,
            inserted = report.inserted,
            updated = report.updated,
            "ingestion complete"
        );
        Ok(report)
    }

    // Caller must hold `reconcile_lock`.
    async fn reconcile_locked(
        &self,
        candidate: OptionRecord,
    ) -> Result<(OptionRecord, Reconciled), OpchainError> {
        match self.repository.find_option(&candidate.identity()).await? {
            Some(mut existing) => {
                existing.merge_market_data(&candidate);
                let stored = self.repository.save(existing).await?;
                Ok((stored, Reconciled::Updated))
            }
            None => {
                let fresh = OptionRecord {
                    id: None,
                    ..candidate
                };
                let stored = self.repository.save(fresh).await?;
                Ok((stored, Reconciled::Inserted))
            }
        }
    }
}
