use crate::OptionService;
use opchain_types::{OpchainError, OptionId, OptionRecord};

impl OptionService {
    /// Every stored option record, ordered by id.
    ///
    /// # Errors
    /// Propagates repository failures.
    pub async fn find_all(&self) -> Result<Vec<OptionRecord>, OpchainError> {
        self.repository.find_all().await
    }

    /// All records for one underlying.
    ///
    /// Served from the listing cache when one is configured; entries expire after
    /// the configured TTL and are dropped whenever the symbol is reconciled.
    ///
    /// # Errors
    /// Propagates repository failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "opchain::query", skip(self))
    )]
    pub async fn find_all_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Vec<OptionRecord>, OpchainError> {
        self.repository.find_all_by_stock_listing(stock_listing).await
    }

    /// The record stored under `id`.
    ///
    /// # Errors
    /// Returns `NotFound` when no record has that id.
    pub async fn find_by_id(&self, id: OptionId) -> Result<OptionRecord, OpchainError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OpchainError::not_found(format!("option with id: {id}")))
    }

    /// A single record for one underlying: the first stored (lowest id).
    ///
    /// # Errors
    /// Returns `NotFound` when nothing is stored for the symbol.
    pub async fn find_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<OptionRecord, OpchainError> {
        self.repository
            .find_first_by_stock_listing(stock_listing)
            .await?
            .ok_or_else(|| {
                OpchainError::not_found(format!("option for stock listing: {stock_listing}"))
            })
    }
}
