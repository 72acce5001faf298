use async_trait::async_trait;

use crate::OpchainError;
use opchain_types::{OptionChainSnapshot, OptionId, OptionIdentity, OptionRecord};

/// Role trait for upstream providers that serve option chains.
#[async_trait]
pub trait OptionChainSource: Send + Sync {
    /// Stable connector name used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Fetch the current option chain for `symbol`.
    async fn option_chain(&self, symbol: &str) -> Result<OptionChainSnapshot, OpchainError>;
}

/// Role trait for persistence of option records.
///
/// Implementations assign an [`OptionId`] on first save and replace the stored
/// row when saving a record that already carries one.
#[async_trait]
pub trait OptionRepository: Send + Sync {
    /// Every stored record, ordered by id.
    async fn find_all(&self) -> Result<Vec<OptionRecord>, OpchainError>;

    /// The record stored under `id`, if any.
    async fn find_by_id(&self, id: OptionId) -> Result<Option<OptionRecord>, OpchainError>;

    /// Records for one underlying, ordered by id.
    async fn find_all_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Vec<OptionRecord>, OpchainError>;

    /// The first-stored (lowest id) record for one underlying.
    async fn find_first_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Option<OptionRecord>, OpchainError> {
        let rows = self.find_all_by_stock_listing(stock_listing).await?;
        Ok(rows.into_iter().min_by_key(|r| r.id))
    }

    /// The stored record matching the reconciliation identity, if any.
    async fn find_option(
        &self,
        identity: &OptionIdentity,
    ) -> Result<Option<OptionRecord>, OpchainError>;

    /// Insert or replace `record`, returning it as stored (with its id).
    async fn save(&self, record: OptionRecord) -> Result<OptionRecord, OpchainError>;
}
