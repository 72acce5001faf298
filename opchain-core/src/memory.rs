use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::OpchainError;
use crate::connector::OptionRepository;
use opchain_types::{OptionId, OptionIdentity, OptionRecord};

#[derive(Default)]
struct Tables {
    next_id: u64,
    rows: BTreeMap<OptionId, OptionRecord>,
    // First id stored under each identity.
    by_identity: HashMap<OptionIdentity, OptionId>,
}

impl Tables {
    fn allocate(&mut self) -> Result<OptionId, OpchainError> {
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| OpchainError::Storage("option id space exhausted".to_string()))?;
        Ok(OptionId(self.next_id))
    }

    fn unindex(&mut self, id: OptionId, identity: &OptionIdentity) {
        if self.by_identity.get(identity) == Some(&id) {
            self.by_identity.remove(identity);
            // Re-point at the next-oldest row with the same identity, if one exists.
            if let Some((&other, _)) = self
                .rows
                .iter()
                .find(|(other, r)| **other != id && r.identity() == *identity)
            {
                self.by_identity.insert(identity.clone(), other);
            }
        }
    }
}

/// In-process repository backed by ordered maps.
///
/// Ids are assigned sequentially from 1. Like a table without a unique
/// constraint, raw saves may store several rows with one identity;
/// `find_option` returns the oldest.
#[derive(Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.tables.read().await.rows.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.rows.is_empty()
    }
}

#[async_trait]
impl OptionRepository for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<OptionRecord>, OpchainError> {
        Ok(self.tables.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: OptionId) -> Result<Option<OptionRecord>, OpchainError> {
        Ok(self.tables.read().await.rows.get(&id).cloned())
    }

    async fn find_all_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Vec<OptionRecord>, OpchainError> {
        let t = self.tables.read().await;
        Ok(t.rows
            .values()
            .filter(|r| r.stock_listing == stock_listing)
            .cloned()
            .collect())
    }

    async fn find_first_by_stock_listing(
        &self,
        stock_listing: &str,
    ) -> Result<Option<OptionRecord>, OpchainError> {
        let t = self.tables.read().await;
        Ok(t.rows
            .values()
            .find(|r| r.stock_listing == stock_listing)
            .cloned())
    }

    async fn find_option(
        &self,
        identity: &OptionIdentity,
    ) -> Result<Option<OptionRecord>, OpchainError> {
        let t = self.tables.read().await;
        Ok(t.by_identity
            .get(identity)
            .and_then(|id| t.rows.get(id))
            .cloned())
    }

    async fn save(&self, mut record: OptionRecord) -> Result<OptionRecord, OpchainError> {
        let mut guard = self.tables.write().await;
        let t = &mut *guard;
        let id = match record.id {
            Some(id) => {
                if let Some(previous) = t.rows.get(&id).map(OptionRecord::identity) {
                    t.unindex(id, &previous);
                }
                t.next_id = t.next_id.max(id.0);
                id
            }
            None => t.allocate()?,
        };
        record.id = Some(id);
        t.rows.insert(id, record.clone());
        let identity = record.identity();
        let older_exists = t
            .by_identity
            .get(&identity)
            .is_some_and(|existing| *existing < id);
        if !older_exists {
            t.by_identity.insert(identity, id);
        }
        Ok(record)
    }
}
