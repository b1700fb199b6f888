use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, warn};

use tipfolio_core::constants::PEER_SUPPORT_SCAN_LIMIT;
use tipfolio_core::errors::StoreError;
use tipfolio_core::records::{TipRecord, TipRecordRepositoryTrait, ValidatedTip};
use tipfolio_core::Result;

use super::model::TipRecordDocument;

/// In-memory tip record collection.
///
/// Documents are kept unsorted; every read sorts into the ordering the core
/// relies on, the way an indexed query would.
pub struct TipRecordRepository {
    records: Arc<RwLock<Vec<TipRecordDocument>>>,
    offline: Arc<AtomicBool>,
}

impl TipRecordRepository {
    pub fn new(records: Arc<RwLock<Vec<TipRecordDocument>>>, offline: Arc<AtomicBool>) -> Self {
        Self { records, offline }
    }

    fn guard_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()).into());
        }
        Ok(())
    }

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<TipRecordDocument>> {
        self.records.read().unwrap_or_else(|poisoned| {
            warn!("Tip record store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<TipRecordDocument>> {
        self.records.write().unwrap_or_else(|poisoned| {
            warn!("Tip record store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

fn sort_newest_first(docs: &mut [TipRecordDocument]) {
    docs.sort_by(|a, b| {
        b.occurred_on
            .cmp(&a.occurred_on)
            .then_with(|| b.recorded_at.cmp(&a.recorded_at))
    });
}

#[async_trait]
impl TipRecordRepositoryTrait for TipRecordRepository {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TipRecord>> {
        self.guard_online()?;

        let mut docs: Vec<TipRecordDocument> = self
            .read_records()
            .iter()
            .filter(|doc| doc.owner_id == owner_id)
            .cloned()
            .collect();
        sort_newest_first(&mut docs);

        Ok(docs.into_iter().map(TipRecord::from).collect())
    }

    async fn list_peer_support(&self, limit: usize) -> Result<Vec<TipRecord>> {
        self.guard_online()?;

        let mut docs: Vec<TipRecordDocument> = self
            .read_records()
            .iter()
            .filter(|doc| doc.method.is_peer_support())
            .cloned()
            .collect();
        sort_newest_first(&mut docs);
        docs.truncate(limit.min(PEER_SUPPORT_SCAN_LIMIT));

        Ok(docs.into_iter().map(TipRecord::from).collect())
    }

    async fn insert(&self, owner_id: &str, tip: ValidatedTip) -> Result<TipRecord> {
        self.guard_online()?;

        let id = uuid::Uuid::new_v4().to_string();
        let doc = TipRecordDocument::from_validated(id, owner_id, tip);
        debug!("Inserting tip record '{}' for owner '{}'", doc.id, owner_id);

        self.write_records().push(doc.clone());
        Ok(doc.into())
    }

    async fn update(&self, owner_id: &str, id: &str, tip: ValidatedTip) -> Result<TipRecord> {
        self.guard_online()?;

        let mut docs = self.write_records();
        let doc = docs
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Tip record '{}' not found", id)))?;
        if doc.owner_id != owner_id {
            return Err(StoreError::PermissionDenied(format!(
                "Tip record '{}' belongs to another owner",
                id
            ))
            .into());
        }

        doc.apply_replace(tip);
        Ok(doc.clone().into())
    }

    async fn delete(&self, owner_id: &str, id: &str) -> Result<()> {
        self.guard_online()?;

        let mut docs = self.write_records();
        let position = docs
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Tip record '{}' not found", id)))?;
        if docs[position].owner_id != owner_id {
            return Err(StoreError::PermissionDenied(format!(
                "Tip record '{}' belongs to another owner",
                id
            ))
            .into());
        }

        docs.remove(position);
        debug!("Deleted tip record '{}' for owner '{}'", id, owner_id);
        Ok(())
    }
}
