use log::{debug, error, warn};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Mutex as AsyncMutex;

use super::records_model::{NewTipRecord, TipRecord};
use super::records_rules::TipRuleEngine;
use super::records_traits::{TipRecordRepositoryTrait, TipRecordServiceTrait};
use crate::directory::DirectoryServiceTrait;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::settings::TipPolicy;
use crate::utils::time_utils;

/// Service owning the signed-in user's tip records.
///
/// Holds the local cache that the dashboard reads synchronously. The cache
/// is replaced only by a completed authoritative read; every write is
/// followed by such a read, serialized behind the write gate so a stale
/// read can never land on top of a newer write.
pub struct TipRecordService {
    owner_id: String,
    repository: Arc<dyn TipRecordRepositoryTrait>,
    directory: Arc<dyn DirectoryServiceTrait>,
    rules: TipRuleEngine,
    cache: RwLock<Vec<TipRecord>>,
    write_gate: AsyncMutex<()>,
    events: Arc<dyn DomainEventSink>,
}

impl TipRecordService {
    /// Creates a new TipRecordService instance for one owner.
    pub fn new(
        owner_id: String,
        repository: Arc<dyn TipRecordRepositoryTrait>,
        directory: Arc<dyn DirectoryServiceTrait>,
        policy: TipPolicy,
        events: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            owner_id,
            repository,
            directory,
            rules: TipRuleEngine::new(policy),
            cache: RwLock::new(Vec::new()),
            write_gate: AsyncMutex::new(()),
            events,
        }
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, Vec<TipRecord>> {
        self.cache.read().unwrap_or_else(|poisoned| {
            warn!("Tip record cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, Vec<TipRecord>> {
        self.cache.write().unwrap_or_else(|poisoned| {
            warn!("Tip record cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Empties the cache on sign-out.
    pub(crate) fn clear_cache(&self) {
        self.write_cache().clear();
    }

    /// Replaces the cache from an authoritative read. On failure the cache
    /// is left empty and the store error is returned; callers decide whether
    /// it propagates.
    async fn refresh_cache(&self) -> Result<usize> {
        match self.repository.list_by_owner(&self.owner_id).await {
            Ok(records) => {
                let count = records.len();
                *self.write_cache() = records;
                self.events
                    .emit(DomainEvent::records_reloaded(&self.owner_id, count));
                debug!("Reloaded {} tip records for owner {}", count, self.owner_id);
                Ok(count)
            }
            Err(e) => {
                error!(
                    "Failed to reload tip records for owner {}: {}",
                    self.owner_id, e
                );
                self.write_cache().clear();
                Err(e)
            }
        }
    }
}

#[async_trait::async_trait]
impl TipRecordServiceTrait for TipRecordService {
    /// Returns the cached records, newest first.
    fn records(&self) -> Vec<TipRecord> {
        self.read_cache().clone()
    }

    /// Replaces the cache with a fresh authoritative read.
    async fn reload(&self) -> Result<usize> {
        let _gate = self.write_gate.lock().await;
        self.refresh_cache().await
    }

    /// Validates and persists a new record, then reloads the cache.
    async fn create_record(&self, draft: NewTipRecord) -> Result<TipRecord> {
        let validated =
            self.rules
                .validate(&draft, time_utils::today(), &self.directory.entries())?;

        let _gate = self.write_gate.lock().await;
        let record = self.repository.insert(&self.owner_id, validated).await?;
        debug!(
            "Created tip record {} for owner {}",
            record.id, self.owner_id
        );
        // The write completed; a failed refresh leaves the cache empty until
        // the next reload surfaces the error.
        let _ = self.refresh_cache().await;
        Ok(record)
    }

    /// Re-validates the draft and replaces an existing record with it.
    async fn update_record(&self, id: &str, draft: NewTipRecord) -> Result<TipRecord> {
        let validated =
            self.rules
                .validate(&draft, time_utils::today(), &self.directory.entries())?;

        let _gate = self.write_gate.lock().await;
        let record = self.repository.update(&self.owner_id, id, validated).await?;
        debug!(
            "Updated tip record {} for owner {}",
            record.id, self.owner_id
        );
        let _ = self.refresh_cache().await;
        Ok(record)
    }

    /// Deletes a record, then reloads the cache.
    async fn delete_record(&self, id: &str) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.repository.delete(&self.owner_id, id).await?;
        debug!("Deleted tip record {} for owner {}", id, self.owner_id);
        let _ = self.refresh_cache().await;
        Ok(())
    }
}
