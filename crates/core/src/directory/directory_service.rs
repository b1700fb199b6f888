//! Directory service: bounded refresh, malformed-entry tolerance, profile upsert.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, error, warn};

use super::directory_model::{DirectoryEntry, UserIdentity};
use super::directory_traits::{DirectoryRepositoryTrait, DirectoryServiceTrait};
use crate::constants::DIRECTORY_PAGE_LIMIT;
use crate::events::{DomainEvent, DomainEventSink};
use crate::Result;

/// Caching read-through over the public identity directory.
///
/// The directory is refreshed one bounded page at a time; the core tolerates
/// an incomplete directory, so a peer missing from the cache simply resolves
/// as an ad-hoc name.
pub struct DirectoryService {
    repository: Arc<dyn DirectoryRepositoryTrait>,
    /// Validated entries from the last successful refresh.
    cache: RwLock<Vec<DirectoryEntry>>,
    events: Arc<dyn DomainEventSink>,
}

impl DirectoryService {
    pub fn new(
        repository: Arc<dyn DirectoryRepositoryTrait>,
        events: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            cache: RwLock::new(Vec::new()),
            events,
        }
    }

    /// Lock the cache for reading, recovering from poison if necessary.
    fn read_cache(&self) -> RwLockReadGuard<'_, Vec<DirectoryEntry>> {
        self.cache.read().unwrap_or_else(|poisoned| {
            warn!("Directory cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, Vec<DirectoryEntry>> {
        self.cache.write().unwrap_or_else(|poisoned| {
            warn!("Directory cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Empties the cache on sign-out.
    pub(crate) fn clear_cache(&self) {
        self.write_cache().clear();
    }
}

#[async_trait]
impl DirectoryServiceTrait for DirectoryService {
    fn entries(&self) -> Vec<DirectoryEntry> {
        self.read_cache().clone()
    }

    async fn refresh(&self) -> Result<Vec<DirectoryEntry>> {
        match self.repository.list_entries(DIRECTORY_PAGE_LIMIT).await {
            Ok(documents) => {
                let mut entries = Vec::with_capacity(documents.len());
                for doc in documents {
                    let id = doc.id.clone();
                    match DirectoryEntry::from_document(doc) {
                        Some(entry) => entries.push(entry),
                        None => warn!("Skipping directory entry '{}' with no display name", id),
                    }
                }
                debug!("Directory refreshed with {} entries", entries.len());
                *self.write_cache() = entries.clone();
                self.events.emit(DomainEvent::directory_refreshed(entries.len()));
                Ok(entries)
            }
            Err(err) => {
                // Degrade to an empty cache; the caller surfaces the error.
                error!("Directory refresh failed: {}", err);
                self.write_cache().clear();
                Err(err)
            }
        }
    }

    async fn register_profile(&self, identity: &UserIdentity) -> Result<()> {
        debug!("Registering profile '{}' in directory", identity.id);
        self.repository.upsert_profile(identity).await
    }
}
