use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::warn;

use tipfolio_core::directory::DirectoryDocument;

use crate::directory::DirectoryRepository;
use crate::records::{TipRecordDocument, TipRecordRepository};

/// Shared in-memory backing store.
///
/// Clones are shallow: every clone and every repository handed out by the
/// factory methods observes the same collections and the same connectivity
/// switch.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<TipRecordDocument>>>,
    directory: Arc<RwLock<Vec<DirectoryDocument>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository over the shared tip record collection.
    pub fn tip_record_repository(&self) -> TipRecordRepository {
        TipRecordRepository::new(self.records.clone(), self.offline.clone())
    }

    /// Repository over the shared directory page.
    pub fn directory_repository(&self) -> DirectoryRepository {
        DirectoryRepository::new(self.directory.clone(), self.offline.clone())
    }

    /// Flips the connectivity switch. While offline every repository call
    /// fails with an unavailable-store error; flipping back restores the
    /// data untouched.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Inserts a record document directly, bypassing repository checks.
    /// Fixture seeding only.
    pub fn seed_record(&self, doc: TipRecordDocument) {
        self.records
            .write()
            .unwrap_or_else(|poisoned| {
                warn!("Tip record store lock poisoned, recovering");
                poisoned.into_inner()
            })
            .push(doc);
    }

    /// Inserts a directory document directly, bypassing the upsert merge.
    /// Fixture seeding only.
    pub fn seed_directory(&self, doc: DirectoryDocument) {
        self.directory
            .write()
            .unwrap_or_else(|poisoned| {
                warn!("Directory store lock poisoned, recovering");
                poisoned.into_inner()
            })
            .push(doc);
    }

    /// Unordered snapshot of the stored record documents.
    pub fn record_documents(&self) -> Vec<TipRecordDocument> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| {
                warn!("Tip record store lock poisoned, recovering");
                poisoned.into_inner()
            })
            .clone()
    }

    /// Unordered snapshot of the stored directory documents.
    pub fn directory_documents(&self) -> Vec<DirectoryDocument> {
        self.directory
            .read()
            .unwrap_or_else(|poisoned| {
                warn!("Directory store lock poisoned, recovering");
                poisoned.into_inner()
            })
            .clone()
    }
}
