use async_trait::async_trait;

use super::directory_model::{DirectoryDocument, DirectoryEntry, UserIdentity};
use crate::Result;

/// Trait defining the contract for directory store operations.
#[async_trait]
pub trait DirectoryRepositoryTrait: Send + Sync {
    /// One page of directory documents, at most `limit`, no required order.
    async fn list_entries(&self, limit: usize) -> Result<Vec<DirectoryDocument>>;

    /// Merge-upserts the signed-in user's public profile, refreshing its
    /// last-seen instant. Fields absent from the identity are left untouched.
    async fn upsert_profile(&self, identity: &UserIdentity) -> Result<()>;
}

/// Trait defining the contract for directory service operations.
#[async_trait]
pub trait DirectoryServiceTrait: Send + Sync {
    /// Snapshot of the validated directory cache.
    fn entries(&self) -> Vec<DirectoryEntry>;

    /// Replaces the cache with a fresh bounded page, skipping malformed
    /// documents.
    async fn refresh(&self) -> Result<Vec<DirectoryEntry>>;

    /// Upserts the signed-in user's profile into the directory.
    async fn register_profile(&self, identity: &UserIdentity) -> Result<()>;
}
