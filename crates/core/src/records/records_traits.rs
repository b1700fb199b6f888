use async_trait::async_trait;

use super::records_model::{NewTipRecord, TipRecord, ValidatedTip};
use crate::errors::Result;

/// Trait for tip record storage backends.
///
/// Backends own identifier assignment and physical ordering; the core relies
/// on the documented ordering contract and never re-sorts full reads.
#[async_trait]
pub trait TipRecordRepositoryTrait: Send + Sync {
    /// Lists every record owned by `owner_id`, ordered by `occurred_on`
    /// descending (ties broken by `recorded_at` descending).
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<TipRecord>>;

    /// Lists the most recent peer-support records across all owners, ordered
    /// by `occurred_on` descending, at most `limit` documents.
    async fn list_peer_support(&self, limit: usize) -> Result<Vec<TipRecord>>;

    /// Persists a validated tip for `owner_id`. The store assigns the record
    /// id and `recorded_at`.
    async fn insert(&self, owner_id: &str, tip: ValidatedTip) -> Result<TipRecord>;

    /// Replaces the whole record `id` with the validated fields. Fails when
    /// the record does not exist or belongs to another owner.
    async fn update(&self, owner_id: &str, id: &str, tip: ValidatedTip) -> Result<TipRecord>;

    /// Deletes record `id`. Irreversible; fails when the record does not
    /// exist or belongs to another owner.
    async fn delete(&self, owner_id: &str, id: &str) -> Result<()>;
}

/// Trait for the tip record service consumed by embedding hosts.
#[async_trait]
pub trait TipRecordServiceTrait: Send + Sync {
    /// Returns the cached records, newest first. Never touches the store.
    fn records(&self) -> Vec<TipRecord>;

    /// Replaces the cache with a fresh authoritative read and returns the
    /// record count. A failed read leaves the cache empty and propagates the
    /// store error as the retry indicator.
    async fn reload(&self) -> Result<usize>;

    /// Validates and persists a new record, then reloads the cache.
    async fn create_record(&self, draft: NewTipRecord) -> Result<TipRecord>;

    /// Re-validates `draft` and replaces record `id` with it, then reloads
    /// the cache. Edits pass the same checks as creation.
    async fn update_record(&self, id: &str, draft: NewTipRecord) -> Result<TipRecord>;

    /// Deletes record `id`, then reloads the cache.
    async fn delete_record(&self, id: &str) -> Result<()>;
}
