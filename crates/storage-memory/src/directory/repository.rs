use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};

use tipfolio_core::constants::DIRECTORY_PAGE_LIMIT;
use tipfolio_core::directory::{DirectoryDocument, DirectoryRepositoryTrait, UserIdentity};
use tipfolio_core::errors::StoreError;
use tipfolio_core::Result;

/// In-memory public directory page.
///
/// Stores the raw document shape the core expects from a page read. The
/// documents carry only public profile fields; nothing from the identity
/// beyond name and photo ever lands here.
pub struct DirectoryRepository {
    directory: Arc<RwLock<Vec<DirectoryDocument>>>,
    offline: Arc<AtomicBool>,
}

impl DirectoryRepository {
    pub fn new(directory: Arc<RwLock<Vec<DirectoryDocument>>>, offline: Arc<AtomicBool>) -> Self {
        Self { directory, offline }
    }

    fn guard_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()).into());
        }
        Ok(())
    }

    fn read_directory(&self) -> RwLockReadGuard<'_, Vec<DirectoryDocument>> {
        self.directory.read().unwrap_or_else(|poisoned| {
            warn!("Directory store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_directory(&self) -> RwLockWriteGuard<'_, Vec<DirectoryDocument>> {
        self.directory.write().unwrap_or_else(|poisoned| {
            warn!("Directory store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl DirectoryRepositoryTrait for DirectoryRepository {
    async fn list_entries(&self, limit: usize) -> Result<Vec<DirectoryDocument>> {
        self.guard_online()?;

        let page: Vec<DirectoryDocument> = self
            .read_directory()
            .iter()
            .take(limit.min(DIRECTORY_PAGE_LIMIT))
            .cloned()
            .collect();
        Ok(page)
    }

    async fn upsert_profile(&self, identity: &UserIdentity) -> Result<()> {
        self.guard_online()?;

        let mut docs = self.write_directory();
        let now = Utc::now();
        match docs.iter_mut().find(|doc| doc.id == identity.id) {
            Some(doc) => {
                doc.display_name = Some(identity.display_name.clone());
                // Merge semantics: a missing photo keeps whatever was stored.
                if identity.photo_url.is_some() {
                    doc.photo_url = identity.photo_url.clone();
                }
                doc.last_seen_at = Some(now);
            }
            None => {
                debug!("Adding directory profile '{}'", identity.id);
                docs.push(DirectoryDocument {
                    id: identity.id.clone(),
                    display_name: Some(identity.display_name.clone()),
                    photo_url: identity.photo_url.clone(),
                    last_seen_at: Some(now),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipfolio_core::errors::Error;

    fn identity(id: &str, name: &str, photo: Option<&str>) -> UserIdentity {
        UserIdentity {
            id: id.to_string(),
            display_name: name.to_string(),
            photo_url: photo.map(str::to_string),
            email: Some("private@example.test".to_string()),
        }
    }

    fn repository() -> (DirectoryRepository, Arc<RwLock<Vec<DirectoryDocument>>>) {
        let docs = Arc::new(RwLock::new(Vec::new()));
        let repo = DirectoryRepository::new(docs.clone(), Arc::new(AtomicBool::new(false)));
        (repo, docs)
    }

    #[tokio::test]
    async fn test_first_upsert_adds_public_profile() {
        let (repo, _) = repository();
        repo.upsert_profile(&identity("u-1", "Ana García", Some("https://example.test/a.png")))
            .await
            .unwrap();

        let page = repo.list_entries(DIRECTORY_PAGE_LIMIT).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].display_name.as_deref(), Some("Ana García"));
        assert_eq!(page[0].photo_url.as_deref(), Some("https://example.test/a.png"));
        assert!(page[0].last_seen_at.is_some());
        // The email from the identity is private and has no document field.
        assert!(!serde_json::to_string(&page[0]).unwrap().contains("private@"));
    }

    #[tokio::test]
    async fn test_repeat_upsert_merges_and_refreshes_last_seen() {
        let (repo, _) = repository();
        repo.upsert_profile(&identity("u-1", "Ana", Some("https://example.test/a.png")))
            .await
            .unwrap();
        let before = repo.list_entries(1).await.unwrap()[0].last_seen_at.unwrap();

        repo.upsert_profile(&identity("u-1", "Ana María", None))
            .await
            .unwrap();

        let page = repo.list_entries(DIRECTORY_PAGE_LIMIT).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].display_name.as_deref(), Some("Ana María"));
        // No photo in the identity: the stored one survives.
        assert_eq!(page[0].photo_url.as_deref(), Some("https://example.test/a.png"));
        assert!(page[0].last_seen_at.unwrap() >= before);
    }

    #[tokio::test]
    async fn test_listing_caps_the_page() {
        let (repo, docs) = repository();
        {
            let mut store = docs.write().unwrap();
            for n in 0..DIRECTORY_PAGE_LIMIT + 10 {
                store.push(DirectoryDocument {
                    id: format!("u-{}", n),
                    display_name: Some(format!("User {}", n)),
                    photo_url: None,
                    last_seen_at: None,
                });
            }
        }

        assert_eq!(
            repo.list_entries(usize::MAX).await.unwrap().len(),
            DIRECTORY_PAGE_LIMIT
        );
        assert_eq!(repo.list_entries(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_offline_directory_is_unavailable() {
        let offline = Arc::new(AtomicBool::new(true));
        let repo = DirectoryRepository::new(Arc::new(RwLock::new(Vec::new())), offline.clone());

        let listing = repo.list_entries(10).await;
        assert!(matches!(listing, Err(Error::Store(StoreError::Unavailable(_)))));

        let upsert = repo.upsert_profile(&identity("u-1", "Ana", None)).await;
        assert!(matches!(upsert, Err(Error::Store(StoreError::Unavailable(_)))));
    }
}
