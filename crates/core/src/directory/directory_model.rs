//! Directory identity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile supplied by the authentication collaborator on sign-in.
///
/// Read-only to the core: the relevant fields are copied into the directory
/// without further validation (the provider is trusted to supply well-formed
/// values), but anything rendered still passes through the sanitizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub email: Option<String>,
}

/// Raw directory page item as the store returns it.
///
/// Every field except `id` may be missing. The service decides what is
/// usable; the model just carries what was stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryDocument {
    pub id: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

/// Validated public identity used for peer search and ranking enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl DirectoryEntry {
    /// Converts a raw document, or `None` when the display name is missing
    /// or blank. Malformed documents are skipped by the caller, never fatal.
    pub fn from_document(doc: DirectoryDocument) -> Option<Self> {
        let display_name = doc.display_name.filter(|name| !name.trim().is_empty())?;
        Some(Self {
            id: doc.id,
            display_name,
            photo_url: doc.photo_url,
            last_seen_at: doc.last_seen_at,
        })
    }
}
