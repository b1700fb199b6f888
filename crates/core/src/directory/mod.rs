//! Directory module - identity models, service, and traits.

mod directory_model;
mod directory_service;
mod directory_traits;

pub use directory_model::{DirectoryDocument, DirectoryEntry, UserIdentity};
pub use directory_service::DirectoryService;
pub use directory_traits::{DirectoryRepositoryTrait, DirectoryServiceTrait};
