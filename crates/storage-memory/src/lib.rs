//! In-memory storage implementation for Tipfolio.
//!
//! This crate implements the repository traits defined in `tipfolio-core`
//! against plain shared collections. It contains:
//! - The [`MemoryStore`] facade that owns the collections and hands out
//!   repositories sharing them
//! - Repository implementations for tip records and the peer directory
//! - The persisted document types the backend stores
//!
//! # Architecture
//!
//! The core is store-agnostic and works with traits. This crate is one
//! backend behind those traits; it doubles as the test double for session
//! flows, including an offline switch that makes every call fail the way a
//! disconnected remote store would.
//!
//! ```text
//! core (domain, traits)
//!          │
//!          ▼
//! storage-memory (this crate)
//! ```

mod store;

// Repository implementations
pub mod directory;
pub mod records;

pub use store::MemoryStore;

pub use directory::DirectoryRepository;
pub use records::{TipRecordDocument, TipRecordRepository};

// Re-export from tipfolio-core for convenience
pub use tipfolio_core::errors::{Error, Result, StoreError};
