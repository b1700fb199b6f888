//! Tipfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Tipfolio: tip
//! recording and validation, reporting-period selection, dashboard
//! aggregation, peer search, and the peer-support leaderboard. It is
//! store-agnostic and defines repository traits that are implemented
//! by the `storage-memory` crate.

pub mod constants;
pub mod directory;
pub mod errors;
pub mod events;
pub mod periods;
pub mod rankings;
pub mod records;
pub mod search;
pub mod session;
pub mod settings;
pub mod summary;
pub mod utils;

// Re-export common types from the record and directory modules
pub use directory::*;
pub use records::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
