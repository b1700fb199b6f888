//! In-memory storage implementation for the public peer directory.

mod repository;

pub use repository::DirectoryRepository;
