//! In-memory storage implementation for tip records.

mod model;
mod repository;

pub use model::TipRecordDocument;
pub use repository::TipRecordRepository;
