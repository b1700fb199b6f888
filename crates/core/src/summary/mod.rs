//! Dashboard aggregation: per-method totals, card settlement, recent slice.

mod summary_model;
mod summary_service;

pub use summary_model::{CardSettlement, MethodTotal, TipSummary};
pub use summary_service::SummaryService;
