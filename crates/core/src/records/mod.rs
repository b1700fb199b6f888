//! Tip records: domain models, validation rules, and the owning service.

mod records_model;
mod records_rules;
mod records_service;
mod records_traits;


pub use records_model::{NewTipRecord, PaymentMethod, TipRecord, ValidatedTip};
pub use records_rules::TipRuleEngine;
pub use records_service::TipRecordService;
pub use records_traits::{TipRecordRepositoryTrait, TipRecordServiceTrait};
