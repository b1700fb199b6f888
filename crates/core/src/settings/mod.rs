//! Policy configuration for validation ceilings and the card fee rate.

mod settings_model;

pub use settings_model::TipPolicy;
