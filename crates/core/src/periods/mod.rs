//! Reporting period selection for the dashboard.

mod periods_model;

pub use periods_model::{PeriodGranularity, ReportingPeriod};
