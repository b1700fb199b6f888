//! Per-user application context: service wiring and session lifecycle.

mod session_context;


pub use session_context::{RefreshReport, SessionContext};
