//! Shared helpers: text escaping and validation, calendar instants, debouncing.

pub mod debounce;
pub mod text_utils;
pub mod time_utils;
