//! Debounced peer search against the directory.

mod search_model;
mod search_service;

pub use search_model::{PeerCandidate, SearchPhase, SelectionState};
pub use search_service::PeerSearch;
