//! Peer-support leaderboard.

mod rankings_model;
mod rankings_service;

pub use rankings_model::RankingRow;
pub use rankings_service::{rank_peers, RankingService};
