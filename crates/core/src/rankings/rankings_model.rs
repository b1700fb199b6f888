use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One leaderboard row: a supported peer and the summed support received.
///
/// `display_name` is already HTML-escaped; raw names never leave the
/// ranking boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    /// Grouping key: the registered peer id when known, otherwise the
    /// trimmed ad-hoc name.
    pub key: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub total: Decimal,
}
