use log::debug;
use std::sync::Arc;

use super::rankings_model::RankingRow;
use crate::constants::{PEER_SUPPORT_SCAN_LIMIT, RANKING_TOP_N};
use crate::directory::DirectoryEntry;
use crate::errors::Result;
use crate::records::{PaymentMethod, TipRecord, TipRecordRepositoryTrait};
use crate::utils::text_utils::escape_html;

/// Groups peer-support records into a leaderboard.
///
/// Grouping key: `peer_id` when present, otherwise the trimmed `peer_name`.
/// Identical ad-hoc names merge; distinct spellings stay separate, and an
/// ad-hoc name never merges with a registered peer. Records that identify
/// no peer at all are skipped.
///
/// The input is expected newest-first, so the first record seen for a group
/// supplies the freshest name snapshot; a directory entry matching the key
/// overrides it with the live profile. Display names come back escaped.
///
/// Rows are sorted by total descending with a stable sort (ties keep
/// first-appearance order) and truncated to `top_n`.
pub fn rank_peers(
    records: &[TipRecord],
    directory: &[DirectoryEntry],
    top_n: usize,
) -> Vec<RankingRow> {
    struct Group {
        key: String,
        display_name: String,
        photo_url: Option<String>,
        total: rust_decimal::Decimal,
    }

    let mut groups: Vec<Group> = Vec::new();
    for record in records {
        if record.method != PaymentMethod::PeerSupport {
            continue;
        }
        let key = match group_key(record) {
            Some(key) => key,
            None => {
                debug!("Skipping peer-support record {} with no peer identity", record.id);
                continue;
            }
        };

        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.total += record.amount,
            None => {
                let snapshot = record
                    .peer_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(&key)
                    .to_string();
                groups.push(Group {
                    key,
                    display_name: snapshot,
                    photo_url: None,
                    total: record.amount,
                });
            }
        }
    }

    for group in &mut groups {
        if let Some(entry) = directory.iter().find(|entry| entry.id == group.key) {
            group.display_name = entry.display_name.clone();
            group.photo_url = entry.photo_url.clone();
        }
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups.truncate(top_n);
    groups
        .into_iter()
        .map(|group| RankingRow {
            key: group.key,
            display_name: escape_html(&group.display_name),
            photo_url: group.photo_url,
            total: group.total,
        })
        .collect()
}

fn group_key(record: &TipRecord) -> Option<String> {
    record
        .peer_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| {
            record
                .peer_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
}

/// Service computing the peer leaderboard from the bounded store scan.
pub struct RankingService {
    repository: Arc<dyn TipRecordRepositoryTrait>,
}

impl RankingService {
    pub fn new(repository: Arc<dyn TipRecordRepositoryTrait>) -> Self {
        Self { repository }
    }

    /// Scans the most recent peer-support records (at most
    /// `PEER_SUPPORT_SCAN_LIMIT`) and ranks the top `RANKING_TOP_N` peers,
    /// enriched with the supplied directory snapshot.
    pub async fn top_peers(&self, directory: &[DirectoryEntry]) -> Result<Vec<RankingRow>> {
        let records = self
            .repository
            .list_peer_support(PEER_SUPPORT_SCAN_LIMIT)
            .await?;
        debug!("Ranking {} peer-support records", records.len());
        Ok(rank_peers(&records, directory, RANKING_TOP_N))
    }
}
