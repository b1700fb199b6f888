//! Domain event types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::periods::PeriodGranularity;

/// Domain events emitted by core services after completed state changes.
///
/// These events represent facts about the session's data. The presentation
/// layer subscribes to them instead of the core reaching into a rendering
/// surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// The owner's record cache was replaced by a fresh authoritative read.
    /// Emitted after every reload, including the one that follows a write.
    RecordsReloaded { owner_id: String, count: usize },

    /// The directory cache was replaced by a fresh bounded page.
    DirectoryRefreshed { count: usize },

    /// The reporting period moved or changed granularity.
    PeriodChanged {
        granularity: PeriodGranularity,
        reference: NaiveDate,
    },
}

impl DomainEvent {
    /// Creates a RecordsReloaded event.
    pub fn records_reloaded(owner_id: impl Into<String>, count: usize) -> Self {
        Self::RecordsReloaded {
            owner_id: owner_id.into(),
            count,
        }
    }

    /// Creates a DirectoryRefreshed event.
    pub fn directory_refreshed(count: usize) -> Self {
        Self::DirectoryRefreshed { count }
    }

    /// Creates a PeriodChanged event.
    pub fn period_changed(granularity: PeriodGranularity, reference: NaiveDate) -> Self {
        Self::PeriodChanged {
            granularity,
            reference,
        }
    }
}
