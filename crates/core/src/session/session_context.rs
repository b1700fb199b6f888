use log::{debug, warn};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::{
    DirectoryRepositoryTrait, DirectoryService, DirectoryServiceTrait, UserIdentity,
};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::periods::{PeriodGranularity, ReportingPeriod};
use crate::rankings::{RankingRow, RankingService};
use crate::records::{TipRecordRepositoryTrait, TipRecordService, TipRecordServiceTrait};
use crate::search::PeerSearch;
use crate::settings::TipPolicy;
use crate::summary::{SummaryService, TipSummary};
use crate::utils::time_utils;

/// Outcome of one full refresh. The sources degrade independently: one
/// failing never blocks the other, and a failed read leaves that cache
/// empty with its error reported here.
#[derive(Debug)]
pub struct RefreshReport {
    /// Record count on success.
    pub records: Result<usize>,
    /// Directory entry count on success.
    pub directory: Result<usize>,
}

/// Per-signed-in-user application context.
///
/// Created on authentication success, destroyed on sign-out. Owns the
/// services and the only mutable session state: the record cache, the
/// directory cache, and the current reporting period. All of it mutates
/// solely in response to a completed store round-trip or a resolved user
/// action.
pub struct SessionContext {
    identity: UserIdentity,
    records: Arc<TipRecordService>,
    directory: Arc<DirectoryService>,
    rankings: RankingService,
    summary: SummaryService,
    period: RwLock<ReportingPeriod>,
    events: Arc<dyn DomainEventSink>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("identity", &self.identity)
            .field("period", &self.read_period())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Wires the services around the supplied repositories and opens the
    /// session.
    ///
    /// Registers the user's public profile into the directory best-effort:
    /// a failed upsert is logged and the session still opens. The reporting
    /// period starts at granularity `Day`, anchored on today.
    pub async fn create(
        identity: UserIdentity,
        record_repository: Arc<dyn TipRecordRepositoryTrait>,
        directory_repository: Arc<dyn DirectoryRepositoryTrait>,
        policy: TipPolicy,
        events: Arc<dyn DomainEventSink>,
    ) -> Result<Self> {
        policy.validate()?;

        let directory = Arc::new(DirectoryService::new(directory_repository, events.clone()));
        if let Err(e) = directory.register_profile(&identity).await {
            warn!(
                "Could not register profile for '{}', continuing: {}",
                identity.id, e
            );
        }

        let records = Arc::new(TipRecordService::new(
            identity.id.clone(),
            record_repository.clone(),
            directory.clone(),
            policy.clone(),
            events.clone(),
        ));
        let rankings = RankingService::new(record_repository);
        let summary = SummaryService::new(policy);
        let period = RwLock::new(ReportingPeriod::new(
            PeriodGranularity::Day,
            time_utils::today(),
        ));

        debug!("Session opened for '{}'", identity.id);
        Ok(Self {
            identity,
            records,
            directory,
            rankings,
            summary,
            period,
            events,
        })
    }

    fn read_period(&self) -> RwLockReadGuard<'_, ReportingPeriod> {
        self.period.read().unwrap_or_else(|poisoned| {
            warn!("Reporting period lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_period(&self) -> RwLockWriteGuard<'_, ReportingPeriod> {
        self.period.write().unwrap_or_else(|poisoned| {
            warn!("Reporting period lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// The record service handle for create/update/delete and reload.
    pub fn record_service(&self) -> Arc<TipRecordService> {
        self.records.clone()
    }

    /// The directory service handle.
    pub fn directory_service(&self) -> Arc<DirectoryService> {
        self.directory.clone()
    }

    /// Reloads records and directory. Each source degrades independently;
    /// see [`RefreshReport`].
    pub async fn refresh_all(&self) -> RefreshReport {
        let (records, directory) = tokio::join!(self.records.reload(), self.directory.refresh());
        RefreshReport {
            records,
            directory: directory.map(|entries| entries.len()),
        }
    }

    /// Aggregates the cached records that fall inside the current period.
    ///
    /// Figures come back at full precision; render with
    /// [`TipSummary::rounded`].
    pub fn dashboard(&self) -> TipSummary {
        let period = *self.read_period();
        let records = self.records.records();
        self.summary.summarize(&period.select(&records))
    }

    /// The current reporting period.
    pub fn period(&self) -> ReportingPeriod {
        *self.read_period()
    }

    /// Switches the period granularity, keeping the reference date.
    pub fn set_granularity(&self, granularity: PeriodGranularity) {
        let snapshot = {
            let mut period = self.write_period();
            let next = period.with_granularity(granularity);
            *period = next;
            next
        };
        debug!(
            "Reporting period granularity set to {:?} at {}",
            snapshot.granularity(),
            snapshot.reference()
        );
        self.events.emit(DomainEvent::period_changed(
            snapshot.granularity(),
            snapshot.reference(),
        ));
    }

    /// Moves the reporting period by `delta` units of its granularity.
    pub fn advance_period(&self, delta: i32) {
        let snapshot = {
            let mut period = self.write_period();
            period.advance(delta);
            *period
        };
        debug!(
            "Reporting period advanced by {} to {}",
            delta,
            snapshot.reference()
        );
        self.events.emit(DomainEvent::period_changed(
            snapshot.granularity(),
            snapshot.reference(),
        ));
    }

    /// Computes the peer leaderboard from the bounded store scan, enriched
    /// with the current directory cache.
    pub async fn top_peers(&self) -> Result<Vec<RankingRow>> {
        self.rankings.top_peers(&self.directory.entries()).await
    }

    /// A fresh search widget bound to this user. Widgets are independent;
    /// create one per concurrent search box.
    pub fn new_peer_search(&self) -> PeerSearch {
        PeerSearch::new(self.identity.id.clone())
    }

    /// Ends the session: clears the caches and logs the sign-out. No
    /// background tasks are owned, so dropping releases everything else.
    pub fn close(self) {
        self.records.clear_cache();
        self.directory.clear_cache();
        debug!("Session closed for '{}'", self.identity.id);
    }
}
