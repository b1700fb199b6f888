use log::warn;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::search_model::{PeerCandidate, SearchPhase, SelectionState};
use crate::directory::DirectoryEntry;
use crate::errors::ValidationRejection;
use crate::utils::debounce::Debouncer;
use crate::utils::text_utils::{escape_html, is_valid_name};

struct SearchState {
    phase: SearchPhase,
    query: String,
    candidates: Vec<PeerCandidate>,
    resolved_name: Option<String>,
    resolved_peer_id: Option<String>,
}

impl SearchState {
    fn idle() -> Self {
        Self {
            phase: SearchPhase::Idle,
            query: String::new(),
            candidates: Vec::new(),
            resolved_name: None,
            resolved_peer_id: None,
        }
    }

    fn locked(&self) -> bool {
        self.phase == SearchPhase::Locked
    }
}

/// Debounced peer resolver backing one search widget.
///
/// Keystrokes feed [`input`]; the trailing keystroke of a burst survives the
/// debounce window and computes candidates against the directory snapshot.
/// Picking a candidate locks the widget; [`clear`] unlocks it. Widgets are
/// independent: each carries its own debouncer and state.
///
/// [`input`]: PeerSearch::input
/// [`clear`]: PeerSearch::clear
pub struct PeerSearch {
    current_user_id: String,
    debouncer: Debouncer,
    state: Mutex<SearchState>,
}

impl PeerSearch {
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            debouncer: Debouncer::default(),
            state: Mutex::new(SearchState::idle()),
        }
    }

    /// Resolver with a custom debounce window (tests use a short one).
    pub fn with_window(current_user_id: impl Into<String>, window: Duration) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            debouncer: Debouncer::new(window),
            state: Mutex::new(SearchState::idle()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Peer search state lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Feeds one keystroke.
    ///
    /// Records the query, moves to `Typing`, and waits out the debounce
    /// window. The call that survives computes and returns the candidates
    /// (phase `Matched` or `NoMatch`; an emptied query returns to `Idle`).
    /// Returns `None` without touching state when the widget is locked, when
    /// a newer keystroke superseded this one, or when the widget was cleared
    /// during the window.
    pub async fn input(
        &self,
        query: &str,
        directory: &[DirectoryEntry],
    ) -> Option<Vec<PeerCandidate>> {
        {
            let mut state = self.lock_state();
            if state.locked() {
                return None;
            }
            state.phase = SearchPhase::Typing;
            state.query = query.to_string();
            state.candidates.clear();
        }

        if !self.debouncer.trigger().await {
            return None;
        }

        let mut state = self.lock_state();
        // The widget may have been cleared or locked while the window ran.
        if state.locked() || state.query != query {
            return None;
        }

        if query.trim().is_empty() {
            state.phase = SearchPhase::Idle;
            state.candidates.clear();
            return Some(Vec::new());
        }

        let candidates = self.compute_candidates(query, directory);
        state.phase = if candidates.iter().any(|c| !c.external) {
            SearchPhase::Matched
        } else {
            SearchPhase::NoMatch
        };
        state.candidates = candidates.clone();
        Some(candidates)
    }

    /// Case-insensitive substring match over the directory, excluding the
    /// current user's own identity, plus the manual option whenever the
    /// query itself is a valid peer name.
    fn compute_candidates(&self, query: &str, directory: &[DirectoryEntry]) -> Vec<PeerCandidate> {
        let needle = query.trim().to_lowercase();
        let mut candidates: Vec<PeerCandidate> = directory
            .iter()
            .filter(|entry| entry.id != self.current_user_id)
            .filter(|entry| entry.display_name.to_lowercase().contains(&needle))
            .map(|entry| PeerCandidate {
                peer_id: Some(entry.id.clone()),
                display_name: escape_html(&entry.display_name),
                photo_url: entry.photo_url.clone(),
                external: false,
            })
            .collect();

        if is_valid_name(query) {
            candidates.push(PeerCandidate {
                peer_id: None,
                display_name: escape_html(query.trim()),
                photo_url: None,
                external: true,
            });
        }
        candidates
    }

    /// Fixes a selection and locks the widget.
    ///
    /// Every resolution is re-validated, directory hits included: a
    /// candidate whose display name fails the peer-name rules is rejected
    /// with `InvalidPeerName` and the widget stays unlocked. Valid names
    /// are fixed points of HTML escaping, so the recorded name is the raw
    /// spelling.
    pub fn select(
        &self,
        candidate: &PeerCandidate,
    ) -> Result<SelectionState, ValidationRejection> {
        if !is_valid_name(&candidate.display_name) {
            return Err(ValidationRejection::InvalidPeerName);
        }

        let mut state = self.lock_state();
        let resolved = candidate.display_name.trim().to_string();
        state.phase = SearchPhase::Locked;
        state.query = resolved.clone();
        state.resolved_name = Some(resolved);
        state.resolved_peer_id = candidate.peer_id.clone();
        state.candidates.clear();
        drop(state);

        Ok(self.selection())
    }

    /// Returns the widget to `Idle`, discarding any resolution and
    /// unlocking free-text entry.
    pub fn clear(&self) {
        *self.lock_state() = SearchState::idle();
    }

    pub fn phase(&self) -> SearchPhase {
        self.lock_state().phase
    }

    /// The candidates computed by the last surviving keystroke.
    pub fn candidates(&self) -> Vec<PeerCandidate> {
        self.lock_state().candidates.clone()
    }

    /// Snapshot of the current selection state.
    pub fn selection(&self) -> SelectionState {
        let state = self.lock_state();
        SelectionState {
            query_text: state.query.clone(),
            resolved_name: state.resolved_name.clone(),
            resolved_peer_id: state.resolved_peer_id.clone(),
            locked: state.locked(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(id: &str, display_name: &str) -> DirectoryEntry {
        DirectoryEntry {
            id: id.to_string(),
            display_name: display_name.to_string(),
            photo_url: None,
            last_seen_at: None,
        }
    }

    fn directory() -> Vec<DirectoryEntry> {
        vec![
            entry("me", "María Yo"),
            entry("p-1", "Ana López"),
            entry("p-2", "Luis Navarro"),
        ]
    }

    fn search() -> PeerSearch {
        PeerSearch::with_window("me", Duration::from_millis(20))
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let search = search();
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert!(search.candidates().is_empty());
        assert!(!search.selection().locked);
    }

    #[tokio::test]
    async fn test_surviving_keystroke_matches_directory() {
        let search = search();

        let candidates = search.input("ana", &directory()).await.unwrap();
        assert_eq!(search.phase(), SearchPhase::Matched);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].peer_id.as_deref(), Some("p-1"));
        assert_eq!(candidates[0].display_name, "Ana López");
        assert!(!candidates[0].external);
        // The query is itself a valid name, so the manual option rides along.
        assert!(candidates[1].external);
        assert_eq!(candidates[1].display_name, "ana");
    }

    #[tokio::test]
    async fn test_excludes_current_user() {
        let search = search();

        let candidates = search.input("marí", &directory()).await.unwrap();
        // "María Yo" matches the substring but is the searcher herself.
        assert!(candidates.iter().all(|c| c.peer_id.as_deref() != Some("me")));
        assert_eq!(search.phase(), SearchPhase::NoMatch);
    }

    #[tokio::test]
    async fn test_no_match_still_offers_valid_manual_name() {
        let search = search();

        let candidates = search.input("Rocío", &directory()).await.unwrap();
        assert_eq!(search.phase(), SearchPhase::NoMatch);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].external);
        assert_eq!(candidates[0].peer_id, None);
    }

    #[tokio::test]
    async fn test_malformed_query_offers_nothing() {
        let search = search();

        let candidates = search.input("<img>", &directory()).await.unwrap();
        assert_eq!(search.phase(), SearchPhase::NoMatch);
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_burst_resolves_once_with_final_query() {
        let search = Arc::new(PeerSearch::with_window("me", Duration::from_millis(60)));

        let first = tokio::spawn({
            let search = search.clone();
            async move { search.input("an", &directory()).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = search.input("luis", &directory()).await;

        assert_eq!(first.await.unwrap(), None);
        let candidates = second.unwrap();
        assert_eq!(candidates[0].peer_id.as_deref(), Some("p-2"));
        assert_eq!(search.selection().query_text, "luis");
    }

    #[tokio::test]
    async fn test_emptied_query_returns_to_idle() {
        let search = search();
        search.input("ana", &directory()).await.unwrap();

        let candidates = search.input("   ", &directory()).await.unwrap();
        assert!(candidates.is_empty());
        assert_eq!(search.phase(), SearchPhase::Idle);
    }

    #[tokio::test]
    async fn test_clear_during_window_discards_resolution() {
        let search = Arc::new(PeerSearch::with_window("me", Duration::from_millis(60)));

        let pending = tokio::spawn({
            let search = search.clone();
            async move { search.input("ana", &directory()).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        search.clear();

        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert!(search.candidates().is_empty());
    }

    #[tokio::test]
    async fn test_select_directory_candidate_locks() {
        let search = search();
        let candidates = search.input("ana", &directory()).await.unwrap();

        let selection = search.select(&candidates[0]).unwrap();
        assert!(selection.locked);
        assert_eq!(selection.resolved_name.as_deref(), Some("Ana López"));
        assert_eq!(selection.resolved_peer_id.as_deref(), Some("p-1"));
        assert_eq!(selection.query_text, "Ana López");
        assert_eq!(search.phase(), SearchPhase::Locked);

        // Free-text edits are refused while locked.
        assert_eq!(search.input("otra", &directory()).await, None);
        assert_eq!(search.selection().query_text, "Ana López");
    }

    #[tokio::test]
    async fn test_select_external_candidate_has_no_peer_id() {
        let search = search();
        let candidates = search.input("Rocío", &directory()).await.unwrap();

        let selection = search.select(&candidates[0]).unwrap();
        assert!(selection.locked);
        assert_eq!(selection.resolved_name.as_deref(), Some("Rocío"));
        assert_eq!(selection.resolved_peer_id, None);
    }

    #[tokio::test]
    async fn test_malformed_selection_rejected_and_stays_unlocked() {
        let search = search();
        search.input("ana", &directory()).await.unwrap();

        // As if a malformed directory display name slipped into a candidate.
        let forged = PeerCandidate {
            peer_id: Some("p-9".to_string()),
            display_name: "<script>alert(1)</script>".to_string(),
            photo_url: None,
            external: false,
        };

        let err = search.select(&forged).unwrap_err();
        assert_eq!(err, ValidationRejection::InvalidPeerName);
        assert_ne!(search.phase(), SearchPhase::Locked);
        assert_eq!(search.selection().resolved_name, None);
    }

    #[tokio::test]
    async fn test_clear_unlocks_and_resets() {
        let search = search();
        let candidates = search.input("ana", &directory()).await.unwrap();
        search.select(&candidates[0]).unwrap();

        search.clear();
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert_eq!(search.selection().resolved_name, None);
        assert!(!search.selection().locked);

        // Typing works again after unlocking.
        let candidates = search.input("luis", &directory()).await.unwrap();
        assert_eq!(candidates[0].peer_id.as_deref(), Some("p-2"));
    }

    #[tokio::test]
    async fn test_widgets_are_independent() {
        let a = Arc::new(PeerSearch::with_window("me", Duration::from_millis(40)));
        let b = Arc::new(PeerSearch::with_window("me", Duration::from_millis(40)));

        let on_a = tokio::spawn({
            let a = a.clone();
            async move { a.input("ana", &directory()).await }
        });
        tokio::time::sleep(Duration::from_millis(5)).await;
        let on_b = b.input("luis", &directory()).await;

        // Typing in one widget never supersedes the other's pending window.
        assert!(on_a.await.unwrap().is_some());
        assert!(on_b.is_some());
    }
}
