use serde::{Deserialize, Serialize};

/// Phase of one search widget's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchPhase {
    /// Empty query, no candidates.
    Idle,
    /// A keystroke arrived; the debounce window is open.
    Typing,
    /// The window survived and at least one directory entry matched.
    Matched,
    /// The window survived and no directory entry matched. The manual
    /// option may still be on offer.
    NoMatch,
    /// A selection is fixed. Free-text edits are refused until cleared.
    Locked,
}

/// One candidate offered by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerCandidate {
    /// Directory id; `None` for the add-as-typed external option.
    pub peer_id: Option<String>,
    /// HTML-escaped, safe to render as offered.
    pub display_name: String,
    pub photo_url: Option<String>,
    /// True for the manual option that records the query text as an ad-hoc
    /// peer name.
    pub external: bool,
}

/// Snapshot of one widget's selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub query_text: String,
    pub resolved_name: Option<String>,
    /// Absent for an external (ad-hoc) resolution.
    pub resolved_peer_id: Option<String>,
    pub locked: bool,
}
