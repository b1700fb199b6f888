//! Trailing-edge debouncer for bursty input.
//!
//! Gates an action behind a quiet window: every trigger restarts the window,
//! and only the final trigger of a burst survives it. Used to turn
//! per-keystroke search input into a single directory match pass.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::constants::DEBOUNCE_WINDOW_MS;

/// Trailing-edge delay gate around an arbitrary action.
///
/// `trigger()` stamps the call, waits out the quiet window, and resolves
/// `true` only if no later trigger arrived meanwhile. The surviving caller is
/// the trailing edge, so the arguments it captured are the ones that take
/// effect; superseded callers resolve `false` and must discard theirs.
/// Nothing queues: a call supersedes, it never stacks. Independent debouncers
/// never interact.
#[derive(Debug)]
pub struct Debouncer {
    /// Quiet window restarted by every trigger.
    window: Duration,
    /// Stamp of the most recent trigger.
    generation: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer with a custom quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: AtomicU64::new(0),
        }
    }

    /// Wait out the quiet window.
    ///
    /// Resolves `true` if this call is still the most recent trigger when the
    /// window expires, `false` if it was superseded.
    pub async fn trigger(&self) -> bool {
        let stamp = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.window).await;
        self.generation.load(Ordering::SeqCst) == stamp
    }

    /// The configured quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debouncer {
    /// Debouncer with the standard search window.
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_WINDOW_MS))
    }
}
