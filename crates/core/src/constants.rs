/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Length of the most-recent slice in a tip summary
pub const RECENT_SLICE_LEN: usize = 10;

/// Number of rows in the peer leaderboard
pub const RANKING_TOP_N: usize = 5;

/// Page size cap for directory reads
pub const DIRECTORY_PAGE_LIMIT: usize = 50;

/// Scan cap for the global peer-support ranking read
pub const PEER_SUPPORT_SCAN_LIMIT: usize = 200;

/// Delay after the last keystroke before a debounced search fires, in milliseconds
pub const DEBOUNCE_WINDOW_MS: u64 = 300;
