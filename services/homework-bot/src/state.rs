//! In-memory state carried by the poll loop between iterations

use crate::config::CursorMode;

/// Process-lifetime poll state, owned by a single poller
#[derive(Debug, Clone)]
pub struct PollState {
    cursor: i64,
    cursor_mode: CursorMode,
    last_sent: Option<String>,
    consecutive_delivery_failures: u32,
}

impl PollState {
    pub fn new(cursor: i64, cursor_mode: CursorMode) -> Self {
        Self {
            cursor,
            cursor_mode,
            last_sent: None,
            consecutive_delivery_failures: 0,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_sent(&self) -> Option<&str> {
        self.last_sent.as_deref()
    }

    pub fn consecutive_delivery_failures(&self) -> u32 {
        self.consecutive_delivery_failures
    }

    /// True if `message` differs from the last delivered one
    pub fn is_new(&self, message: &str) -> bool {
        self.last_sent.as_deref() != Some(message)
    }

    /// Remember a successfully delivered status message
    pub fn record_sent(&mut self, message: String) {
        self.last_sent = Some(message);
        self.consecutive_delivery_failures = 0;
    }

    /// Start a fresh failure streak
    pub fn clear_delivery_failures(&mut self) {
        self.consecutive_delivery_failures = 0;
    }

    /// Count a failed delivery, returning the new streak length
    pub fn record_delivery_failure(&mut self) -> u32 {
        self.consecutive_delivery_failures = self.consecutive_delivery_failures.saturating_add(1);
        self.consecutive_delivery_failures
    }

    /// Move the cursor after a handled iteration; a no-op in fixed mode
    pub fn advance_cursor(&mut self, to: i64) {
        if self.cursor_mode == CursorMode::Advance && to > self.cursor {
            self.cursor = to;
        }
    }
}
