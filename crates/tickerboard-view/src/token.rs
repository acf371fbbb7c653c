use std::sync::atomic::{AtomicU64, Ordering};

/// Generation number of one submission (or one home page load).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Issues [`RequestToken`]s and tells stale ones from the latest.
///
/// Outstanding requests are never cancelled; a response whose token is no
/// longer current is dropped instead of rendered.
#[derive(Debug, Default)]
pub struct TokenTracker {
    latest: AtomicU64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersedes every token issued so far.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }
}
