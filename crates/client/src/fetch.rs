//! Resource fetch state and request supersession.
//!
//! Every fetch that depends on a changing key (role, identity, status
//! filter, restaurant selection) runs under a [`RequestToken`] issued by the
//! key's [`RequestTracker`]. When the key changes before the fetch resolves,
//! the tracker's generation moves past the token and the stale outcome -
//! success or failure - is discarded instead of committed, so an older
//! response can never overwrite state set by a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// State of one remotely fetched resource.
///
/// Collapses the usual loading/error/data flag combinations into a single
/// exhaustively matchable value. An empty `Ready(vec![])` is deliberately
/// distinct from `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Remote<T> {
    /// Never requested, or invalidated.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Last request succeeded.
    Ready(T),
    /// Last request failed with a user-facing message.
    Failed(String),
}

impl<T> Remote<T> {
    /// The successful value, if any.
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a request is in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Issues generation-numbered tokens for one supersedable fetch slot.
///
/// Starting a new request (or invalidating the slot) bumps the generation;
/// tokens from earlier generations report stale.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: Arc<AtomicU64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new request, superseding any outstanding one.
    #[must_use]
    pub fn begin(&self) -> RequestToken {
        let issued = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken {
            generation: Arc::clone(&self.generation),
            issued,
        }
    }

    /// Invalidate outstanding requests without starting a new one.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// A handle identifying one in-flight request.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl RequestToken {
    /// Whether this request is still the latest for its slot.
    ///
    /// Checked before committing any outcome to state; a stale token means
    /// the outcome is dropped as a silent no-op.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_accessors() {
        let ready: Remote<Vec<u8>> = Remote::Ready(vec![]);
        assert_eq!(ready.ready(), Some(&vec![]));
        assert!(ready.error().is_none());

        let failed: Remote<Vec<u8>> = Remote::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.ready().is_none());

        assert!(Remote::<()>::Loading.is_loading());
    }

    #[test]
    fn test_empty_ready_is_not_failure() {
        let remote: Remote<Vec<u8>> = Remote::Ready(vec![]);
        assert!(remote.ready().is_some());
        assert!(remote.error().is_none());
    }

    #[test]
    fn test_token_current_until_superseded() {
        let tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());

        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_supersede_without_new_request() {
        let tracker = RequestTracker::new();
        let token = tracker.begin();
        tracker.supersede();
        assert!(!token.is_current());
    }
}
