//! When to go back to the server for a fresh feed.

use super::state::{FeedPhase, FeedState};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Refetch every time the feed regains focus.
    #[default]
    OnEveryFocus,
    /// Refetch on focus only when the feed was never loaded, is in error,
    /// has been marked stale, or is older than `max_age`.
    WhenStale { max_age: Option<Duration> },
}

impl RefreshPolicy {
    pub fn revalidate_after(max_age: Duration) -> Self {
        Self::WhenStale {
            max_age: Some(max_age),
        }
    }

    pub fn needs_refresh(&self, state: &FeedState, now: DateTime<Utc>) -> bool {
        match self {
            RefreshPolicy::OnEveryFocus => true,
            RefreshPolicy::WhenStale { max_age } => {
                if state.stale || matches!(state.phase, FeedPhase::Idle | FeedPhase::Error(_)) {
                    return true;
                }
                match (state.last_fetched_at, max_age) {
                    (None, _) => true,
                    (Some(fetched_at), Some(max_age)) => now - fetched_at >= *max_age,
                    (Some(_), None) => false,
                }
            }
        }
    }
}
