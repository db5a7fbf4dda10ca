//! Retry policy for failed history fetches.

use crate::network::DEFAULT_RETRY_DELAY;
use std::time::Duration;

/// What a history view does after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Stay failed.
    None,
    /// Try again after the same delay every time, forever.
    Fixed { delay: Duration },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Fixed {
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn fixed(delay: Duration) -> Self {
        RetryPolicy::Fixed { delay }
    }

    /// Delay before the retry that follows failed attempt `attempt` (1-indexed).
    ///
    /// `None` means no retry is scheduled.
    pub fn delay_after(&self, _attempt: u32) -> Option<Duration> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Fixed { delay } => Some(*delay),
        }
    }
}
