//! Network URL and timing constants.

use std::time::Duration;

/// Default REST API base URL (CoinGecko public v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Quote currency for every price request.
pub const VS_CURRENCY: &str = "usd";

/// Interval between coin-list refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Delay before a failed history fetch is retried.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Width of the history window, in days.
pub const DEFAULT_HISTORY_WINDOW_DAYS: u32 = 30;

/// Per-request timeout for the HTTP gateway.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
