//! TMDB API rate-limit header inspection.

use std::time::Duration;

use reqwest::header::HeaderMap;

/// Header carrying the number of requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the Unix timestamp (seconds) at which the window resets.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Lower bound for every cooldown, also applied when the reset timestamp
/// is already in the past.
pub const MIN_COOLDOWN: Duration = Duration::from_secs(30);

/// Rate-limit state reported by a single response.
///
/// Recomputed on every attempt; nothing is carried between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct RateLimitStatus {
    /// Parsed `x-ratelimit-remaining`, if present and numeric.
    pub remaining: Option<u64>,
    /// Parsed `x-ratelimit-reset`, if present and numeric.
    pub reset: Option<i64>,
}

impl RateLimitStatus {
    /// Reads both rate-limit headers from a response.
    ///
    /// Missing or non-numeric headers are reported as `None`.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: parse_header(headers, REMAINING_HEADER),
            reset: parse_header(headers, RESET_HEADER),
        }
    }

    /// Returns `true` when the remote reported zero remaining requests.
    ///
    /// An absent header is not a rate-limit condition.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Cooldown before the next attempt, given the current Unix time.
    #[must_use]
    pub fn cooldown(&self, now: i64) -> Duration {
        cooldown_until(self.reset, now)
    }
}

/// Parses a numeric header value.
fn parse_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<T>().ok())
}

/// Computes `max(reset - now, 30)` seconds.
///
/// A missing reset timestamp yields the floor.
#[must_use]
pub fn cooldown_until(reset: Option<i64>, now: i64) -> Duration {
    let wait_secs = reset.map_or(0, |r| r.saturating_sub(now));
    let wait = u64::try_from(wait_secs).map_or(Duration::ZERO, Duration::from_secs);
    wait.max(MIN_COOLDOWN)
}
