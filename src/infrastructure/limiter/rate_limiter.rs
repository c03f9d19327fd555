use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW};

/// Decides whether a caller may go on. Never fails.
pub trait RateLimiter: Send + Sync {
    fn check(&self, identity: &str) -> bool;
}

/// Requests seen from one identity in the current window.
#[derive(Debug, Clone, Copy)]
pub struct RateRecord {
    pub count: u32,
    pub window_start: Instant,
}

impl RateRecord {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 1,
            window_start: now,
        }
    }
}

/// In-memory fixed window counter, one record per identity.
///
/// Records are never evicted: the map grows with the number of distinct
/// identities for the lifetime of the process.
#[derive(Debug)]
pub struct FixedWindowRateLimiter {
    records: DashMap<String, RateRecord>,
    window: Duration,
    max_requests: u32,
}

impl Default for FixedWindowRateLimiter {
    fn default() -> Self {
        Self::new(RATE_LIMIT_WINDOW, RATE_LIMIT_MAX_REQUESTS)
    }
}

impl FixedWindowRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            records: DashMap::new(),
            window,
            max_requests,
        }
    }

    /// Same as [`RateLimiter::check`] with an explicit clock reading.
    pub fn check_at(&self, identity: &str, now: Instant) -> bool {
        // The entry guard holds the shard lock, so reset and increment
        // happen as one step per key.
        let mut entry = self
            .records
            .entry(identity.to_string())
            .or_insert_with(|| RateRecord {
                count: 0,
                window_start: now,
            });
        let record = entry.value_mut();

        if record.count == 0 || now.saturating_duration_since(record.window_start) > self.window {
            *record = RateRecord::fresh(now);
            return true;
        }

        if record.count >= self.max_requests {
            return false;
        }

        record.count += 1;
        true
    }

    pub fn record(&self, identity: &str) -> Option<RateRecord> {
        self.records.get(identity).map(|r| *r.value())
    }

    pub fn tracked_identities(&self) -> usize {
        self.records.len()
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, identity: &str) -> bool {
        let allowed = self.check_at(identity, Instant::now());
        if !allowed {
            tracing::debug!(identity, "Rate limit reached");
        }
        allowed
    }
}
