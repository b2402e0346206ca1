//! Sliding-window request limiter
//!
//! Each client may make at most `limit` requests within any trailing
//! `window`. Timestamps older than the window are pruned whenever the client
//! is checked, and clients with nothing left in their window are evicted
//! during a periodic sweep.
//!
//! This is a fixed-capacity window counter, not a token bucket: a client can
//! burst its whole allowance at once and then waits until the oldest request
//! leaves the window.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

#[cfg(test)]
mod tests;

// Configuration constants
const DEFAULT_LIMIT: usize = 30;
const DEFAULT_WINDOW_SECS: u64 = 60;
const DEFAULT_CAPACITY: usize = 1000;
const CAPACITY_OVERHEAD_FACTOR: f64 = 1.3;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Allowance applied to every client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window
    pub limit: usize,
    /// Lookback duration
    pub window: Duration,
}

impl RateLimitConfig {
    /// Create a config allowing `limit` requests per `window_seconds`
    pub fn new(limit: usize, window_seconds: u64) -> Self {
        Self {
            limit,
            window: Duration::from_secs(window_seconds),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_WINDOW_SECS)
    }
}

/// Outcome of a single [`SlidingWindowLimiter::check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request was admitted (and recorded)
    pub allowed: bool,
    /// Maximum admitted requests per window
    pub limit: usize,
    /// Requests the client may still make in the current window
    pub remaining: usize,
    /// Time until the oldest recorded request leaves the window (0 if allowed)
    pub retry_after: Duration,
}

/// Per-client sliding-window limiter
///
/// The limiter is not synchronized internally. Callers sharing it between
/// threads must serialize calls to [`check`](Self::check) so that
/// prune, count and append happen as one step, for example by wrapping it in
/// a mutex or owning it from a single task.
///
/// # Example
///
/// ```
/// use interest_calc::SlidingWindowLimiter;
/// use std::time::{Duration, SystemTime};
///
/// let mut limiter = SlidingWindowLimiter::builder()
///     .limit(2)
///     .window(Duration::from_secs(10))
///     .build();
///
/// let now = SystemTime::now();
/// assert!(limiter.check("10.0.0.1", now).allowed);
/// assert!(limiter.check("10.0.0.1", now).allowed);
/// assert!(!limiter.check("10.0.0.1", now).allowed);
/// assert!(limiter.check("10.0.0.1", now + Duration::from_secs(10)).allowed);
/// ```
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    clients: HashMap<String, VecDeque<SystemTime>>,
    // Set on the first check, so the sweep follows the caller's clock
    next_cleanup: Option<SystemTime>,
    cleanup_interval: Duration,
    // Clients dropped by the most recent sweep
    evicted_count: usize,
}

/// Builder for configuring a [`SlidingWindowLimiter`]
///
/// # Example
///
/// ```
/// use interest_calc::SlidingWindowLimiter;
/// use std::time::Duration;
///
/// let limiter = SlidingWindowLimiter::builder()
///     .limit(100)
///     .window(Duration::from_secs(60))
///     .capacity(10_000)
///     .cleanup_interval(Duration::from_secs(300))
///     .build();
/// assert_eq!(limiter.config().limit, 100);
/// ```
pub struct SlidingWindowLimiterBuilder {
    config: RateLimitConfig,
    capacity: usize,
    cleanup_interval: Duration,
}

impl SlidingWindowLimiter {
    /// Create a limiter with the default 30 requests per 60 seconds
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a limiter with the given allowance and default housekeeping
    pub fn with_config(config: RateLimitConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a new builder for configuring a limiter
    pub fn builder() -> SlidingWindowLimiterBuilder {
        SlidingWindowLimiterBuilder::default()
    }

    fn from_builder(builder: SlidingWindowLimiterBuilder) -> Self {
        SlidingWindowLimiter {
            config: builder.config,
            // Pre-allocate with overhead to avoid rehashing
            clients: HashMap::with_capacity(
                (builder.capacity as f64 * CAPACITY_OVERHEAD_FACTOR) as usize,
            ),
            next_cleanup: None,
            cleanup_interval: builder.cleanup_interval,
            evicted_count: 0,
        }
    }

    /// The allowance applied to every client
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Number of clients currently tracked
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is tracked
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Number of idle clients dropped by the most recent sweep
    pub fn evicted_count(&self) -> usize {
        self.evicted_count
    }

    /// Check whether `client_id` may make a request at `now`
    ///
    /// Prunes the client's timestamps older than the window, rejects if the
    /// remaining count has reached the limit, and otherwise records `now`.
    /// Rejected requests are not recorded.
    ///
    /// A timestamp exactly one window old counts as expired.
    pub fn check(&mut self, client_id: &str, now: SystemTime) -> RateLimitDecision {
        self.maybe_evict_idle(now);

        let config = self.config;
        match self.clients.get_mut(client_id) {
            Some(timestamps) => admit(timestamps, now, config),
            None => {
                let mut timestamps = VecDeque::with_capacity(config.limit.min(64));
                let decision = admit(&mut timestamps, now, config);
                self.clients.insert(client_id.to_owned(), timestamps);
                decision
            }
        }
    }

    fn maybe_evict_idle(&mut self, now: SystemTime) {
        let due = match self.next_cleanup {
            Some(next) => now >= next,
            None => {
                self.next_cleanup = now.checked_add(self.cleanup_interval);
                false
            }
        };
        if !due {
            return;
        }

        let window = self.config.window;
        let before_count = self.clients.len();
        self.clients.retain(|_, timestamps| {
            timestamps
                .iter()
                .any(|&timestamp| !is_expired(timestamp, now, window))
        });
        self.evicted_count = before_count.saturating_sub(self.clients.len());
        self.next_cleanup = now.checked_add(self.cleanup_interval);
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_expired(timestamp: SystemTime, now: SystemTime, window: Duration) -> bool {
    // Timestamps ahead of `now` (clock skew between callers) are still live
    match now.duration_since(timestamp) {
        Ok(age) => age >= window,
        Err(_) => false,
    }
}

fn admit(
    timestamps: &mut VecDeque<SystemTime>,
    now: SystemTime,
    config: RateLimitConfig,
) -> RateLimitDecision {
    timestamps.retain(|&timestamp| !is_expired(timestamp, now, config.window));

    if timestamps.len() >= config.limit {
        let retry_after = timestamps
            .iter()
            .min()
            .and_then(|&oldest| oldest.checked_add(config.window))
            .and_then(|free_at| free_at.duration_since(now).ok())
            .unwrap_or(config.window);

        return RateLimitDecision {
            allowed: false,
            limit: config.limit,
            remaining: 0,
            retry_after,
        };
    }

    timestamps.push_back(now);
    RateLimitDecision {
        allowed: true,
        limit: config.limit,
        remaining: config.limit - timestamps.len(),
        retry_after: Duration::ZERO,
    }
}

impl Default for SlidingWindowLimiterBuilder {
    fn default() -> Self {
        Self {
            config: RateLimitConfig::default(),
            capacity: DEFAULT_CAPACITY,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
        }
    }
}

impl SlidingWindowLimiterBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whole allowance at once
    pub fn config(mut self, config: RateLimitConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum admitted requests per window
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Set the lookback window
    pub fn window(mut self, window: Duration) -> Self {
        self.config.window = window;
        self
    }

    /// Set the expected number of distinct clients
    ///
    /// The limiter will allocate 30% more space to reduce hash collisions.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set how often idle clients are swept out of the map
    ///
    /// Shorter intervals keep memory tighter under heavy client churn at the
    /// cost of more frequent full scans.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Build the limiter with the configured settings
    pub fn build(self) -> SlidingWindowLimiter {
        SlidingWindowLimiter::from_builder(self)
    }
}
