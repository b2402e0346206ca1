//! Simple metrics collection for observability
//!
//! Lightweight atomic counters, exported in Prometheus text format on
//! `GET /metrics`.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

/// How a calculation request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A result was returned
    Computed,
    /// Validation or computation failed
    Failed,
    /// The client was over its allowance
    RateLimited,
}

/// Core metrics collected by the server
pub struct Metrics {
    /// Server start time
    start_time: Instant,

    /// Total requests received
    pub total_requests: AtomicU64,

    /// Request outcomes
    pub requests_computed: AtomicU64,
    pub requests_failed: AtomicU64,
    pub requests_rate_limited: AtomicU64,
    pub requests_errors: AtomicU64,

    /// Request latency buckets (in microseconds)
    pub latency_under_1ms: AtomicU64,
    pub latency_under_10ms: AtomicU64,
    pub latency_under_100ms: AtomicU64,
    pub latency_under_1s: AtomicU64,
    pub latency_over_1s: AtomicU64,

    /// Histogram support
    pub latency_sum_micros: AtomicU64,
    pub latency_count: AtomicU64,

    /// Clients currently tracked by the rate limiter
    pub active_clients: AtomicUsize,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            requests_computed: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
            requests_rate_limited: AtomicU64::new(0),
            requests_errors: AtomicU64::new(0),
            latency_under_1ms: AtomicU64::new(0),
            latency_under_10ms: AtomicU64::new(0),
            latency_under_100ms: AtomicU64::new(0),
            latency_under_1s: AtomicU64::new(0),
            latency_over_1s: AtomicU64::new(0),
            latency_sum_micros: AtomicU64::new(0),
            latency_count: AtomicU64::new(0),
            active_clients: AtomicUsize::new(0),
        }
    }

    /// Record a request and its latency
    pub fn record_request(&self, outcome: Outcome, latency_us: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        match outcome {
            Outcome::Computed => self.requests_computed.fetch_add(1, Ordering::Relaxed),
            Outcome::Failed => self.requests_failed.fetch_add(1, Ordering::Relaxed),
            Outcome::RateLimited => self.requests_rate_limited.fetch_add(1, Ordering::Relaxed),
        };

        self.record_latency(latency_us);
    }

    /// Record an internal error (e.g. the actor is gone)
    pub fn record_error(&self, latency_us: u64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.requests_errors.fetch_add(1, Ordering::Relaxed);
        self.record_latency(latency_us);
    }

    /// Update the tracked client gauge
    pub fn update_active_clients(&self, count: usize) {
        self.active_clients.store(count, Ordering::Relaxed);
    }

    fn record_latency(&self, latency_us: u64) {
        match latency_us {
            0..=999 => self.latency_under_1ms.fetch_add(1, Ordering::Relaxed),
            1000..=9999 => self.latency_under_10ms.fetch_add(1, Ordering::Relaxed),
            10000..=99999 => self.latency_under_100ms.fetch_add(1, Ordering::Relaxed),
            100000..=999999 => self.latency_under_1s.fetch_add(1, Ordering::Relaxed),
            _ => self.latency_over_1s.fetch_add(1, Ordering::Relaxed),
        };

        self.latency_sum_micros
            .fetch_add(latency_us, Ordering::Relaxed);
        self.latency_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        let mut output = String::with_capacity(1500);

        let counter = |output: &mut String, name: &str, help: &str, value: u64| {
            let _ = write!(
                output,
                "# HELP interest_calc_{name} {help}\n# TYPE interest_calc_{name} counter\ninterest_calc_{name} {value}\n\n"
            );
        };

        output.push_str("# HELP interest_calc_uptime_seconds Time since server start in seconds\n");
        output.push_str("# TYPE interest_calc_uptime_seconds gauge\n");
        let _ = writeln!(
            output,
            "interest_calc_uptime_seconds {}\n",
            self.uptime_seconds()
        );

        counter(
            &mut output,
            "requests_total",
            "Total number of calculation requests",
            self.total_requests.load(Ordering::Relaxed),
        );
        counter(
            &mut output,
            "requests_computed",
            "Requests answered with a result",
            self.requests_computed.load(Ordering::Relaxed),
        );
        counter(
            &mut output,
            "requests_failed",
            "Requests rejected by validation or calculation",
            self.requests_failed.load(Ordering::Relaxed),
        );
        counter(
            &mut output,
            "requests_rate_limited",
            "Requests turned away by the rate limiter",
            self.requests_rate_limited.load(Ordering::Relaxed),
        );
        counter(
            &mut output,
            "requests_errors",
            "Total internal errors",
            self.requests_errors.load(Ordering::Relaxed),
        );

        // Latency distribution
        let under_1ms = self.latency_under_1ms.load(Ordering::Relaxed);
        let under_10ms = under_1ms + self.latency_under_10ms.load(Ordering::Relaxed);
        let under_100ms = under_10ms + self.latency_under_100ms.load(Ordering::Relaxed);
        let under_1s = under_100ms + self.latency_under_1s.load(Ordering::Relaxed);

        output.push_str("# HELP interest_calc_request_duration Request latency distribution\n");
        output.push_str("# TYPE interest_calc_request_duration histogram\n");
        for (le, count) in [
            ("0.001", under_1ms),
            ("0.01", under_10ms),
            ("0.1", under_100ms),
            ("1", under_1s),
        ] {
            let _ = writeln!(
                output,
                "interest_calc_request_duration_bucket{{le=\"{le}\"}} {count}"
            );
        }
        let _ = writeln!(
            output,
            "interest_calc_request_duration_bucket{{le=\"+Inf\"}} {}",
            self.latency_count.load(Ordering::Relaxed)
        );

        let latency_sum_seconds =
            self.latency_sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
        let _ = writeln!(
            output,
            "interest_calc_request_duration_sum {latency_sum_seconds:.6}"
        );
        let _ = writeln!(
            output,
            "interest_calc_request_duration_count {}\n",
            self.latency_count.load(Ordering::Relaxed)
        );

        output.push_str("# HELP interest_calc_active_clients Clients tracked by the rate limiter\n");
        output.push_str("# TYPE interest_calc_active_clients gauge\n");
        let _ = writeln!(
            output,
            "interest_calc_active_clients {}",
            self.active_clients.load(Ordering::Relaxed)
        );

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
