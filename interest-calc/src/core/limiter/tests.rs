use super::*;
use std::time::UNIX_EPOCH;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_700_000_000 + secs)
}

fn limiter(limit: usize, window_secs: u64) -> SlidingWindowLimiter {
    SlidingWindowLimiter::with_config(RateLimitConfig::new(limit, window_secs))
}

#[test]
fn test_default_config() {
    let limiter = SlidingWindowLimiter::new();
    assert_eq!(limiter.config(), RateLimitConfig::new(30, 60));
    assert!(limiter.is_empty());
}

#[test]
fn test_limit_within_window() {
    let mut limiter = limiter(30, 60);

    // 30 requests spread over 59 seconds are all admitted
    for i in 0..30 {
        let decision = limiter.check("client", at(i * 2));
        assert!(decision.allowed, "request {} should be admitted", i + 1);
        assert_eq!(decision.remaining, 30 - (i as usize + 1));
        assert_eq!(decision.retry_after, Duration::ZERO);
    }

    // The 31st inside the same span is rejected
    let decision = limiter.check("client", at(59));
    assert!(!decision.allowed);
    assert_eq!(decision.remaining, 0);
    assert_eq!(decision.limit, 30);
    assert_eq!(decision.retry_after, Duration::from_secs(1));
}

#[test]
fn test_admitted_again_after_window() {
    let mut limiter = limiter(30, 60);

    for _ in 0..30 {
        assert!(limiter.check("client", at(0)).allowed);
    }
    assert!(!limiter.check("client", at(30)).allowed);

    // Exactly one window after the first call the burst has expired
    let decision = limiter.check("client", at(60));
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 29);
}

#[test]
fn test_window_slides() {
    let mut limiter = limiter(2, 10);

    assert!(limiter.check("client", at(0)).allowed);
    assert!(limiter.check("client", at(5)).allowed);
    assert!(!limiter.check("client", at(9)).allowed);

    // Only the first request has left the window
    assert!(limiter.check("client", at(10)).allowed);
    let decision = limiter.check("client", at(11));
    assert!(!decision.allowed);
    assert_eq!(decision.retry_after, Duration::from_secs(4));
}

#[test]
fn test_rejections_are_not_recorded() {
    let mut limiter = limiter(1, 10);

    assert!(limiter.check("client", at(0)).allowed);
    // Hammering while limited must not extend the block
    for s in 1..10 {
        assert!(!limiter.check("client", at(s)).allowed);
    }
    assert!(limiter.check("client", at(10)).allowed);
}

#[test]
fn test_clients_are_independent() {
    let mut limiter = limiter(2, 60);

    assert!(limiter.check("10.0.0.1", at(0)).allowed);
    assert!(limiter.check("10.0.0.1", at(0)).allowed);
    assert!(!limiter.check("10.0.0.1", at(0)).allowed);

    assert!(limiter.check("10.0.0.2", at(0)).allowed);
    assert_eq!(limiter.len(), 2);
}

#[test]
fn test_zero_limit_rejects_everything() {
    let mut limiter = limiter(0, 60);
    let decision = limiter.check("client", at(0));
    assert!(!decision.allowed);
    assert_eq!(decision.retry_after, Duration::from_secs(60));
}

#[test]
fn test_out_of_order_timestamps() {
    let mut limiter = limiter(2, 10);

    assert!(limiter.check("client", at(20)).allowed);
    // A caller with a slower clock still counts against the same window
    assert!(limiter.check("client", at(15)).allowed);
    assert!(!limiter.check("client", at(21)).allowed);
    // At 25 the entry from 15 has expired, the one from 20 has not
    assert!(limiter.check("client", at(25)).allowed);
}

#[test]
fn test_idle_clients_are_evicted() {
    let mut limiter = SlidingWindowLimiter::builder()
        .limit(5)
        .window(Duration::from_secs(10))
        .cleanup_interval(Duration::from_secs(30))
        .build();

    for i in 0..100 {
        limiter.check(&format!("client:{i}"), at(0));
    }
    assert_eq!(limiter.len(), 100);

    // Before the sweep is due nothing is dropped
    limiter.check("late", at(20));
    assert_eq!(limiter.len(), 101);
    assert_eq!(limiter.evicted_count(), 0);

    // At 30s every client from t=0 and t=20 is idle; "fresh" is re-added afterwards
    limiter.check("fresh", at(30));
    assert_eq!(limiter.evicted_count(), 101);
    assert_eq!(limiter.len(), 1);
}

#[test]
fn test_active_clients_survive_sweep() {
    let mut limiter = SlidingWindowLimiter::builder()
        .limit(5)
        .window(Duration::from_secs(60))
        .cleanup_interval(Duration::from_secs(10))
        .build();

    limiter.check("active", at(0));
    limiter.check("idle", at(0));
    limiter.check("active", at(55));

    limiter.check("other", at(70));
    assert_eq!(limiter.evicted_count(), 1);
    assert_eq!(limiter.len(), 2);

    // The surviving client keeps its recent request in the window
    let decision = limiter.check("active", at(71));
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 3);
}
