//! Unit tests for the in-memory sliding-window limiter

use std::sync::Arc;
use std::time::Duration;

use crate::services::clock::ManualClock;
use crate::services::rate_limit::{MemoryRateLimiter, RateLimiter, SlidingWindow};

fn limiter(rate: u32, interval: Duration) -> (Arc<MemoryRateLimiter>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let limiter = MemoryRateLimiter::with_clock(SlidingWindow::new(interval, rate), clock.clone());
    (Arc::new(limiter), clock)
}

#[tokio::test]
async fn test_admits_exactly_rate_events() {
    let (limiter, _clock) = limiter(5, Duration::from_secs(60));

    for _ in 0..5 {
        assert_eq!(limiter.limit("sms").await, Ok(false));
    }
    assert_eq!(limiter.limit("sms").await, Ok(true));
    assert_eq!(limiter.limit("sms").await, Ok(true));
}

#[tokio::test]
async fn test_capacity_frees_as_oldest_event_ages_out() {
    let (limiter, clock) = limiter(3, Duration::from_secs(10));

    assert_eq!(limiter.limit("sms").await, Ok(false));
    clock.advance(Duration::from_secs(2));
    assert_eq!(limiter.limit("sms").await, Ok(false));
    assert_eq!(limiter.limit("sms").await, Ok(false));
    assert_eq!(limiter.limit("sms").await, Ok(true));

    // One millisecond short of the first event leaving the window
    clock.advance(Duration::from_millis(7_999));
    assert_eq!(limiter.limit("sms").await, Ok(true));

    clock.advance(Duration::from_millis(1));
    assert_eq!(limiter.limit("sms").await, Ok(false));
    assert_eq!(limiter.limit("sms").await, Ok(true));
}

#[tokio::test]
async fn test_rejected_calls_are_not_recorded() {
    let (limiter, clock) = limiter(1, Duration::from_secs(10));

    assert_eq!(limiter.limit("sms").await, Ok(false));
    clock.advance(Duration::from_secs(5));
    assert_eq!(limiter.limit("sms").await, Ok(true));

    clock.advance(Duration::from_secs(5));
    assert_eq!(limiter.limit("sms").await, Ok(false));
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (limiter, _clock) = limiter(1, Duration::from_secs(60));

    assert_eq!(limiter.limit("sms").await, Ok(false));
    assert_eq!(limiter.limit("email").await, Ok(false));
    assert_eq!(limiter.limit("sms").await, Ok(true));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_never_over_admit() {
    let rate = 10;
    let (limiter, _clock) = limiter(rate, Duration::from_secs(60));

    let handles: Vec<_> = (0..rate + 5)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.limit("sms").await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if !handle.await.unwrap().unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, rate);
}

#[tokio::test]
async fn test_idle_keys_are_dropped() {
    let (limiter, clock) = limiter(2, Duration::from_secs(10));
    for key in ["sms:a", "sms:b", "sms:c"] {
        assert_eq!(limiter.limit(key).await, Ok(false));
    }
    assert_eq!(limiter.tracked_keys().await, 3);

    clock.advance(Duration::from_secs(10));
    assert_eq!(limiter.limit("sms:d").await, Ok(false));
    assert_eq!(limiter.tracked_keys().await, 1);
}
