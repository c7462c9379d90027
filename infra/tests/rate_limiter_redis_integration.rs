//! Integration tests for the Redis-backed sliding-window rate limiter
//!
//! These tests require Redis to be running locally on port 6379.
//! Run with: cargo test --test rate_limiter_redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use bb_core::services::rate_limit::{RateLimiter, SlidingWindow};
use bb_infra::cache::{CacheConfig, RedisClient};
use bb_infra::services::RedisRateLimiter;

async fn create_limiter(interval: Duration, rate: u32) -> (Arc<RedisRateLimiter>, Arc<RedisClient>) {
    let config = CacheConfig::new("redis://localhost:6379").with_prefix("bb_test");
    let client = Arc::new(
        RedisClient::new(config)
            .await
            .expect("Failed to create Redis client"),
    );
    let limiter = RedisRateLimiter::new(client.clone(), SlidingWindow::new(interval, rate));
    (Arc::new(limiter), client)
}

fn random_key() -> String {
    format!("sms-test-{}", rand::random::<u32>())
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_rate_boundary() {
    let (limiter, client) = create_limiter(Duration::from_secs(60), 5).await;
    let key = random_key();

    for i in 1..=5 {
        assert!(!limiter.limit(&key).await.unwrap(), "Request {} should be admitted", i);
    }
    assert!(limiter.limit(&key).await.unwrap(), "Sixth request should be limited");

    client.delete(&limiter.window_key(&key)).await.unwrap();
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_capacity_returns_after_interval() {
    let (limiter, _client) = create_limiter(Duration::from_millis(500), 2).await;
    let key = random_key();

    assert!(!limiter.limit(&key).await.unwrap());
    assert!(!limiter.limit(&key).await.unwrap());
    assert!(limiter.limit(&key).await.unwrap());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!limiter.limit(&key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis to be running
async fn test_window_key_expires() {
    let (limiter, client) = create_limiter(Duration::from_secs(30), 3).await;
    let key = random_key();

    limiter.limit(&key).await.unwrap();
    let ttl = client.pttl(&limiter.window_key(&key)).await.unwrap();
    assert!(ttl > 0 && ttl <= 30_000, "unexpected ttl {}", ttl);

    client.delete(&limiter.window_key(&key)).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore] // Requires Redis to be running
async fn test_concurrent_calls_never_over_admit() {
    let rate = 10;
    let (limiter, client) = create_limiter(Duration::from_secs(60), rate).await;
    let key = random_key();

    let handles: Vec<_> = (0..rate + 5)
        .map(|_| {
            let limiter = limiter.clone();
            let key = key.clone();
            tokio::spawn(async move { limiter.limit(&key).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        if !handle.await.unwrap().unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, rate);

    client.delete(&limiter.window_key(&key)).await.unwrap();
}
