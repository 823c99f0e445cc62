//! Integration Tests for the Expiring Cache
//!
//! Exercises the public cache API together with its reaper: expiry timing
//! on a paused clock, shutdown, and concurrent access from many threads.

use std::sync::Arc;
use std::time::Duration;

use pokedex::{CacheError, ExpiringCache};

// == Expiry ==

#[tokio::test(start_paused = true)]
async fn test_entry_disappears_after_two_sweep_periods() {
    let cache = ExpiringCache::new(Duration::from_millis(100)).unwrap();

    cache.add("k", b"v".to_vec()).unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(cache.get("k"), Some(b"v".to_vec()));

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(cache.get("k"), None);

    cache.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_entry_survives_sweep_before_its_ttl() {
    let ttl = Duration::from_millis(100);
    let cache = ExpiringCache::new(ttl).unwrap();

    // Added at t=50, so the sweep at t=100 sees an age of 50ms
    tokio::time::sleep(Duration::from_millis(50)).await;
    cache.add("late", b"v".to_vec()).unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(cache.get("late"), Some(b"v".to_vec()), "still present at t=150");

    // The sweep at t=200 sees an age of 150ms
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(cache.get("late"), None, "gone after the t=200 sweep");

    cache.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_replacing_an_entry_restarts_its_age() {
    let ttl = Duration::from_millis(100);
    let cache = ExpiringCache::new(ttl).unwrap();

    cache.add("k", b"old".to_vec()).unwrap();
    tokio::time::sleep(Duration::from_millis(90)).await;
    cache.add("k", b"new".to_vec()).unwrap();

    // Sweep at t=100 sees the replacement at age 10ms
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(cache.get("k"), Some(b"new".to_vec()));
    assert_eq!(cache.len(), 1);

    cache.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_stale_entry_is_served_until_swept() {
    let cache = ExpiringCache::new(Duration::from_millis(100)).unwrap();

    // Added at t=1, it passes its TTL at t=101 but the next sweep is at t=200
    tokio::time::sleep(Duration::from_millis(1)).await;
    cache.add("k", b"v".to_vec()).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(cache.get("k"), Some(b"v".to_vec()));

    cache.shutdown().await;
}

// == Input Validation ==

#[tokio::test]
async fn test_invalid_inserts_are_rejected_without_effect() {
    let cache = ExpiringCache::new(Duration::from_secs(60)).unwrap();
    cache.add("k", b"v".to_vec()).unwrap();

    assert_eq!(
        cache.add("", b"other".to_vec()),
        Err(CacheError::InvalidInput("key is empty".to_string()))
    );
    assert!(matches!(cache.add("k", Vec::new()), Err(CacheError::InvalidInput(_))));

    assert_eq!(cache.get("k"), Some(b"v".to_vec()));
    assert_eq!(cache.get(""), None);
    assert_eq!(cache.len(), 1);

    cache.shutdown().await;
}

// == Lifecycle ==

#[tokio::test]
async fn test_shutdown_is_prompt_with_long_ttl() {
    let cache = ExpiringCache::new(Duration::from_secs(3600)).unwrap();
    assert!(cache.is_running());

    tokio::time::timeout(Duration::from_secs(1), cache.shutdown())
        .await
        .expect("shutdown should not wait for the sweep period");
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_add_and_get_never_tear() {
    const THREADS: usize = 8;
    const ITERATIONS: usize = 2_000;

    // Short TTL so the reaper sweeps while the threads run
    let cache = Arc::new(ExpiringCache::new(Duration::from_millis(2)).unwrap());

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            let cache = &cache;
            scope.spawn(move || {
                for i in 0..ITERATIONS {
                    let shared_key = format!("shared-{}", i % 16);
                    let own_key = format!("own-{}-{}", thread, i % 32);

                    for key in [&shared_key, &own_key] {
                        let value = format!("{}|{}|{}", key, thread, i);
                        cache.add(key.as_str(), value.into_bytes()).unwrap();

                        if let Some(bytes) = cache.get(key) {
                            let text = String::from_utf8(bytes).expect("payload is intact utf-8");
                            let mut parts = text.split('|');
                            assert_eq!(parts.next(), Some(key.as_str()), "value belongs to key");
                            let writer: usize = parts.next().unwrap().parse().unwrap();
                            let iteration: usize = parts.next().unwrap().parse().unwrap();
                            assert!(writer < THREADS);
                            assert!(iteration < ITERATIONS);
                            assert!(parts.next().is_none());
                        }
                    }
                }
            });
        }
    });

    let stats = cache.stats();
    assert_eq!(stats.insertions, (THREADS * ITERATIONS * 2) as u64);
    assert_eq!(stats.hits + stats.misses, (THREADS * ITERATIONS * 2) as u64);

    let cache = Arc::try_unwrap(cache).expect("threads released the cache");
    cache.shutdown().await;
}
