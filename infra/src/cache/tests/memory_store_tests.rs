//! Unit tests for the in-memory OTP store

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use ilon_core::domain::{OtpCode, OtpEntry, PhoneNumber};
use ilon_core::services::otp::{ConsumeOutcome, OtpStoreTrait};

use crate::cache::InMemoryOtpStore;

const TTL: Duration = Duration::from_secs(300);

fn phone() -> PhoneNumber {
    PhoneNumber::create("+237612345678").unwrap()
}

fn entry(code: &str) -> OtpEntry {
    OtpEntry::new(
        phone(),
        OtpCode::from_stored(code),
        Utc::now(),
        chrono::Duration::seconds(TTL.as_secs() as i64),
    )
}

#[tokio::test]
async fn test_set_then_get() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();

    let stored = store.get(&phone()).await.unwrap().expect("entry should exist");
    assert_eq!(stored.code.as_str(), "123456");
    assert_eq!(stored.phone_number.value(), "+237612345678");
    assert_eq!(stored.attempts, 0);
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("111111"), TTL).await.unwrap();
    store.set(&entry("222222"), TTL).await.unwrap();

    let stored = store.get(&phone()).await.unwrap().unwrap();
    assert_eq!(stored.code.as_str(), "222222");
    assert_eq!(store.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();

    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(store.get(&phone()).await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(store.get(&phone()).await.unwrap().is_none());
    // Lazy expiry drops the entry on read
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_delete() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();
    store.delete(&phone()).await.unwrap();
    assert!(store.get(&phone()).await.unwrap().is_none());

    // Deleting nothing is fine
    store.delete(&phone()).await.unwrap();
}

#[tokio::test]
async fn test_consume_match_is_single_use() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();

    assert_eq!(
        store.consume(&phone(), "123456", 3).await.unwrap(),
        ConsumeOutcome::Matched
    );
    assert_eq!(
        store.consume(&phone(), "123456", 3).await.unwrap(),
        ConsumeOutcome::Absent
    );
}

#[tokio::test]
async fn test_consume_counts_attempts() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();

    assert_eq!(
        store.consume(&phone(), "000000", 3).await.unwrap(),
        ConsumeOutcome::Mismatched { remaining_attempts: 2 }
    );
    assert_eq!(store.get(&phone()).await.unwrap().unwrap().attempts, 1);
    assert_eq!(
        store.consume(&phone(), "000000", 3).await.unwrap(),
        ConsumeOutcome::Mismatched { remaining_attempts: 1 }
    );
    assert_eq!(
        store.consume(&phone(), "000000", 3).await.unwrap(),
        ConsumeOutcome::Exhausted
    );
    assert_eq!(
        store.consume(&phone(), "123456", 3).await.unwrap(),
        ConsumeOutcome::Absent
    );
}

#[tokio::test]
async fn test_overwrite_resets_attempts() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();
    store.consume(&phone(), "000000", 3).await.unwrap();
    store.consume(&phone(), "000000", 3).await.unwrap();

    store.set(&entry("654321"), TTL).await.unwrap();
    assert_eq!(
        store.consume(&phone(), "000000", 3).await.unwrap(),
        ConsumeOutcome::Mismatched { remaining_attempts: 2 }
    );
}

#[tokio::test(start_paused = true)]
async fn test_consume_expired_is_absent() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), TTL).await.unwrap();

    tokio::time::advance(TTL).await;
    assert_eq!(
        store.consume(&phone(), "123456", 3).await.unwrap(),
        ConsumeOutcome::Absent
    );
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired() {
    let store = InMemoryOtpStore::new();
    store.set(&entry("123456"), Duration::from_secs(10)).await.unwrap();
    let other = OtpEntry::new(
        PhoneNumber::create("+33612345678").unwrap(),
        OtpCode::from_stored("999999"),
        Utc::now(),
        chrono::Duration::minutes(5),
    );
    store.set(&other, TTL).await.unwrap();

    tokio::time::advance(Duration::from_secs(11)).await;
    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_purge_task_sweeps_in_background() {
    let store = Arc::new(InMemoryOtpStore::new());
    let handle = InMemoryOtpStore::spawn_purge_task(&store, Duration::from_secs(60));
    store.set(&entry("123456"), Duration::from_secs(10)).await.unwrap();

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(store.is_empty().await);

    drop(store);
    tokio::time::sleep(Duration::from_secs(61)).await;
    assert!(handle.is_finished());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consume_matches_once() {
    let store = Arc::new(InMemoryOtpStore::new());
    store.set(&entry("123456"), TTL).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.consume(&phone(), "123456", 3).await.unwrap()
        }));
    }

    let mut matched = 0;
    for handle in handles {
        if handle.await.unwrap() == ConsumeOutcome::Matched {
            matched += 1;
        }
    }
    assert_eq!(matched, 1);
}
