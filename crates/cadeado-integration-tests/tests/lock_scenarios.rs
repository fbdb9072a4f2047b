//! Cross-process lock scenarios, with each `LockManager` standing in for one
//! process instance of a fleet sharing the same store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use cadeado_integration_tests::fleet;
use cadeado_lock::LockManagerConfig;

#[tokio::test(start_paused = true)]
async fn scheduled_publish_contention_scenario() {
    let fleet = fleet(2, LockManagerConfig::default());
    let (process_a, process_b) = (&fleet[0], &fleet[1]);

    // A wins the publishing pass for feed 42
    assert!(process_a.acquire("publish:feed-42", "A-123").await);

    // B burns its whole retry budget against A's lease
    assert!(
        !process_b
            .acquire_with_retry("publish:feed-42", "B-456", 3, Duration::from_millis(100))
            .await
    );
    assert_eq!(process_b.stats().acquire_attempts, 3);
    assert_eq!(process_b.stats().contended, 3);

    // A finishes and releases; B now wins on its first attempt
    assert!(process_a.release("publish:feed-42", "A-123").await);
    assert!(
        process_b
            .acquire_with_retry("publish:feed-42", "B-456", 3, Duration::from_millis(100))
            .await
    );
    assert_eq!(process_b.stats().acquired, 1);

    assert!(process_b.release("publish:feed-42", "B-456").await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_acquires_admit_exactly_one_holder() {
    let fleet = fleet(8, LockManagerConfig::default());
    let wins = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for (i, manager) in fleet.into_iter().enumerate() {
        let wins = wins.clone();
        handles.push(tokio::spawn(async move {
            let token = format!("worker-{}", i);
            if manager.acquire("publish:feed-42", &token).await {
                wins.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(wins.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn crashed_holder_lease_expires() {
    let config = LockManagerConfig {
        lock_timeout_seconds: 1,
        ..Default::default()
    };
    let fleet = fleet(2, config);
    let (crashed, survivor) = (&fleet[0], &fleet[1]);

    assert!(crashed.acquire("publish:feed-42", "A-123").await);
    assert!(!survivor.acquire("publish:feed-42", "B-456").await);

    // The holder never releases; liveness comes from the lease alone
    tokio::time::advance(Duration::from_millis(1100)).await;
    assert!(survivor.acquire("publish:feed-42", "B-456").await);
}

#[tokio::test(start_paused = true)]
async fn stale_holder_cannot_release_the_new_lease() {
    let config = LockManagerConfig {
        lock_timeout_seconds: 1,
        ..Default::default()
    };
    let fleet = fleet(2, config);
    let (stale, current) = (&fleet[0], &fleet[1]);

    assert!(stale.acquire("publish:feed-42", "A-123").await);
    tokio::time::advance(Duration::from_millis(1100)).await;
    assert!(current.acquire("publish:feed-42", "B-456").await);

    // A's lease expired and B re-acquired; A's release must not touch B's lock
    assert!(!stale.release("publish:feed-42", "A-123").await);
    assert!(current.release("publish:feed-42", "B-456").await);
}
