use super::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio::time::timeout;

#[tokio::test]
async fn multiple_readers_run_concurrently() {
    let lock = Arc::new(AsyncRwLock::new(0));
    let a = lock.read().await;
    let b = lock.read().await;
    assert_eq!(*a, 0);
    assert_eq!(*b, 0);
}

#[tokio::test]
async fn writer_excludes_readers() {
    let lock = Arc::new(AsyncRwLock::new(0));
    let guard = lock.write().await;
    let lock2 = Arc::clone(&lock);
    let read_attempt = tokio::spawn(async move {
        timeout(Duration::from_millis(50), lock2.read()).await
    });
    // The reader should not be able to acquire while the writer holds the lock.
    assert!(read_attempt.await.expect("task panicked").is_err());
    drop(guard);
}

#[tokio::test]
async fn writer_waits_for_readers_to_release() {
    let lock = Arc::new(AsyncRwLock::new(0));
    let read_guard = lock.read().await;

    let lock2 = Arc::clone(&lock);
    let writer = tokio::spawn(async move {
        *lock2.write().await = 1;
    });

    sleep(Duration::from_millis(20)).await;
    drop(read_guard);

    writer.await.expect("writer task panicked");
    assert_eq!(*lock.read().await, 1);
}

#[tokio::test]
async fn reader_queued_after_a_waiting_writer_does_not_jump_ahead_of_it() {
    let lock = Arc::new(AsyncRwLock::new(0));
    let r1 = lock.read().await;

    let lock2 = Arc::clone(&lock);
    let writer = tokio::spawn(async move {
        *lock2.write().await = 1;
    });
    sleep(Duration::from_millis(20)).await;

    let lock3 = Arc::clone(&lock);
    let r2_attempt = tokio::spawn(async move { timeout(Duration::from_millis(50), lock3.read()).await });
    // r2 queued after the writer is already waiting on r1; it must not be
    // granted ahead of the writer just because r1 still holds a read guard.
    assert!(r2_attempt.await.expect("task panicked").is_err());

    drop(r1);
    writer.await.expect("writer task panicked");
    assert_eq!(*lock.read().await, 1);
}

#[tokio::test]
async fn write_guard_allows_mutation() {
    let lock = AsyncRwLock::new(vec![1, 2, 3]);
    {
        let mut guard = lock.write().await;
        guard.push(4);
    }
    assert_eq!(*lock.read().await, vec![1, 2, 3, 4]);
}
