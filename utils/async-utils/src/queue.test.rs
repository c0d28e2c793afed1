use super::*;
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn drains_in_push_order_regardless_of_completion_order() {
    let mut queue = OrderedFutures::new();
    queue.push(async {
        sleep(Duration::from_millis(30)).await;
        1
    });
    queue.push(async {
        sleep(Duration::from_millis(5)).await;
        2
    });
    queue.push(async { 3 });

    assert_eq!(queue.drain().await, vec![1, 2, 3]);
}

#[tokio::test]
async fn empty_queue_drains_to_empty_vec() {
    let mut queue: OrderedFutures<i32> = OrderedFutures::new();
    assert!(queue.drain().await.is_empty());
}

#[tokio::test]
async fn len_tracks_unrained_items() {
    let mut queue = OrderedFutures::new();
    assert_eq!(queue.len(), 0);
    queue.push(async { 1 });
    queue.push(async { 2 });
    assert_eq!(queue.len(), 2);
    queue.drain().await;
    assert_eq!(queue.len(), 0);
}

#[tokio::test]
async fn queue_can_be_reused_after_drain() {
    let mut queue = OrderedFutures::new();
    queue.push(async { 1 });
    assert_eq!(queue.drain().await, vec![1]);

    queue.push(async { 2 });
    assert_eq!(queue.drain().await, vec![2]);
}
