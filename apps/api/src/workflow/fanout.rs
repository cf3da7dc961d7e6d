//! Bounded-concurrency fan-out for per-item stage work.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};

/// Runs `task` over every item with at most `limit` tasks in flight.
///
/// Results come back in input order regardless of completion order. A panicking
/// task yields `Err(JoinError)` in its own slot and does not disturb its siblings.
/// Dropping the returned future aborts every task still running.
pub async fn fan_out<T, R, F, Fut>(items: Vec<T>, limit: usize, task: F) -> Vec<Result<R, JoinError>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.clamp(1, Semaphore::MAX_PERMITS)));
    let mut tasks = AbortOnDrop(Vec::with_capacity(items.len()));

    for item in items {
        let semaphore = semaphore.clone();
        let work = task(item);
        tasks.0.push(tokio::spawn(async move {
            // The semaphore is never closed, so the permit is always granted.
            let _permit = semaphore.acquire_owned().await;
            work.await
        }));
    }

    let mut results = Vec::with_capacity(tasks.0.len());
    for handle in tasks.0.iter_mut() {
        results.push(handle.await);
    }
    results
}

/// Owns spawned tasks so an abandoned fan-out does not keep calling the model.
struct AbortOnDrop<R>(Vec<JoinHandle<R>>);

impl<R> Drop for AbortOnDrop<R> {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_keep_input_order() {
        // Later items finish first.
        let results = fan_out(vec![30u64, 20, 10, 0], 4, |delay| async move {
            tokio::time::sleep(Duration::from_millis(delay)).await;
            delay
        })
        .await;

        let values: Vec<u64> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![30, 20, 10, 0]);
    }

    #[tokio::test]
    async fn test_in_flight_tasks_never_exceed_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let results = fan_out((0..10).collect::<Vec<u32>>(), 3, |_| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(results.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let results = fan_out(vec![1, 2, 3], 2, |n| async move {
            if n == 2 {
                panic!("bad item");
            }
            n * 10
        })
        .await;

        assert_eq!(*results[0].as_ref().unwrap(), 10);
        assert!(results[1].is_err());
        assert_eq!(*results[2].as_ref().unwrap(), 30);
    }

    #[tokio::test]
    async fn test_limit_above_semaphore_capacity_is_clamped() {
        let results = fan_out(vec![1, 2, 3], usize::MAX, |n| async move { n + 1 }).await;
        let values: Vec<i32> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_fan_out_aborts_remaining_tasks() {
        let finished = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            fan_out(vec![10u64, 10, 10], 1, |secs| {
                let finished = finished.clone();
                async move {
                    tokio::time::sleep(Duration::from_secs(secs)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                }
            }),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }
}
