// src/batch.rs
// =============================================================================
// Running one job per repository with bounded concurrency.
//
// Each repository is independent: no shared state, no ordering between
// them. We run up to `concurrency` jobs at once with buffer_unordered and
// key every result by the item it came from, since completion order is
// arbitrary.
// =============================================================================

use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

/// Runs `job` for every key, at most `concurrency` at a time
///
/// Results come back in completion order, paired with their key.
pub async fn run_bounded<K, T, F, Fut>(keys: Vec<K>, concurrency: usize, job: F) -> Vec<(K, T)>
where
    K: Clone,
    F: Fn(K) -> Fut,
    Fut: Future<Output = T>,
{
    let futures = keys.into_iter().map(|key| {
        let fut = job(key.clone());
        async move { (key, fut.await) }
    });

    stream::iter(futures)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Same as `run_bounded`, aggregated into a map
pub async fn run_bounded_map<K, T, F, Fut>(keys: Vec<K>, concurrency: usize, job: F) -> HashMap<K, T>
where
    K: Clone + Eq + Hash,
    F: Fn(K) -> Fut,
    Fut: Future<Output = T>,
{
    run_bounded(keys, concurrency, job).await.into_iter().collect()
}

/// Fixed courtesy pause for sequential API sweeps
///
/// Sleeps after every `every`-th call (1-based `index`). `every == 0`
/// disables pausing.
pub async fn courtesy_pause(index: usize, every: usize, pause: Duration) {
    if every > 0 && index > 0 && index % every == 0 {
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_results_keyed_by_input() {
        let results = run_bounded_map(vec![1u32, 2, 3, 4], 2, |n| async move {
            // later keys finish first
            tokio::time::sleep(Duration::from_millis(u64::from(5 - n) * 5)).await;
            n * 10
        })
        .await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[&3], 30);
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let keys: Vec<usize> = (0..12).collect();
        let results = run_bounded(keys, 3, |_| {
            let running = running.clone();
            let peak = peak.clone();
            async move {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(results.len(), 12);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_courtesy_pause() {
        let pause = Duration::from_millis(50);

        let start = std::time::Instant::now();
        courtesy_pause(3, 10, pause).await;
        courtesy_pause(10, 0, pause).await;
        assert!(start.elapsed() < pause);

        courtesy_pause(10, 10, pause).await;
        assert!(start.elapsed() >= pause);
    }
}
