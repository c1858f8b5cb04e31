use dashmap::DashMap;
use std::{future::Future, sync::Arc};
use tokio::sync::OnceCell;

use crate::models::{MovieDetailRecord, MovieId};

/// In-process cache of metadata fetch outcomes, keyed by movie ID
///
/// Entries live for the lifetime of the process and are never evicted.
/// Failed fetches are cached too, so each movie gets at most one fetch cycle.
///
/// Lookups are single-flight: concurrent callers for the same movie share one
/// in-flight fetch and all observe its result. Callers for different movies
/// never wait on each other.
#[derive(Debug, Default)]
pub struct MovieCache {
    entries: DashMap<MovieId, Arc<OnceCell<MovieDetailRecord>>>,
}

impl MovieCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record for `movie_id`, fetching it with `fetch` on first use
    pub async fn get_or_fetch<F, Fut>(&self, movie_id: MovieId, fetch: F) -> MovieDetailRecord
    where
        F: FnOnce(MovieId) -> Fut,
        Fut: Future<Output = MovieDetailRecord>,
    {
        // Clone the cell out so the shard lock is released before awaiting
        let cell = Arc::clone(&self.entries.entry(movie_id).or_default());

        if let Some(record) = cell.get() {
            tracing::debug!(movie_id, "Cache hit");
            return record.clone();
        }

        tracing::debug!(movie_id, "Cache miss");

        cell.get_or_init(|| fetch(movie_id)).await.clone()
    }

    /// Returns the cached record without fetching
    pub fn peek(&self, movie_id: MovieId) -> Option<MovieDetailRecord> {
        self.entries
            .get(&movie_id)
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of movies with a completed fetch
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieDetails;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn details(title: &str) -> MovieDetailRecord {
        MovieDetailRecord::Details(MovieDetails::placeholder(title))
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let cache = MovieCache::new();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_fetch(1, |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                details("Inception")
            })
            .await;
        let second = cache
            .get_or_fetch(1, |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                details("Something Else")
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_cached() {
        let cache = MovieCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let record = cache
                .get_or_fetch(7, |_| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    MovieDetailRecord::error("Failed to fetch data: timed out")
                })
                .await;
            assert!(record.is_error());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.peek(7),
            Some(MovieDetailRecord::error("Failed to fetch data: timed out"))
        );
    }

    #[tokio::test]
    async fn test_fetch_receives_requested_id() {
        let cache = MovieCache::new();

        let record = cache
            .get_or_fetch(42, |id| async move { details(&format!("movie {}", id)) })
            .await;

        assert_eq!(record, details("movie 42"));
    }

    #[tokio::test]
    async fn test_distinct_ids_are_fetched_separately() {
        let cache = MovieCache::new();

        cache.get_or_fetch(1, |_| async { details("A") }).await;
        cache.get_or_fetch(2, |_| async { details("B") }).await;

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek(1), Some(details("A")));
        assert_eq!(cache.peek(2), Some(details("B")));
        assert_eq!(cache.peek(3), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_requests_fetch_once() {
        let cache = Arc::new(MovieCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_fetch(99, |_| async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            details("Heat")
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), details("Heat"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = MovieCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.peek(1), None);
    }
}
