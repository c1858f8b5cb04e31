use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;

use crate::{
    cache::MovieCache,
    models::{MovieDetailRecord, MovieId, DETAILS_NOT_AVAILABLE},
    services::providers::MetadataProvider,
};

/// Fetches metadata for a batch of movies concurrently, through the cache
///
/// Each movie is fetched on its own task; a semaphore caps how many run at
/// once. The batch returns once every task has finished, with exactly one
/// record per requested movie in the order the movies were requested.
#[derive(Clone)]
pub struct FetchOrchestrator {
    provider: Arc<dyn MetadataProvider>,
    cache: Arc<MovieCache>,
    permits: Arc<Semaphore>,
}

impl FetchOrchestrator {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        cache: Arc<MovieCache>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            provider,
            cache,
            permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn cache(&self) -> &Arc<MovieCache> {
        &self.cache
    }

    /// Fetches one record per movie ID, in input order
    ///
    /// Never fails: fetch errors come back as `Error` records, and a task that
    /// dies before producing a record yields a "Details not available" one.
    pub async fn fetch_all(&self, movie_ids: &[MovieId]) -> Vec<MovieDetailRecord> {
        let start_time = Instant::now();
        tracing::info!(movie_count = movie_ids.len(), "Fetching movie details batch");

        let tasks: Vec<_> = movie_ids
            .iter()
            .map(|&movie_id| {
                let provider = Arc::clone(&self.provider);
                let cache = Arc::clone(&self.cache);
                let permits = Arc::clone(&self.permits);

                tokio::spawn(async move {
                    cache
                        .get_or_fetch(movie_id, |movie_id| async move {
                            // The semaphore is never closed, so acquiring only waits
                            let _permit = permits.acquire_owned().await;
                            MovieDetailRecord::from(provider.fetch_movie(movie_id).await)
                        })
                        .await
                })
            })
            .collect();

        let mut records = Vec::with_capacity(tasks.len());
        let mut error_count = 0;

        for (task, movie_id) in tasks.into_iter().zip(movie_ids) {
            let record = match task.await {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(movie_id, error = %e, "Fetch task join error");
                    MovieDetailRecord::error(DETAILS_NOT_AVAILABLE)
                }
            };

            if record.is_error() {
                error_count += 1;
            }
            records.push(record);
        }

        if error_count > 0 {
            tracing::warn!(
                success_count = records.len() - error_count,
                error_count,
                "Partial movie details fetch failure"
            );
        }

        tracing::info!(
            fetched = records.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Movie details batch completed"
        );

        records
    }
}
