/// Movie metadata provider abstraction
///
/// A provider turns a catalog identifier into display-ready movie details.
/// TMDB is the only provider today; the trait is the seam the fetch
/// orchestrator and tests work against.
use crate::{
    error::AppResult,
    models::{MovieDetails, MovieId},
};
use std::{future::Future, time::Duration};

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch details and credits for one movie
    ///
    /// Implementations own their retry behaviour; an `Err` here is final.
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempts run out. The last error is returned.
    ///
    /// The delay is an async sleep, so only the calling task waits.
    pub async fn run<T, F, Fut>(&self, movie_id: MovieId, mut operation: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tracing::warn!(
                        movie_id,
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "Metadata fetch failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(movie_id, attempt, error = %e, "Metadata fetch failed");
                    return Err(e);
                }
            }
        }
    }
}
