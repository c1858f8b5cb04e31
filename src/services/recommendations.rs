use crate::{
    error::AppError,
    models::{MovieDetails, MOVIE_NOT_FOUND},
    services::{fetcher::FetchOrchestrator, ranker::SimilarityRanker},
};

/// Generates display-ready recommendations for a selected title
///
/// Ranks the catalog by similarity to the title, fetches metadata for the
/// top candidates, and maps every outcome to a record the presentation layer
/// can render. Nothing here fails: an unknown title yields a single
/// "Movie not found" placeholder, and a failed fetch yields a
/// "Details not available" placeholder in that candidate's slot.
#[derive(Clone)]
pub struct RecommendationService {
    ranker: SimilarityRanker,
    fetcher: FetchOrchestrator,
}

impl RecommendationService {
    pub fn new(ranker: SimilarityRanker, fetcher: FetchOrchestrator) -> Self {
        Self { ranker, fetcher }
    }

    pub async fn recommend(&self, title: &str) -> Vec<MovieDetails> {
        let candidates = match self.ranker.recommend_candidates(title) {
            Ok(candidates) => candidates,
            Err(AppError::NotFound(msg)) => {
                tracing::info!(title = %title, "{}", msg);
                return vec![MovieDetails::placeholder(MOVIE_NOT_FOUND)];
            }
            Err(e) => {
                tracing::error!(title = %title, error = %e, "Ranking failed");
                return vec![MovieDetails::placeholder(MOVIE_NOT_FOUND)];
            }
        };

        let recommendations: Vec<MovieDetails> = self
            .fetcher
            .fetch_all(&candidates)
            .await
            .into_iter()
            .map(|record| record.into_display())
            .collect();

        tracing::info!(
            title = %title,
            recommendations = recommendations.len(),
            "Recommendations generated"
        );

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::MovieCache,
        catalog::Catalog,
        models::{CatalogEntry, MovieId, DETAILS_NOT_AVAILABLE},
        services::providers::MockMetadataProvider,
    };
    use std::sync::Arc;

    fn details(movie_id: MovieId) -> MovieDetails {
        MovieDetails {
            title: format!("Movie {}", movie_id),
            rating: "7.0".to_string(),
            ..MovieDetails::placeholder("")
        }
    }

    fn service(provider: MockMetadataProvider) -> RecommendationService {
        let entries = [(1, "A"), (2, "B"), (3, "C")]
            .into_iter()
            .map(|(movie_id, title)| CatalogEntry {
                movie_id,
                title: title.to_string(),
            })
            .collect();
        let catalog = Catalog::new(
            entries,
            vec![
                vec![1.0, 0.9, 0.3],
                vec![0.9, 1.0, 0.1],
                vec![0.3, 0.1, 1.0],
            ],
        )
        .unwrap();

        RecommendationService::new(
            SimilarityRanker::new(Arc::new(catalog), 5),
            FetchOrchestrator::new(Arc::new(provider), Arc::new(MovieCache::new()), 4),
        )
    }

    #[tokio::test]
    async fn test_recommend_returns_details_in_rank_order() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_movie()
            .times(2)
            .returning(|movie_id| Ok(details(movie_id)));

        let recommendations = service(provider).recommend("A").await;

        assert_eq!(recommendations, vec![details(2), details(3)]);
    }

    #[tokio::test]
    async fn test_unknown_title_returns_single_placeholder() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_movie().times(0);

        let recommendations = service(provider).recommend("Z").await;

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0], MovieDetails::placeholder("Movie not found"));
    }

    #[tokio::test]
    async fn test_failed_fetch_becomes_details_not_available() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_movie().returning(|movie_id| {
            if movie_id == 3 {
                Err(AppError::Transport("Failed after 3 attempts".to_string()))
            } else {
                Ok(details(movie_id))
            }
        });

        let recommendations = service(provider).recommend("A").await;

        assert_eq!(
            recommendations,
            vec![details(2), MovieDetails::placeholder(DETAILS_NOT_AVAILABLE)]
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_yield_placeholders_for_every_candidate() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_movie()
            .returning(|_| Err(AppError::MissingCredentials));

        let recommendations = service(provider).recommend("B").await;

        assert_eq!(recommendations.len(), 2);
        assert!(recommendations
            .iter()
            .all(|r| r.title == DETAILS_NOT_AVAILABLE && r.poster_url.is_empty()));
    }
}
