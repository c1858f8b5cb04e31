use std::sync::Arc;

use crate::{catalog::Catalog, services::RecommendationService};

/// Shared application state
///
/// Everything here is immutable after startup; the only mutable structure,
/// the movie cache, lives inside the recommendation service.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, recommender: RecommendationService) -> Self {
        Self {
            catalog,
            recommender: Arc::new(recommender),
        }
    }
}
