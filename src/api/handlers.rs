use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{CatalogEntry, MovieDetails, MovieId},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub movie_id: MovieId,
    pub title: String,
}

impl From<&CatalogEntry> for TitleResponse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            movie_id: entry.movie_id,
            title: entry.title.clone(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List every catalog title, in catalog order
pub async fn get_titles(State(state): State<AppState>) -> Json<Vec<TitleResponse>> {
    let titles = state
        .catalog
        .entries()
        .iter()
        .map(TitleResponse::from)
        .collect();
    Json(titles)
}

/// Recommend movies similar to the selected title
///
/// Always answers with display records: an unknown title, blank ones
/// included, produces a single "Movie not found" record rather than an
/// error status.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Vec<MovieDetails>>> {
    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend(&request.title).await;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendation request completed"
    );

    Ok(Json(recommendations))
}
