use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use reelmatch_api::{
    api::{create_router, AppState},
    cache::MovieCache,
    catalog::Catalog,
    config::Config,
    services::{
        providers::tmdb::{ReqwestTransport, TmdbProvider},
        FetchOrchestrator, RecommendationService, RetryPolicy, SimilarityRanker,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    if config.tmdb_api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        tracing::warn!("TMDB_API_KEY is not set; movie details will be unavailable");
    }

    // Catalog and similarity matrix must load before serving anything
    let catalog = Arc::new(
        Catalog::load(&config.catalog_path, &config.similarity_path)
            .context("Failed to load movie catalog")?,
    );

    let transport = ReqwestTransport::new(config.request_timeout())
        .context("Failed to build HTTP client")?;
    let provider = TmdbProvider::new(
        Arc::new(transport),
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_image_base_url.clone(),
        config.tmdb_language.clone(),
        RetryPolicy::new(config.fetch_max_attempts, config.retry_delay()),
    );

    let fetcher = FetchOrchestrator::new(
        Arc::new(provider),
        Arc::new(MovieCache::new()),
        config.fetch_concurrency,
    );
    let ranker = SimilarityRanker::new(catalog.clone(), config.recommendation_count);

    let state = AppState::new(catalog, RecommendationService::new(ranker, fetcher));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        address = %addr,
        fetch_concurrency = config.fetch_concurrency,
        max_attempts = config.fetch_max_attempts,
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
