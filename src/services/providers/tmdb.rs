/// TMDB metadata provider
///
/// Each movie needs two calls, made in order:
/// 1. Details: /movie/{id} → poster, title, rating, release date, overview
/// 2. Credits: /movie/{id}/credits → director and top-billed cast
///
/// The two payloads are merged into one `MovieDetails`, with a display
/// fallback for every missing field.
use crate::{
    error::{AppError, AppResult},
    models::{CastMember, MovieDetails, MovieId, TmdbCredits, TmdbMovie},
    services::providers::{MetadataProvider, RetryPolicy},
};
use reqwest::{Client as HttpClient, Url};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};

pub const POSTER_PLACEHOLDER_URL: &str =
    "https://via.placeholder.com/500x750?text=Poster+Not+Found";
pub const PROFILE_PLACEHOLDER_URL: &str = "https://via.placeholder.com/500x500?text=No+Image";

const CAST_LIMIT: usize = 3;

/// Status code and JSON body of a completed GET
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed body for 2xx responses, `Null` otherwise
    pub body: serde_json::Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP capability the TMDB provider needs
///
/// Connection failures, timeouts and unreadable bodies come back as
/// `AppError::Transport`; any status code, good or bad, is a response.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, url: &Url) -> AppResult<TransportResponse>;
}

/// `HttpTransport` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: HttpClient,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &Url) -> AppResult<TransportResponse> {
        let response = self.http_client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(TransportResponse {
                status: status.as_u16(),
                body: serde_json::Value::Null,
            });
        }

        let body = response.json().await?;

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Clone)]
pub struct TmdbProvider {
    transport: Arc<dyn HttpTransport>,
    api_key: Option<String>,
    api_url: String,
    image_base_url: String,
    language: String,
    retry: RetryPolicy,
}

impl TmdbProvider {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_key: Option<String>,
        api_url: String,
        image_base_url: String,
        language: String,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            api_key,
            api_url,
            image_base_url,
            language,
            retry,
        }
    }

    /// Configured API key, if it is non-blank
    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn endpoint(&self, path: &str, api_key: &str) -> AppResult<Url> {
        let url = format!("{}{}", self.api_url.trim_end_matches('/'), path);

        Url::parse_with_params(
            &url,
            &[("api_key", api_key), ("language", self.language.as_str())],
        )
        .map_err(|e| AppError::Internal(format!("Invalid TMDB URL {}: {}", url, e)))
    }

    /// Issues one GET and decodes the body, failing on any non-2xx status
    async fn get<T: DeserializeOwned>(&self, url: &Url, movie_id: MovieId) -> AppResult<T> {
        let response = self.transport.get_json(url).await?;

        if !response.is_success() {
            tracing::debug!(
                movie_id,
                status = response.status,
                path = %url.path(),
                "TMDB request failed"
            );
            return Err(AppError::UpstreamStatus {
                status: response.status,
            });
        }

        serde_json::from_value(response.body)
            .map_err(|e| AppError::Transport(format!("Failed to parse TMDB response: {}", e)))
    }

    /// One attempt: details first, then credits
    async fn fetch_once(
        &self,
        movie_id: MovieId,
        details_url: &Url,
        credits_url: &Url,
    ) -> AppResult<MovieDetails> {
        let movie: TmdbMovie = self.get(details_url, movie_id).await?;
        let credits: TmdbCredits = self.get(credits_url, movie_id).await?;

        Ok(self.convert_api_response(movie, credits))
    }

    /// Resolves an image path against the image base URL
    fn image_url(&self, path: Option<&str>, fallback: &str) -> String {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => format!(
                "{}/{}",
                self.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => fallback.to_string(),
        }
    }

    /// Merges the details and credits payloads into display-ready details
    fn convert_api_response(&self, movie: TmdbMovie, credits: TmdbCredits) -> MovieDetails {
        let director = credits.director();

        let director_name = director
            .and_then(|d| d.name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let director_image_url = self.image_url(
            director.and_then(|d| d.profile_path.as_deref()),
            PROFILE_PLACEHOLDER_URL,
        );

        let cast_members = credits
            .cast
            .iter()
            .take(CAST_LIMIT)
            .map(|member| CastMember {
                name: member.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                image_url: self.image_url(member.profile_path.as_deref(), PROFILE_PLACEHOLDER_URL),
            })
            .collect();

        MovieDetails {
            poster_url: self.image_url(movie.poster_path.as_deref(), POSTER_PLACEHOLDER_URL),
            title: movie.title.unwrap_or_else(|| "Unknown Title".to_string()),
            rating: movie
                .vote_average
                .and_then(serde_json::Number::from_f64)
                .map(|rating| rating.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            release_date: movie.release_date.unwrap_or_else(|| "Unknown".to_string()),
            plot: movie
                .overview
                .unwrap_or_else(|| "Plot not available.".to_string()),
            director_name,
            director_image_url,
            cast_members,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_movie(&self, movie_id: MovieId) -> AppResult<MovieDetails> {
        let Some(api_key) = self.api_key() else {
            tracing::error!(movie_id, "TMDB API key is not configured");
            return Err(AppError::MissingCredentials);
        };

        let details_url = self.endpoint(&format!("/movie/{}", movie_id), api_key)?;
        let credits_url = self.endpoint(&format!("/movie/{}/credits", movie_id), api_key)?;

        let details = self
            .retry
            .run(movie_id, || self.fetch_once(movie_id, &details_url, &credits_url))
            .await?;

        tracing::info!(
            movie_id,
            title = %details.title,
            cast = details.cast_members.len(),
            provider = self.name(),
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
