use serde::Deserialize;
use std::time::Duration;

use crate::services::ranker::DEFAULT_RECOMMENDATION_COUNT;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key. Left unset, every metadata fetch fails with a
    /// missing-credentials record instead of calling out.
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that poster and profile image paths are resolved against
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Language tag sent with every TMDB request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Total attempts per movie before giving up on transport failures
    #[serde(default = "default_fetch_max_attempts")]
    pub fetch_max_attempts: u32,

    /// Fixed delay between attempts, in seconds
    #[serde(default = "default_fetch_retry_delay_secs")]
    pub fetch_retry_delay_secs: u64,

    /// Per-request timeout, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on concurrently running metadata fetches
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,

    /// Number of similar movies returned per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Path to the catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the similarity matrix JSON file
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_fetch_max_attempts() -> u32 {
    3
}

fn default_fetch_retry_delay_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_fetch_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_recommendation_count() -> usize {
    DEFAULT_RECOMMENDATION_COUNT
}

fn default_catalog_path() -> String {
    "data/movies.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.fetch_retry_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
