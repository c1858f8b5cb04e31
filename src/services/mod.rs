pub mod fetcher;
pub mod providers;
pub mod ranker;
pub mod recommendations;

pub use fetcher::FetchOrchestrator;
pub use providers::{MetadataProvider, RetryPolicy};
pub use ranker::SimilarityRanker;
pub use recommendations::RecommendationService;
