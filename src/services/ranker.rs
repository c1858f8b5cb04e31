use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::MovieId,
};

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// Picks the catalog entries most similar to a selected title
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    catalog: Arc<Catalog>,
    limit: usize,
}

impl SimilarityRanker {
    pub fn new(catalog: Arc<Catalog>, limit: usize) -> Self {
        Self { catalog, limit }
    }

    /// Returns up to `limit` movie IDs ranked by similarity to `title`
    ///
    /// The title's similarity row is sorted by descending score with a stable
    /// sort, so equal scores keep catalog order. The top-ranked position is
    /// skipped: with a dominant diagonal that is the title itself.
    pub fn recommend_candidates(&self, title: &str) -> AppResult<Vec<MovieId>> {
        let position = self.catalog.position_of(title).ok_or_else(|| {
            AppError::NotFound(format!("Movie '{}' is not in the catalog", title))
        })?;

        let row = self
            .catalog
            .similarity_row(position)
            .ok_or_else(|| AppError::Internal(format!("Missing similarity row {}", position)))?;

        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let candidates: Vec<MovieId> = ranked
            .into_iter()
            .skip(1)
            .take(self.limit)
            .filter_map(|(index, _)| self.catalog.movie_id_at(index))
            .collect();

        tracing::debug!(
            title = %title,
            position,
            candidates = ?candidates,
            "Ranked similar movies"
        );

        Ok(candidates)
    }
}
