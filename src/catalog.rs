/// Movie catalog and precomputed similarity matrix
///
/// Both artifacts are produced offline and loaded once at startup. Row `i` of
/// the matrix belongs to catalog entry `i`, so the two are validated together
/// and any mismatch is a startup failure.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, MovieId},
};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    similarity: Vec<Vec<f64>>,
}

impl Catalog {
    /// Builds a catalog, checking the matrix is square and aligned with the entries
    pub fn new(entries: Vec<CatalogEntry>, similarity: Vec<Vec<f64>>) -> AppResult<Self> {
        if similarity.len() != entries.len() {
            return Err(AppError::DataLoad(format!(
                "similarity matrix has {} rows but catalog has {} entries",
                similarity.len(),
                entries.len()
            )));
        }

        if let Some((row, values)) = similarity
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != entries.len())
        {
            return Err(AppError::DataLoad(format!(
                "similarity row {} has {} columns, expected {}",
                row,
                values.len(),
                entries.len()
            )));
        }

        Ok(Self {
            entries,
            similarity,
        })
    }

    /// Loads the catalog and similarity matrix from JSON files
    ///
    /// The catalog file is an array of objects with at least `movie_id` and
    /// `title`; the matrix file is an array of number arrays.
    pub fn load(
        catalog_path: impl AsRef<Path>,
        similarity_path: impl AsRef<Path>,
    ) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = read_json(catalog_path.as_ref())?;
        let similarity: Vec<Vec<f64>> = read_json(similarity_path.as_ref())?;

        let catalog = Self::new(entries, similarity)?;

        tracing::info!(
            entries = catalog.len(),
            catalog = %catalog_path.as_ref().display(),
            similarity = %similarity_path.as_ref().display(),
            "Loaded movie catalog"
        );

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    /// Position of the first entry whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }

    /// Similarity scores of the entry at `position` against every entry
    pub fn similarity_row(&self, position: usize) -> Option<&[f64]> {
        self.similarity.get(position).map(Vec::as_slice)
    }

    pub fn movie_id_at(&self, position: usize) -> Option<MovieId> {
        self.get(position).map(|entry| entry.movie_id)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::DataLoad(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&raw)
        .map_err(|e| AppError::DataLoad(format!("{}: {}", path.display(), e)))
}
