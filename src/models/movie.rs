use serde::{Deserialize, Serialize};

/// Title shown when the selected movie is not in the catalog
pub const MOVIE_NOT_FOUND: &str = "Movie not found";

/// Title shown for a candidate whose metadata could not be fetched
pub const DETAILS_NOT_AVAILABLE: &str = "Details not available";

/// Display-ready metadata for a single movie
///
/// Every field is a plain string so the presentation layer can render it as
/// is. Placeholder records use empty strings and an empty cast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetails {
    pub poster_url: String,
    pub title: String,
    pub rating: String,
    pub release_date: String,
    pub plot: String,
    pub director_name: String,
    pub director_image_url: String,
    /// Top-billed cast, at most three, in billing order
    pub cast_members: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    pub image_url: String,
}

impl MovieDetails {
    /// Creates a record with the given title and every other field empty
    pub fn placeholder(title: &str) -> Self {
        Self {
            poster_url: String::new(),
            title: title.to_string(),
            rating: String::new(),
            release_date: String::new(),
            plot: String::new(),
            director_name: String::new(),
            director_image_url: String::new(),
            cast_members: Vec::new(),
        }
    }
}

/// Outcome of one metadata fetch cycle for a movie
///
/// Failures are kept as data so they can be cached and rendered like any
/// other result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MovieDetailRecord {
    Details(MovieDetails),
    Error { error: String },
}

impl MovieDetailRecord {
    pub fn error(message: impl Into<String>) -> Self {
        MovieDetailRecord::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MovieDetailRecord::Error { .. })
    }

    /// Converts to a display record, replacing failures with a placeholder
    pub fn into_display(self) -> MovieDetails {
        match self {
            MovieDetailRecord::Details(details) => details,
            MovieDetailRecord::Error { .. } => MovieDetails::placeholder(DETAILS_NOT_AVAILABLE),
        }
    }
}

impl<E: std::fmt::Display> From<Result<MovieDetails, E>> for MovieDetailRecord {
    fn from(result: Result<MovieDetails, E>) -> Self {
        match result {
            Ok(details) => MovieDetailRecord::Details(details),
            Err(e) => MovieDetailRecord::error(e.to_string()),
        }
    }
}
