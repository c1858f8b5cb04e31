use serde::{Deserialize, Serialize};

pub mod movie;

pub use movie::{
    CastMember, MovieDetailRecord, MovieDetails, DETAILS_NOT_AVAILABLE, MOVIE_NOT_FOUND,
};

/// Identifier for a movie, shared by the catalog and the TMDB API
pub type MovieId = u64;

/// One row of the movie catalog
///
/// The catalog file may carry more columns (genres, keywords, ...); only the
/// identifier and title matter here and the rest are ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub movie_id: MovieId,
    pub title: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// API response from GET /movie/{id}
///
/// Every field is optional: TMDB omits or nulls fields for sparse entries and
/// each one has a display fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

/// API response from GET /movie/{id}/credits
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCastMember {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCrewMember {
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl TmdbCredits {
    /// First crew member credited as director, in payload order
    pub fn director(&self) -> Option<&TmdbCrewMember> {
        self.crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entry_ignores_extra_columns() {
        let json = r#"{
            "movie_id": 19995,
            "title": "Avatar",
            "tags": "action adventure fantasy"
        }"#;

        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.movie_id, 19995);
        assert_eq!(entry.title, "Avatar");
    }

    #[test]
    fn test_tmdb_movie_deserialization_with_nulls() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "poster_path": null,
            "vote_average": 8.364,
            "release_date": "2010-07-15"
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.title.as_deref(), Some("Inception"));
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.vote_average, Some(8.364));
        assert_eq!(movie.overview, None);
    }

    #[test]
    fn test_tmdb_credits_missing_arrays_default_to_empty() {
        let credits: TmdbCredits = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(credits.cast.is_empty());
        assert!(credits.crew.is_empty());
        assert!(credits.director().is_none());
    }

    #[test]
    fn test_director_is_first_matching_crew_member() {
        let json = r#"{
            "crew": [
                {"job": "Producer", "name": "Emma Thomas", "profile_path": "/emma.jpg"},
                {"job": "Director", "name": "Christopher Nolan", "profile_path": "/nolan.jpg"},
                {"job": "Director", "name": "Someone Else", "profile_path": null}
            ]
        }"#;

        let credits: TmdbCredits = serde_json::from_str(json).unwrap();
        let director = credits.director().unwrap();
        assert_eq!(director.name.as_deref(), Some("Christopher Nolan"));
    }
}
