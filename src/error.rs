use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("API key is missing.")]
    MissingCredentials,

    #[error("Failed to fetch data: {0}")]
    Transport(String),

    #[error("Error {status} fetching movie details.")]
    UpstreamStatus { status: u16 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to load data: {0}")]
    DataLoad(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether another attempt may succeed where this one failed.
    ///
    /// Only transport-level failures qualify; an upstream status is an answer
    /// from the remote API and asking again will not change it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL: it carries the API key as a query parameter
        AppError::Transport(err.without_url().to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::MissingCredentials | AppError::DataLoad(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Transport(_) | AppError::UpstreamStatus { .. } => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message_carries_code() {
        let err = AppError::UpstreamStatus { status: 404 };
        assert_eq!(err.to_string(), "Error 404 fetching movie details.");
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(AppError::Transport("connection reset".to_string()).is_retryable());
        assert!(!AppError::UpstreamStatus { status: 500 }.is_retryable());
        assert!(!AppError::MissingCredentials.is_retryable());
        assert!(!AppError::Internal("boom".to_string()).is_retryable());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Z".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_transport_maps_to_bad_gateway() {
        let response = AppError::Transport("timed out".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
