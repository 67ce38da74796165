use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reel_clip_interface::ErrorResponse;
use thiserror::Error;

pub(crate) const USAGE_HINT: &str = "expected GET /clips?phrase=<text>&language=<code>";

pub type Result<T> = std::result::Result<T, ClipsError>;

#[derive(Debug, Error)]
pub enum ClipsError {
    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Search(#[from] reel_clip_search::Error),
}

impl IntoResponse for ClipsError {
    fn into_response(self) -> Response {
        let (status, error, hint) = match self {
            Self::MissingParameter(_) | Self::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), Some(USAGE_HINT))
            }
            Self::Search(reel_clip_search::Error::EmptyResult) => (
                StatusCode::NOT_FOUND,
                "No clips found for this phrase".to_string(),
                Some("try a shorter or more common phrase"),
            ),
            Self::Search(err) => {
                let message = err.to_string();
                tracing::error!(error = %message, "clip_search_failed");
                sentry::capture_message(&message, sentry::Level::Error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch clips from the video service".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error,
            hint: hint.map(str::to_string),
        });

        (status, body).into_response()
    }
}
