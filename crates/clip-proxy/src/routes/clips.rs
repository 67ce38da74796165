use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
};
use reel_clip_interface::{ClipsQuery, ClipsResponse, ErrorResponse};

use super::AppState;
use crate::error::{ClipsError, Result};

#[utoipa::path(
    get,
    path = "/clips",
    params(ClipsQuery),
    responses(
        (status = 200, description = "Playable clips in search order", body = ClipsResponse),
        (status = 400, description = "Missing or malformed query", body = ErrorResponse),
        (status = 404, description = "No playable clips for the phrase", body = ErrorResponse),
        (status = 500, description = "Video service failure", body = ErrorResponse),
    ),
    tag = "clips",
)]
pub async fn handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ClipsQuery>, QueryRejection>,
) -> Result<Response> {
    let Query(query) = query.map_err(|e| ClipsError::InvalidQuery(e.body_text()))?;
    let phrase = query
        .phrase()
        .ok_or(ClipsError::MissingParameter("phrase"))?;
    let language = query.language();

    tracing::info!(phrase = %phrase, language = %language, "clips_request_received");

    let clips = state.search.fetch_clips(phrase, language).await?;

    Ok((
        [(CACHE_CONTROL, state.cache_control.clone())],
        Json(ClipsResponse::from_clips(clips)),
    )
        .into_response())
}
