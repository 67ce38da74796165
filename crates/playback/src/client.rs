use reel_clip_interface::{ClipResult, ClipsResponse, ErrorResponse};
use reqwest::StatusCode;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
}

/// Talks to the clip proxy's `GET /clips`.
#[derive(Clone)]
pub struct ClipsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ClipsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// A `404` from the proxy means nothing matched; that is an empty queue,
    /// not an error.
    pub async fn fetch(&self, phrase: &str, language: &str) -> Result<Vec<ClipResult>, ClientError> {
        let mut url = self
            .base_url
            .join("/clips")
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("phrase", phrase)
            .append_pair("language", language);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::info!(phrase = %phrase, "no_clips_for_phrase");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ClipsResponse = response.json().await?;
        Ok(body.into_clips())
    }
}
