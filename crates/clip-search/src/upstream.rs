use std::sync::Arc;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::search::RESULT_CAP;
use crate::session::Session;

const MAX_ERROR_BODY_CHARS: usize = 256;

/// Browser-flavoured HTTP client for the upstream clip service.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Arc<Url>,
    config: Arc<UpstreamConfig>,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        if let Ok(referer) = HeaderValue::from_str(base_url.as_str()) {
            headers.insert(REFERER, referer);
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub(crate) async fn landing(&self) -> Result<reqwest::Response> {
        let url = self.endpoint(&self.config.landing_path)?;
        self.http
            .get(url)
            .header(ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
            .send()
            .await
            .map_err(Error::upstream)
    }

    pub async fn search(&self, session: &Session, phrase: &str, language: &str) -> Result<Value> {
        let mut url = self.endpoint(&self.config.search_path)?;
        url.query_pairs_mut()
            .append_pair("q", phrase)
            .append_pair("language", language)
            .append_pair("limit", &RESULT_CAP.to_string());

        let request = self
            .http
            .get(url)
            .header(ACCEPT_LANGUAGE, accept_language(language));
        get_json(session.apply(request)).await
    }

    pub async fn detail(&self, session: &Session, id: &str) -> Result<Value> {
        let mut url = self.endpoint(&self.config.detail_path)?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.config.detail_path.clone()))?
            .pop_if_empty()
            .push(id);

        get_json(session.apply(self.http.get(url))).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }
}

async fn get_json(request: reqwest::RequestBuilder) -> Result<Value> {
    let response = request.send().await.map_err(Error::upstream)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        return Err(Error::Upstream(format!("{} - {}", status, body)));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| Error::Upstream(format!("malformed response: {e}")))
}

fn accept_language(language: &str) -> String {
    if language == "en" {
        "en-US,en;q=0.9".to_string()
    } else {
        format!("{language},en;q=0.8")
    }
}
