use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://www.playphrase.me";
const DEFAULT_LANDING_PATH: &str = "/";
const DEFAULT_SEARCH_PATH: &str = "/api/v1/phrases/search";
const DEFAULT_DETAIL_PATH: &str = "/api/v1/phrases";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Where the upstream clip service lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub landing_path: String,
    pub search_path: String,
    pub detail_path: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Pre-provisioned `Cookie` header value. Skips live session scraping when set.
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            landing_path: DEFAULT_LANDING_PATH.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            detail_path: DEFAULT_DETAIL_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cookie: None,
            csrf_token: None,
        }
    }
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_paths(
        mut self,
        landing: impl Into<String>,
        search: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        self.landing_path = landing.into();
        self.search_path = search.into();
        self.detail_path = detail.into();
        self
    }

    pub fn with_credentials(mut self, cookie: Option<String>, csrf_token: Option<String>) -> Self {
        self.cookie = cookie.filter(|s| !s.trim().is_empty());
        self.csrf_token = csrf_token.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.cookie.is_some()
    }
}
