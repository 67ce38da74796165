use std::future::Future;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::RequestBuilder;
use reqwest::header::{COOKIE, SET_COOKIE};

use crate::config::UpstreamConfig;
use crate::upstream::UpstreamClient;

pub const CSRF_HEADER: &str = "x-csrf-token";

const TOKEN_COOKIE_NAMES: &[&str] = &["XSRF-TOKEN", "csrf_token", "csrftoken", "_csrf"];

static CSRF_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "meta_name_first",
            r#"<meta[^>]+name=["']csrf-token["'][^>]*content=["']([^"']+)["']"#,
        ),
        (
            "meta_content_first",
            r#"<meta[^>]+content=["']([^"']+)["'][^>]*name=["']csrf-token["']"#,
        ),
        (
            "hidden_input",
            r#"<input[^>]+name=["'](?:_csrf|authenticity_token|csrfmiddlewaretoken)["'][^>]*value=["']([^"']+)["']"#,
        ),
        (
            "script_assignment",
            r#"(?i)["']?csrf[_-]?token["']?\s*[:=]\s*["']([^"']+)["']"#,
        ),
        (
            "header_literal",
            r#"(?i)["']x-csrf-token["']\s*:\s*["']([^"']+)["']"#,
        ),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        (
            name,
            Regex::new(pattern).expect("csrf pattern must compile"),
        )
    })
    .collect()
});

/// Cookie/token bundle borrowed from the upstream site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub cookie: Option<String>,
    pub csrf_token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.cookie.is_none() && self.csrf_token.is_none()
    }

    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let request = match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };
        match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }
}

pub trait SessionProvider: Send + Sync {
    /// Never fails: an unobtainable session degrades to [`Session::anonymous`].
    fn acquire(&self) -> impl Future<Output = Session> + Send;
}

/// Credentials provisioned through configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredSession {
    session: Session,
}

impl ConfiguredSession {
    pub fn new(cookie: impl Into<String>, csrf_token: Option<String>) -> Self {
        let cookie = cookie.into();
        let csrf_token = csrf_token.or_else(|| {
            let pairs: Vec<&str> = cookie.split(';').map(str::trim).collect();
            token_from_cookies(&pairs)
        });

        Self {
            session: Session {
                cookie: Some(cookie),
                csrf_token,
            },
        }
    }
}

impl SessionProvider for ConfiguredSession {
    async fn acquire(&self) -> Session {
        self.session.clone()
    }
}

/// Scrapes a fresh session from the upstream landing page.
#[derive(Clone)]
pub struct LiveSession {
    upstream: UpstreamClient,
}

impl LiveSession {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

impl SessionProvider for LiveSession {
    async fn acquire(&self) -> Session {
        let response = match self.upstream.landing().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "session_landing_failed");
                return Session::anonymous();
            }
        };

        let status = response.status();
        let pairs: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(cookie_pair)
            .collect();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "session_landing_body_unreadable");
                String::new()
            }
        };

        let pair_refs: Vec<&str> = pairs.iter().map(String::as_str).collect();
        let csrf_token = find_csrf_token(&body).or_else(|| token_from_cookies(&pair_refs));
        let cookie = (!pairs.is_empty()).then(|| pairs.join("; "));

        tracing::debug!(
            status = %status,
            cookie_count = pairs.len(),
            has_csrf_token = csrf_token.is_some(),
            "session_acquired"
        );

        Session { cookie, csrf_token }
    }
}

/// Configured credentials when present, live scraping otherwise.
#[derive(Clone)]
pub enum SessionSource {
    Configured(ConfiguredSession),
    Live(LiveSession),
}

impl SessionSource {
    pub fn from_config(config: &UpstreamConfig, upstream: UpstreamClient) -> Self {
        match &config.cookie {
            Some(cookie) => Self::Configured(ConfiguredSession::new(
                cookie.clone(),
                config.csrf_token.clone(),
            )),
            None => Self::Live(LiveSession::new(upstream)),
        }
    }
}

impl SessionProvider for SessionSource {
    async fn acquire(&self) -> Session {
        match self {
            Self::Configured(p) => p.acquire().await,
            Self::Live(p) => p.acquire().await,
        }
    }
}

/// First token found by the body heuristics, in priority order.
pub fn find_csrf_token(body: &str) -> Option<String> {
    CSRF_PATTERNS.iter().find_map(|(name, re)| {
        let token = re.captures(body)?.get(1)?.as_str().trim();
        if token.is_empty() {
            return None;
        }
        tracing::debug!(pattern = *name, "csrf_token_found");
        Some(token.to_string())
    })
}

fn token_from_cookies(pairs: &[&str]) -> Option<String> {
    TOKEN_COOKIE_NAMES.iter().find_map(|wanted| {
        pairs.iter().find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let value = value.trim();
            (name.trim() == *wanted && !value.is_empty()).then(|| {
                urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string())
            })
        })
    })
}

fn cookie_pair(set_cookie: &str) -> Option<String> {
    let pair = set_cookie.split(';').next()?.trim();
    let (name, _) = pair.split_once('=')?;
    (!name.trim().is_empty()).then(|| pair.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tag_token() {
        let body = r#"<html><head><meta name="csrf-token" content="abc123"></head></html>"#;
        assert_eq!(find_csrf_token(body), Some("abc123".to_string()));

        let body = r#"<meta content='rev' name='csrf-token'/>"#;
        assert_eq!(find_csrf_token(body), Some("rev".to_string()));
    }

    #[test]
    fn test_meta_tag_beats_script_assignment() {
        let body = r#"
            <script>window.csrfToken = "from-script";</script>
            <meta name="csrf-token" content="from-meta">
        "#;
        assert_eq!(find_csrf_token(body), Some("from-meta".to_string()));
    }

    #[test]
    fn test_script_and_header_heuristics() {
        assert_eq!(
            find_csrf_token(r#"{"csrf_token": "json-token"}"#),
            Some("json-token".to_string())
        );
        assert_eq!(
            find_csrf_token(r#"headers: { 'X-CSRF-Token': 'hdr' }"#),
            Some("hdr".to_string())
        );
        assert_eq!(
            find_csrf_token(r#"<input type="hidden" name="authenticity_token" value="form">"#),
            Some("form".to_string())
        );
        assert_eq!(find_csrf_token("<html>nothing</html>"), None);
    }

    #[test]
    fn test_cookie_pair_strips_attributes() {
        assert_eq!(
            cookie_pair("session=xyz; Path=/; HttpOnly"),
            Some("session=xyz".to_string())
        );
        assert_eq!(cookie_pair("garbage"), None);
    }

    #[test]
    fn test_token_from_cookies_decodes() {
        assert_eq!(
            token_from_cookies(&["session=1", "XSRF-TOKEN=a%3Db"]),
            Some("a=b".to_string())
        );
        assert_eq!(token_from_cookies(&["session=1"]), None);
    }

    #[tokio::test]
    async fn test_configured_session_derives_token_from_cookie() {
        let provider = ConfiguredSession::new("sid=1; csrftoken=tok", None);
        let session = provider.acquire().await;

        assert_eq!(session.cookie.as_deref(), Some("sid=1; csrftoken=tok"));
        assert_eq!(session.csrf_token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_configured_token_wins() {
        let provider = ConfiguredSession::new("csrftoken=tok", Some("explicit".into()));
        assert_eq!(
            provider.acquire().await.csrf_token.as_deref(),
            Some("explicit")
        );
    }
}
