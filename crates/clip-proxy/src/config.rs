use std::time::Duration;

use reel_clip_search::UpstreamConfig;

use crate::env::Env;

#[derive(Clone)]
pub struct ClipProxyConfig {
    pub upstream: UpstreamConfig,
    pub cache_max_age: Duration,
}

impl ClipProxyConfig {
    pub fn new(env: &Env) -> Self {
        let upstream = UpstreamConfig::new(&env.upstream_base_url)
            .with_timeout(Duration::from_secs(env.upstream_timeout_secs))
            .with_credentials(env.upstream_cookie.clone(), env.upstream_csrf_token.clone());

        Self {
            upstream,
            cache_max_age: Duration::from_secs(env.clips_cache_max_age_secs),
        }
    }

    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn with_cache_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = max_age;
        self
    }

    pub(crate) fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age.as_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_credentials_reach_upstream_config() {
        let env = Env {
            upstream_cookie: Some("sid=1".into()),
            upstream_timeout_secs: 4,
            ..Default::default()
        };
        let config = ClipProxyConfig::new(&env);

        assert!(config.upstream.has_credentials());
        assert_eq!(config.upstream.timeout, Duration::from_secs(4));
        assert_eq!(config.cache_control(), "public, max-age=300");
    }

    #[test]
    fn test_builders_override_env() {
        let config = ClipProxyConfig::new(&Env::default())
            .with_upstream(UpstreamConfig::new("http://127.0.0.1:9"))
            .with_cache_max_age(Duration::from_secs(60));

        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9");
        assert!(!config.upstream.has_credentials());
        assert_eq!(config.cache_control(), "public, max-age=60");
    }
}
