use serde::{Deserialize, Deserializer, de::Error as _};

fn default_upstream_base_url() -> String {
    reel_clip_search::UpstreamConfig::default().base_url
}

fn default_upstream_timeout_secs() -> u64 {
    10
}

fn default_clips_cache_max_age_secs() -> u64 {
    300
}

#[derive(Clone, Deserialize)]
pub struct Env {
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,
    #[serde(default, deserialize_with = "filter_empty")]
    pub upstream_cookie: Option<String>,
    #[serde(default, deserialize_with = "filter_empty")]
    pub upstream_csrf_token: Option<String>,
    #[serde(
        default = "default_upstream_timeout_secs",
        deserialize_with = "string_to_u64"
    )]
    pub upstream_timeout_secs: u64,
    #[serde(
        default = "default_clips_cache_max_age_secs",
        deserialize_with = "string_to_u64"
    )]
    pub clips_cache_max_age_secs: u64,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            upstream_base_url: default_upstream_base_url(),
            upstream_cookie: None,
            upstream_csrf_token: None,
            upstream_timeout_secs: default_upstream_timeout_secs(),
            clips_cache_max_age_secs: default_clips_cache_max_age_secs(),
        }
    }
}

pub fn filter_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// Flattened envy structs hand every value over as a string.
pub fn string_to_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    value.trim().parse().map_err(D::Error::custom)
}
