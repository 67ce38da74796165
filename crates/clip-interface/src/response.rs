use serde::{Deserialize, Serialize};

use crate::{ClipResult, DEFAULT_LANGUAGE, Subtitle, common_derives};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ClipsQuery {
    /// Free-text phrase to search for.
    #[serde(default)]
    pub phrase: Option<String>,
    /// Two-letter language code. Defaults to `en`.
    #[serde(default)]
    pub language: Option<String>,
}

impl ClipsQuery {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: Some(phrase.into()),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Trimmed phrase; blank counts as missing.
    pub fn phrase(&self) -> Option<&str> {
        self.phrase
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn language(&self) -> &str {
        self.language
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }
}

common_derives! {
    /// Success body of `GET /clips`. `subtitles`, when present, is
    /// index-aligned with `videos`.
    pub struct ClipsResponse {
        pub videos: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub subtitles: Option<Vec<Option<Subtitle>>>,
    }
}

impl ClipsResponse {
    pub fn from_clips(clips: Vec<ClipResult>) -> Self {
        let any_subtitle = clips.iter().any(|c| c.subtitle.is_some());
        let (videos, subtitles): (Vec<_>, Vec<_>) =
            clips.into_iter().map(|c| (c.url, c.subtitle)).unzip();

        Self {
            videos,
            subtitles: any_subtitle.then_some(subtitles),
        }
    }

    pub fn into_clips(self) -> Vec<ClipResult> {
        let mut subtitles = self.subtitles.unwrap_or_default().into_iter();

        self.videos
            .into_iter()
            .map(|url| ClipResult {
                url,
                subtitle: subtitles.next().flatten(),
            })
            .collect()
    }
}

common_derives! {
    pub struct ErrorResponse {
        pub error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub hint: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Word;

    #[test]
    fn test_query_defaults_language() {
        let query = ClipsQuery::new("  hello world ");
        assert_eq!(query.phrase(), Some("hello world"));
        assert_eq!(query.language(), "en");

        let query = ClipsQuery::new("bonjour").with_language("fr");
        assert_eq!(query.language(), "fr");
    }

    #[test]
    fn test_blank_phrase_is_missing() {
        assert_eq!(ClipsQuery::new("   ").phrase(), None);
        assert_eq!(ClipsQuery::default().phrase(), None);
    }

    #[test]
    fn test_subtitles_omitted_when_none_present() {
        let response =
            ClipsResponse::from_clips(vec![ClipResult::new("a.mp4"), ClipResult::new("b.mp4")]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json, serde_json::json!({ "videos": ["a.mp4", "b.mp4"] }));
    }

    #[test]
    fn test_subtitles_stay_index_aligned() {
        let subtitle = Subtitle::new("hello").with_words(vec![Word::new("hello", 0, 400)]);
        let clips = vec![
            ClipResult::new("a.mp4"),
            ClipResult::new("b.mp4").with_subtitle(subtitle.clone()),
        ];

        let response = ClipsResponse::from_clips(clips.clone());
        assert_eq!(
            response.subtitles.as_deref(),
            Some(&[None, Some(subtitle)][..])
        );
        assert_eq!(response.into_clips(), clips);
    }

    #[test]
    fn test_short_subtitles_array_leaves_tail_uncaptioned() {
        let response: ClipsResponse = serde_json::from_str(
            r#"{"videos":["a.mp4","b.mp4"],"subtitles":[{"text":"hi","start":0,"end":1,"words":[]}]}"#,
        )
        .unwrap();
        let clips = response.into_clips();

        assert_eq!(clips[0].subtitle.as_ref().map(|s| s.text.as_str()), Some("hi"));
        assert_eq!(clips[1].subtitle, None);
    }
}
