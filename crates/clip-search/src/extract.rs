//! Tolerant readers for upstream JSON whose shape is not contractually fixed.
//!
//! Every extraction point is an ordered list of named [`Extractor`]s. They are
//! tried in order and the first one that yields a value wins.

use reel_clip_interface::{Subtitle, Word};
use serde_json::Value;

use crate::search::RESULT_CAP;

pub struct Extractor<T> {
    pub name: &'static str,
    pub extract: fn(&Value) -> Option<T>,
}

pub fn first_match<T>(extractors: &[Extractor<T>], raw: &Value) -> Option<(&'static str, T)> {
    extractors
        .iter()
        .find_map(|e| (e.extract)(raw).map(|value| (e.name, value)))
}

pub fn first_value<T>(extractors: &[Extractor<T>], raw: &Value) -> Option<T> {
    first_match(extractors, raw).map(|(_, value)| value)
}

pub const RESULT_LISTS: &[Extractor<Vec<Value>>] = &[
    Extractor {
        name: "array",
        extract: |v| v.as_array().cloned(),
    },
    Extractor {
        name: "results",
        extract: |v| array_field(v, "results"),
    },
    Extractor {
        name: "data",
        extract: |v| array_field(v, "data"),
    },
    Extractor {
        name: "items",
        extract: |v| array_field(v, "items"),
    },
];

pub const RESULT_IDS: &[Extractor<String>] = &[
    Extractor {
        name: "id",
        extract: |v| id_field(v, "id"),
    },
    Extractor {
        name: "_id",
        extract: |v| id_field(v, "_id"),
    },
    Extractor {
        name: "video_id",
        extract: |v| id_field(v, "video_id"),
    },
    Extractor {
        name: "videoId",
        extract: |v| id_field(v, "videoId"),
    },
];

pub const VIDEO_URLS: &[Extractor<String>] = &[
    Extractor {
        name: "video_url",
        extract: |v| string_field(v, "video_url"),
    },
    Extractor {
        name: "videoUrl",
        extract: |v| string_field(v, "videoUrl"),
    },
    Extractor {
        name: "url",
        extract: |v| string_field(v, "url"),
    },
    Extractor {
        name: "src",
        extract: |v| string_field(v, "src"),
    },
];

pub const SUBTITLES: &[Extractor<Subtitle>] = &[
    Extractor {
        name: "subtitle",
        extract: |v| v.get("subtitle").and_then(subtitle_value),
    },
    Extractor {
        name: "subtitles",
        extract: |v| v.get("subtitles").and_then(subtitle_value),
    },
    Extractor {
        name: "caption",
        extract: |v| v.get("caption").and_then(subtitle_value),
    },
];

const CAPTION_TEXT: &[Extractor<String>] = &[
    Extractor {
        name: "text",
        extract: |v| string_field(v, "text"),
    },
    Extractor {
        name: "caption",
        extract: |v| string_field(v, "caption"),
    },
];

const WORD_TEXT: &[Extractor<String>] = &[
    Extractor {
        name: "text",
        extract: |v| string_field(v, "text"),
    },
    Extractor {
        name: "word",
        extract: |v| string_field(v, "word"),
    },
];

const STARTS: &[Extractor<i64>] = &[
    Extractor {
        name: "start",
        extract: |v| v.get("start").and_then(millis),
    },
    Extractor {
        name: "start_ms",
        extract: |v| v.get("start_ms").and_then(millis),
    },
];

const ENDS: &[Extractor<i64>] = &[
    Extractor {
        name: "end",
        extract: |v| v.get("end").and_then(millis),
    },
    Extractor {
        name: "end_ms",
        extract: |v| v.get("end_ms").and_then(millis),
    },
];

/// A search hit that carried a usable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub subtitle: Option<Subtitle>,
}

/// Normalizes a search body to its ordered result list. Unknown shapes are empty.
pub fn search_results(body: &Value) -> Vec<Value> {
    match first_match(RESULT_LISTS, body) {
        Some((shape, results)) => {
            tracing::debug!(shape, result_count = results.len(), "search_shape_matched");
            results
        }
        None => {
            tracing::debug!("search_shape_unrecognized");
            Vec::new()
        }
    }
}

/// Search hits with an extractable id, in search order, capped at [`RESULT_CAP`].
pub fn candidates(body: &Value) -> Vec<Candidate> {
    search_results(body)
        .iter()
        .filter_map(|raw| {
            let id = first_value(RESULT_IDS, raw)?;
            Some(Candidate {
                id,
                subtitle: first_value(SUBTITLES, raw),
            })
        })
        .take(RESULT_CAP)
        .collect()
}

/// Playable URL of a detail response, probed on the object itself and on a
/// nested `data` object.
pub fn video_url(detail: &Value) -> Option<String> {
    detail_objects(detail).find_map(|v| first_value(VIDEO_URLS, v))
}

pub fn subtitle(detail: &Value) -> Option<Subtitle> {
    detail_objects(detail).find_map(|v| first_value(SUBTITLES, v))
}

fn detail_objects(detail: &Value) -> impl Iterator<Item = &Value> {
    std::iter::once(detail).chain(detail.get("data").filter(|v| v.is_object()))
}

fn subtitle_value(v: &Value) -> Option<Subtitle> {
    match v {
        Value::Object(_) => parse_subtitle(v),
        Value::Array(items) => items.first().and_then(parse_subtitle),
        Value::String(text) if !text.trim().is_empty() => Some(Subtitle::new(text.as_str())),
        _ => None,
    }
}

fn parse_subtitle(v: &Value) -> Option<Subtitle> {
    let text = first_value(CAPTION_TEXT, v)?;
    let words = v
        .get("words")
        .and_then(Value::as_array)
        .map(|words| words.iter().filter_map(parse_word).collect())
        .unwrap_or_default();

    Some(
        Subtitle::new(text)
            .with_window(
                first_value(STARTS, v).unwrap_or(0),
                first_value(ENDS, v).unwrap_or(0),
            )
            .with_words(words),
    )
}

fn parse_word(v: &Value) -> Option<Word> {
    Some(Word::new(
        first_value(WORD_TEXT, v)?,
        first_value(STARTS, v)?,
        first_value(ENDS, v)?,
    ))
}

fn array_field(v: &Value, key: &str) -> Option<Vec<Value>> {
    v.get(key).and_then(Value::as_array).cloned()
}

fn string_field(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_field(v: &Value, key: &str) -> Option<String> {
    match v.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(_) => string_field(v, key),
        _ => None,
    }
}

fn millis(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64))
}
