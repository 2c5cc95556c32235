//! Size-limiting policies applied inside derivation rules.
//!
//! Each policy is a pure, total transform: it never fails, never mutates its
//! input, and caps its output size. Derivation rules compose them to keep
//! bulky pool fields (product prose, keyword research, semantic fields)
//! within bounds before they reach a production stage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Size bounds for the limiting policies.
///
/// Defaults match the source pipeline's constants. The bootstrap layer may
/// deserialize overrides from its configuration file; within one engine the
/// limits are fixed, keeping cached views consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Sentences of product prose kept by [`limit_product_text`].
    #[serde(default = "default_product_sentences")]
    pub max_product_sentences: usize,

    /// Keyword records kept per list by [`top_keywords`].
    #[serde(default = "default_keywords")]
    pub max_keywords: usize,

    /// Characters kept by [`summarize_prefix`].
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,

    /// `related_google` entries kept per theme by [`summarize_semantic_fields`].
    #[serde(default = "default_related_terms")]
    pub max_related_terms: usize,

    /// `suggested_titles` entries kept per theme by [`summarize_semantic_fields`].
    #[serde(default = "default_suggested_titles")]
    pub max_suggested_titles: usize,
}

fn default_product_sentences() -> usize {
    3
}
fn default_keywords() -> usize {
    5
}
fn default_summary_chars() -> usize {
    200
}
fn default_related_terms() -> usize {
    5
}
fn default_suggested_titles() -> usize {
    3
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_product_sentences: default_product_sentences(),
            max_keywords: default_keywords(),
            summary_chars: default_summary_chars(),
            max_related_terms: default_related_terms(),
            max_suggested_titles: default_suggested_titles(),
        }
    }
}

/// Marker appended when [`summarize_prefix`] truncates its input.
pub const TRUNCATION_MARKER: &str = "...";

/// Keep at most the first `max_sentences` sentences of product prose.
///
/// Splits on `'.'` as a naive sentence boundary, trims each segment, drops
/// empties, and rejoins with `". "` plus a trailing period. This is a
/// heuristic count limiter, not a semantic summarizer — it mishandles
/// abbreviations and decimals, and the production stages are tuned to that
/// behavior, so it stays as-is.
pub fn limit_product_text(text: &str, max_sentences: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let sentences: Vec<&str> = text
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max_sentences)
        .collect();
    if sentences.is_empty() {
        return text.to_string();
    }
    let mut out = sentences.join(". ");
    out.push('.');
    out
}

/// Keep the top `max` keyword records ranked by their `Volume` field.
///
/// Sort is descending and stable: records missing a numeric `Volume` rank as
/// zero, and ties keep their original relative order. Inputs shorter than
/// `max` come back whole.
pub fn top_keywords(records: &[Value], max: usize) -> Vec<Value> {
    let mut ranked: Vec<Value> = records.to_vec();
    ranked.sort_by(|a, b| {
        volume(b)
            .partial_cmp(&volume(a))
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(max);
    ranked
}

fn volume(record: &Value) -> f64 {
    record
        .get("Volume")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Keep the first `max_chars` characters, marking truncation with an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text never splits inside a
/// code point. Inputs at or under the limit come back unchanged, no marker.
pub fn summarize_prefix(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Reduce each semantic-field theme to its most important data.
///
/// Per theme: the first `max_related_terms` entries of `related_google`, the
/// full `search_intent`, and the first `max_suggested_titles` entries of
/// `suggested_titles`. Themes whose value is not an object are skipped.
pub fn summarize_semantic_fields(fields: &Map<String, Value>, limits: &Limits) -> Map<String, Value> {
    let mut summarized = Map::new();
    for (theme, data) in fields {
        let Value::Object(data) = data else {
            continue;
        };
        let mut entry = Map::new();
        entry.insert(
            "related_google".to_string(),
            Value::Array(head(data.get("related_google"), limits.max_related_terms)),
        );
        entry.insert(
            "search_intent".to_string(),
            data.get("search_intent")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
        );
        entry.insert(
            "suggested_titles".to_string(),
            Value::Array(head(data.get("suggested_titles"), limits.max_suggested_titles)),
        );
        summarized.insert(theme.clone(), Value::Object(entry));
    }
    summarized
}

fn head(value: Option<&Value>, max: usize) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.iter().take(max).cloned().collect(),
        _ => Vec::new(),
    }
}
