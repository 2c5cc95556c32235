//! Per-stage derivation rules.
//!
//! One pure function per [`Stage`], each producing a stage-scoped view from
//! the pool plus a shared base view. Every rule extends a *clone* of the
//! base — the base itself is never touched, so no stage can contaminate
//! another's view through shared structure.
//!
//! Missing pool fields are substituted with the type-appropriate empty value
//! rather than treated as errors: optional upstream data (a prior stage's
//! output, keyword research that wasn't run) is expected to be absent
//! sometimes.

use crate::limits::{self, Limits};
use contextlens_core::{ContextPool, ContextView, Stage};
use serde_json::Value;

/// Pool field recording the strategy stage's raw output, when available.
pub const STRATEGY_OUTPUT_FIELD: &str = "strategy_output";

/// The fields every stage inherits through the base view. Owned by the
/// bootstrap: stage outputs may not be recorded under these names, which
/// keeps the once-per-engine base view in step with the pool.
pub const BASE_FIELDS: [&str; 5] = ["brand", "voice", "theme", "name", "preferred_language"];

fn empty_string() -> Value {
    Value::String(String::new())
}

/// Compute the base view shared by every stage: brand, voice, theme, name,
/// and the preferred output language (defaulting to `pt_BR`, the pipeline's
/// original market).
pub fn base_view(pool: &ContextPool) -> ContextView {
    let mut view = ContextView::new();
    for field in ["brand", "voice", "theme", "name"] {
        view.insert(field, pool.value_or(field, empty_string()));
    }
    view.insert(
        "preferred_language",
        pool.value_or("preferred_language", Value::String("pt_BR".to_string())),
    );
    view
}

/// Derive the view for `stage` by extending a copy of `base` with the
/// stage's fields. Pure: neither `pool` nor `base` is mutated.
pub fn derive_stage_view(
    stage: Stage,
    pool: &ContextPool,
    base: &ContextView,
    limits: &Limits,
) -> ContextView {
    match stage {
        Stage::Strategy => strategy_view(pool, base),
        Stage::Products => products_view(pool, base, limits),
        Stage::Seo => seo_view(pool, base, limits),
        Stage::Content => content_view(pool, base, limits),
        Stage::Refinement => refinement_view(pool, base),
        Stage::Review => review_view(pool, base, limits),
        Stage::Visual => visual_view(pool, base),
        Stage::General => base.clone(),
    }
}

/// Strategy definition: competitor benchmarks and blog/format guidance,
/// carried verbatim.
fn strategy_view(pool: &ContextPool, base: &ContextView) -> ContextView {
    let mut view = base.clone();
    for field in ["benchmarks", "blog", "format_recommendations"] {
        view.insert(field, pool.value_or(field, empty_string()));
    }
    view
}

/// Product selection: limited product prose plus a short summary of the
/// strategy stage's output (empty when that stage hasn't run yet).
fn products_view(pool: &ContextPool, base: &ContextView, limits: &Limits) -> ContextView {
    let mut view = base.clone();
    view.insert("products", limited_products(pool, limits));
    let strategy_output = pool.string_field(STRATEGY_OUTPUT_FIELD);
    view.insert(
        "strategy_summary",
        Value::String(limits::summarize_prefix(&strategy_output, limits.summary_chars)),
    );
    view
}

/// Keyword mapping: limited products and keyword lists plus summarized
/// semantic fields.
fn seo_view(pool: &ContextPool, base: &ContextView, limits: &Limits) -> ContextView {
    let mut view = base.clone();
    view.insert("products", limited_products(pool, limits));
    for field in ["theme_keywords", "keyword_opportunities"] {
        view.insert(
            field,
            Value::Array(limits::top_keywords(&pool.array_field(field), limits.max_keywords)),
        );
    }
    view.insert(
        "semantic_fields",
        Value::Object(limits::summarize_semantic_fields(
            &pool.object_field("semantic_fields"),
            limits,
        )),
    );
    view
}

/// Drafting: everything the seo stage gets, plus format guidance, blog
/// reference, and the brief summary, verbatim.
fn content_view(pool: &ContextPool, base: &ContextView, limits: &Limits) -> ContextView {
    let mut view = seo_view(pool, base, limits);
    for field in ["format_recommendations", "blog", "brief_summary"] {
        view.insert(field, pool.value_or(field, empty_string()));
    }
    view
}

/// Narrative refinement: voice is restated even though the base carries it,
/// so the refinement view is self-contained.
fn refinement_view(pool: &ContextPool, base: &ContextView) -> ContextView {
    let mut view = base.clone();
    for field in ["voice", "benchmarks", "format_recommendations"] {
        view.insert(field, pool.value_or(field, empty_string()));
    }
    view
}

/// Final review: limited products and the voice to review against.
fn review_view(pool: &ContextPool, base: &ContextView, limits: &Limits) -> ContextView {
    let mut view = base.clone();
    view.insert("products", limited_products(pool, limits));
    view.insert("voice", pool.value_or("voice", empty_string()));
    view
}

/// Visual suggestions: brand and voice, restated from the pool.
fn visual_view(pool: &ContextPool, base: &ContextView) -> ContextView {
    let mut view = base.clone();
    for field in ["brand", "voice"] {
        view.insert(field, pool.value_or(field, empty_string()));
    }
    view
}

/// The pool's product prose, sentence-limited when it is a string; any other
/// shape passes through untouched.
fn limited_products(pool: &ContextPool, limits: &Limits) -> Value {
    match pool.value_or("products", empty_string()) {
        Value::String(text) => {
            Value::String(limits::limit_product_text(&text, limits.max_product_sentences))
        }
        other => other,
    }
}
