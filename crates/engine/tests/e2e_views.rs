//! End-to-end tests for the context derivation engine.
//!
//! These tests exercise the full path a pipeline runner takes: build a pool,
//! request views per (role, task), record intermediate stage output, and
//! watch the cache grow exactly once per key.

use std::sync::Arc;

use contextlens_core::{ContextPool, Role};
use contextlens_engine::ContextEngine;
use serde_json::json;

/// The pool from the canonical acceptance scenario: a brand, a voice, six
/// keyword records, and five sentences of product prose.
fn acme_pool() -> ContextPool {
    ContextPool::from_value(json!({
        "brand": "Acme",
        "voice": "bold",
        "theme": "solar panels",
        "theme_keywords": [
            {"kw": "solar", "Volume": 100},
            {"kw": "panels", "Volume": 500},
            {"kw": "roof", "Volume": 90},
            {"kw": "cost", "Volume": 300},
            {"kw": "install", "Volume": 40},
            {"kw": "grid", "Volume": 70},
        ],
        "products": "A. B. C. D. E.",
    }))
    .unwrap()
}

#[test]
fn seo_specialist_mapping_opportunities() {
    let engine = ContextEngine::new(acme_pool());
    let view = engine.get_view(&Role::SeoSpecialist, "map_opportunities");

    // Top 5 by Volume, panels first.
    let keywords = view.get("theme_keywords").unwrap().as_array().unwrap();
    assert_eq!(keywords.len(), 5);
    assert_eq!(keywords[0]["kw"], "panels");
    let volumes: Vec<i64> = keywords.iter().map(|k| k["Volume"].as_i64().unwrap()).collect();
    assert_eq!(volumes, vec![500, 300, 100, 90, 70]);

    // Products truncated to the first three sentences.
    assert_eq!(view.get("products"), Some(&json!("A. B. C.")));

    // The role's focus section repeats the same limited keyword list.
    let focus = view.get("seo_focus").unwrap();
    assert_eq!(focus["theme_keywords"], json!(keywords.clone()));
    assert_eq!(focus["keyword_opportunities"], json!([]));
}

#[test]
fn cache_grows_once_per_key() {
    let engine = ContextEngine::new(acme_pool());
    let before = engine.cache_summary().views_cached;

    let first = engine.get_view(&Role::SeoSpecialist, "map_opportunities");
    assert_eq!(engine.cache_summary().views_cached, before + 1);

    let second = engine.get_view(&Role::SeoSpecialist, "map_opportunities");
    assert_eq!(engine.cache_summary().views_cached, before + 1);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn get_view_is_idempotent_for_every_role_and_task() {
    let engine = ContextEngine::new(acme_pool());
    let cases = [
        ("brand_strategist", "define_strategy"),
        ("brand_strategist", "identify_products"),
        ("seo_specialist", "map_opportunities"),
        ("content_strategist", "plan_content"),
        ("seo_copywriter", "write_content"),
        ("narrative_editor", "refine_narrative"),
        ("content_reviewer", "review_everything"),
        ("visual_consultant", "suggest_elements"),
        ("someone_new", "made_up_task"),
    ];
    for (role, task) in cases {
        let role = Role::from(role);
        let a = engine.get_view(&role, task);
        let b = engine.get_view(&role, task);
        assert_eq!(*a, *b, "{role}/{task} should be stable");
    }
}

#[test]
fn unknown_task_yields_base_fields_only() {
    let engine = ContextEngine::new(acme_pool());
    let view = engine.get_view(&Role::NarrativeEditor, "no_such_task");

    let mut keys: Vec<&str> = view.keys().collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["brand", "name", "preferred_language", "theme", "voice"]
    );
    assert_eq!(view.get("brand"), Some(&json!("Acme")));
    assert_eq!(view.get("preferred_language"), Some(&json!("pt_BR")));
}

#[test]
fn runner_sequence_strategy_then_products() {
    let mut engine = ContextEngine::new(acme_pool());

    // Strategy stage runs first; the runner records its raw output.
    let strategy = engine.get_view(&Role::BrandStrategist, "define_strategy");
    assert!(strategy.contains("benchmarks"));
    let long_output = "Position Acme as the dependable choice. ".repeat(10);
    engine
        .record_stage_output("strategy_output", &long_output)
        .unwrap();

    // The products stage then sees a 200-char summary of that output.
    let products = engine.get_view(&Role::BrandStrategist, "identify_products");
    let summary = products.get("strategy_summary").unwrap().as_str().unwrap();
    assert_eq!(summary.chars().count(), 203);
    assert!(summary.ends_with("..."));
    assert!(summary.starts_with("Position Acme"));

    // Both stage views are now cached under distinct keys for one role.
    let summary = engine.cache_summary();
    assert_eq!(summary.views_cached, 2);
    assert_eq!(
        summary.cache_keys,
        vec!["brand_strategist/products", "brand_strategist/strategy"]
    );
    assert!(summary.pool_fields.contains(&"strategy_output".to_string()));
}

#[test]
fn views_do_not_share_structure_with_each_other() {
    let engine = ContextEngine::new(acme_pool());
    let seo = engine.get_view(&Role::SeoSpecialist, "map_opportunities");
    let writer = engine.get_view(&Role::SeoCopywriter, "write_content");

    // Same limited keyword data flows into both stage views as equal values,
    // held in independently-owned allocations.
    assert_eq!(seo.get("theme_keywords"), writer.get("theme_keywords"));
    assert!(!Arc::ptr_eq(&seo, &writer));

    // And the pool itself still carries all six records, unshortened.
    assert_eq!(engine.pool().array_field("theme_keywords").len(), 6);
}

#[test]
fn brand_strategist_view_carries_brand_context() {
    let engine = ContextEngine::new(acme_pool());
    let view = engine.get_view(&Role::BrandStrategist, "define_strategy");

    // benchmarks is absent from this pool: the section defaults it, reading
    // only from the stage view.
    assert_eq!(
        view.get("brand_context"),
        Some(&json!({"brand": "Acme", "voice": "bold", "benchmarks": ""}))
    );
}
