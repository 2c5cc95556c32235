//! Role-specific augmentation of an already-derived stage view.
//!
//! Augmentation reads only from the stage view, never from the raw pool, so
//! a role can never gain access to data its assigned stage did not already
//! expose. Roles without an augmentation rule get the view back unchanged.

use contextlens_core::{ContextView, Role};
use serde_json::{Map, Value};

/// Layer the role's derived sub-section onto a copy of `view`.
pub fn augment_for_role(role: &Role, view: &ContextView) -> ContextView {
    let mut augmented = view.clone();
    match role {
        // The brand strategist gets a condensed brand block.
        Role::BrandStrategist => {
            augmented.insert(
                "brand_context",
                section(view, &["brand", "voice", "benchmarks"], || {
                    Value::String(String::new())
                }),
            );
        }
        // The SEO specialist gets the keyword lists front and center.
        Role::SeoSpecialist => {
            augmented.insert(
                "seo_focus",
                section(view, &["theme_keywords", "keyword_opportunities"], || {
                    Value::Array(Vec::new())
                }),
            );
        }
        // The copywriter gets formatting guidance plus semantic fields.
        Role::SeoCopywriter => {
            let mut fields = Map::new();
            fields.insert(
                "format_recommendations".to_string(),
                view.get("format_recommendations")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new())),
            );
            fields.insert(
                "semantic_fields".to_string(),
                view.get("semantic_fields")
                    .cloned()
                    .unwrap_or_else(|| Value::Object(Map::new())),
            );
            augmented.insert("content_focus", Value::Object(fields));
        }
        _ => {}
    }
    augmented
}

/// Pull `keys` out of the view into a nested object, with a shared default
/// for missing entries.
fn section(view: &ContextView, keys: &[&str], default: impl Fn() -> Value) -> Value {
    let mut fields = Map::new();
    for key in keys {
        fields.insert(
            (*key).to_string(),
            view.get(key).cloned().unwrap_or_else(&default),
        );
    }
    Value::Object(fields)
}
