//! Stage resolution: (role, task identifier) → canonical stage.
//!
//! Isolates the pipeline runner's task-naming scheme from the derivation
//! rules. The table is fixed at build time; absence is data, not failure —
//! any pair outside the table resolves to [`Stage::General`].

use contextlens_core::{Role, Stage};

/// Resolve the canonical stage for a role's task. Pure and total.
pub fn resolve_stage(role: &Role, task_id: &str) -> Stage {
    match (role, task_id) {
        (Role::BrandStrategist, "define_strategy") => Stage::Strategy,
        (Role::BrandStrategist, "identify_products") => Stage::Products,
        (Role::SeoSpecialist, "map_opportunities") => Stage::Seo,
        (Role::SeoSpecialist, "generate_seo_metafields") => Stage::Seo,
        (Role::ContentStrategist, "plan_content") => Stage::Content,
        (Role::SeoCopywriter, "write_content") => Stage::Content,
        (Role::NarrativeEditor, "refine_narrative") => Stage::Refinement,
        (Role::ContentReviewer, "review_everything") => Stage::Review,
        (Role::VisualConsultant, "suggest_elements") => Stage::Visual,
        _ => Stage::General,
    }
}
