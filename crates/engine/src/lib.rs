//! Context derivation and caching engine — the core architectural component.
//!
//! Derives a minimal, role-appropriate [`ContextView`] from a shared
//! [`ContextPool`] for each (role, stage) pair, in four steps:
//!
//! 1. **Resolve** — map (role, task identifier) to a canonical [`Stage`]
//! 2. **Derive** — run the stage's rule over the pool and a shared base view
//! 3. **Limit** — bound bulky sub-fields (keyword lists, product prose,
//!    semantic fields) inside the derivation rule
//! 4. **Augment** — layer role-specific sub-sections on top
//!
//! The result is memoized per (role, stage) key, so each view is computed at
//! most once per request.
//!
//! # Determinism
//!
//! Derivation is deterministic: for one pool, identical (role, task) inputs
//! always produce structurally identical views. The cache is purely an
//! optimization, never a source of divergent behavior. No random or
//! time-dependent logic is used anywhere in the pipeline.

pub mod augment;
pub mod engine;
pub mod limits;
pub mod resolver;
pub mod rules;

pub use augment::augment_for_role;
pub use engine::{CacheSummary, ContextEngine};
pub use limits::Limits;
pub use resolver::resolve_stage;
pub use rules::{base_view, derive_stage_view};

// Re-export the domain types callers need alongside the engine.
pub use contextlens_core::{ContextPool, ContextView, Role, Stage, ViewKey};
