//! The engine facade: resolve, derive, augment, cache.

use crate::augment::augment_for_role;
use crate::limits::Limits;
use crate::resolver::resolve_stage;
use crate::rules::{self, base_view, derive_stage_view};
use contextlens_core::{ContextPool, ContextView, Error, Result, Role, ViewKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// The single entry point for context derivation.
///
/// Owns the pool for the lifetime of one generation request and memoizes
/// each derived view under its (role, stage) key. Logically pure: for one
/// pool, `get_view` is a function of its arguments and the cache only skips
/// recomputation. Concurrent `get_view` calls are safe — the cache's
/// check-then-store runs under a lock, and because derivation is
/// deterministic a racing computation inserts the same value.
pub struct ContextEngine {
    pool: ContextPool,
    limits: Limits,
    base: ContextView,
    cache: RwLock<HashMap<ViewKey, Arc<ContextView>>>,
}

/// Operational snapshot of the cache, for visibility only — nothing in the
/// pipeline consumes this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSummary {
    /// Distinct views derived so far.
    pub views_cached: usize,
    /// Cache keys as `role/stage` labels, sorted.
    pub cache_keys: Vec<String>,
    /// Field names present in the pool, in insertion order.
    pub pool_fields: Vec<String>,
}

impl ContextEngine {
    /// Create an engine over `pool` with the default limits.
    pub fn new(pool: ContextPool) -> Self {
        Self::with_limits(pool, Limits::default())
    }

    /// Create an engine with explicit limiting-policy bounds.
    ///
    /// The base view is computed once here and shared (by clone) into every
    /// derivation, so repeated misses don't re-read the common pool fields.
    pub fn with_limits(pool: ContextPool, limits: Limits) -> Self {
        let base = base_view(&pool);
        Self {
            pool,
            limits,
            base,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The minimal context view for `role` working on `task_id`.
    ///
    /// Never fails: unknown tasks resolve to the general stage, unknown
    /// roles skip augmentation, and missing pool fields become typed
    /// empties. Repeated calls for the same (role, task) hand back the same
    /// cached allocation.
    pub fn get_view(&self, role: &Role, task_id: &str) -> Arc<ContextView> {
        let stage = resolve_stage(role, task_id);
        let key = ViewKey::new(role.clone(), stage);

        if let Some(view) = self.read_cache().get(&key) {
            debug!(key = %key, "context view cache hit");
            return Arc::clone(view);
        }

        debug!(key = %key, task_id, "context view cache miss, deriving");
        let stage_view = derive_stage_view(stage, &self.pool, &self.base, &self.limits);
        let view = augment_for_role(role, &stage_view);

        // A racing caller may have stored this key already; derivation is
        // deterministic, so keeping the first insert preserves the
        // one-allocation-per-key guarantee.
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert_with(|| Arc::new(view)))
    }

    /// Record a completed stage's raw output into the pool (e.g. under
    /// `strategy_output`) so later stages can see it.
    ///
    /// The runner must call this before any `get_view` that depends on the
    /// new field; already-cached views are kept as-is, since the runner's
    /// sequencing guarantees no consumer of the old snapshot remains. Base
    /// field names are rejected: the base view is memoized once per engine,
    /// and an append under one of those names would leave it stale.
    pub fn record_stage_output(&mut self, field: &str, output: &str) -> Result<()> {
        if rules::BASE_FIELDS.contains(&field) {
            return Err(Error::ReservedField(field.to_string()));
        }
        self.pool = self.pool.append_stage_output(field, output)?;
        Ok(())
    }

    /// Snapshot of cache and pool shape for operational visibility.
    pub fn cache_summary(&self) -> CacheSummary {
        let cache = self.read_cache();
        let mut cache_keys: Vec<String> = cache.keys().map(ViewKey::to_string).collect();
        cache_keys.sort();
        CacheSummary {
            views_cached: cache.len(),
            cache_keys,
            pool_fields: self.pool.field_names(),
        }
    }

    /// The pool this engine serves.
    pub fn pool(&self) -> &ContextPool {
        &self.pool
    }

    /// The limiting-policy bounds in effect.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ViewKey, Arc<ContextView>>> {
        // Cached values are write-once, so a poisoned lock can't hold a
        // half-written entry; recover instead of propagating.
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contextlens_core::Stage;
    use serde_json::json;

    fn engine() -> ContextEngine {
        ContextEngine::new(
            ContextPool::from_value(json!({
                "brand": "Acme",
                "voice": "bold",
                "theme": "solar panels",
                "benchmarks": "X, Y",
            }))
            .unwrap(),
        )
    }

    #[test]
    fn repeated_calls_return_the_same_allocation() {
        let engine = engine();
        let first = engine.get_view(&Role::BrandStrategist, "define_strategy");
        let second = engine.get_view(&Role::BrandStrategist, "define_strategy");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_roles_on_one_stage_are_cached_separately() {
        let engine = engine();
        // Both resolve to general, but the keys differ by role.
        engine.get_view(&Role::from("role_a"), "whatever");
        engine.get_view(&Role::from("role_b"), "whatever");
        assert_eq!(engine.cache_summary().views_cached, 2);
    }

    #[test]
    fn cache_summary_counts_and_labels() {
        let engine = engine();
        assert_eq!(engine.cache_summary().views_cached, 0);

        engine.get_view(&Role::BrandStrategist, "define_strategy");
        let summary = engine.cache_summary();
        assert_eq!(summary.views_cached, 1);
        assert_eq!(summary.cache_keys, vec!["brand_strategist/strategy"]);
        assert!(summary.pool_fields.contains(&"brand".to_string()));

        engine.get_view(&Role::BrandStrategist, "define_strategy");
        assert_eq!(engine.cache_summary().views_cached, 1);
    }

    #[test]
    fn recorded_output_feeds_later_stages() {
        let mut engine = engine();
        engine
            .record_stage_output("strategy_output", "lead with durability")
            .unwrap();
        let view = engine.get_view(&Role::BrandStrategist, "identify_products");
        assert_eq!(view.get("strategy_summary"), Some(&json!("lead with durability")));
    }

    #[test]
    fn recording_a_base_field_name_is_rejected() {
        // The pool in `engine()` has no "name" field, so a plain append
        // would succeed — but the memoized base view would then disagree
        // with a fresh derivation. The engine refuses instead.
        let mut engine = engine();
        let err = engine.record_stage_output("name", "acme-blog").unwrap_err();
        assert!(matches!(err, Error::ReservedField(field) if field == "name"));

        let view = engine.get_view(&Role::from("anyone"), "anything");
        assert_eq!(view.get("name"), Some(&json!("")));
    }

    #[test]
    fn recording_twice_under_one_field_is_rejected() {
        let mut engine = engine();
        engine.record_stage_output("strategy_output", "first").unwrap();
        assert!(engine.record_stage_output("strategy_output", "second").is_err());
    }

    #[test]
    fn concurrent_callers_share_one_cached_view() {
        let engine = Arc::new(engine());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.get_view(&Role::SeoSpecialist, "map_opportunities"))
            })
            .collect();
        let views: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(engine.cache_summary().views_cached, 1);
        for view in &views[1..] {
            assert_eq!(**view, *views[0]);
        }
    }

    #[test]
    fn every_stage_resolves_to_some_view() {
        let engine = engine();
        for stage in Stage::ALL {
            // Unknown role, so the task can't resolve past general — but the
            // call must still produce a view.
            let view = engine.get_view(&Role::from("anyone"), stage.as_str());
            assert!(view.contains("brand"));
        }
    }
}
