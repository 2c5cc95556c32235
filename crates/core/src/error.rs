//! Error types for the ContextLens domain.
//!
//! Uses `thiserror` for ergonomic error definitions. The view derivation
//! path is deliberately total — unknown stages, unknown roles, and missing
//! pool fields all degrade to defined fallbacks rather than errors — so the
//! only fallible operations live at the pool boundary.

use thiserror::Error;

/// The top-level error type for all ContextLens operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A context pool was built from a JSON value that is not an object.
    #[error("context pool must be a JSON object, got {kind}")]
    PoolNotAnObject { kind: &'static str },

    /// An append would overwrite an existing pool field. The pool is
    /// append-only: stage outputs are recorded once under fresh names.
    #[error("pool field already recorded: {0}")]
    DuplicateField(String),

    /// A stage output tried to claim a base-view field name. Those names
    /// belong to the bootstrap; the engine memoizes the base view once, so
    /// they cannot be introduced mid-request.
    #[error("pool field is reserved for the base view: {0}")]
    ReservedField(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_displays_field_name() {
        let err = Error::DuplicateField("strategy_output".into());
        assert!(err.to_string().contains("strategy_output"));
    }

    #[test]
    fn reserved_field_displays_field_name() {
        let err = Error::ReservedField("voice".into());
        assert!(err.to_string().contains("voice"));
        assert!(err.to_string().contains("reserved"));
    }

    #[test]
    fn pool_kind_displays_correctly() {
        let err = Error::PoolNotAnObject { kind: "array" };
        assert!(err.to_string().contains("array"));
        assert!(err.to_string().contains("JSON object"));
    }
}
