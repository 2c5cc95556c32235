//! # ContextLens Core
//!
//! Domain types and error definitions for the ContextLens context derivation
//! engine. This crate defines the data model that the engine crate implements
//! against — it has **zero framework dependencies** beyond serde.
//!
//! ## Design Philosophy
//!
//! The content pipeline collects one large pool of brand/topic context per
//! generation request, then runs a fixed sequence of production stages
//! (strategy, product selection, keyword mapping, drafting, refinement,
//! metadata extraction). Each stage only needs a narrow slice of that pool,
//! so the domain model is built around three ideas:
//!
//! - [`ContextPool`] — an immutable, append-only snapshot of everything known
//!   at request start.
//! - [`Stage`] / [`Role`] — the closed set of pipeline stages and the
//!   specialists responsible for them.
//! - [`ContextView`] — a fresh, size-bounded derivation of the pool for one
//!   (role, stage) pair, keyed by [`ViewKey`].

pub mod error;
pub mod pool;
pub mod role;
pub mod stage;
pub mod view;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use pool::ContextPool;
pub use role::Role;
pub use stage::Stage;
pub use view::{ContextView, ViewKey};
