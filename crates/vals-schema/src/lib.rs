//! # vals-schema: Composable Validation Schemas
//!
//! Build small schemas, compose them, and validate runtime [`Value`]s
//! against the result.
//!
//! ```ignore
//! use vals_schema::*;
//!
//! let user = object([
//!     ("name", Item::from(string())),
//!     ("age", optional(number())),
//! ]);
//! assert!(user.parse(serde_json::json!({"name": "x"})).is_ok());
//! ```
//!
//! ## Architecture
//!
//! - [`schema`]: immutable, shareable schema nodes over a closed kind
//!   enumeration.
//! - [`builder`]: the construction factories. `union` and `intersection`
//!   run the [`algebra`] optimizer once, at construction time.
//! - [`engine`]: `execute` / `parse`, outcomes and failure reasons.
//! - [`context`]: the call-scoped path and reason-collection flag, passed
//!   explicitly through every recursive call.
//! - `validators`: one validator per kind, dispatched by kind.
//! - [`template`]: template-literal string patterns.
//!
//! ## Crate Policy
//!
//! - Depends only on `vals-core` among internal crates.
//! - Ordinary rejections are values ([`Outcome`]); only `parse` turns them
//!   into an error. Construction faults are [`SchemaError`]s.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Emits `tracing` events but never installs a subscriber.

pub mod algebra;
pub mod builder;
pub mod context;
pub mod engine;
pub mod error;
pub mod issue;
pub mod schema;
pub mod template;
mod validators;

pub use algebra::{optimize_intersection, optimize_union};
pub use builder::*;
pub use context::{ExecutionContext, ExecutionOptions, Mark};
pub use engine::{Failure, Outcome, Reason};
pub use error::{Reasons, SchemaError, ValidationError, ValsError};
pub use issue::Issue;
pub use schema::{
    Item, ObjectMaterial, Predicate, RecordMaterial, Schema, SchemaKind, StringMaterial,
    TupleMaterial,
};
pub use template::{TemplatePart, TemplatePattern};
pub use vals_core::{Path, PathSegment, Value};
