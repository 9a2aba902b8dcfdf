#![deny(missing_docs)]

//! # vals-core: Runtime Value Model
//!
//! The leaf crate of the vals workspace. It defines the values that schemas
//! validate and the paths that locate failures inside them. It knows nothing
//! about schemas.
//!
//! ## Contents
//!
//! - [`Value`]: undefined, null, boolean, number, bigint, string, symbol,
//!   array, object, function and class instance.
//! - [`Symbol`], [`Function`], [`Class`]: identity handles; equal only to
//!   their own clones.
//! - [`PropertyKey`]: string or symbol object keys; objects keep insertion
//!   order.
//! - [`Path`], [`PathSegment`]: traversal locations for failure reasons.
//! - JSON interop: every `serde_json::Value` converts into a `Value`; the
//!   strict reverse conversion reports a [`ConversionError`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vals-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod json;
pub mod path;
pub mod value;

pub use error::ConversionError;
pub use identity::{Class, Function, Symbol};
pub use path::{Path, PathSegment};
pub use value::{format_number, Instance, Object, PropertyKey, Value, ValueKind};
