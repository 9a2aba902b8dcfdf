//! # Error Types
//!
//! - [`ValidationError`]: what `parse` returns when the input is rejected;
//!   carries the complete reason tree.
//! - [`SchemaError`]: construction-time programming faults. These never
//!   surface as validation reasons.
//! - [`ValsError`]: umbrella for callers that handle all of the above.

use std::fmt;

use thiserror::Error;
use vals_core::{ConversionError, ValueKind};

use crate::engine::Reason;

/// Top-level error type for the vals workspace.
#[derive(Error, Debug)]
pub enum ValsError {
    /// Input rejected by `parse`.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Schema could not be built.
    #[error("schema construction error: {0}")]
    Schema(#[from] SchemaError),

    /// Value could not be converted.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Input rejected by `parse`.
#[derive(Error, Debug, Clone)]
#[error("validation failed:\n{reasons}")]
pub struct ValidationError {
    reasons: Reasons,
}

impl ValidationError {
    pub(crate) fn new(reasons: Vec<Reason>) -> Self {
        Self {
            reasons: Reasons(reasons),
        }
    }

    /// Top-level reasons of the rejection.
    pub fn reasons(&self) -> &[Reason] {
        self.reasons.as_slice()
    }

    /// Consume the error, keeping its reasons.
    pub fn into_reasons(self) -> Vec<Reason> {
        self.reasons.0
    }
}

/// Ordered top-level reasons of a failure, each possibly nesting children.
#[derive(Debug, Clone, Default)]
pub struct Reasons(Vec<Reason>);

impl Reasons {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Reason] {
        &self.0
    }
}

impl fmt::Display for Reasons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "  (no reasons recorded)");
        }
        for (i, reason) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            reason.write_indented(f, 1)?;
        }
        Ok(())
    }
}

/// A schema could not be built from the given material.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    /// Literal schemas exist only for primitive values.
    #[error("cannot build a literal schema from a value of kind {kind}")]
    NotPrimitive { kind: ValueKind },

    /// Record keys are strings or symbols; numbers are spelled as strings.
    #[error("a '{schema}' schema cannot describe record keys")]
    InvalidRecordKey { schema: String },

    /// Only primitive schemas and unions of them can appear in a template.
    #[error("a '{schema}' schema cannot be embedded in a template pattern")]
    InvalidTemplatePart { schema: String },

    /// The expanded pattern is not a valid regex.
    #[error("template pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}
