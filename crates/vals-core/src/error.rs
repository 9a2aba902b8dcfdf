//! # Error Types
//!
//! Errors raised by the value model itself. Validation failures are not
//! errors at this layer; they live in `vals-schema`.

use thiserror::Error;

use crate::value::ValueKind;

/// A value could not be converted to strict JSON.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The value's kind has no JSON counterpart.
    #[error("{kind} values have no JSON representation")]
    Unrepresentable {
        /// Kind of the offending value.
        kind: ValueKind,
    },

    /// JSON numbers must be finite.
    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(f64),
}
