//! # Issue Catalogue
//!
//! The tag a failure reason carries. Each schema kind declares the subset
//! of issues it can raise (see `Schema::issues`).

use std::fmt;

use serde::Serialize;

/// Why a schema rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    /// The input's kind or value is not what the schema accepts.
    UnexpectedInput,
    /// An array element was rejected.
    UnexpectedArrayItem,
    /// Too few or too many tuple elements.
    UnexpectedTupleLength,
    /// A tuple element was rejected.
    UnexpectedTupleItem,
    /// A required object key is absent.
    MissingObjectKey,
    /// A declared object property was rejected.
    UnexpectedObjectValue,
    /// A record key was rejected by the key schema.
    UnexpectedRecordKey,
    /// A record value was rejected by the value schema.
    UnexpectedRecordValue,
    /// A key the record's key schema requires is absent.
    MissingRecordKey,
    /// No union branch accepted the input.
    BranchFailed,
    /// `never` rejects every input.
    NeverExpected,
    /// The input is not callable.
    FunctionExpected,
}

impl Issue {
    /// The wire tag, e.g. `BRANCH_FAILED`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnexpectedInput => "UNEXPECTED_INPUT",
            Self::UnexpectedArrayItem => "UNEXPECTED_ARRAY_ITEM",
            Self::UnexpectedTupleLength => "UNEXPECTED_TUPLE_LENGTH",
            Self::UnexpectedTupleItem => "UNEXPECTED_TUPLE_ITEM",
            Self::MissingObjectKey => "MISSING_OBJECT_KEY",
            Self::UnexpectedObjectValue => "UNEXPECTED_OBJECT_VALUE",
            Self::UnexpectedRecordKey => "UNEXPECTED_RECORD_KEY",
            Self::UnexpectedRecordValue => "UNEXPECTED_RECORD_VALUE",
            Self::MissingRecordKey => "MISSING_RECORD_KEY",
            Self::BranchFailed => "BRANCH_FAILED",
            Self::NeverExpected => "NEVER_EXPECTED",
            Self::FunctionExpected => "FUNCTION_EXPECTED",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
