//! # Validation Engine
//!
//! The two-method contract every schema exposes:
//!
//! - [`Schema::execute`] / [`Schema::execute_in`]: walk an input and return
//!   an [`Outcome`]. Never errors for ordinary rejections.
//! - [`Schema::parse`]: run `execute` in a fresh context and turn a failed
//!   outcome into a [`ValidationError`] carrying the reason tree.
//!
//! Validators receive an `Execution`, which binds the schema being run to
//! the live context and provides the pass/fail/reason constructors. A
//! reason is only built when the context is collecting; exploratory runs
//! (union and intersection trials) get bare failures.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use vals_core::{Path, PathSegment, Value};

use crate::context::{ExecutionContext, ExecutionOptions};
use crate::error::ValidationError;
use crate::issue::Issue;
use crate::schema::Schema;
use crate::validators;

/// Result of validating one input.
#[must_use]
#[derive(Debug)]
pub enum Outcome<'v> {
    /// The schema accepts the input; carries the accepted value.
    Passed(&'v Value),
    /// The schema rejects the input.
    Failed(Failure),
}

impl<'v> Outcome<'v> {
    /// Whether the input was accepted.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed(_))
    }

    /// Whether the input was rejected.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The accepted value, if passed.
    pub fn value(&self) -> Option<&'v Value> {
        match self {
            Self::Passed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    /// Reasons of a failure; empty when passed or when nothing was collected.
    pub fn reasons(&self) -> &[Reason] {
        match self {
            Self::Passed(_) => &[],
            Self::Failed(failure) => failure.reasons(),
        }
    }

    /// `Ok` with the accepted value, `Err` with the failure.
    pub fn into_result(self) -> Result<&'v Value, Failure> {
        match self {
            Self::Passed(value) => Ok(value),
            Self::Failed(failure) => Err(failure),
        }
    }

    /// Owned reasons; empty when passed.
    pub fn into_reasons(self) -> Vec<Reason> {
        match self {
            Self::Passed(_) => Vec::new(),
            Self::Failed(failure) => failure.into_reasons(),
        }
    }
}

/// The failed variant's payload: reasons local to this call.
#[derive(Debug, Clone, Default)]
pub struct Failure {
    reasons: Vec<Reason>,
}

impl Failure {
    /// Reasons recorded by this call, in traversal order.
    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    /// Consume the failure, keeping its reasons.
    pub fn into_reasons(self) -> Vec<Reason> {
        self.reasons
    }
}

/// One rejection: which schema, why, where, and on what.
#[derive(Debug, Clone)]
pub struct Reason {
    /// The schema that rejected.
    pub schema: Schema,
    /// Why it rejected.
    pub issue: Issue,
    /// Location at the moment of failure.
    pub path: Path,
    /// The offending value (or key, for missing-key issues).
    pub payload: Value,
    /// Child reasons for composites that delegate to children.
    pub reasons: Vec<Reason>,
}

impl Reason {
    pub(crate) fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(
            f,
            "{indent}{}: {} (expected {}, received {})",
            self.path, self.issue, self.schema, self.payload
        )?;
        for child in &self.reasons {
            writeln!(f)?;
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }

    /// Depth-first walk over this reason and all nested ones.
    pub fn walk(&self) -> Vec<&Reason> {
        let mut out = vec![self];
        for child in &self.reasons {
            out.extend(child.walk());
        }
        out
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_struct("Reason", 6)?;
        out.serialize_field("schema", self.schema.name())?;
        out.serialize_field("expected", &self.schema.to_string())?;
        out.serialize_field("issue", &self.issue)?;
        out.serialize_field("path", &self.path)?;
        out.serialize_field("payload", &self.payload)?;
        if self.reasons.is_empty() {
            out.skip_field("reasons")?;
        } else {
            out.serialize_field("reasons", &self.reasons)?;
        }
        out.end()
    }
}

/// A schema bound to the live context for the duration of one validator call.
pub(crate) struct Execution<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) cx: &'a mut ExecutionContext,
}

impl<'a> Execution<'a> {
    pub(crate) fn collecting(&self) -> bool {
        self.cx.collects_reasons()
    }

    pub(crate) fn pass<'v>(&self, value: &'v Value) -> Outcome<'v> {
        Outcome::Passed(value)
    }

    /// Snapshot the current path into a reason against this schema.
    pub(crate) fn reason(&self, issue: Issue, payload: &Value, reasons: Vec<Reason>) -> Reason {
        Reason {
            schema: self.schema.clone(),
            issue,
            path: self.cx.path().clone(),
            payload: payload.clone(),
            reasons,
        }
    }

    /// Fail with a single local reason, recorded only while collecting.
    pub(crate) fn fail<'v>(&self, issue: Issue, payload: &Value) -> Outcome<'v> {
        self.fail_nested(issue, payload, Vec::new())
    }

    pub(crate) fn fail_nested<'v>(
        &self,
        issue: Issue,
        payload: &Value,
        reasons: Vec<Reason>,
    ) -> Outcome<'v> {
        if self.collecting() {
            self.fail_with(vec![self.reason(issue, payload, reasons)])
        } else {
            self.fail_with(Vec::new())
        }
    }

    /// Record a reason for `issue` at child `segment` without running a
    /// schema there (missing keys).
    pub(crate) fn reason_at(
        &mut self,
        segment: PathSegment,
        issue: Issue,
        payload: &Value,
        reasons: &mut Vec<Reason>,
    ) {
        if !self.collecting() {
            return;
        }
        let mark = self.cx.mark();
        self.cx.enter(mark, segment);
        reasons.push(self.reason(issue, payload, Vec::new()));
        self.cx.reset(mark);
    }

    /// Fail with reasons already gathered from children.
    pub(crate) fn fail_with<'v>(&self, reasons: Vec<Reason>) -> Outcome<'v> {
        Outcome::Failed(Failure { reasons })
    }

    /// Validate `input` against `child` at `segment` below the current
    /// location, wrapping a child failure into one reason of `issue`
    /// recorded at the child's location. The path is restored before
    /// returning.
    pub(crate) fn descend_reporting(
        &mut self,
        segment: PathSegment,
        child: &Schema,
        input: &Value,
        issue: Issue,
        reasons: &mut Vec<Reason>,
    ) -> bool {
        let mark = self.cx.mark();
        self.cx.enter(mark, segment);
        let outcome = child.execute_in(input, self.cx);
        let passed = match outcome {
            Outcome::Passed(_) => true,
            Outcome::Failed(failure) => {
                if self.collecting() {
                    reasons.push(self.reason(issue, input, failure.into_reasons()));
                }
                false
            }
        };
        self.cx.reset(mark);
        passed
    }
}

impl Schema {
    /// Validate `input` in a fresh context.
    pub fn execute<'v>(&self, input: &'v Value) -> Outcome<'v> {
        let mut cx = ExecutionContext::new();
        self.execute_in(input, &mut cx)
    }

    /// Validate `input` in an explicitly shared context.
    pub fn execute_in<'v>(&self, input: &'v Value, cx: &mut ExecutionContext) -> Outcome<'v> {
        let mut run = Execution { schema: self, cx };
        validators::dispatch(&mut run, input)
    }

    /// Accept and return `input`, or report every reason it was rejected.
    pub fn parse(&self, input: impl Into<Value>) -> Result<Value, ValidationError> {
        self.parse_with(input, ExecutionOptions::default())
    }

    /// [`Schema::parse`] with explicit options.
    pub fn parse_with(
        &self,
        input: impl Into<Value>,
        options: ExecutionOptions,
    ) -> Result<Value, ValidationError> {
        let input = input.into();
        let mut cx = ExecutionContext::with_options(options);
        let verdict = self.execute_in(&input, &mut cx).into_result().map(|_| ());
        match verdict {
            Ok(()) => Ok(input),
            Err(failure) => {
                tracing::debug!(
                    schema = self.name(),
                    reasons = failure.reasons().len(),
                    "parse rejected input"
                );
                Err(ValidationError::new(failure.into_reasons()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;
    use crate::schema::Item;
    use serde_json::json;

    #[test]
    fn test_execute_passes_input_through() {
        let input = Value::from("hello");
        let outcome = string().execute(&input);
        assert!(outcome.is_passed());
        assert!(std::ptr::eq(outcome.value().unwrap(), &input));
    }

    #[test]
    fn test_leaf_failure_records_reason_at_root() {
        let input = Value::from(1);
        let outcome = string().execute(&input);
        let reasons = outcome.reasons();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].issue, Issue::UnexpectedInput);
        assert!(reasons[0].path.is_root());
        assert_eq!(reasons[0].payload, input);
        assert_eq!(reasons[0].schema.name(), "string");
    }

    #[test]
    fn test_suppressed_context_records_nothing() {
        let input = Value::from(1);
        let mut cx = ExecutionContext::with_options(ExecutionOptions {
            collect_reasons: false,
        });
        let outcome = string().execute_in(&input, &mut cx);
        assert!(outcome.is_failed());
        assert!(outcome.reasons().is_empty());
    }

    #[test]
    fn test_parse_returns_owned_input() {
        let parsed = array(number()).parse(json!([1, 2, 3])).unwrap();
        assert_eq!(parsed, Value::from(json!([1, 2, 3])));
    }

    #[test]
    fn test_parse_error_carries_reasons() {
        let err = string().parse(json!(42)).unwrap_err();
        assert_eq!(err.reasons().len(), 1);
        assert_eq!(
            err.to_string(),
            "validation failed:\n  (root): UNEXPECTED_INPUT (expected string, received 42)"
        );
    }

    #[test]
    fn test_parse_with_disabled_collection() {
        let options = ExecutionOptions {
            collect_reasons: false,
        };
        let err = string().parse_with(json!(42), options).unwrap_err();
        assert!(err.reasons().is_empty());
    }

    #[test]
    fn test_reason_serializes_tree() {
        let schema = object([("a", Item::from(string()))]);
        let err = schema.parse(json!({"a": 1})).unwrap_err();
        let json = serde_json::to_value(err.reasons()).unwrap();
        assert_eq!(
            json,
            json!([{
                "schema": "object",
                "expected": "{ a: string }",
                "issue": "UNEXPECTED_OBJECT_VALUE",
                "path": ["a"],
                "payload": 1.0,
                "reasons": [{
                    "schema": "string",
                    "expected": "string",
                    "issue": "UNEXPECTED_INPUT",
                    "path": ["a"],
                    "payload": 1.0
                }]
            }])
        );
    }

    #[test]
    fn test_walk_visits_nested_reasons() {
        let schema = array(array(string()));
        let err = schema.parse(json!([["ok", 1]])).unwrap_err();
        let issues: Vec<Issue> = err.reasons()[0].walk().iter().map(|r| r.issue).collect();
        assert_eq!(
            issues,
            vec![
                Issue::UnexpectedArrayItem,
                Issue::UnexpectedArrayItem,
                Issue::UnexpectedInput
            ]
        );
    }
}
