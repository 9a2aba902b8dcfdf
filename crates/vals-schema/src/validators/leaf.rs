//! Leaf predicates: kind checks with an optional expected literal.

use vals_core::Value;

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::{SchemaKind, StringMaterial};

pub(super) fn validate<'v>(run: &mut Execution<'_>, kind: &SchemaKind, input: &'v Value) -> Outcome<'v> {
    if accepts(kind, input) {
        return run.pass(input);
    }
    let issue = match kind {
        SchemaKind::Never => Issue::NeverExpected,
        SchemaKind::Function => Issue::FunctionExpected,
        _ => Issue::UnexpectedInput,
    };
    run.fail(issue, input)
}

/// Whether a leaf kind accepts `input`. Composite kinds never match here.
pub(crate) fn accepts(kind: &SchemaKind, input: &Value) -> bool {
    match (kind, input) {
        (SchemaKind::Any | SchemaKind::Unknown, _) => true,
        (SchemaKind::Null, Value::Null) => true,
        (SchemaKind::Undefined, Value::Undefined) => true,
        (SchemaKind::String(material), Value::String(s)) => match material {
            StringMaterial::Any => true,
            StringMaterial::Literal(expected) => expected == s,
            StringMaterial::Template(pattern) => pattern.is_match(s),
        },
        (SchemaKind::Number(expected), Value::Number(n)) => expected.map_or(true, |e| e == *n),
        (SchemaKind::BigInt(expected), Value::BigInt(n)) => expected.map_or(true, |e| e == *n),
        (SchemaKind::Boolean(expected), Value::Boolean(b)) => expected.map_or(true, |e| e == *b),
        (SchemaKind::Symbol(expected), Value::Symbol(s)) => {
            expected.as_ref().map_or(true, |e| e == s)
        }
        (SchemaKind::Function, Value::Function(_)) => true,
        (SchemaKind::Instance(class), Value::Instance(instance)) => instance.is_instance_of(class),
        (SchemaKind::Predicate(predicate), _) => predicate.test(input),
        _ => false,
    }
}
