//! # Construction Factories
//!
//! Free functions that build [`Schema`] handles. Every composite factory
//! takes its children by handle, so children can be shared.
//!
//! `union` and `intersection` run the schema algebra optimizer before
//! wrapping, and degenerate: zero effective members yield `never()`, one
//! yields that member itself. Callers must not assume the returned kind is
//! the composite they asked for.

use std::borrow::Cow;

use vals_core::{format_number, Class, PropertyKey, Symbol, Value};

use crate::algebra::{optimize_intersection, optimize_union};
use crate::error::SchemaError;
use crate::schema::{
    Item, ObjectMaterial, Predicate, RecordMaterial, Schema, SchemaKind, StringMaterial,
    TupleMaterial,
};
use crate::template::{self, TemplatePart};

/// Accepts every value.
pub fn any() -> Schema {
    Schema::new(SchemaKind::Any)
}

/// Accepts every value; same as [`any`] for validation.
pub fn unknown() -> Schema {
    Schema::new(SchemaKind::Unknown)
}

/// Accepts nothing.
pub fn never() -> Schema {
    Schema::new(SchemaKind::Never)
}

/// Accepts only `null`.
pub fn null() -> Schema {
    Schema::new(SchemaKind::Null)
}

/// Accepts only `undefined`.
pub fn undefined() -> Schema {
    Schema::new(SchemaKind::Undefined)
}

/// Any string.
pub fn string() -> Schema {
    Schema::new(SchemaKind::String(StringMaterial::Any))
}

/// Exactly `value`.
pub fn string_literal(value: impl Into<String>) -> Schema {
    Schema::new(SchemaKind::String(StringMaterial::Literal(value.into())))
}

/// Any number, including `NaN` and the infinities.
pub fn number() -> Schema {
    Schema::new(SchemaKind::Number(None))
}

/// Exactly `value` under strict equality, so `NaN` matches nothing.
pub fn number_literal(value: f64) -> Schema {
    Schema::new(SchemaKind::Number(Some(value)))
}

/// Any bigint.
pub fn bigint() -> Schema {
    Schema::new(SchemaKind::BigInt(None))
}

/// Exactly `value`.
pub fn bigint_literal(value: i128) -> Schema {
    Schema::new(SchemaKind::BigInt(Some(value)))
}

/// `true` or `false`.
pub fn boolean() -> Schema {
    Schema::new(SchemaKind::Boolean(None))
}

/// Exactly `value`.
pub fn boolean_literal(value: bool) -> Schema {
    Schema::new(SchemaKind::Boolean(Some(value)))
}

/// Any symbol.
pub fn symbol() -> Schema {
    Schema::new(SchemaKind::Symbol(None))
}

/// Only `value` itself.
pub fn symbol_literal(value: Symbol) -> Schema {
    Schema::new(SchemaKind::Symbol(Some(value)))
}

/// Leaf schema accepting exactly `value`. Only primitives have literals.
pub fn literal(value: impl Into<Value>) -> Result<Schema, SchemaError> {
    match value.into() {
        Value::Undefined => Ok(undefined()),
        Value::Null => Ok(null()),
        Value::Boolean(b) => Ok(boolean_literal(b)),
        Value::Number(n) => Ok(number_literal(n)),
        Value::BigInt(n) => Ok(bigint_literal(n)),
        Value::String(s) => Ok(string_literal(s)),
        Value::Symbol(s) => Ok(symbol_literal(s)),
        other => Err(SchemaError::NotPrimitive { kind: other.kind() }),
    }
}

/// Any callable.
pub fn function() -> Schema {
    Schema::new(SchemaKind::Function)
}

/// Instances of `class` or of any class extending it.
pub fn instance(class: &Class) -> Schema {
    Schema::new(SchemaKind::Instance(class.clone()))
}

/// Leaf schema backed by a caller-supplied check.
pub fn predicate(
    name: impl Into<Cow<'static, str>>,
    check: impl Fn(&Value) -> bool + Send + Sync + 'static,
) -> Schema {
    Schema::new(SchemaKind::Predicate(Predicate::new(name, check)))
}

/// Arrays whose every element `item` accepts.
pub fn array(item: Schema) -> Schema {
    Schema::new(SchemaKind::Array(item))
}

/// Fixed-length tuple.
pub fn tuple<I: Into<Item>>(items: impl IntoIterator<Item = I>) -> Schema {
    Schema::new(SchemaKind::Tuple(TupleMaterial {
        head: items.into_iter().map(Into::into).collect(),
        rest: None,
        tail: Vec::new(),
    }))
}

/// `[...head, ...rest[], ...tail]`.
pub fn tuple_with_rest<H: Into<Item>, T: Into<Item>>(
    head: impl IntoIterator<Item = H>,
    rest: Schema,
    tail: impl IntoIterator<Item = T>,
) -> Schema {
    Schema::new(SchemaKind::Tuple(TupleMaterial {
        head: head.into_iter().map(Into::into).collect(),
        rest: Some(rest),
        tail: tail.into_iter().map(Into::into).collect(),
    }))
}

/// Declared properties; later duplicates of a key replace earlier ones.
pub fn object<K: Into<PropertyKey>, I: Into<Item>>(
    fields: impl IntoIterator<Item = (K, I)>,
) -> Schema {
    Schema::new(SchemaKind::Object(ObjectMaterial {
        fields: fields
            .into_iter()
            .map(|(key, item)| (key.into(), item.into()))
            .collect(),
    }))
}

/// An optional tuple or object slot.
pub fn optional(schema: Schema) -> Item {
    Item::optional(schema)
}

/// Map from keys accepted by `key` to values accepted by `value`.
///
/// Number key schemas are rewritten to the string spelling object keys use.
/// Literal string and symbol keys, directly or within a union, become
/// required keys.
pub fn record(key: Schema, value: Schema) -> Result<Schema, SchemaError> {
    let key = record_key(&key)?;
    let required = required_keys(&key);
    Ok(Schema::new(SchemaKind::Record(RecordMaterial {
        key,
        value,
        required,
    })))
}

fn record_key(key: &Schema) -> Result<Schema, SchemaError> {
    match key.kind() {
        SchemaKind::Any
        | SchemaKind::Unknown
        | SchemaKind::Never
        | SchemaKind::String(_)
        | SchemaKind::Symbol(_) => Ok(key.clone()),
        SchemaKind::Number(Some(n)) => Ok(string_literal(format_number(*n))),
        SchemaKind::Number(None) => template([TemplatePart::from(number())]),
        SchemaKind::Union(branches) => {
            let mut keys = Vec::with_capacity(branches.len());
            for branch in branches {
                match branch.kind() {
                    SchemaKind::String(_) | SchemaKind::Number(_) | SchemaKind::Symbol(_) => {
                        keys.push(record_key(branch)?)
                    }
                    _ => return Err(invalid_record_key(key)),
                }
            }
            Ok(union(keys))
        }
        _ => Err(invalid_record_key(key)),
    }
}

fn invalid_record_key(key: &Schema) -> SchemaError {
    SchemaError::InvalidRecordKey {
        schema: key.to_string(),
    }
}

fn required_keys(key: &Schema) -> Vec<PropertyKey> {
    match key.kind() {
        SchemaKind::String(StringMaterial::Literal(s)) => vec![PropertyKey::from(s.as_str())],
        SchemaKind::Symbol(Some(s)) => vec![PropertyKey::from(s.clone())],
        SchemaKind::Union(branches) => branches.iter().flat_map(required_keys).collect(),
        _ => Vec::new(),
    }
}

/// Optimized union of `members`. See the module docs for degenerate cases.
pub fn union(members: impl IntoIterator<Item = Schema>) -> Schema {
    wrap(optimize_union(members.into_iter().collect()), SchemaKind::Union)
}

/// Optimized intersection of `members`. Unions among the members are
/// distributed, so the result may be a union of intersections.
pub fn intersection(members: impl IntoIterator<Item = Schema>) -> Schema {
    wrap(
        optimize_intersection(members.into_iter().collect()),
        SchemaKind::Intersection,
    )
}

fn wrap(mut members: Vec<Schema>, composite: fn(Vec<Schema>) -> SchemaKind) -> Schema {
    match members.len() {
        0 => never(),
        1 => members.remove(0),
        _ => Schema::new(composite(members)),
    }
}

/// String schema from text and embedded schemas.
pub fn template(parts: impl IntoIterator<Item = TemplatePart>) -> Result<Schema, SchemaError> {
    template::build(parts.into_iter().collect())
}
