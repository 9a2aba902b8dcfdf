//! # Runtime Values
//!
//! `Value` is the dynamically typed input every schema validates. It covers
//! the primitive kinds (undefined, null, boolean, number, bigint, string,
//! symbol) and the structured kinds (array, object, function, class
//! instance).
//!
//! ## Equality
//!
//! `PartialEq` follows strict-equality rules for primitives: numbers compare
//! with IEEE semantics (`NaN != NaN`, `0 == -0`), symbols and functions by
//! identity. Arrays, objects and instances compare structurally, which is
//! what tests and callers comparing parse output expect.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::identity::{Class, Function, Symbol};

/// Object properties in insertion order.
pub type Object = IndexMap<PropertyKey, Value>;

/// A key of an object property: a string or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A string key.
    String(String),
    /// A symbol key.
    Symbol(Symbol),
}

impl PropertyKey {
    /// The key as a value, as seen by a record's key schema.
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Symbol(s) => Value::Symbol(s.clone()),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Symbol(s) => write!(f, "[{s}]"),
        }
    }
}

/// An object created from a [`Class`].
#[derive(Debug, Clone)]
pub struct Instance {
    class: Class,
    fields: Object,
}

impl Instance {
    /// Create an instance of `class` holding `fields`.
    pub fn new(class: &Class, fields: Object) -> Self {
        Self {
            class: class.clone(),
            fields,
        }
    }

    /// The class this instance was created from.
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Own properties, in insertion order.
    pub fn fields(&self) -> &Object {
        &self.fields
    }

    /// Whether this instance was created from `class` or one of its subclasses.
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class.is_subclass_of(class)
    }
}

/// The kind tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Undefined`].
    Undefined,
    /// [`Value::Null`].
    Null,
    /// [`Value::Boolean`].
    Boolean,
    /// [`Value::Number`].
    Number,
    /// [`Value::BigInt`].
    BigInt,
    /// [`Value::String`].
    String,
    /// [`Value::Symbol`].
    Symbol,
    /// [`Value::Array`].
    Array,
    /// [`Value::Object`].
    Object,
    /// [`Value::Function`].
    Function,
    /// [`Value::Instance`].
    Instance,
}

impl ValueKind {
    /// Lowercase name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Array => "array",
            Self::Object => "object",
            Self::Function => "function",
            Self::Instance => "instance",
        }
    }

    /// Primitive kinds are the ones a literal schema can be built from.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Self::Array | Self::Object | Self::Function | Self::Instance
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed runtime value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value; also the default.
    #[default]
    Undefined,
    /// The explicit empty value.
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A double-precision number, including `NaN` and the infinities.
    Number(f64),
    /// An arbitrary-precision integer, bounded here to `i128`.
    BigInt(i128),
    /// A string.
    String(String),
    /// A unique symbol.
    Symbol(Symbol),
    /// An ordered list of values.
    Array(Vec<Value>),
    /// A plain object.
    Object(Object),
    /// A callable.
    Function(Function),
    /// An object created from a class.
    Instance(Instance),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
            Self::Instance(_) => ValueKind::Instance,
        }
    }

    /// A bigint value.
    pub fn bigint(n: i128) -> Self {
        Self::BigInt(n)
    }

    /// Build an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<PropertyKey>,
        V: Into<Value>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Whether this is [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Properties of an object-like value: plain objects and class instances.
    /// Arrays are not object-like.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            Self::Instance(instance) => Some(instance.fields()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Symbol(a), Self::Symbol(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => {
                a.class() == b.class() && a.fields() == b.fields()
            }
            _ => false,
        }
    }
}

/// Render a number the way template literals and object keys spell it:
/// the shortest round-tripping digits, `-0` as `0`, exponent form
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`, and the non-finite values as
/// `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-tripping digits as `d.ddde<exp>`.
    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let point = exponent.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.push_str(&"0".repeat((point - k) as usize));
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.push_str(&"0".repeat((-point) as usize));
        out.push_str(&digits);
    } else {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = point - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => fmt_object(f, map),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Instance(instance) => {
                write!(f, "{} ", instance.class().name())?;
                fmt_object(f, instance.fields())
            }
        }
    }
}

fn fmt_object(f: &mut fmt::Formatter<'_>, map: &Object) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, " {key}: {value}")?;
    }
    if map.is_empty() {
        f.write_str("}")
    } else {
        f.write_str(" }")
    }
}

/// Lossy JSON rendering for diagnostics. Kinds JSON lacks are spelled out:
/// undefined as `null`, bigints as decimal strings, symbols as
/// `Symbol(desc)`, functions as `[Function name]`, instances as their fields.
/// Use `serde_json::Value::try_from` for a strict conversion.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::BigInt(n) => serializer.serialize_str(&n.to_string()),
            Self::String(s) => serializer.serialize_str(s),
            Self::Symbol(s) => serializer.serialize_str(&s.to_string()),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => serialize_object(serializer, map),
            Self::Function(func) => serializer.serialize_str(&format!("{func:?}")),
            Self::Instance(instance) => serialize_object(serializer, instance.fields()),
        }
    }
}

fn serialize_object<S: Serializer>(serializer: S, map: &Object) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, value) in map {
        out.serialize_entry(&key.to_string(), value)?;
    }
    out.end()
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Self::Symbol(s)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(f)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Self::Instance(i)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Undefined, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Undefined.kind(), ValueKind::Undefined);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::bigint(7).kind(), ValueKind::BigInt);
        assert_eq!(Value::from("x").kind().as_str(), "string");
        assert!(ValueKind::Symbol.is_primitive());
        assert!(!ValueKind::Array.is_primitive());
    }

    #[test]
    fn test_strict_number_equality() {
        assert_ne!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        assert_ne!(Value::Number(1.0), Value::bigint(1));
    }

    #[test]
    fn test_structural_equality_for_containers() {
        let a = Value::object([("x", Value::from(1)), ("y", Value::from(vec![Value::Null]))]);
        let b = Value::object([("x", Value::from(1)), ("y", Value::from(vec![Value::Null]))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_exponent_thresholds() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e21), "-1.5e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(123456.789), "123456.789");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn test_instances_are_object_like() {
        let class = Class::new("Point");
        let fields: Object = [(PropertyKey::from("x"), Value::from(1))].into_iter().collect();
        let value = Value::from(Instance::new(&class, fields));
        assert_eq!(value.as_object().map(|m| m.len()), Some(1));
        assert!(Value::Array(vec![]).as_object().is_none());
    }

    #[test]
    fn test_lossy_serialization() {
        let sym = Symbol::new("id");
        let value = Value::from(vec![
            Value::Undefined,
            Value::bigint(12),
            Value::from(sym),
            Value::object([("k", true)]),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!([null, "12", "Symbol(id)", {"k": true}]));
    }

    #[test]
    fn test_display() {
        let value = Value::object([("a", Value::from("x")), ("b", Value::from(vec![Value::from(1)]))]);
        assert_eq!(value.to_string(), r#"{ a: "x", b: [1] }"#);
        assert_eq!(Value::Object(Object::new()).to_string(), "{}");
    }
}
