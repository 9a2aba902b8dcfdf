//! # Schema Nodes
//!
//! A [`Schema`] is an immutable, cheaply clonable handle to one node of a
//! composition tree. Composite kinds hold handles to their children, so a
//! child can be shared by any number of parents; nothing is mutated after
//! construction.
//!
//! Kinds form a closed enumeration ([`SchemaKind`]). Each kind carries its
//! material (a literal, a child list, a key/value pair, ...) and is bound to
//! exactly one validator in `validators`. Extension happens through
//! [`Predicate`] leaves rather than open subclassing, so there is no
//! unimplemented base validator to fall into.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use vals_core::{format_number, Class, PropertyKey, Symbol, Value};

use crate::issue::Issue;
use crate::template::TemplatePattern;

/// Shared handle to an immutable schema node.
#[derive(Clone)]
pub struct Schema(Arc<SchemaKind>);

/// The kind of a schema together with its material.
#[derive(Debug)]
pub enum SchemaKind {
    /// Accepts everything.
    Any,
    /// Accepts everything.
    Unknown,
    /// Accepts nothing.
    Never,
    /// Accepts only `null`.
    Null,
    /// Accepts only `undefined`.
    Undefined,
    /// Any string, one literal, or a template pattern.
    String(StringMaterial),
    /// `None` accepts every number, `Some(n)` exactly `n`.
    Number(Option<f64>),
    /// `None` accepts every bigint, `Some(n)` exactly `n`.
    BigInt(Option<i128>),
    /// `None` accepts both booleans, `Some(b)` exactly `b`.
    Boolean(Option<bool>),
    /// `None` accepts every symbol, `Some(s)` only `s` itself.
    Symbol(Option<Symbol>),
    /// Accepts any callable.
    Function,
    /// Accepts instances of the class or of any subclass.
    Instance(Class),
    /// Element schema.
    Array(Schema),
    /// Positional elements with an optional rest.
    Tuple(TupleMaterial),
    /// Declared properties.
    Object(ObjectMaterial),
    /// Homogeneous key/value map.
    Record(RecordMaterial),
    /// Optimized, flattened branches; always two or more.
    Union(Vec<Schema>),
    /// Optimized, flattened members; always two or more, never a union.
    Intersection(Vec<Schema>),
    /// Caller-supplied check.
    Predicate(Predicate),
}

/// Material of a string schema.
#[derive(Debug, Clone)]
pub enum StringMaterial {
    /// Any string.
    Any,
    /// Exactly this string.
    Literal(String),
    /// Strings matching a template pattern.
    Template(TemplatePattern),
}

/// A child slot of a tuple or object that may be marked optional.
#[derive(Debug, Clone)]
pub struct Item {
    /// Schema the slot's value must satisfy.
    pub schema: Schema,
    /// Whether the slot may be absent or `undefined`.
    pub optional: bool,
}

impl Item {
    /// A slot that must hold a value accepted by `schema`.
    pub fn required(schema: Schema) -> Self {
        Self {
            schema,
            optional: false,
        }
    }

    /// A slot that may also be absent or `undefined`.
    pub fn optional(schema: Schema) -> Self {
        Self {
            schema,
            optional: true,
        }
    }
}

impl From<Schema> for Item {
    fn from(schema: Schema) -> Self {
        Self::required(schema)
    }
}

impl From<&Schema> for Item {
    fn from(schema: &Schema) -> Self {
        Self::required(schema.clone())
    }
}

/// `[...head, ...rest[], ...tail]`.
#[derive(Debug, Clone)]
pub struct TupleMaterial {
    /// Leading positional slots.
    pub head: Vec<Item>,
    /// Schema of every element between head and tail; `None` fixes the length.
    pub rest: Option<Schema>,
    /// Trailing positional slots, matched from the end.
    pub tail: Vec<Item>,
}

/// Declared properties, in declaration order.
#[derive(Debug, Clone)]
pub struct ObjectMaterial {
    /// Schema of each declared key.
    pub fields: IndexMap<PropertyKey, Item>,
}

/// Key and value schemas of a record, with the keys it requires.
#[derive(Debug, Clone)]
pub struct RecordMaterial {
    /// Schema every own key must satisfy, after number normalization.
    pub key: Schema,
    /// Schema every property value must satisfy.
    pub value: Schema,
    pub(crate) required: Vec<PropertyKey>,
}

impl RecordMaterial {
    /// Keys the key schema forces to be present, computed at construction.
    pub fn required_keys(&self) -> &[PropertyKey] {
        &self.required
    }
}

type Check = dyn Fn(&Value) -> bool + Send + Sync;

/// A named, caller-supplied leaf predicate.
#[derive(Clone)]
pub struct Predicate {
    name: Cow<'static, str>,
    check: Arc<Check>,
}

impl Predicate {
    pub(crate) fn new(
        name: impl Into<Cow<'static, str>>,
        check: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// The name shown in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn test(&self, input: &Value) -> bool {
        (self.check)(input)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({})", self.name)
    }
}

impl Schema {
    pub(crate) fn new(kind: SchemaKind) -> Self {
        Self(Arc::new(kind))
    }

    /// The kind and material of this schema.
    pub fn kind(&self) -> &SchemaKind {
        &self.0
    }

    /// Kind tag, e.g. `"string"` or `"union"`.
    pub fn name(&self) -> &'static str {
        match self.kind() {
            SchemaKind::Any => "any",
            SchemaKind::Unknown => "unknown",
            SchemaKind::Never => "never",
            SchemaKind::Null => "null",
            SchemaKind::Undefined => "undefined",
            SchemaKind::String(_) => "string",
            SchemaKind::Number(_) => "number",
            SchemaKind::BigInt(_) => "bigint",
            SchemaKind::Boolean(_) => "boolean",
            SchemaKind::Symbol(_) => "symbol",
            SchemaKind::Function => "function",
            SchemaKind::Instance(_) => "instance",
            SchemaKind::Array(_) => "array",
            SchemaKind::Tuple(_) => "tuple",
            SchemaKind::Object(_) => "object",
            SchemaKind::Record(_) => "record",
            SchemaKind::Union(_) => "union",
            SchemaKind::Intersection(_) => "intersection",
            SchemaKind::Predicate(_) => "predicate",
        }
    }

    /// Issues this kind can report.
    pub fn issues(&self) -> &'static [Issue] {
        match self.kind() {
            SchemaKind::Any | SchemaKind::Unknown => &[],
            SchemaKind::Never => &[Issue::NeverExpected],
            SchemaKind::Function => &[Issue::FunctionExpected],
            SchemaKind::Array(_) => &[Issue::UnexpectedInput, Issue::UnexpectedArrayItem],
            SchemaKind::Tuple(_) => &[
                Issue::UnexpectedInput,
                Issue::UnexpectedTupleLength,
                Issue::UnexpectedTupleItem,
            ],
            SchemaKind::Object(_) => &[
                Issue::UnexpectedInput,
                Issue::MissingObjectKey,
                Issue::UnexpectedObjectValue,
            ],
            SchemaKind::Record(_) => &[
                Issue::UnexpectedInput,
                Issue::UnexpectedRecordKey,
                Issue::UnexpectedRecordValue,
                Issue::MissingRecordKey,
            ],
            SchemaKind::Union(_) => &[Issue::BranchFailed],
            _ => &[Issue::UnexpectedInput],
        }
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Schema) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// A primitive schema that accepts every value of its native kind.
    pub fn is_unspecific(&self) -> bool {
        matches!(
            self.kind(),
            SchemaKind::String(StringMaterial::Any)
                | SchemaKind::Number(None)
                | SchemaKind::BigInt(None)
                | SchemaKind::Boolean(None)
                | SchemaKind::Symbol(None)
        )
    }

    /// A primitive schema that accepts exactly one literal value.
    pub fn is_specific(&self) -> bool {
        matches!(
            self.kind(),
            SchemaKind::String(StringMaterial::Literal(_))
                | SchemaKind::Number(Some(_))
                | SchemaKind::BigInt(Some(_))
                | SchemaKind::Boolean(Some(_))
                | SchemaKind::Symbol(Some(_))
        )
    }

    /// Whether this is a compiled template pattern.
    pub fn is_template(&self) -> bool {
        matches!(self.kind(), SchemaKind::String(StringMaterial::Template(_)))
    }

    pub fn is_never(&self) -> bool {
        matches!(self.kind(), SchemaKind::Never)
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind(), SchemaKind::Union(_))
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self.kind(), SchemaKind::Intersection(_))
    }

    /// Branches of a union or members of an intersection.
    pub fn members(&self) -> Option<&[Schema]> {
        match self.kind() {
            SchemaKind::Union(members) | SchemaKind::Intersection(members) => Some(members),
            _ => None,
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.kind(), f)
    }
}

/// Compact type-like rendering, e.g. `{ a: string, b?: number | "x" }`.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            SchemaKind::String(StringMaterial::Literal(s)) => write!(f, "{s:?}"),
            SchemaKind::String(StringMaterial::Template(t)) => write!(f, "`{t}`"),
            SchemaKind::Number(Some(n)) => f.write_str(&format_number(*n)),
            SchemaKind::BigInt(Some(n)) => write!(f, "{n}n"),
            SchemaKind::Boolean(Some(b)) => write!(f, "{b}"),
            SchemaKind::Symbol(Some(s)) => write!(f, "{s}"),
            SchemaKind::Instance(class) => write!(f, "instance<{}>", class.name()),
            SchemaKind::Array(item) => write!(f, "array<{item}>"),
            SchemaKind::Tuple(tuple) => {
                let mut parts: Vec<String> = tuple.head.iter().map(item_label).collect();
                if let Some(rest) = &tuple.rest {
                    parts.push(format!("...{rest}[]"));
                }
                parts.extend(tuple.tail.iter().map(item_label));
                write!(f, "[{}]", parts.join(", "))
            }
            SchemaKind::Object(object) => {
                let fields: Vec<String> = object
                    .fields
                    .iter()
                    .map(|(key, item)| {
                        let mark = if item.optional { "?" } else { "" };
                        format!("{key}{mark}: {}", item.schema)
                    })
                    .collect();
                if fields.is_empty() {
                    f.write_str("{}")
                } else {
                    write!(f, "{{ {} }}", fields.join(", "))
                }
            }
            SchemaKind::Record(record) => write!(f, "record<{}, {}>", record.key, record.value),
            SchemaKind::Union(members) => write_joined(f, members, " | "),
            SchemaKind::Intersection(members) => write_joined(f, members, " & "),
            SchemaKind::Predicate(predicate) => write!(f, "predicate<{}>", predicate.name()),
            _ => f.write_str(self.name()),
        }
    }
}

fn item_label(item: &Item) -> String {
    if item.optional {
        format!("{}?", item.schema)
    } else {
        item.schema.to_string()
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[Schema], sep: &str) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        if member.is_union() || member.is_intersection() {
            write!(f, "({member})")?;
        } else {
            write!(f, "{member}")?;
        }
    }
    Ok(())
}
