//! Semantic categories the optimizer reasons about.

use ordered_float::OrderedFloat;

use crate::schema::{Schema, SchemaKind, StringMaterial};

/// Primitive value families. Two members of different families share no
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Family {
    Null,
    Undefined,
    String,
    Number,
    BigInt,
    Boolean,
    Symbol,
}

/// Non-primitive value families: sequences (arrays, tuples), object-likes
/// (objects, records, instances) and functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Structure {
    Sequence,
    ObjectLike,
    Function,
}

/// Identity of a literal in value space. Numbers compare like strict
/// equality (`0` and `-0` collapse); symbols compare by handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LiteralKey {
    String(String),
    Number(OrderedFloat<f64>),
    BigInt(i128),
    Boolean(bool),
    Symbol(u64),
}

impl LiteralKey {
    pub(crate) fn family(&self) -> Family {
        match self {
            Self::String(_) => Family::String,
            Self::Number(_) => Family::Number,
            Self::BigInt(_) => Family::BigInt,
            Self::Boolean(_) => Family::Boolean,
            Self::Symbol(_) => Family::Symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Category {
    /// `any` / `unknown`.
    Wildcard,
    /// `never`.
    Empty,
    /// Accepts every value of the family. `null` and `undefined` are
    /// single-valued and land here.
    Unspecific(Family),
    Specific(LiteralKey),
    /// A string template, identified by its pattern source.
    Template(String),
    Structural(Structure),
    /// Predicates and nested composites: nothing is known about their
    /// value space beyond identity.
    Opaque,
}

pub(crate) fn classify(schema: &Schema) -> Category {
    match schema.kind() {
        SchemaKind::Any | SchemaKind::Unknown => Category::Wildcard,
        SchemaKind::Never => Category::Empty,
        SchemaKind::Null => Category::Unspecific(Family::Null),
        SchemaKind::Undefined => Category::Unspecific(Family::Undefined),
        SchemaKind::String(StringMaterial::Any) => Category::Unspecific(Family::String),
        SchemaKind::String(StringMaterial::Literal(s)) => {
            Category::Specific(LiteralKey::String(s.clone()))
        }
        SchemaKind::String(StringMaterial::Template(pattern)) => {
            Category::Template(pattern.source().to_string())
        }
        SchemaKind::Number(None) => Category::Unspecific(Family::Number),
        SchemaKind::Number(Some(n)) => Category::Specific(LiteralKey::Number(OrderedFloat(*n))),
        SchemaKind::BigInt(None) => Category::Unspecific(Family::BigInt),
        SchemaKind::BigInt(Some(n)) => Category::Specific(LiteralKey::BigInt(*n)),
        SchemaKind::Boolean(None) => Category::Unspecific(Family::Boolean),
        SchemaKind::Boolean(Some(b)) => Category::Specific(LiteralKey::Boolean(*b)),
        SchemaKind::Symbol(None) => Category::Unspecific(Family::Symbol),
        SchemaKind::Symbol(Some(s)) => Category::Specific(LiteralKey::Symbol(s.id())),
        SchemaKind::Array(_) | SchemaKind::Tuple(_) => Category::Structural(Structure::Sequence),
        SchemaKind::Object(_) | SchemaKind::Record(_) | SchemaKind::Instance(_) => {
            Category::Structural(Structure::ObjectLike)
        }
        SchemaKind::Function => Category::Structural(Structure::Function),
        SchemaKind::Union(_) | SchemaKind::Intersection(_) | SchemaKind::Predicate(_) => {
            Category::Opaque
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;
    use vals_core::Class;

    #[test]
    fn test_classification() {
        assert_eq!(classify(&unknown()), Category::Wildcard);
        assert_eq!(classify(&never()), Category::Empty);
        assert_eq!(classify(&null()), Category::Unspecific(Family::Null));
        assert_eq!(
            classify(&string_literal("a")),
            Category::Specific(LiteralKey::String("a".into()))
        );
        assert_eq!(
            classify(&instance(&Class::new("C"))),
            Category::Structural(Structure::ObjectLike)
        );
        assert_eq!(classify(&predicate("p", |_| true)), Category::Opaque);
    }

    #[test]
    fn test_signed_zero_is_one_literal() {
        assert_eq!(classify(&number_literal(0.0)), classify(&number_literal(-0.0)));
        assert_ne!(classify(&number_literal(1.0)), classify(&bigint_literal(1)));
    }
}
