//! # Template Patterns
//!
//! A template is a sequence of text and embedded schemas, e.g.
//! `` `id-${number}` ``. Building one expands it into alternatives:
//!
//! - A union part, or an unspecific boolean, forks the pattern; the result
//!   is the Cartesian product of every part's options.
//! - Literal parts (string, number, bigint, boolean, null, undefined) become
//!   text; adjacent text merges.
//! - Unspecific string, number and bigint parts become holes.
//!
//! Each alternative becomes a string literal (text only), `string()` (a
//! single string hole), or a [`TemplatePattern`] compiled to an anchored
//! regex. Several alternatives are combined with `union`.

use std::fmt;

use regex::Regex;
use vals_core::format_number;

use crate::builder;
use crate::error::SchemaError;
use crate::schema::{Schema, SchemaKind, StringMaterial};

const STRING_HOLE: &str = "(?s:.*)";
const NUMBER_HOLE: &str = r"[+-]?\d+(?:\.\d+)?";
const BIGINT_HOLE: &str = r"[+-]?\d+";

/// One part handed to [`crate::builder::template`].
#[derive(Debug, Clone)]
pub enum TemplatePart {
    /// Literal text.
    Text(String),
    /// An embedded schema expanded into text or a hole.
    Schema(Schema),
}

impl From<&str> for TemplatePart {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TemplatePart {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Schema> for TemplatePart {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

impl From<&Schema> for TemplatePart {
    fn from(schema: &Schema) -> Self {
        Self::Schema(schema.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    String,
    Number,
    BigInt,
}

/// A compiled, single-alternative template.
#[derive(Debug, Clone)]
pub struct TemplatePattern {
    segments: Vec<Segment>,
    regex: Regex,
}

impl TemplatePattern {
    fn compile(segments: Vec<Segment>) -> Result<Self, SchemaError> {
        let regex = Regex::new(&source_of(&segments))?;
        Ok(Self { segments, regex })
    }

    /// The anchored regex source, also the identity used for deduplication.
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether `input` matches the whole pattern.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

impl fmt::Display for TemplatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => f.write_str(text)?,
                Segment::String => f.write_str("${string}")?,
                Segment::Number => f.write_str("${number}")?,
                Segment::BigInt => f.write_str("${bigint}")?,
            }
        }
        Ok(())
    }
}

fn source_of(segments: &[Segment]) -> String {
    let mut source = String::from("^");
    for segment in segments {
        match segment {
            Segment::Text(text) => source.push_str(&regex::escape(text)),
            Segment::String => source.push_str(STRING_HOLE),
            Segment::Number => source.push_str(NUMBER_HOLE),
            Segment::BigInt => source.push_str(BIGINT_HOLE),
        }
    }
    source.push('$');
    source
}

fn push_segment(segments: &mut Vec<Segment>, segment: Segment) {
    if let Segment::Text(text) = &segment {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = segments.last_mut() {
            last.push_str(text);
            return;
        }
    }
    segments.push(segment);
}

fn text(value: impl Into<String>) -> Vec<Vec<Segment>> {
    vec![vec![Segment::Text(value.into())]]
}

/// The alternatives one embedded schema contributes.
fn options(schema: &Schema) -> Result<Vec<Vec<Segment>>, SchemaError> {
    let options = match schema.kind() {
        SchemaKind::Never => Vec::new(),
        SchemaKind::Null => text("null"),
        SchemaKind::Undefined => text("undefined"),
        SchemaKind::String(StringMaterial::Any) => vec![vec![Segment::String]],
        SchemaKind::String(StringMaterial::Literal(s)) => text(s.as_str()),
        SchemaKind::String(StringMaterial::Template(pattern)) => vec![pattern.segments.clone()],
        SchemaKind::Number(None) => vec![vec![Segment::Number]],
        SchemaKind::Number(Some(n)) => text(format_number(*n)),
        SchemaKind::BigInt(None) => vec![vec![Segment::BigInt]],
        SchemaKind::BigInt(Some(n)) => text(n.to_string()),
        SchemaKind::Boolean(None) => vec![
            vec![Segment::Text("true".into())],
            vec![Segment::Text("false".into())],
        ],
        SchemaKind::Boolean(Some(b)) => text(b.to_string()),
        SchemaKind::Union(branches) => {
            let mut all = Vec::new();
            for branch in branches {
                all.extend(options(branch)?);
            }
            all
        }
        _ => {
            return Err(SchemaError::InvalidTemplatePart {
                schema: schema.to_string(),
            })
        }
    };
    Ok(options)
}

pub(crate) fn build(parts: Vec<TemplatePart>) -> Result<Schema, SchemaError> {
    let mut alternatives: Vec<Vec<Segment>> = vec![Vec::new()];
    for part in parts {
        let choices = match part {
            TemplatePart::Text(t) => text(t),
            TemplatePart::Schema(schema) => options(&schema)?,
        };
        let mut next = Vec::with_capacity(alternatives.len() * choices.len());
        for prefix in &alternatives {
            for choice in &choices {
                let mut segments = prefix.clone();
                for segment in choice {
                    push_segment(&mut segments, segment.clone());
                }
                next.push(segments);
            }
        }
        alternatives = next;
    }

    let mut seen: Vec<String> = Vec::new();
    let mut schemas = Vec::new();
    for segments in alternatives {
        let source = source_of(&segments);
        if seen.contains(&source) {
            continue;
        }
        seen.push(source);
        schemas.push(alternative(segments)?);
    }
    tracing::trace!(alternatives = schemas.len(), "expanded template");
    Ok(builder::union(schemas))
}

fn alternative(segments: Vec<Segment>) -> Result<Schema, SchemaError> {
    let schema = match segments.as_slice() {
        [] => Some(builder::string_literal("")),
        [Segment::Text(text)] => Some(builder::string_literal(text.as_str())),
        [Segment::String] => Some(builder::string()),
        _ => None,
    };
    match schema {
        Some(schema) => Ok(schema),
        None => {
            let pattern = TemplatePattern::compile(segments)?;
            Ok(Schema::new(SchemaKind::String(StringMaterial::Template(pattern))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;
    use vals_core::Value;

    fn accepts(schema: &Schema, input: &str) -> bool {
        schema.execute(&Value::from(input)).is_passed()
    }

    #[test]
    fn test_number_hole() {
        let schema = template([TemplatePart::from("id-"), number().into()]).unwrap();
        assert_eq!(schema.to_string(), "`id-${number}`");
        assert!(accepts(&schema, "id-42"));
        assert!(accepts(&schema, "id--1.5"));
        assert!(!accepts(&schema, "id-"));
        assert!(!accepts(&schema, "id-x"));
        assert!(!accepts(&schema, "xid-1"));
    }

    #[test]
    fn test_text_is_escaped() {
        let schema = template([TemplatePart::from("a.b("), bigint().into(), ")".into()]).unwrap();
        assert!(accepts(&schema, "a.b(12)"));
        assert!(!accepts(&schema, "axb(12)"));
        assert!(!accepts(&schema, "a.b(1.5)"));
    }

    #[test]
    fn test_text_only_is_a_literal() {
        let schema = template([TemplatePart::from("a"), number_literal(1.0).into(), "b".into()]).unwrap();
        assert!(schema.is_specific());
        assert_eq!(schema.to_string(), r#""a1b""#);
        let empty = template(Vec::<TemplatePart>::new()).unwrap();
        assert!(accepts(&empty, ""));
        assert!(!accepts(&empty, "x"));
    }

    #[test]
    fn test_single_string_hole_is_string() {
        let schema = template([TemplatePart::from(string())]).unwrap();
        assert!(schema.is_unspecific());
    }

    #[test]
    fn test_unions_and_booleans_fork() {
        let schema = template([
            TemplatePart::from(union([string_literal("get"), string_literal("set")])),
            "-".into(),
            boolean().into(),
        ])
        .unwrap();
        assert_eq!(schema.members().map(<[Schema]>::len), Some(4));
        for ok in ["get-true", "get-false", "set-true", "set-false"] {
            assert!(accepts(&schema, ok), "{ok}");
        }
        assert!(!accepts(&schema, "put-true"));
    }

    #[test]
    fn test_nested_template_inlines() {
        let inner = template([TemplatePart::from("v"), number().into()]).unwrap();
        let outer = template([TemplatePart::from(inner), "/".into(), string().into()]).unwrap();
        assert!(accepts(&outer, "v2/anything"));
        assert!(!accepts(&outer, "v/anything"));
    }

    #[test]
    fn test_duplicate_alternatives_collapse() {
        let schema = template([TemplatePart::from(union([string_literal("a"), string_literal("a")]))]).unwrap();
        assert!(schema.is_specific());
    }

    #[test]
    fn test_rejects_structural_parts() {
        let err = template([TemplatePart::from(array(string()))]).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidTemplatePart { .. }));
    }

    #[test]
    fn test_never_part_yields_never() {
        assert!(template([TemplatePart::from("a"), never().into()]).unwrap().is_never());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::builder::{bigint, number, template};
    use proptest::prelude::*;
    use vals_core::Value;

    proptest! {
        /// Text around holes is matched literally, whatever it contains.
        #[test]
        fn text_is_never_a_pattern(prefix in "[ -~]{0,12}", n in any::<i64>()) {
            let schema = template([TemplatePart::from(prefix.as_str()), number().into()]).unwrap();
            let spelled = Value::from(format!("{prefix}{n}"));
            prop_assert!(schema.execute(&spelled).is_passed());
            let shifted = Value::from(format!("x{prefix}{n}"));
            prop_assert!(schema.execute(&shifted).is_failed());
        }

        /// A bigint hole accepts exactly the integer spellings.
        #[test]
        fn bigint_hole_accepts_integers(n in any::<i64>(), frac in 1u8..100) {
            let schema = template([TemplatePart::from(bigint())]).unwrap();
            prop_assert!(schema.execute(&Value::from(n.to_string())).is_passed());
            let fractional = Value::from(format!("{n}.{frac}"));
            prop_assert!(schema.execute(&fractional).is_failed());
        }
    }
}
