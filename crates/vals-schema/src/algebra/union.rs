use std::collections::HashSet;

use super::category::{classify, Category, Family, LiteralKey};
use super::{flatten, push_unique};
use crate::schema::{Schema, SchemaKind, StringMaterial};
use crate::template::TemplatePattern;

/// Minimal member list of `members` taken as a union.
///
/// Order is preserved; among duplicates the first occurrence is kept.
pub fn optimize_union(members: Vec<Schema>) -> Vec<Schema> {
    let flat = flatten(members, Schema::is_union);
    let before = flat.len();

    if let Some(wildcard) = flat
        .iter()
        .find(|member| classify(member) == Category::Wildcard)
    {
        tracing::debug!(members = before, kind = wildcard.name(), "union absorbed by wildcard");
        return vec![wildcard.clone()];
    }

    let categories: Vec<Category> = flat.iter().map(classify).collect();
    let unspecific: HashSet<Family> = categories
        .iter()
        .filter_map(|category| match category {
            Category::Unspecific(family) => Some(*family),
            _ => None,
        })
        .collect();
    let any_string = unspecific.contains(&Family::String);
    let templates: Vec<TemplatePattern> = if any_string {
        Vec::new()
    } else {
        flat.iter().filter_map(template_of).cloned().collect()
    };

    let mut kept = Vec::with_capacity(flat.len());
    let mut seen_families = HashSet::new();
    let mut seen_literals: HashSet<LiteralKey> = HashSet::new();
    let mut seen_templates: HashSet<String> = HashSet::new();

    for (member, category) in flat.into_iter().zip(categories) {
        match category {
            Category::Wildcard | Category::Empty => {}
            Category::Unspecific(family) => {
                if seen_families.insert(family) {
                    kept.push(member);
                }
            }
            Category::Specific(key) => {
                if unspecific.contains(&key.family()) {
                    continue;
                }
                if let LiteralKey::String(s) = &key {
                    if templates.iter().any(|pattern| pattern.is_match(s)) {
                        continue;
                    }
                }
                if seen_literals.insert(key) {
                    kept.push(member);
                }
            }
            Category::Template(source) => {
                if !any_string && seen_templates.insert(source) {
                    kept.push(member);
                }
            }
            Category::Structural(_) | Category::Opaque => push_unique(&mut kept, member),
        }
    }

    tracing::trace!(before, after = kept.len(), "optimized union");
    kept
}

fn template_of(schema: &Schema) -> Option<&TemplatePattern> {
    match schema.kind() {
        SchemaKind::String(StringMaterial::Template(pattern)) => Some(pattern),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;
    use crate::template::TemplatePart;

    fn rendered(members: Vec<Schema>) -> Vec<String> {
        optimize_union(members).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unspecific_absorbs_literals() {
        assert_eq!(rendered(vec![string(), string_literal("a")]), vec!["string"]);
        assert_eq!(rendered(vec![string_literal("a"), string()]), vec!["string"]);
        assert_eq!(
            rendered(vec![number_literal(1.0), string_literal("a"), number()]),
            vec![r#""a""#, "number"]
        );
    }

    #[test]
    fn test_literals_deduplicate() {
        assert_eq!(
            rendered(vec![
                string_literal("a"),
                string_literal("b"),
                string_literal("a"),
                boolean_literal(true),
                boolean_literal(true),
            ]),
            vec![r#""a""#, r#""b""#, "true"]
        );
    }

    #[test]
    fn test_never_dropped_and_wildcard_absorbs() {
        assert_eq!(rendered(vec![never(), number()]), vec!["number"]);
        assert_eq!(rendered(vec![number(), any(), unknown()]), vec!["any"]);
        assert!(optimize_union(vec![never(), never()]).is_empty());
    }

    #[test]
    fn test_single_valued_kinds_collapse() {
        assert_eq!(rendered(vec![null(), undefined(), null()]), vec!["null", "undefined"]);
    }

    #[test]
    fn test_template_absorbs_matching_literals() {
        let ids = template([TemplatePart::from("id-"), number().into()]).unwrap();
        assert_eq!(
            rendered(vec![string_literal("id-1"), ids.clone(), string_literal("x")]),
            vec!["`id-${number}`", r#""x""#]
        );
        assert_eq!(rendered(vec![ids.clone(), string()]), vec!["string"]);
        assert_eq!(rendered(vec![ids.clone(), ids]), vec!["`id-${number}`"]);
    }

    #[test]
    fn test_structural_members_deduplicate_by_identity() {
        let list = array(string());
        let out = optimize_union(vec![list.clone(), array(string()), list.clone()]);
        assert_eq!(out.len(), 2);
        assert!(out[0].ptr_eq(&list));
    }

    #[test]
    fn test_nested_unions_flatten() {
        let inner = union([string_literal("a"), number()]);
        assert_eq!(
            rendered(vec![inner, string_literal("b"), number_literal(3.0)]),
            vec![r#""a""#, "number", r#""b""#]
        );
    }

    #[test]
    fn test_idempotent() {
        let once = optimize_union(vec![
            string_literal("a"),
            number(),
            number_literal(1.0),
            null(),
            array(string()),
        ]);
        let twice = optimize_union(once.clone());
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert!(a.ptr_eq(b));
        }
    }
}
