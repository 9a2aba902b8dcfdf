use super::category::{classify, Category, Family, LiteralKey, Structure};
use super::{flatten, push_unique};
use crate::builder;
use crate::schema::{Schema, SchemaKind, StringMaterial};

/// Minimal member list of `members` taken as an intersection.
///
/// A contradiction yields `[never]`. With unions among the members the
/// result is a single union of intersections, or the members of the one
/// surviving candidate, or `[never]` when every candidate contradicts.
pub fn optimize_intersection(members: Vec<Schema>) -> Vec<Schema> {
    let flat = flatten(members, Schema::is_intersection);
    let before = flat.len();
    let optimized = if flat.iter().any(Schema::is_union) {
        distribute(flat)
    } else {
        reduce(flat)
    };
    tracing::trace!(before, after = optimized.len(), "optimized intersection");
    optimized
}

fn contradiction(why: &'static str) -> Vec<Schema> {
    tracing::debug!(why, "intersection collapsed to never");
    vec![builder::never()]
}

/// Tracks which family the members have committed to so far.
#[derive(Default)]
struct Domain {
    family: Option<Family>,
    structure: Option<Structure>,
}

impl Domain {
    fn join_family(&mut self, family: Family) -> bool {
        if self.structure.is_some() || self.family.is_some_and(|f| f != family) {
            return false;
        }
        self.family = Some(family);
        true
    }

    fn join_structure(&mut self, structure: Structure) -> bool {
        if self.family.is_some() || self.structure.is_some_and(|s| s != structure) {
            return false;
        }
        self.structure = Some(structure);
        true
    }
}

/// Intersection of union-free members. The surviving primitive member
/// comes first, followed by the structural and opaque ones in order.
fn reduce(flat: Vec<Schema>) -> Vec<Schema> {
    let mut domain = Domain::default();
    let mut wildcard: Option<Schema> = None;
    let mut unspecific: Option<Schema> = None;
    let mut literal: Option<(LiteralKey, Schema)> = None;
    let mut templates: Vec<(String, Schema)> = Vec::new();
    let mut others: Vec<Schema> = Vec::new();

    for member in flat {
        match classify(&member) {
            Category::Wildcard => {
                wildcard.get_or_insert(member);
            }
            Category::Empty => return contradiction("never member"),
            Category::Unspecific(family) => {
                if !domain.join_family(family) {
                    return contradiction("disjoint families");
                }
                unspecific.get_or_insert(member);
            }
            Category::Specific(key) => {
                if !domain.join_family(key.family()) {
                    return contradiction("disjoint families");
                }
                match literal.as_ref().map(|(seen, _)| *seen == key) {
                    Some(false) => return contradiction("different literals"),
                    Some(true) => {}
                    None => literal = Some((key, member)),
                }
            }
            Category::Template(source) => {
                if !domain.join_family(Family::String) {
                    return contradiction("disjoint families");
                }
                if !templates.iter().any(|(seen, _)| *seen == source) {
                    templates.push((source, member));
                }
            }
            Category::Structural(structure) => {
                if !domain.join_structure(structure) {
                    return contradiction("disjoint structures");
                }
                push_unique(&mut others, member);
            }
            Category::Opaque => push_unique(&mut others, member),
        }
    }

    let mut kept = Vec::with_capacity(others.len() + templates.len() + 1);
    if let Some((_, schema)) = literal {
        if let Some(text) = string_literal_of(&schema) {
            let admitted = templates
                .iter()
                .all(|(_, template)| template_admits(template, text));
            if !admitted {
                return contradiction("literal outside template");
            }
        }
        kept.push(schema);
    } else if !templates.is_empty() {
        kept.extend(templates.into_iter().map(|(_, schema)| schema));
    } else if let Some(schema) = unspecific {
        kept.push(schema);
    }
    kept.extend(others);

    if kept.is_empty() {
        if let Some(schema) = wildcard {
            kept.push(schema);
        }
    }
    kept
}

fn string_literal_of(schema: &Schema) -> Option<&str> {
    match schema.kind() {
        SchemaKind::String(StringMaterial::Literal(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn template_admits(template: &Schema, text: &str) -> bool {
    match template.kind() {
        SchemaKind::String(StringMaterial::Template(pattern)) => pattern.is_match(text),
        _ => true,
    }
}

/// Distribute the intersection over its union members.
fn distribute(flat: Vec<Schema>) -> Vec<Schema> {
    let (unions, rest): (Vec<Schema>, Vec<Schema>) = flat.into_iter().partition(Schema::is_union);
    let rest = reduce(rest);
    if rest.iter().any(Schema::is_never) {
        return rest;
    }

    let mut candidates: Vec<Schema> = Vec::new();
    for (i, composite) in unions.iter().enumerate() {
        let branches = composite.members().unwrap_or_default();
        if i == 0 {
            candidates = branches.to_vec();
            continue;
        }
        let mut merged = Vec::with_capacity(candidates.len() * branches.len());
        for left in &candidates {
            for right in branches {
                let pair = builder::intersection([left.clone(), right.clone()]);
                if !pair.is_never() {
                    merged.push(pair);
                }
            }
        }
        candidates = merged;
    }

    let candidates: Vec<Schema> = candidates
        .into_iter()
        .map(|candidate| {
            let mut members = Vec::with_capacity(rest.len() + 1);
            members.push(candidate);
            members.extend(rest.iter().cloned());
            builder::intersection(members)
        })
        .filter(|candidate| !candidate.is_never())
        .collect();

    let result = builder::union(candidates);
    match result.kind() {
        SchemaKind::Never => {
            tracing::debug!(unions = unions.len(), "every distributed candidate contradicts");
            vec![result]
        }
        SchemaKind::Intersection(members) => members.clone(),
        _ => vec![result],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;
    use crate::template::TemplatePart;
    use vals_core::Class;

    fn rendered(members: Vec<Schema>) -> Vec<String> {
        optimize_intersection(members)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_different_literals_contradict() {
        assert_eq!(rendered(vec![string_literal("a"), string_literal("b")]), vec!["never"]);
        assert_eq!(rendered(vec![number_literal(1.0), number_literal(2.0)]), vec!["never"]);
    }

    #[test]
    fn test_literal_beats_unspecific() {
        assert_eq!(rendered(vec![string(), string_literal("a")]), vec![r#""a""#]);
        assert_eq!(
            rendered(vec![string_literal("a"), string(), string_literal("a")]),
            vec![r#""a""#]
        );
    }

    #[test]
    fn test_disjoint_families_contradict() {
        assert_eq!(rendered(vec![string(), number()]), vec!["never"]);
        assert_eq!(rendered(vec![null(), undefined()]), vec!["never"]);
        assert_eq!(rendered(vec![string(), array(string())]), vec!["never"]);
        assert_eq!(rendered(vec![array(string()), object([("a", string())])]), vec!["never"]);
        assert_eq!(rendered(vec![function(), tuple([string()])]), vec!["never"]);
    }

    #[test]
    fn test_same_structure_is_kept() {
        let a = object([("a", string())]);
        let b = instance(&Class::new("C"));
        let out = optimize_intersection(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(out.len(), 2);
        assert!(out[0].ptr_eq(&a) && out[1].ptr_eq(&b));
    }

    #[test]
    fn test_wildcards_are_identities() {
        assert_eq!(rendered(vec![unknown(), number(), any()]), vec!["number"]);
        assert_eq!(rendered(vec![unknown(), any()]), vec!["unknown"]);
        assert_eq!(rendered(vec![never(), any()]), vec!["never"]);
    }

    #[test]
    fn test_template_and_literal() {
        let ids = template([TemplatePart::from("id-"), number().into()]).unwrap();
        assert_eq!(rendered(vec![ids.clone(), string_literal("id-7")]), vec![r#""id-7""#]);
        assert_eq!(rendered(vec![ids.clone(), string_literal("x")]), vec!["never"]);
        assert_eq!(rendered(vec![string(), ids]), vec!["`id-${number}`"]);
    }

    #[test]
    fn test_predicates_join_any_family() {
        let positive = predicate("positive", |_| true);
        let out = optimize_intersection(vec![number(), positive.clone()]);
        assert_eq!(out.len(), 2);
        assert!(out[1].ptr_eq(&positive));
    }

    #[test]
    fn test_distributes_over_union() {
        let letters = union([string_literal("a"), string_literal("b"), number()]);
        assert_eq!(rendered(vec![letters.clone(), string()]), vec![r#""a" | "b""#]);
        assert_eq!(rendered(vec![letters, string_literal("b")]), vec![r#""b""#]);
    }

    #[test]
    fn test_merges_unions_pairwise() {
        let left = union([string_literal("a"), string_literal("b"), number_literal(1.0)]);
        let right = union([string_literal("b"), number(), boolean()]);
        assert_eq!(rendered(vec![left, right]), vec![r#""b" | 1"#]);
    }

    #[test]
    fn test_disjoint_unions_yield_never() {
        let left = union([string_literal("a"), string_literal("b")]);
        let right = union([number(), boolean()]);
        assert_eq!(rendered(vec![left, right]), vec!["never"]);
        assert!(intersection([
            union([string(), number()]),
            array(string()),
        ])
        .is_never());
    }
}
