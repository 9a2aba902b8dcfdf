//! # Schema Algebra
//!
//! Construction-time simplification of union and intersection member
//! lists. Both entry points take a raw member list and return the minimal
//! semantically equivalent list; the builders then wrap it (zero members
//! means `never`, one member is returned as is).
//!
//! Reasoning is over value space, not structure: members are classified
//! into categories and compared by the literals or families they denote.
//! Members with no known value space (predicates, nested composites,
//! structural kinds within the same family) are kept and deduplicated by
//! handle identity.
//!
//! ## Union
//!
//! Wildcards absorb everything, `never` is dropped, an unspecific member of
//! a family makes that family's literals redundant, a template makes the
//! string literals it matches redundant, and duplicates collapse to their
//! first occurrence.
//!
//! ## Intersection
//!
//! Wildcards are identities, `never` absorbs everything, members of
//! disjoint families contradict (`never`), and the most specific member of
//! a family wins. Unions among the members are distributed: the Cartesian
//! product of their branches is intersected pairwise, each surviving
//! candidate is intersected with the remaining members, and the candidates
//! are re-optimized as a union.

pub(crate) mod category;
mod intersection;
mod union;

pub use intersection::optimize_intersection;
pub use union::optimize_union;

use crate::schema::Schema;

/// Inline members of nested composites matching `nested`, one level deep.
/// Builders already flatten, so one level suffices.
fn flatten(members: Vec<Schema>, nested: fn(&Schema) -> bool) -> Vec<Schema> {
    let mut flat = Vec::with_capacity(members.len());
    for member in members {
        if nested(&member) {
            if let Some(inner) = member.members() {
                flat.extend_from_slice(inner);
                continue;
            }
        }
        flat.push(member);
    }
    flat
}

/// Append `schema` unless the same handle is already present.
fn push_unique(kept: &mut Vec<Schema>, schema: Schema) {
    if !kept.iter().any(|k| k.ptr_eq(&schema)) {
        kept.push(schema);
    }
}
