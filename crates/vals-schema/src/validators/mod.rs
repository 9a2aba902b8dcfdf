//! # Validators
//!
//! One validator per [`SchemaKind`]. [`dispatch`] is the single recursive
//! entry point; composites call back into it through
//! `Schema::execute_in` for each child.
//!
//! ## Failure Policy
//!
//! | Kind         | Wrong shape        | Children                                |
//! |--------------|--------------------|-----------------------------------------|
//! | array        | `UNEXPECTED_INPUT` | every element, one reason per bad index |
//! | tuple        | `UNEXPECTED_INPUT` / `UNEXPECTED_TUPLE_LENGTH` | every slot |
//! | object       | `UNEXPECTED_INPUT` | every declared key                      |
//! | record       | `UNEXPECTED_INPUT` | every own key, then required keys       |
//! | union        | n/a                | first accepting branch wins             |
//! | intersection | n/a                | stops at the first rejecting member     |

mod array;
mod intersection;
pub(crate) mod leaf;
mod object;
mod record;
mod tuple;
mod union;

use vals_core::Value;

use crate::engine::{Execution, Outcome};
use crate::schema::SchemaKind;

pub(crate) fn dispatch<'v>(run: &mut Execution<'_>, input: &'v Value) -> Outcome<'v> {
    let schema = run.schema;
    match schema.kind() {
        SchemaKind::Array(item) => array::validate(run, item, input),
        SchemaKind::Tuple(tuple) => tuple::validate(run, tuple, input),
        SchemaKind::Object(object) => object::validate(run, object, input),
        SchemaKind::Record(record) => record::validate(run, record, input),
        SchemaKind::Union(branches) => union::validate(run, branches, input),
        SchemaKind::Intersection(members) => intersection::validate(run, members, input),
        kind => leaf::validate(run, kind, input),
    }
}
