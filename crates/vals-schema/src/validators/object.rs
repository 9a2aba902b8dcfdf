use vals_core::{PathSegment, Value};

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::ObjectMaterial;

/// Checks every declared key in declaration order. Undeclared input keys are
/// ignored. An optional key may be absent or `undefined`.
pub(super) fn validate<'v>(
    run: &mut Execution<'_>,
    object: &ObjectMaterial,
    input: &'v Value,
) -> Outcome<'v> {
    let Some(properties) = input.as_object() else {
        return run.fail(Issue::UnexpectedInput, input);
    };

    let mut reasons = Vec::new();
    let mut passed = true;
    for (key, item) in &object.fields {
        match properties.get(key) {
            None if item.optional => {}
            None => {
                passed = false;
                run.reason_at(
                    PathSegment::from(key),
                    Issue::MissingObjectKey,
                    &key.to_value(),
                    &mut reasons,
                );
            }
            Some(value) if item.optional && value.is_undefined() => {}
            Some(value) => {
                passed &= run.descend_reporting(
                    PathSegment::from(key),
                    &item.schema,
                    value,
                    Issue::UnexpectedObjectValue,
                    &mut reasons,
                );
            }
        }
    }

    if passed {
        run.pass(input)
    } else {
        run.fail_with(reasons)
    }
}
