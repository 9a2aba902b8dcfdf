use vals_core::{PathSegment, PropertyKey, Value};

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::RecordMaterial;

pub(super) fn validate<'v>(
    run: &mut Execution<'_>,
    record: &RecordMaterial,
    input: &'v Value,
) -> Outcome<'v> {
    let Some(properties) = input.as_object() else {
        return run.fail(Issue::UnexpectedInput, input);
    };

    let mut missing: Vec<&PropertyKey> = record.required_keys().iter().collect();
    let mut reasons = Vec::new();
    let mut passed = true;

    for (key, value) in properties {
        missing.retain(|required| *required != key);
        let key_value = key.to_value();
        passed &= run.descend_reporting(
            PathSegment::from(key),
            &record.key,
            &key_value,
            Issue::UnexpectedRecordKey,
            &mut reasons,
        );
        passed &= run.descend_reporting(
            PathSegment::from(key),
            &record.value,
            value,
            Issue::UnexpectedRecordValue,
            &mut reasons,
        );
    }

    for key in missing {
        passed = false;
        run.reason_at(
            PathSegment::from(key),
            Issue::MissingRecordKey,
            &key.to_value(),
            &mut reasons,
        );
    }

    if passed {
        run.pass(input)
    } else {
        run.fail_with(reasons)
    }
}
