//! `[...head, ...rest[], ...tail]` validation.
//!
//! The length check runs before any element: with a rest schema the input
//! needs at least `head + tail` elements, without one exactly `head`.

use vals_core::{PathSegment, Value};

use crate::engine::{Execution, Outcome, Reason};
use crate::issue::Issue;
use crate::schema::{Item, TupleMaterial};

pub(super) fn validate<'v>(
    run: &mut Execution<'_>,
    tuple: &TupleMaterial,
    input: &'v Value,
) -> Outcome<'v> {
    let Some(elements) = input.as_array() else {
        return run.fail(Issue::UnexpectedInput, input);
    };

    let fixed = tuple.head.len() + tuple.tail.len();
    let length_ok = match tuple.rest {
        Some(_) => elements.len() >= fixed,
        None => elements.len() == fixed,
    };
    if !length_ok {
        return run.fail(Issue::UnexpectedTupleLength, input);
    }

    let tail_start = elements.len() - tuple.tail.len();
    let mut reasons = Vec::new();
    let mut passed = true;

    for (index, item) in tuple.head.iter().enumerate() {
        passed &= check_item(run, index, item, &elements[index], &mut reasons);
    }
    if let Some(rest) = &tuple.rest {
        for index in tuple.head.len()..tail_start {
            passed &= run.descend_reporting(
                PathSegment::Index(index),
                rest,
                &elements[index],
                Issue::UnexpectedTupleItem,
                &mut reasons,
            );
        }
    }
    for (offset, item) in tuple.tail.iter().enumerate() {
        let index = tail_start + offset;
        passed &= check_item(run, index, item, &elements[index], &mut reasons);
    }

    if passed {
        run.pass(input)
    } else {
        run.fail_with(reasons)
    }
}

fn check_item(
    run: &mut Execution<'_>,
    index: usize,
    item: &Item,
    element: &Value,
    reasons: &mut Vec<Reason>,
) -> bool {
    if item.optional && element.is_undefined() {
        return true;
    }
    run.descend_reporting(
        PathSegment::Index(index),
        &item.schema,
        element,
        Issue::UnexpectedTupleItem,
        reasons,
    )
}
