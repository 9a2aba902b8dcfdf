use vals_core::{PathSegment, Value};

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::Schema;

pub(super) fn validate<'v>(run: &mut Execution<'_>, item: &Schema, input: &'v Value) -> Outcome<'v> {
    let Some(elements) = input.as_array() else {
        return run.fail(Issue::UnexpectedInput, input);
    };

    let mut reasons = Vec::new();
    let mut passed = true;
    for (index, element) in elements.iter().enumerate() {
        passed &= run.descend_reporting(
            PathSegment::Index(index),
            item,
            element,
            Issue::UnexpectedArrayItem,
            &mut reasons,
        );
    }

    if passed {
        run.pass(input)
    } else {
        run.fail_with(reasons)
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::*;
    use crate::issue::Issue;
    use serde_json::json;
    use vals_core::Value;

    #[test]
    fn test_rejects_non_sequences_without_visiting_items() {
        let input = Value::from(json!({"0": "a"}));
        let outcome = array(string()).execute(&input);
        let reasons = outcome.reasons();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].issue, Issue::UnexpectedInput);
        assert!(reasons[0].reasons.is_empty());
    }

    #[test]
    fn test_reports_every_bad_index() {
        let input = Value::from(json!(["a", 1, "b", null]));
        let outcome = array(string()).execute(&input);
        let paths: Vec<String> = outcome.reasons().iter().map(|r| r.path.to_string()).collect();
        assert_eq!(paths, vec!["[1]", "[3]"]);
        for reason in outcome.reasons() {
            assert_eq!(reason.issue, Issue::UnexpectedArrayItem);
            assert_eq!(reason.reasons[0].issue, Issue::UnexpectedInput);
        }
    }

    #[test]
    fn test_empty_array_passes() {
        assert!(array(never()).execute(&Value::Array(vec![])).is_passed());
    }
}
