use vals_core::Value;

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::Schema;

/// First accepting branch wins. Branches are tried with collection off; only
/// when all reject and the caller collects are they re-run to explain why.
pub(super) fn validate<'v>(
    run: &mut Execution<'_>,
    branches: &[Schema],
    input: &'v Value,
) -> Outcome<'v> {
    let accepted = run.cx.suppressed(|cx| {
        branches
            .iter()
            .find_map(|branch| branch.execute_in(input, cx).value())
    });
    if let Some(value) = accepted {
        return run.pass(value);
    }
    if !run.collecting() {
        return run.fail_with(Vec::new());
    }

    let mut reasons = Vec::new();
    for branch in branches {
        reasons.extend(branch.execute_in(input, run.cx).into_reasons());
    }
    run.fail_nested(Issue::BranchFailed, input, reasons)
}

#[cfg(test)]
mod tests {
    use crate::builder::*;
    use crate::context::{ExecutionContext, ExecutionOptions};
    use crate::issue::Issue;
    use serde_json::json;
    use vals_core::Value;

    #[test]
    fn test_accepts_when_any_branch_does() {
        let schema = union([string(), array(number())]);
        assert!(schema.execute(&Value::from("a")).is_passed());
        assert!(schema.execute(&Value::from(json!([1, 2]))).is_passed());
    }

    #[test]
    fn test_branch_failures_are_nested() {
        let schema = union([string(), array(number())]);
        let input = Value::from(json!(["x"]));
        let outcome = schema.execute(&input);
        let reasons = outcome.reasons();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].issue, Issue::BranchFailed);

        let nested: Vec<(&str, Issue, String)> = reasons[0]
            .reasons
            .iter()
            .map(|r| (r.schema.name(), r.issue, r.path.to_string()))
            .collect();
        assert_eq!(
            nested,
            vec![
                ("string", Issue::UnexpectedInput, "(root)".to_string()),
                ("array", Issue::UnexpectedArrayItem, "[0]".to_string()),
            ]
        );
    }

    #[test]
    fn test_trial_leaves_context_untouched() {
        let schema = union([number(), object([("a", crate::Item::from(string()))])]);
        let input = Value::from(json!({"a": 1}));
        let mut cx = ExecutionContext::with_options(ExecutionOptions {
            collect_reasons: false,
        });
        let outcome = schema.execute_in(&input, &mut cx);
        assert!(outcome.reasons().is_empty());
        assert!(cx.path().is_root());
        assert!(!cx.collects_reasons());
    }
}
