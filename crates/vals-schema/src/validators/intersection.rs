use vals_core::Value;

use crate::engine::{Execution, Outcome};
use crate::issue::Issue;
use crate::schema::Schema;

/// Every member must accept. The trial stops at the first rejecting member,
/// which alone is re-run to explain the rejection when the caller collects.
/// Passes the original input through unchanged.
pub(super) fn validate<'v>(
    run: &mut Execution<'_>,
    members: &[Schema],
    input: &'v Value,
) -> Outcome<'v> {
    let rejecting = run.cx.suppressed(|cx| {
        members
            .iter()
            .find(|member| member.execute_in(input, cx).is_failed())
    });
    let Some(member) = rejecting else {
        return run.pass(input);
    };
    if !run.collecting() {
        return run.fail_with(Vec::new());
    }

    let reasons = member.execute_in(input, run.cx).into_reasons();
    run.fail_nested(Issue::UnexpectedInput, input, reasons)
}
