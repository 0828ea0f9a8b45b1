//! Response reconciliation.
//!
//! Splices the tool result over the matched invocation span, so the raw
//! fence syntax never reaches the conversation history. Replacement is by
//! span, not by text search: a second block identical to the first stays
//! literal.

use std::ops::Range;

/// Replace the invocation block at `span` with a readable summary.
pub fn reconcile(output: &str, span: Range<usize>, tool_name: &str, result: &str) -> String {
    let mut reconciled = String::with_capacity(output.len() + result.len());
    reconciled.push_str(&output[..span.start]);
    reconciled.push_str(&format!("I used {} and got: {}", tool_name, result));
    reconciled.push_str(&output[span.end..]);
    reconciled
}
