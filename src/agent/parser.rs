//! Fenced tool-call parser.
//!
//! The model requests a tool with a fenced block:
//!
//! ````text
//! ```tool tool_name
//! {"param": "value"}
//! ```
//! ````
//!
//! Matching policy, which is a contract and not an implementation detail:
//! only the **first** block in a completion is recognized, and the match
//! is non-greedy, so on ambiguous input the narrowest span containing a
//! fence-open and fence-close pair wins. Any deviation from the syntax
//! simply fails to match and the completion passes through untouched.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

fn tool_call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```tool\s+(.*?)\s+(.*?)```").unwrap())
}

/// A tool invocation extracted from one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Name of the requested tool.
    pub tool_name: String,
    /// Raw parameter payload between the fences, not yet decoded.
    pub raw_parameters: String,
    /// Byte range of the entire matched block within the completion.
    pub span: Range<usize>,
}

/// Find the first tool invocation in a completion, if any.
pub fn find_tool_call(output: &str) -> Option<ToolInvocation> {
    let captures = tool_call_re().captures(output)?;
    let matched = captures.get(0)?;

    Some(ToolInvocation {
        tool_name: captures[1].trim().to_string(),
        raw_parameters: captures[2].trim().to_string(),
        span: matched.range(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_match() {
        assert_eq!(find_tool_call("Just a normal answer."), None);
        assert_eq!(find_tool_call("```rust\nfn main() {}\n```"), None);
    }

    #[test]
    fn extracts_name_and_payload() {
        let output = "Let me compute.\n```tool calculator\n{\"a\": 2, \"b\": 2}\n```";
        let call = find_tool_call(output).unwrap();
        assert_eq!(call.tool_name, "calculator");
        assert_eq!(call.raw_parameters, "{\"a\": 2, \"b\": 2}");
        assert_eq!(&output[call.span.clone()], "```tool calculator\n{\"a\": 2, \"b\": 2}\n```");
    }

    #[test]
    fn only_first_block_is_matched() {
        let output = "```tool first\n{}\n```\nand then\n```tool second\n{}\n```";
        let call = find_tool_call(output).unwrap();
        assert_eq!(call.tool_name, "first");
        assert!(call.span.end < output.len());
    }

    #[test]
    fn match_is_non_greedy_across_multiple_fences() {
        // A greedy match would swallow both blocks; the contract is the
        // narrowest region containing a fence-open and fence-close pair.
        let output = "```tool a\n{\"x\": 1}\n```  trailing ```";
        let call = find_tool_call(output).unwrap();
        assert_eq!(call.tool_name, "a");
        assert_eq!(call.raw_parameters, "{\"x\": 1}");
        assert!(!output[call.span.clone()].contains("trailing"));
    }

    #[test]
    fn payload_may_span_multiple_lines() {
        let output = "```tool write_file\n{\n  \"file_path\": \"a.txt\",\n  \"content\": \"hi\"\n}\n```";
        let call = find_tool_call(output).unwrap();
        assert_eq!(call.tool_name, "write_file");
        assert!(call.raw_parameters.starts_with('{'));
        assert!(call.raw_parameters.ends_with('}'));
    }

    #[test]
    fn missing_close_fence_does_not_match() {
        assert_eq!(find_tool_call("```tool calculator\n{\"a\": 1}\n"), None);
    }
}
