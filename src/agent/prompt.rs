//! System prompt composition.

use crate::tools::ToolRegistry;

/// Fallback shown for a tool registered without documentation.
const NO_DESCRIPTION: &str = "No description available";

/// Build the system prompt enumerating the available tools and defining
/// the invocation syntax. Pure function of the registry; the result is
/// synthesized fresh for every request and never stored in the session.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .iter()
        .map(|t| {
            let doc = if t.description().is_empty() {
                NO_DESCRIPTION
            } else {
                t.description()
            };
            format!("- {}: {}", t.name(), doc)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are SmolAgent, a helpful AI assistant with access to tools.

Available tools:
{tool_descriptions}

When you need to use a tool, use the following format:
```tool tool_name
parameters in JSON format
```

Always respond in a helpful, safe, and ethical manner."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Tool, ToolError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Arc;

    struct Described;

    #[async_trait]
    impl Tool for Described {
        fn name(&self) -> &str {
            "described"
        }

        fn description(&self) -> &str {
            "Does something useful"
        }

        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            Ok(Value::Null)
        }
    }

    struct Undocumented;

    #[async_trait]
    impl Tool for Undocumented {
        fn name(&self) -> &str {
            "undocumented"
        }

        fn description(&self) -> &str {
            ""
        }

        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn lists_every_tool_with_documentation() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Described));

        let prompt = build_system_prompt(&registry);
        assert!(prompt.contains("Available tools:"));
        assert!(prompt.contains("- described: Does something useful"));
    }

    #[test]
    fn missing_documentation_gets_placeholder() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Undocumented));

        let prompt = build_system_prompt(&registry);
        assert!(prompt.contains("- undocumented: No description available"));
    }

    #[test]
    fn defines_the_invocation_syntax() {
        let registry = ToolRegistry::new();
        let prompt = build_system_prompt(&registry);
        assert!(prompt.contains("```tool tool_name"));
        assert!(prompt.contains("parameters in JSON format"));
    }
}
