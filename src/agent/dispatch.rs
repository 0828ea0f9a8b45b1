//! Tool dispatch: lookup, parameter decoding, execution.
//!
//! Dispatch is a total function over a closed set of outcomes. Every
//! failure mode has a display string, and none of them propagate past
//! this module; the orchestrator folds the returned text into the
//! assistant's reply either way.

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::tools::ToolRegistry;

use super::parser::ToolInvocation;

/// Dispatch failures, each rendered as ordinary assistant text.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Error: Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Error: Invalid JSON parameters for tool '{0}'")]
    InvalidParameters(String),

    #[error("Error executing tool '{name}': {message}")]
    ToolExecution { name: String, message: String },
}

/// Execute the requested tool and render the outcome as display text.
///
/// Exactly one tool is invoked per request, and only after both the
/// registry lookup and the parameter decode succeed.
pub async fn dispatch(registry: &ToolRegistry, request: &ToolInvocation) -> String {
    match try_dispatch(registry, request).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Tool dispatch failed: {}", e);
            e.to_string()
        }
    }
}

async fn try_dispatch(
    registry: &ToolRegistry,
    request: &ToolInvocation,
) -> Result<String, DispatchError> {
    let tool = registry
        .get(&request.tool_name)
        .ok_or_else(|| DispatchError::ToolNotFound(request.tool_name.clone()))?;

    // The contract is named parameters: the payload must be one JSON
    // object, not a bare value or list.
    let params: Value = serde_json::from_str(&request.raw_parameters)
        .map_err(|_| DispatchError::InvalidParameters(request.tool_name.clone()))?;
    if !params.is_object() {
        return Err(DispatchError::InvalidParameters(request.tool_name.clone()));
    }

    let result = tool
        .execute(params)
        .await
        .map_err(|e| DispatchError::ToolExecution {
            name: request.tool_name.clone(),
            message: e.to_string(),
        })?;

    Ok(render_result(&result))
}

/// Render a tool's success value for display: strings verbatim,
/// everything else as compact JSON.
fn render_result(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Tool, ToolError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Tool that records every invocation and echoes one argument.
    struct Recorder {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Tool for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn description(&self) -> &str {
            "records calls"
        }

        async fn execute(&self, args: Value) -> Result<Value, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!(format!("echo={}", args["value"])))
        }
    }

    struct Failing;

    #[async_trait]
    impl Tool for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            Err(ToolError::msg("boom"))
        }
    }

    fn invocation(name: &str, payload: &str) -> ToolInvocation {
        ToolInvocation {
            tool_name: name.to_string(),
            raw_parameters: payload.to_string(),
            span: 0..0,
        }
    }

    fn registry_with(calls: Arc<AtomicUsize>) -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Recorder { calls }));
        registry.register(Arc::new(Failing));
        registry
    }

    #[tokio::test]
    async fn invokes_named_tool_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = registry_with(calls.clone());

        let result = dispatch(&registry, &invocation("recorder", r#"{"value": 7}"#)).await;
        assert_eq!(result, "echo=7");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_by_name() {
        let registry = registry_with(Arc::new(AtomicUsize::new(0)));
        let result = dispatch(&registry, &invocation("missing_tool", "{}")).await;
        assert_eq!(result, "Error: Tool 'missing_tool' not found");
    }

    #[tokio::test]
    async fn malformed_payload_never_reaches_the_tool() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = registry_with(calls.clone());

        let result = dispatch(&registry, &invocation("recorder", "not json at all")).await;
        assert_eq!(result, "Error: Invalid JSON parameters for tool 'recorder'");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_object_payload_is_invalid() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = registry_with(calls.clone());

        let result = dispatch(&registry, &invocation("recorder", "[1, 2, 3]")).await;
        assert_eq!(result, "Error: Invalid JSON parameters for tool 'recorder'");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tool_failure_is_rendered_not_propagated() {
        let registry = registry_with(Arc::new(AtomicUsize::new(0)));
        let result = dispatch(&registry, &invocation("failing", "{}")).await;
        assert_eq!(result, "Error executing tool 'failing': boom");
    }

    #[tokio::test]
    async fn structured_results_render_as_compact_json() {
        struct Structured;

        #[async_trait]
        impl Tool for Structured {
            fn name(&self) -> &str {
                "structured"
            }

            fn description(&self) -> &str {
                "returns an object"
            }

            async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
                Ok(json!({"answer": 42}))
            }
        }

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Structured));

        let result = dispatch(&registry, &invocation("structured", "{}")).await;
        assert_eq!(result, r#"{"answer":42}"#);
    }
}
