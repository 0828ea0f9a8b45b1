//! Tool trait and registry.
//!
//! A tool is a named capability the model may invoke through the fenced
//! invocation syntax. Each tool receives its parameters as one JSON
//! object, extracts the fields it expects, and does its own input
//! validation. Failures are values, not panics: a tool returns
//! [`ToolError`] and the dispatcher renders it as text.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod calculator;
mod files;
mod tasks;
mod text;
mod web;

pub use calculator::Calculator;
pub use files::{ReadFile, WriteFile};
pub use tasks::PrioritizeTasks;
pub use text::{AnalyzeSentiment, ExtractEntities, SummarizeText, TranslateText};
pub use web::WebSearch;

/// A tool-level failure, carrying a human-readable message.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolError(String);

impl ToolError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A named capability the agent can execute on the model's behalf.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to invoke the tool.
    fn name(&self) -> &str;

    /// Documentation shown to the model in the system prompt.
    fn description(&self) -> &str;

    /// Execute with the decoded parameter object.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Registry of available tools, keyed by name.
///
/// Built once at startup and read-only afterwards, so it can be shared
/// across sessions behind an `Arc` without locking. Iteration order is
/// the tool name order, which keeps the composed system prompt stable.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. A second registration with the
    /// same name replaces the first.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Iterate over the registered tools in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Extract a required string argument from the parameter object.
pub(crate) fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    args[key]
        .as_str()
        .ok_or_else(|| ToolError::msg(format!("Missing '{}' argument", key)))
}
