//! File access tools, confined to a working root.
//!
//! Paths from the model are untrusted. Both tools resolve the requested
//! path lexically against the configured root and reject anything that
//! escapes it, before touching the filesystem.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{require_str, Tool, ToolError};

/// Resolve `requested` against `root`, rejecting absolute paths and any
/// `..` traversal that would climb out of the root.
fn confine(root: &Path, requested: &str) -> Result<PathBuf, ToolError> {
    let requested = Path::new(requested);
    if requested.is_absolute() {
        return Err(ToolError::msg(
            "Access to files outside the working directory is not allowed",
        ));
    }

    let mut resolved = PathBuf::new();
    for component in requested.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(ToolError::msg(
                        "Access to files outside the working directory is not allowed",
                    ));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(ToolError::msg(
                    "Access to files outside the working directory is not allowed",
                ));
            }
        }
    }

    Ok(root.join(resolved))
}

/// Read the contents of a file under the working root.
pub struct ReadFile {
    root: PathBuf,
}

impl ReadFile {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file inside the working directory. Parameters: {\"file_path\": \"notes.txt\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let file_path = require_str(&args, "file_path")?;
        let resolved = confine(&self.root, file_path)?;

        if !resolved.exists() {
            return Err(ToolError::msg(format!("File '{}' not found", file_path)));
        }

        let content = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|e| ToolError::msg(format!("Error reading file: {}", e)))?;

        Ok(json!(content))
    }
}

/// Write content to a file under the working root, creating parent
/// directories as needed.
pub struct WriteFile {
    root: PathBuf,
}

impl WriteFile {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file inside the working directory. Parameters: {\"file_path\": \"notes.txt\", \"content\": \"...\"}"
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let file_path = require_str(&args, "file_path")?;
        let content = require_str(&args, "content")?;
        let resolved = confine(&self.root, file_path)?;

        if let Some(parent) = resolved.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ToolError::msg(format!("Error writing to file: {}", e)))?;
        }

        tokio::fs::write(&resolved, content)
            .await
            .map_err(|e| ToolError::msg(format!("Error writing to file: {}", e)))?;

        Ok(json!(format!("Successfully wrote to file: {}", file_path)))
    }
}
