//! Configuration management for smol-agent.
//!
//! Configuration is read from environment variables:
//! - `DEEPSEEK_API_KEY` - Required. Your DeepSeek API key.
//! - `DEEPSEEK_MODEL` - Optional. Model identifier. Defaults to `deepseek-chat`.
//! - `DEEPSEEK_BASE_URL` - Optional. API base URL. Defaults to `https://api.deepseek.com/v1`.
//! - `TEMPERATURE` - Optional. Sampling temperature. Defaults to `0.7`.
//! - `MAX_TOKENS` - Optional. Maximum completion length. Defaults to `512`.
//! - `WORKSPACE_PATH` - Optional. Root directory for file tools. Defaults to current directory.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// DeepSeek API key
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API base URL (OpenAI-compatible `/chat/completions` is appended)
    pub base_url: String,

    /// Sampling temperature passed to the provider
    pub temperature: f32,

    /// Maximum completion length in tokens
    pub max_tokens: u32,

    /// Root directory the file tools are confined to
    pub workspace_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `DEEPSEEK_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("DEEPSEEK_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("DEEPSEEK_API_KEY".to_string()))?;

        let model = std::env::var("DEEPSEEK_MODEL")
            .unwrap_or_else(|_| "deepseek-chat".to_string());

        let base_url = std::env::var("DEEPSEEK_BASE_URL")
            .unwrap_or_else(|_| "https://api.deepseek.com/v1".to_string());

        let temperature = std::env::var("TEMPERATURE")
            .unwrap_or_else(|_| "0.7".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("TEMPERATURE".to_string(), format!("{}", e)))?;

        let max_tokens = std::env::var("MAX_TOKENS")
            .unwrap_or_else(|_| "512".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_TOKENS".to_string(), format!("{}", e)))?;

        let workspace_path = std::env::var("WORKSPACE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

        Ok(Self {
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
            workspace_path,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, workspace_path: PathBuf) -> Self {
        Self {
            api_key,
            model,
            base_url: "https://api.deepseek.com/v1".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            workspace_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let config = Config::new(
            "test-key".to_string(),
            "deepseek-chat".to_string(),
            PathBuf::from("/tmp"),
        );
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 512);
        assert!(config.base_url.starts_with("https://api.deepseek.com"));
    }
}
