//! Session state and the per-turn processing pipeline.
//!
//! A [`Session`] is an append-only log of user/assistant turns owned by
//! the caller; the system turn is synthesized fresh on every request and
//! never stored. [`Agent::process`] runs one user turn through the fixed
//! pipeline: compose, complete, parse, dispatch, reconcile, append.
//!
//! Every failure along the way, including a provider failure, is recorded
//! as the assistant's turn content so the conversation stays inspectable
//! and the session stays usable.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::llm::{ChatMessage, DeepSeekClient, GenerationParams, LlmClient};
use crate::tools::ToolRegistry;

use super::dispatch::dispatch;
use super::parser::find_tool_call;
use super::prompt::build_system_prompt;
use super::reconcile::reconcile;

/// Append-only conversation history for one agent session.
///
/// Turns are never reordered or deleted; the log is discarded with the
/// session. Each session owns its history outright, so independent
/// sessions can run concurrently without sharing anything but the
/// read-only tool registry.
#[derive(Default)]
pub struct Session {
    turns: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn push_user(&mut self, content: &str) {
        self.turns.push(ChatMessage::user(content));
    }

    fn push_assistant(&mut self, content: &str) {
        self.turns.push(ChatMessage::assistant(content));
    }
}

/// The conversational agent: an LLM client plus a tool registry.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    params: GenerationParams,
}

impl Agent {
    /// Create an agent talking to DeepSeek, per the given configuration.
    pub fn new(config: &Config, tools: Arc<ToolRegistry>) -> Self {
        let llm = Arc::new(DeepSeekClient::new(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
        ));
        Self {
            llm,
            tools,
            params: GenerationParams {
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
        }
    }

    /// Create an agent with an explicit LLM client (useful for testing).
    pub fn with_client(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        params: GenerationParams,
    ) -> Self {
        Self { llm, tools, params }
    }

    /// Process one user turn and return the assistant's reply.
    ///
    /// The reply is also appended to the session, so the history grows by
    /// exactly two turns per call: the user turn, then the assistant turn.
    pub async fn process(&self, session: &mut Session, user_input: &str) -> String {
        session.push_user(user_input);

        let system_prompt = build_system_prompt(&self.tools);
        let mut messages = Vec::with_capacity(session.len() + 1);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(session.turns().iter().cloned());

        let completion = match self.llm.complete(&messages, &self.params).await {
            Ok(content) => content,
            Err(e) => {
                warn!("LLM call failed: {}", e);
                let message = format!("Error processing request: {}", e);
                session.push_assistant(&message);
                return message;
            }
        };

        let reply = match find_tool_call(&completion) {
            Some(call) => {
                debug!("Dispatching tool call: {}", call.tool_name);
                let result = dispatch(&self.tools, &call).await;
                reconcile(&completion, call.span.clone(), &call.tool_name, &result)
            }
            None => completion,
        };

        session.push_assistant(&reply);
        reply
    }
}
