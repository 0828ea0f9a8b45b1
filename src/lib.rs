//! # smol-agent
//!
//! A minimal conversational agent that gives an LLM chat endpoint access
//! to external tools.
//!
//! The model requests a tool by emitting a fenced block in its reply:
//!
//! ````text
//! ```tool calculator
//! {"expression": "2 + 2"}
//! ```
//! ````
//!
//! The agent detects the first such block, executes the named tool with
//! the decoded parameters, and splices the result back into the reply in
//! place of the block before appending it to the conversation.
//!
//! ## Architecture
//!
//! One user turn flows through a fixed pipeline:
//! 1. Append the user turn to the session history
//! 2. Compose a system prompt enumerating the registered tools
//! 3. Call the LLM with `[system] + history`
//! 4. Scan the completion for a fenced tool call
//! 5. If found, dispatch it and splice the result over the matched span
//! 6. Append the reconciled reply to the history and return it
//!
//! All failures (unknown tool, bad parameters, tool error, provider
//! error) are folded into the assistant's reply as plain text; none of
//! them terminate the session.
//!
//! ## Example
//!
//! ```rust,ignore
//! use smol_agent::{agent::{Agent, Session}, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config);
//! let mut session = Session::new();
//! let reply = agent.process(&mut session, "What is 2 + 2?").await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
