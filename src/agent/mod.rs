//! Agent module - the tool-augmented conversation pipeline.
//!
//! One user turn flows through a fixed sequence:
//! 1. Append the user turn to the session history
//! 2. Compose a system prompt from the tool registry
//! 3. Call the LLM with the full message list
//! 4. Parse the completion for a fenced tool call
//! 5. If found, dispatch it and splice the result over the matched span
//! 6. Append the reconciled reply and return it

mod dispatch;
mod parser;
mod prompt;
mod reconcile;
mod session;

pub use dispatch::{dispatch, DispatchError};
pub use parser::{find_tool_call, ToolInvocation};
pub use prompt::build_system_prompt;
pub use reconcile::reconcile;
pub use session::{Agent, Session};
