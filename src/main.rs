//! smol-agent - interactive CLI entry point.
//!
//! Reads user lines from stdin, feeds them to the agent session, and
//! prints the reconciled replies. `exit` (case-insensitive) quits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smol_agent::agent::{Agent, Session};
use smol_agent::config::Config;
use smol_agent::tools::{
    AnalyzeSentiment, Calculator, ExtractEntities, PrioritizeTasks, ReadFile, SummarizeText,
    ToolRegistry, TranslateText, WebSearch, WriteFile,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smol_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let registry = Arc::new(build_registry(&config));
    let agent = Agent::new(&config, registry.clone());
    let mut session = Session::new();

    println!(
        "smol-agent initialized with {} tools. Type 'exit' to quit.",
        registry.len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nUser: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") {
            println!("Agent: Goodbye!");
            break;
        }

        let response = agent.process(&mut session, input).await;
        println!("\nAgent: {}", response);
    }

    Ok(())
}

/// Register the built-in tool set.
fn build_registry(config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(Calculator));
    registry.register(Arc::new(ReadFile::new(config.workspace_path.clone())));
    registry.register(Arc::new(WriteFile::new(config.workspace_path.clone())));
    registry.register(Arc::new(WebSearch));
    registry.register(Arc::new(SummarizeText));
    registry.register(Arc::new(ExtractEntities));
    registry.register(Arc::new(AnalyzeSentiment));
    registry.register(Arc::new(TranslateText));
    registry.register(Arc::new(PrioritizeTasks));
    registry
}
