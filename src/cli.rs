//! CLI argument parsing and the interactive chat loop

use anyhow::Result;
use clap::{Parser, Subcommand};
use garmen_core::{AgentKey, ChatRole, Orchestrator};
use garmen_llm::{GeminiProvider, LlmProvider};
use std::io::Write;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tracing::info;

#[derive(Parser)]
#[command(name = "garmen", version, about = "Asisten SIA Manufaktur Garmen")]
pub struct Cli {
    /// Model override for routing and generation calls
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// List the available agents
    Agents,
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Agents => {
            list_agents();
            Ok(())
        }
        Commands::Chat => chat(cli.model).await,
    }
}

fn list_agents() {
    for key in AgentKey::ALL {
        let profile = key.profile();
        println!(
            "{:<24} ({:<9}) {}",
            profile.name, profile.short_name, profile.description
        );
    }
}

async fn chat(model: Option<String>) -> Result<()> {
    let provider = Arc::new(GeminiProvider::from_env()?);
    info!(provider = provider.name(), model = provider.default_model(), "Starting chat session");

    let mut orchestrator = Orchestrator::new(provider);
    if let Some(model) = model {
        orchestrator = orchestrator.with_model(model);
    }

    // Print the seeded welcome message, then everything each turn appends
    render_from(&orchestrator, 0);
    let mut rendered = orchestrator.session().messages().len();

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        let short_name = orchestrator.session().active_agent().profile().short_name;
        print!("Tanya {short_name}> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        // Rejected submissions append nothing, so they render nothing
        orchestrator.submit(input).await;
        render_from(&orchestrator, rendered);
        rendered = orchestrator.session().messages().len();
    }

    Ok(())
}

fn render_from(orchestrator: &Orchestrator, from: usize) {
    for message in &orchestrator.session().messages()[from..] {
        let stamp = message.timestamp.format("%H:%M");
        match message.role {
            ChatRole::System => println!("  -- {} --", message.content),
            ChatRole::User => println!("[{stamp}] Anda: {}", message.content),
            ChatRole::Agent => {
                let name = message.agent.unwrap_or(AgentKey::Main).profile().name;
                println!("[{stamp}] {name}: {}", message.content);
            }
        }
    }
}
