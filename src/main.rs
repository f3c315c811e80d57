use anyhow::Result;
use clap::Parser;
use colored::*;
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

use wxask_cli::{AppConfig, ChatSession, LineReader, TerminalReader, build_provider, display_banner};

/// Configuration comes from the environment (or a `.env` file):
/// PROVIDER, WATSONX_BASE_URL, WATSONX_API_KEY, WATSONX_PROJECT_ID, MODEL,
/// INFER_PATH, WATSONX_USE_APIKEY_DIRECT, OPENAI_API_KEY, OPENAI_MODEL.
#[derive(Parser)]
#[command(name = "wxask", version)]
#[command(about = "Ask IBM watsonx.ai or OpenAI questions from the terminal", long_about = None)]
struct Cli {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_env()?;
    for line in config.summary() {
        println!("{}", line.dimmed());
    }

    let client = build_provider(&config).await?;
    display_banner(client.provider_name(), client.model_id());

    let session = ChatSession::new(client.as_ref(), config.options.clone());
    let mut out = io::stdout().lock();

    let summary = if io::stdin().is_terminal() {
        session.run(&mut TerminalReader::new(), &mut out).await?
    } else {
        session.run(&mut LineReader::new(io::stdin().lock()), &mut out).await?
    };

    tracing::info!(
        prompts = summary.prompts,
        failures = summary.failures,
        "Session finished"
    );

    Ok(())
}
