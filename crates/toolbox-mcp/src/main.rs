//! Toolbox MCP Server — entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use toolbox_mcp::config::load_config;
use toolbox_mcp::protocol::ProtocolHandler;
use toolbox_mcp::transport::StdioTransport;
use toolbox_mcp::types::{InitializeResult, MCP_VERSION};
use toolbox_mcp::Dispatcher;

#[derive(Parser)]
#[command(
    name = "toolbox-mcp",
    about = "MCP server exposing calculator, time, geocoding, weather and image tools",
    version
)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Print server info and registered capabilities as JSON.
    Info,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level.as_deref() {
        config.override_log_level(level)?;
    }

    // Logs go to stderr; stdout carries the protocol.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dispatcher = Arc::new(Dispatcher::from_config(&config)?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let handler = ProtocolHandler::new(dispatcher);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let init = InitializeResult::new(dispatcher.info().clone(), MCP_VERSION);
            let mut info = dispatcher.summary();
            info["protocol_version"] = serde_json::json!(init.protocol_version);
            info["capabilities"] = serde_json::to_value(&init.capabilities)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
