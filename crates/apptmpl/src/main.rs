//! apptmpl - console for the app-tmpl backend
//!
//! Main entry point for the apptmpl CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{context, repl, status};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// apptmpl - console for the app-tmpl backend
#[derive(Parser)]
#[command(name = "apptmpl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (overrides the configured context)
    #[arg(long, global = true, env = "APPTMPL_SERVER_URL")]
    pub server: Option<String>,

    /// Named context from client.yaml
    #[arg(long, global = true)]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive console (default)
    Console,

    /// Probe the server and show health, version and identity
    Status,

    /// Manage connection contexts
    Context(context::ContextArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console (human-readable, stderr) + rotating JSON file
    let filter = if cli.verbose {
        "apptmpl=debug,apptmpl_client=debug,apptmpl_config=debug,info"
    } else {
        "apptmpl=info,apptmpl_client=info,warn"
    };

    let log_dir = apptmpl_config::xdg_config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("logs"));
    let file_appender = tracing_appender::rolling::daily(&log_dir, "apptmpl.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "apptmpl=trace,apptmpl_client=trace,apptmpl_config=trace,info",
                )),
        )
        .init();

    let ctx = commands::Context {
        server: cli.server,
        context: cli.context,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => repl::run(&ctx).await,
        Commands::Status => status::run(&ctx).await,
        Commands::Context(args) => context::run(args, &ctx),
    }
}
