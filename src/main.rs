//! Proposta - assistente de propostas técnicas
//!
//! A terminal chat client that submits messages and attached memorials to a
//! generation webhook and renders the replies.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use proposta::cli::runner;
use proposta::config::Settings;

/// Proposta - Assistente de propostas técnicas 📋
#[derive(Parser, Debug)]
#[command(name = "proposta")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Execute a single prompt and exit
    #[arg(short, long)]
    prompt: Option<String>,

    /// Attach a file to the prompt (memorial descritivo)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Override the webhook endpoint
    #[arg(long, env = "PROPOSTA_WEBHOOK_URL")]
    endpoint: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build tokio runtime
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        // Determine log level from args or env
        let default_filter = if args.verbose {
            "trace"
        } else if args.debug {
            "debug"
        } else {
            "warn" // Quiet by default for normal use
        };

        // Initialize tracing with stderr output
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        if args.debug || args.verbose {
            tracing::info!("Debug logging enabled");
        }

        // Load settings; the flag (or PROPOSTA_WEBHOOK_URL) overrides the
        // configured endpoint for this run only
        let mut settings = Settings::load()?;
        if let Some(endpoint) = args.endpoint {
            settings.endpoint = endpoint;
        }

        if runner::wants_single_prompt(args.prompt.as_deref(), args.file.as_deref()) {
            let prompt = args.prompt.as_deref().unwrap_or("");
            runner::run_single_prompt(settings, prompt, args.file.as_deref()).await?;
        } else {
            runner::run_interactive(settings).await?;
        }

        Ok(())
    })
}
