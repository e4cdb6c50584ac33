//! Clipdeck CLI - Headless Playback Screen Simulator
//!
//! Features:
//! - Replay scripted decoder, user and connectivity events
//! - Print player snapshots after each event
//! - Print the overlay render plan
//! - Dump the default player configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

/// Clipdeck CLI - Playback screen simulator
#[derive(Parser)]
#[command(name = "clipdeck-cli")]
#[command(version)]
#[command(about = "Replay player events against a headless playback screen", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script
    Simulate {
        /// Media URI (URL, or device path with --local)
        #[arg(short, long)]
        source: String,

        /// Source is an on-device file
        #[arg(long)]
        local: bool,

        /// Media format (mp4, hls, dash, webm); detected from the URI if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Widevine license server URL
        #[arg(long)]
        drm: Option<String>,

        /// Player configuration JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// JSON array of events to replay
        #[arg(long)]
        script: PathBuf,

        /// Print the final render plan
        #[arg(long)]
        plan: bool,
    },

    /// Print the default player configuration
    Defaults,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            source,
            local,
            format,
            drm,
            config,
            script,
            plan,
        } => {
            let args = commands::SimulateArgs {
                source,
                local,
                format,
                drm,
                config,
                script,
                plan,
            };
            commands::simulate(args, &cli.output).await?;
        }
        Commands::Defaults => {
            commands::defaults();
        }
    }

    Ok(())
}
