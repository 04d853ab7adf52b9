// SPDX-License-Identifier: GPL-3.0-only

use camera_telemetry::engine::formatting::Surface;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-telemetry")]
#[command(about = "Telemetry display state engine for live-production cameras")]
#[command(version = camera_telemetry::constants::app_info::version())]
struct Cli {
    /// Config file (default: <config dir>/camera-telemetry/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SurfaceArg {
    Handheld,
    Overlay,
}

impl From<SurfaceArg> for Surface {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Handheld => Surface::Handheld,
            SurfaceArg::Overlay => Surface::Overlay,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a notification script through the engine and print every snapshot
    Replay {
        /// JSON-lines script with "at_ms" offsets
        script: PathBuf,

        /// Print snapshots as JSON instead of summary lines
        #[arg(long)]
        json: bool,
    },

    /// Run the live terminal display
    Terminal {
        /// Play a script in real time instead of reading stdin
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Surface to draw
        #[arg(long, value_enum)]
        surface: Option<SurfaceArg>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camera_telemetry=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { script, json } => cli::replay(&config, &script, json),
        Commands::Terminal { script, surface } => {
            cli::terminal(config, script.as_deref(), surface.map(Surface::from))
        }
        Commands::Config => cli::print_config(&config),
    }
}
