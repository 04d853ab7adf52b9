// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Replaying notification scripts on a virtual clock
//! - Running the live terminal display
//! - Showing the effective configuration

use camera_telemetry::engine::formatting::Surface;
use camera_telemetry::engine::{EngineSettings, TelemetryEngine};
use camera_telemetry::replay::{self, ReplayEntry};
use camera_telemetry::terminal::{self, Source};
use camera_telemetry::{AppError, AppResult, Config};
use std::path::Path;
use tracing::info;

pub fn load_config(path: Option<&Path>) -> AppResult<Config> {
    Config::load(path)
}

fn read_script(path: &Path) -> AppResult<Vec<ReplayEntry>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    replay::parse_script(&contents)
}

/// Replay a script and print every published snapshot
pub fn replay(config: &Config, script: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries = read_script(script)?;
    info!(script = %script.display(), entries = entries.len(), "Replaying script");

    let mut engine = TelemetryEngine::new(EngineSettings::from(config));
    let snapshots = replay::run_replay(&mut engine, entries);

    for vm in &snapshots {
        if json {
            println!("{}", serde_json::to_string(vm)?);
        } else {
            println!("{}", vm.summary());
        }
    }

    if !json {
        println!();
        println!("{} snapshot(s) published", snapshots.len());
    }
    Ok(())
}

/// Run the live terminal display
pub fn terminal(
    mut config: Config,
    script: Option<&Path>,
    surface: Option<Surface>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(surface) = surface {
        config.surface = surface;
    }
    let source = match script {
        Some(path) => Source::Script(read_script(path)?),
        None => Source::Stdin,
    };
    terminal::run(&config, source)
}

pub fn print_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", config.to_json()?);
    Ok(())
}
