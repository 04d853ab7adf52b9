// SPDX-License-Identifier: GPL-3.0-only

//! Camera Telemetry - display state engine for a live-production camera
//!
//! This library turns camera property updates and video switcher events into
//! immutable display snapshots: formatted field texts, which field was
//! changed most recently, tally color, which screen to show and whether the
//! transient full-info overlay is visible.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`engine`]: State stores, formatting, highlight rules, view selection,
//!   the overlay timer and the async engine task
//! - [`replay`]: Timestamped notification scripts on a virtual clock
//! - [`terminal`]: Terminal renderer consuming snapshots
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```no_run
//! use camera_telemetry::engine::{EngineHandle, EngineSettings, Notification};
//!
//! # async fn demo() -> Result<(), camera_telemetry::errors::EngineError> {
//! let engine = EngineHandle::spawn(EngineSettings::default(), 64);
//! engine.notify(Notification::property("iso", "400")).await?;
//! let snapshot = engine.latest();
//! println!("{}", snapshot.summary());
//! engine.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod replay;
pub mod terminal;

// Re-export commonly used types
pub use config::Config;
pub use engine::{EngineHandle, EngineSettings, Notification, TelemetryEngine, ViewModel};
pub use errors::{AppError, AppResult};
