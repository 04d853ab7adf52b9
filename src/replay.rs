// SPDX-License-Identifier: GPL-3.0-only

//! Timestamped notification scripts
//!
//! A script is JSON lines, one notification per line with its offset from
//! the start of the script in milliseconds:
//!
//! ```text
//! # camera comes up, then the director cuts to it
//! {"at_ms": 0, "event": "status_changed", "status": "online"}
//! {"at_ms": 2000, "event": "aux_content_changed", "aux": "CAM1"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::engine::{Notification, TelemetryEngine, ViewModel};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEntry {
    /// Offset from script start
    pub at_ms: u64,
    #[serde(flatten)]
    pub notification: Notification,
}

impl ReplayEntry {
    pub fn offset(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// Parse a script; offsets must not go backwards
pub fn parse_script(contents: &str) -> AppResult<Vec<ReplayEntry>> {
    let mut entries: Vec<ReplayEntry> = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry: ReplayEntry =
            serde_json::from_str(line).map_err(|e| AppError::Script(line_no, e.to_string()))?;
        if let Some(prev) = entries.last()
            && entry.at_ms < prev.at_ms
        {
            return Err(AppError::Script(
                line_no,
                format!("at_ms {} is earlier than {}", entry.at_ms, prev.at_ms),
            ));
        }
        entries.push(entry);
    }
    debug!(entries = entries.len(), "Parsed replay script");
    Ok(entries)
}

/// Feed entries through the engine on a virtual clock
///
/// Returns every published snapshot in order, including overlay expiries
/// that fall between entries or after the last one.
pub fn run_replay(engine: &mut TelemetryEngine, entries: Vec<ReplayEntry>) -> Vec<ViewModel> {
    let start = Instant::now();
    let mut published = Vec::new();

    for entry in entries {
        let now = start + entry.offset();
        // An entry exactly at the deadline is left to the engine: triggers
        // cancel the expiry, anything else retires it
        if let Some(deadline) = engine.overlay_deadline()
            && deadline < now
        {
            published.extend(engine.expire_overlay(deadline));
        }
        published.extend(engine.handle(entry.notification, now));
    }

    if let Some(deadline) = engine.overlay_deadline() {
        published.extend(engine.expire_overlay(deadline));
    }
    published
}
