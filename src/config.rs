// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{app_info, channels, timing};
use crate::engine::formatting::Surface;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity of the tracked camera (display only)
    pub camera_name: String,
    /// Switcher input initially assigned to the camera
    pub switcher_input: Option<String>,
    /// How long the overlay stays visible after a trigger
    pub overlay_duration_ms: u64,
    /// Engine inbox size
    pub channel_capacity: usize,
    /// Which surface the terminal renderer draws
    pub surface: Surface,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_name: String::new(),
            switcher_input: None,
            overlay_duration_ms: timing::OVERLAY_DURATION_MS,
            channel_capacity: channels::NOTIFICATION_CAPACITY,
            surface: Surface::default(),
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(app_info::CONFIG_DIR_NAME)
                .join(app_info::CONFIG_FILE_NAME)
        })
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&contents)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(contents: &str) -> AppResult<Self> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.overlay_duration_ms == 0 {
            return Err(AppError::Config("overlay_duration_ms must be positive".into()));
        }
        if self.channel_capacity == 0 {
            return Err(AppError::Config("channel_capacity must be positive".into()));
        }
        Ok(())
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| AppError::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = Config::from_json(r#"{"camera_name": "cam2", "surface": "overlay"}"#).unwrap();
        assert_eq!(config.camera_name, "cam2");
        assert_eq!(config.surface, Surface::Overlay);
        assert_eq!(config.overlay_duration_ms, 2500);
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.switcher_input, None);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = Config::from_json(r#"{"overlay_duration_ms": 0}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(Config::from_json("{nope"), Err(AppError::Config(_))));
        assert!(matches!(
            Config::from_json(r#"{"surface": "billboard"}"#),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = std::env::temp_dir().join("camera-telemetry-does-not-exist.json");
        assert!(matches!(Config::load(Some(&path)), Err(AppError::Config(_))));
    }
}
