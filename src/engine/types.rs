// SPDX-License-Identifier: GPL-3.0-only

//! Telemetry value types
//!
//! This module defines the camera property schema, raw property values,
//! camera and switcher status enums, and the logical display fields the
//! view model is keyed by.

use crate::constants::{self, tally_colors};
use crate::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known camera properties
///
/// Anything not listed here is rejected by the property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyName {
    CameraModel,
    LensName,
    AutoExposureMode,
    AutoExposureModeDial,
    ShutterSpeed,
    Aperture,
    Iso,
    ExposureCompensation,
    WhiteBalance,
    ColorTemperature,
    WhiteBalanceAdjustA,
    WhiteBalanceAdjustB,
    MovieServoAf,
    ManualFocusDrive,
    #[serde(rename = "selected_mode")]
    SelectedMode,
}

impl PropertyName {
    /// Every schema key, in declaration order
    pub const ALL: [PropertyName; 15] = [
        PropertyName::CameraModel,
        PropertyName::LensName,
        PropertyName::AutoExposureMode,
        PropertyName::AutoExposureModeDial,
        PropertyName::ShutterSpeed,
        PropertyName::Aperture,
        PropertyName::Iso,
        PropertyName::ExposureCompensation,
        PropertyName::WhiteBalance,
        PropertyName::ColorTemperature,
        PropertyName::WhiteBalanceAdjustA,
        PropertyName::WhiteBalanceAdjustB,
        PropertyName::MovieServoAf,
        PropertyName::ManualFocusDrive,
        PropertyName::SelectedMode,
    ];

    /// Wire name as published by the camera node
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyName::CameraModel => "cameramodel",
            PropertyName::LensName => "lensname",
            PropertyName::AutoExposureMode => "autoexposuremode",
            PropertyName::AutoExposureModeDial => "autoexposuremodedial",
            PropertyName::ShutterSpeed => "shutterspeed",
            PropertyName::Aperture => "aperture",
            PropertyName::Iso => "iso",
            PropertyName::ExposureCompensation => "exposurecompensation",
            PropertyName::WhiteBalance => "whitebalance",
            PropertyName::ColorTemperature => "colortemperature",
            PropertyName::WhiteBalanceAdjustA => "whitebalanceadjusta",
            PropertyName::WhiteBalanceAdjustB => "whitebalanceadjustb",
            PropertyName::MovieServoAf => "movieservoaf",
            PropertyName::ManualFocusDrive => "manualfocusdrive",
            PropertyName::SelectedMode => "selected_mode",
        }
    }
}

impl FromStr for PropertyName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EngineError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw property value as published by the camera node
///
/// gphoto2 reports most settings as strings ("1/50", "5.6", "-3"), but
/// a few transports send bare numbers. `null` means the camera does not
/// support the property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Missing or unsupported
    #[default]
    Empty,
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl PropertyValue {
    /// True for missing values and empty strings
    pub fn is_empty(&self) -> bool {
        match self {
            PropertyValue::Empty => true,
            PropertyValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Signed integer view, used for sign/zero comparisons
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Empty => None,
            PropertyValue::Integer(n) => Some(*n),
            PropertyValue::Decimal(f) if f.fract() == 0.0 => Some(*f as i64),
            PropertyValue::Decimal(_) => None,
            PropertyValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Decimal view; accepts "+1", "-0.3", "0"
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            PropertyValue::Empty => None,
            PropertyValue::Integer(n) => Some(*n as f64),
            PropertyValue::Decimal(f) => Some(*f),
            PropertyValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Empty => Ok(()),
            PropertyValue::Integer(n) => write!(f, "{}", n),
            PropertyValue::Decimal(d) => write!(f, "{}", d),
            PropertyValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Integer(n)
    }
}

/// Camera node connectivity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    #[default]
    Offline,
    Online,
}

impl CameraStatus {
    /// Interpret a status payload; anything but "online" is offline
    ///
    /// Camera nodes publish an exception description here when the camera
    /// dies, and the broker publishes "offline" as the last will.
    pub fn from_payload(payload: &str) -> Self {
        if payload.trim() == constants::STATUS_ONLINE {
            CameraStatus::Online
        } else {
            CameraStatus::Offline
        }
    }
}

/// Whether the camera feed is on air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Tally {
    #[default]
    None,
    Program,
    Preview,
}

impl Tally {
    /// Resolve from the switcher's (program, preview) pair; program wins
    pub fn from_flags(is_program: bool, is_preview: bool) -> Self {
        if is_program {
            Tally::Program
        } else if is_preview {
            Tally::Preview
        } else {
            Tally::None
        }
    }

    /// Indicator color for renderers
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Tally::Program => tally_colors::PROGRAM,
            Tally::Preview => tally_colors::PREVIEW,
            Tally::None => tally_colors::NONE,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Tally::None => "",
            Tally::Program => "program",
            Tally::Preview => "preview",
        }
    }
}

impl From<String> for Tally {
    fn from(s: String) -> Self {
        match s.trim() {
            "program" => Tally::Program,
            "preview" => Tally::Preview,
            _ => Tally::None,
        }
    }
}

/// Switcher aux output selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuxContent {
    /// Multiview monitoring layout
    Multiview,
    /// Any other named source; empty until the switcher reports one
    Source(String),
}

impl Default for AuxContent {
    fn default() -> Self {
        AuxContent::Source(String::new())
    }
}

impl AuxContent {
    pub fn is_multiview(&self) -> bool {
        matches!(self, AuxContent::Multiview)
    }
}

impl From<String> for AuxContent {
    fn from(s: String) -> Self {
        if s == constants::AUX_MULTIVIEW {
            AuxContent::Multiview
        } else {
            AuxContent::Source(s)
        }
    }
}

impl From<&str> for AuxContent {
    fn from(s: &str) -> Self {
        AuxContent::from(s.to_string())
    }
}

impl From<AuxContent> for String {
    fn from(aux: AuxContent) -> Self {
        match aux {
            AuxContent::Multiview => constants::AUX_MULTIVIEW.to_string(),
            AuxContent::Source(s) => s,
        }
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    AuxMultiview,
    #[default]
    CameraOffline,
    CameraOnline,
}

impl View {
    pub fn display_name(self) -> &'static str {
        match self {
            View::AuxMultiview => "Multiview",
            View::CameraOffline => "Camera offline",
            View::CameraOnline => "Camera online",
        }
    }
}

/// Display fields of the view model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogicalField {
    #[serde(rename = "shutterspeed")]
    ShutterSpeed,
    #[serde(rename = "aperture")]
    Aperture,
    #[serde(rename = "iso")]
    Iso,
    #[serde(rename = "exposurecompensation")]
    ExposureCompensation,
    #[serde(rename = "white_balance")]
    WhiteBalance,
    /// Broadcast overlay flavour of the white balance text
    #[serde(rename = "white_balance_overlay")]
    WhiteBalanceOverlay,
    #[serde(rename = "focus")]
    Focus,
    #[serde(rename = "switcher_input")]
    SwitcherInput,
    #[serde(rename = "autoexposure")]
    AutoExposure,
    /// Camera model and lens
    #[serde(rename = "camera")]
    Camera,
}

impl LogicalField {
    pub const ALL: [LogicalField; 10] = [
        LogicalField::ShutterSpeed,
        LogicalField::Aperture,
        LogicalField::Iso,
        LogicalField::ExposureCompensation,
        LogicalField::WhiteBalance,
        LogicalField::WhiteBalanceOverlay,
        LogicalField::Focus,
        LogicalField::SwitcherInput,
        LogicalField::AutoExposure,
        LogicalField::Camera,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogicalField::ShutterSpeed => "shutterspeed",
            LogicalField::Aperture => "aperture",
            LogicalField::Iso => "iso",
            LogicalField::ExposureCompensation => "exposurecompensation",
            LogicalField::WhiteBalance => "white_balance",
            LogicalField::WhiteBalanceOverlay => "white_balance_overlay",
            LogicalField::Focus => "focus",
            LogicalField::SwitcherInput => "switcher_input",
            LogicalField::AutoExposure => "autoexposure",
            LogicalField::Camera => "camera",
        }
    }
}
