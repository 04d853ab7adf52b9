// SPDX-License-Identifier: GPL-3.0-only

//! Display text for camera properties
//!
//! Pure functions over a [`CameraState`]. Composites that need a numeric
//! comparison have a fallible `try_` form; the plain form renders the empty
//! string when any input is missing or malformed.

use crate::constants;
use crate::engine::state::CameraState;
use crate::engine::types::{PropertyName, PropertyValue};
use crate::errors::EngineError;
use serde::{Deserialize, Serialize};

/// Which surface the text is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Local control panel
    #[default]
    Handheld,
    /// Broadcast overlay
    Overlay,
}

fn required_integer(state: &CameraState, name: PropertyName) -> Result<i64, EngineError> {
    let value = state.get(name);
    value.as_integer().ok_or_else(|| malformed(name, value))
}

fn required_text(state: &CameraState, name: PropertyName) -> Result<String, EngineError> {
    let value = state.get(name);
    if value.is_empty() {
        return Err(malformed(name, value));
    }
    Ok(value.to_string())
}

fn malformed(name: PropertyName, value: &PropertyValue) -> EngineError {
    EngineError::MalformedValue {
        field: name.as_str(),
        value: value.to_string(),
    }
}

/// "TV Manual" style text; the mode alone when the dial agrees
pub fn autoexposure_text(state: &CameraState) -> String {
    let mode = state.text(PropertyName::AutoExposureMode);
    let dial = state.text(PropertyName::AutoExposureModeDial);
    if mode == dial {
        mode
    } else {
        format!("{} {}", dial, mode)
    }
}

/// Signed shift rendered with the letter for its direction
fn shift_text(amount: i64, positive: char, negative: char) -> String {
    match amount {
        0 => String::new(),
        n if n > 0 => format!("{}{}", positive, n),
        n => format!("{}{}", negative, n.unsigned_abs()),
    }
}

pub fn try_white_balance_text(state: &CameraState, surface: Surface) -> Result<String, EngineError> {
    let wb = required_text(state, PropertyName::WhiteBalance)?;
    let main = if wb == constants::WB_COLOR_TEMPERATURE {
        format!("{}K", required_text(state, PropertyName::ColorTemperature)?)
    } else {
        wb.clone()
    };

    // Amber/blue on the A axis, green/magenta on the B axis
    let shift_ab = shift_text(required_integer(state, PropertyName::WhiteBalanceAdjustA)?, 'A', 'B');
    let shift_mg = shift_text(required_integer(state, PropertyName::WhiteBalanceAdjustB)?, 'G', 'M');
    let has_shift = !shift_ab.is_empty() || !shift_mg.is_empty();

    let mut text = main;
    if has_shift {
        text.push(' ');
        text.push_str(&shift_ab);
        text.push_str(&shift_mg);
    } else if surface == Surface::Overlay && wb == constants::WB_AUTO {
        text.insert_str(0, "WB ");
    }
    Ok(text)
}

/// White balance with color temperature and A/B, G/M shifts
pub fn white_balance_text(state: &CameraState, surface: Surface) -> String {
    try_white_balance_text(state, surface).unwrap_or_default()
}

pub fn focus_text(state: &CameraState) -> String {
    if state.text(PropertyName::MovieServoAf) == constants::SERVO_AF_ON {
        "AF".to_string()
    } else {
        "MF".to_string()
    }
}

pub fn try_ev_text(state: &CameraState) -> Result<String, EngineError> {
    let value = state.get(PropertyName::ExposureCompensation);
    if value.as_decimal().is_none() {
        return Err(malformed(PropertyName::ExposureCompensation, value));
    }
    Ok(format!("{} EV", value))
}

pub fn ev_text(state: &CameraState) -> String {
    try_ev_text(state).unwrap_or_default()
}

/// Prefix/suffix a plain property, empty when the property is unset
fn decorated(state: &CameraState, name: PropertyName, prefix: &str, suffix: &str) -> String {
    let value = state.get(name);
    if value.is_empty() {
        String::new()
    } else {
        format!("{}{}{}", prefix, value, suffix)
    }
}

pub fn aperture_text(state: &CameraState) -> String {
    decorated(state, PropertyName::Aperture, "F/", "")
}

pub fn shutterspeed_text(state: &CameraState) -> String {
    decorated(state, PropertyName::ShutterSpeed, "", "s")
}

pub fn iso_text(state: &CameraState) -> String {
    decorated(state, PropertyName::Iso, "ISO ", "")
}

/// Body and lens, whichever are known
pub fn camera_label_text(state: &CameraState) -> String {
    [PropertyName::CameraModel, PropertyName::LensName]
        .into_iter()
        .map(|name| state.text(name))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wb_state(wb: &str, temperature: i64, a: i64, b: i64) -> CameraState {
        let mut state = CameraState::default();
        state.update("whitebalance", wb.into()).unwrap();
        state.update("colortemperature", temperature.into()).unwrap();
        state.update("whitebalanceadjusta", a.to_string().into()).unwrap();
        state.update("whitebalanceadjustb", b.to_string().into()).unwrap();
        state
    }

    #[test]
    fn test_white_balance_handheld() {
        let state = wb_state("Color Temperature", 5600, 0, 0);
        assert_eq!(white_balance_text(&state, Surface::Handheld), "5600K");

        let state = wb_state("Auto", 0, 3, -2);
        assert_eq!(white_balance_text(&state, Surface::Handheld), "Auto A3M2");

        let state = wb_state("Auto", 0, 0, 0);
        assert_eq!(white_balance_text(&state, Surface::Handheld), "Auto");
    }

    #[test]
    fn test_white_balance_overlay() {
        let state = wb_state("Auto", 0, 0, 0);
        assert_eq!(white_balance_text(&state, Surface::Overlay), "WB Auto");

        let state = wb_state("Auto", 0, 3, -2);
        assert_eq!(white_balance_text(&state, Surface::Overlay), "Auto A3M2");

        // Only "Auto" gets the prefix
        let state = wb_state("Daylight", 0, 0, 0);
        assert_eq!(white_balance_text(&state, Surface::Overlay), "Daylight");
        let state = wb_state("Color Temperature", 3200, 0, 0);
        assert_eq!(white_balance_text(&state, Surface::Overlay), "3200K");
    }

    #[test]
    fn test_white_balance_negative_a_and_positive_b() {
        let state = wb_state("Color Temperature", 4300, -4, 5);
        assert_eq!(white_balance_text(&state, Surface::Handheld), "4300K B4G5");

        let state = wb_state("Daylight", 0, 0, 1);
        assert_eq!(white_balance_text(&state, Surface::Handheld), "Daylight G1");
    }

    #[test]
    fn test_white_balance_malformed_shift_renders_empty() {
        let mut state = wb_state("Auto", 0, 0, 0);
        state.update("whitebalanceadjusta", "<a>".into()).unwrap();
        assert_eq!(white_balance_text(&state, Surface::Handheld), "");
        assert!(matches!(
            try_white_balance_text(&state, Surface::Handheld),
            Err(EngineError::MalformedValue { field: "whitebalanceadjusta", .. })
        ));
    }

    #[test]
    fn test_white_balance_missing_renders_empty() {
        let state = CameraState::default();
        assert_eq!(white_balance_text(&state, Surface::Handheld), "");
        assert_eq!(white_balance_text(&state, Surface::Overlay), "");
    }

    #[test]
    fn test_autoexposure_text() {
        let mut state = CameraState::default();
        state.update("autoexposuremode", "Manual".into()).unwrap();
        state.update("autoexposuremodedial", "Manual".into()).unwrap();
        assert_eq!(autoexposure_text(&state), "Manual");

        state.update("autoexposuremodedial", "Movie".into()).unwrap();
        assert_eq!(autoexposure_text(&state), "Movie Manual");
    }

    #[test]
    fn test_focus_text() {
        let mut state = CameraState::default();
        assert_eq!(focus_text(&state), "MF");
        state.update("movieservoaf", "On".into()).unwrap();
        assert_eq!(focus_text(&state), "AF");
        state.update("movieservoaf", "Off".into()).unwrap();
        assert_eq!(focus_text(&state), "MF");
    }

    #[test]
    fn test_simple_composites() {
        let mut state = CameraState::default();
        assert_eq!(aperture_text(&state), "");
        assert_eq!(shutterspeed_text(&state), "");
        assert_eq!(iso_text(&state), "");
        assert_eq!(ev_text(&state), "");

        state.update("aperture", "2.8".into()).unwrap();
        state.update("shutterspeed", "1/50".into()).unwrap();
        state.update("iso", "Auto".into()).unwrap();
        state.update("exposurecompensation", "-0.3".into()).unwrap();
        assert_eq!(aperture_text(&state), "F/2.8");
        assert_eq!(shutterspeed_text(&state), "1/50s");
        assert_eq!(iso_text(&state), "ISO Auto");
        assert_eq!(ev_text(&state), "-0.3 EV");
    }

    #[test]
    fn test_ev_text_rejects_non_numeric() {
        let mut state = CameraState::default();
        state.update("exposurecompensation", "<exp>".into()).unwrap();
        assert_eq!(ev_text(&state), "");
        state.update("exposurecompensation", PropertyValue::Integer(0)).unwrap();
        assert_eq!(ev_text(&state), "0 EV");
    }

    #[test]
    fn test_camera_label() {
        let mut state = CameraState::default();
        assert_eq!(camera_label_text(&state), "");
        state.update("cameramodel", "Canon EOS RP".into()).unwrap();
        assert_eq!(camera_label_text(&state), "Canon EOS RP");
        state.update("lensname", "RF24-105mm F4 L IS USM".into()).unwrap();
        assert_eq!(camera_label_text(&state), "Canon EOS RP RF24-105mm F4 L IS USM");
    }
}
