// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use camera_telemetry::constants::{self, tally_colors, timing};
use camera_telemetry::engine::Tally;

#[test]
fn test_tally_colors_match_indicator_values() {
    assert_eq!(Tally::Program.color(), tally_colors::PROGRAM);
    assert_eq!(Tally::Preview.color(), tally_colors::PREVIEW);
    assert_eq!(Tally::None.color(), (0, 0, 0));
}

#[test]
fn test_overlay_duration() {
    assert_eq!(timing::OVERLAY_DURATION_MS, 2500);
    assert_eq!(timing::OVERLAY_DURATION.as_millis(), 2500);
}

#[test]
fn test_multiview_id() {
    assert_eq!(constants::AUX_MULTIVIEW, "MVW");
}
