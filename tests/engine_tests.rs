// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the telemetry engine

use camera_telemetry::engine::formatting::{Surface, white_balance_text};
use camera_telemetry::engine::overlay::OverlayTimer;
use camera_telemetry::engine::state::CameraState;
use camera_telemetry::engine::view::select_view;
use camera_telemetry::engine::{
    AuxContent, CameraStatus, EngineHandle, EngineSettings, LogicalField, Notification,
    PropertyName, PropertyValue, TelemetryEngine, View,
};
use std::time::Duration;
use tokio::time::{Instant, advance};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn wb(mode: &str, temperature: i64, a: i64, b: i64) -> CameraState {
    let mut state = CameraState::default();
    state.update("whitebalance", mode.into()).unwrap();
    state.update("colortemperature", temperature.into()).unwrap();
    state.update("whitebalanceadjusta", a.into()).unwrap();
    state.update("whitebalanceadjustb", b.into()).unwrap();
    state
}

#[test]
fn test_last_changed_follows_last_accepted_update() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    // Both white balance renditions share one group
    let white_balance = [LogicalField::WhiteBalance, LogicalField::WhiteBalanceOverlay];
    let sequence: [(&str, &[LogicalField]); 5] = [
        ("iso", &[LogicalField::Iso]),
        ("whitebalanceadjusta", &white_balance),
        ("manualfocusdrive", &[LogicalField::Focus]),
        ("shutterspeed", &[LogicalField::ShutterSpeed]),
        ("colortemperature", &white_balance),
    ];

    for (field, group) in sequence {
        let vm = engine.handle(Notification::property(field, "1"), now).unwrap();
        assert_eq!(engine.camera().last_changed().map(PropertyName::as_str), Some(field));
        assert_eq!(vm.highlighted_fields(), group, "after {}", field);
    }
}

#[test]
fn test_field_without_group_highlights_nothing() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    engine.handle(Notification::property("iso", "100"), now);
    let vm = engine.handle(Notification::property("lensname", "RF50mm"), now).unwrap();
    assert!(vm.highlighted_fields().is_empty());
}

#[test]
fn test_white_balance_examples() {
    assert_eq!(white_balance_text(&wb("Color Temperature", 5600, 0, 0), Surface::Handheld), "5600K");
    assert_eq!(white_balance_text(&wb("Auto", 0, 3, -2), Surface::Handheld), "Auto A3M2");
    assert_eq!(white_balance_text(&wb("Auto", 0, 0, 0), Surface::Handheld), "Auto");

    assert_eq!(white_balance_text(&wb("Auto", 0, 0, 0), Surface::Overlay), "WB Auto");
    assert_eq!(white_balance_text(&wb("Auto", 0, 3, -2), Surface::Overlay), "Auto A3M2");
}

#[test]
fn test_view_selection() {
    let mvw = AuxContent::from("MVW");
    let cam = AuxContent::from("CAM1");
    assert_eq!(select_view(&mvw, CameraStatus::Offline), View::AuxMultiview);
    assert_eq!(select_view(&mvw, CameraStatus::Online), View::AuxMultiview);
    assert_eq!(select_view(&cam, CameraStatus::Online), View::CameraOnline);
    assert_eq!(select_view(&cam, CameraStatus::Offline), View::CameraOffline);
}

#[test]
fn test_overlay_retrigger_timeline() {
    let t0 = Instant::now();
    let mut timer = OverlayTimer::new(ms(2500));

    timer.trigger(t0).unwrap();
    assert!(timer.is_visible());
    timer.trigger(t0 + ms(2000)).unwrap();

    timer.expire(t0 + ms(4000));
    assert!(timer.is_visible());
    timer.expire(t0 + ms(4501));
    assert!(!timer.is_visible());
}

#[test]
fn test_update_at_deadline_publishes_hidden_overlay() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let t0 = Instant::now();
    engine.handle(Notification::aux("CAM1"), t0);

    let vm = engine.handle(Notification::property("iso", "100"), t0 + ms(2500)).unwrap();
    assert!(!vm.overlay_visible);
    assert!(engine.expire_overlay(t0 + ms(2500)).is_none());
}

#[test]
fn test_identical_value_reactivates_highlight() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    engine.handle(Notification::property("iso", "400"), now);
    engine.handle(Notification::property("aperture", "4"), now);
    let vm = engine.handle(Notification::property("iso", "400"), now).unwrap();

    assert_eq!(engine.camera().last_changed(), Some(PropertyName::Iso));
    assert_eq!(vm.highlighted_fields(), [LogicalField::Iso]);
}

#[test]
fn test_unknown_field_changes_nothing() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    engine.handle(Notification::property("aperture", "4"), now);
    let before = engine.snapshot();

    assert!(engine.handle(Notification::property("zoom", "2"), now).is_none());
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.camera().last_changed(), Some(PropertyName::Aperture));
}

#[test]
fn test_malformed_shift_degrades_only_white_balance() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    engine.handle(Notification::status("online"), now);
    engine.handle(Notification::property("whitebalance", "Auto"), now);
    engine.handle(Notification::property("whitebalanceadjusta", "x"), now);
    engine.handle(Notification::property("whitebalanceadjustb", PropertyValue::Integer(0)), now);
    let vm = engine.handle(Notification::property("iso", "800"), now).unwrap();

    assert_eq!(vm.view, View::CameraOnline);
    assert_eq!(vm.text(LogicalField::WhiteBalance), "");
    assert_eq!(vm.text(LogicalField::Iso), "ISO 800");
}

#[test]
fn test_snapshot_is_detached_from_engine_state() {
    let mut engine = TelemetryEngine::new(EngineSettings::default());
    let now = Instant::now();
    let first = engine.handle(Notification::property("iso", "100"), now).unwrap();
    engine.handle(Notification::property("iso", "200"), now);
    assert_eq!(first.text(LogicalField::Iso), "ISO 100");
}

#[tokio::test(start_paused = true)]
async fn test_service_overlay_timeline() {
    let engine = EngineHandle::spawn(EngineSettings::default(), 16);
    let mut rx = engine.subscribe();

    engine.notify(Notification::aux("CAM1")).await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().overlay_visible);

    advance(ms(2000)).await;
    engine.notify(Notification::aux("CAM2")).await.unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().overlay_visible);

    advance(ms(2000)).await;
    tokio::task::yield_now().await;
    assert!(engine.latest().overlay_visible);

    // Only one hide follows, at 4500ms
    rx.changed().await.unwrap();
    let vm = rx.borrow_and_update().clone();
    assert!(!vm.overlay_visible);
    assert_eq!(vm.revision, 3);

    engine.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_service_preserves_arrival_order() {
    let engine = EngineHandle::spawn(EngineSettings::default(), 4);
    let sender = engine.sender();
    let mut rx = engine.subscribe();

    for iso in ["100", "200", "400", "800", "1600", "3200"] {
        sender.notify(Notification::property("iso", iso)).await.unwrap();
    }
    while rx.borrow_and_update().revision < 6 {
        rx.changed().await.unwrap();
    }
    assert_eq!(engine.latest().text(LogicalField::Iso), "ISO 3200");

    engine.shutdown().await;
}
