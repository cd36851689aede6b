//! Tests for deserializing controller options from host configuration.

use std::time::Duration;

use sightline::autoplay::AutoplayOptions;
use sightline::focus_trap::TrapOptions;
use sightline::geometry::Margins;
use sightline::tracker::TrackerOptions;

#[test]
fn test_tracker_options_from_toml() {
    let options: TrackerOptions = toml::from_str(
        r#"
        thresholds = [0.0, 0.5, 1.0]
        top_region_scroll_threshold = 150.0

        [root_margin]
        bottom = 200.0
        "#,
    )
    .unwrap();

    assert_eq!(options.thresholds, vec![0.0, 0.5, 1.0]);
    assert_eq!(options.top_region_scroll_threshold, 150.0);
    assert_eq!(options.root_margin.bottom, 200.0);
    assert_eq!(options.root_margin.top, 0.0);
}

#[test]
fn test_partial_tracker_config_keeps_defaults() {
    let options: TrackerOptions = toml::from_str("top_region_scroll_threshold = 50.0").unwrap();

    assert_eq!(options.thresholds, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(options.root_margin, Margins::ZERO);
    assert_eq!(options.top_region_scroll_threshold, 50.0);
}

#[test]
fn test_empty_config_is_all_defaults() {
    let tracker: TrackerOptions = toml::from_str("").unwrap();
    assert_eq!(tracker, TrackerOptions::default());

    let trap: TrapOptions = toml::from_str("").unwrap();
    assert_eq!(trap.focus_delay(), Duration::from_millis(100));

    let autoplay: AutoplayOptions = toml::from_str("").unwrap();
    assert_eq!(autoplay.interval(), Duration::from_secs(3));
}

#[test]
fn test_trap_and_autoplay_overrides() {
    let trap: TrapOptions = toml::from_str("focus_delay_ms = 250").unwrap();
    assert_eq!(trap.focus_delay(), Duration::from_millis(250));

    let autoplay: AutoplayOptions = serde_json::from_str(r#"{"interval_ms": 5000}"#).unwrap();
    assert_eq!(autoplay.interval(), Duration::from_millis(5000));
}

#[test]
fn test_options_round_trip_through_json() {
    let options = TrackerOptions {
        thresholds: vec![0.0, 1.0],
        root_margin: Margins::uniform(16.0),
        top_region_scroll_threshold: 120.0,
    };
    let json = serde_json::to_string(&options).unwrap();
    let back: TrackerOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);
}
