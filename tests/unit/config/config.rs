use super::*;

#[test]
fn defaults_match_classic_timings() {
    let cfg = IndicatorConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.waypoint_count, 10);
    assert!((cfg.fade_out_delay() - 0.16).abs() < 1e-12);
    assert_eq!(cfg.color, Rgba8::RED);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = IndicatorConfig::from_json_str(r#"{ "loop_duration": 2.5 }"#).unwrap();
    assert_eq!(cfg.loop_duration, 2.5);
    assert_eq!(cfg.seed_duration, 0.35);
}

#[test]
fn invalid_values_name_the_field() {
    let err = IndicatorConfig::from_json_str(r#"{ "waypoint_count": 1 }"#).unwrap_err();
    assert!(err.to_string().contains("waypoint_count"));

    let err = IndicatorConfig::from_json_str(r#"{ "fade_out_duration": 0.0 }"#).unwrap_err();
    assert!(err.to_string().contains("fade_out_duration"));

    let cfg = IndicatorConfig {
        resting_level: 120.0,
        ..IndicatorConfig::default()
    };
    assert!(cfg.validate().unwrap_err().to_string().contains("resting_level"));

    let cfg = IndicatorConfig {
        beam_width_fraction: 0.5,
        ..IndicatorConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = IndicatorConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, IndicatorError::Serde(_)));

    let err = IndicatorConfig::from_json_str(r#"{ "bogus": 1 }"#).unwrap_err();
    assert!(matches!(err, IndicatorError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = IndicatorConfig::from_path("target/does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("exist.json"));
}
