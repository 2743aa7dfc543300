use tm_config::{ConfigError, ValidationError, from_yaml_str, load_parameters, load_segments};
use tm_profile::{CoveragePolicy, MotionError};

const FULL: &str = r#"
version: 2
name: Metro line A
segments:
  - { speed_low_kmh: 80, speed_high_kmh: 120, acc_cm_s2: 27.8 }
  - { speed_low_kmh: 0, speed_high_kmh: 40, acc_cm_s2: 83.3 }
  - { speed_low_kmh: 40, speed_high_kmh: 80, acc_cm_s2: 55.6 }
  - { speed_low_kmh: 120, speed_high_kmh: ~, acc_cm_s2: 10.0 }
parameters:
  init_speed_kmh: 0
  target_speed_kmh: 100
  constant_speed_kmh: 100
  constant_time_s: 60
  decel_acc_cms2: -83.3
  coast_speed_kmh: 40
  traction_switch_delay_s: 2
  brake_build_time_s: 1.5
"#;

#[test]
fn loads_segments_sorted_and_drops_incomplete_rows() {
    let doc = from_yaml_str(FULL).unwrap();
    let table = load_segments(&doc).unwrap();
    assert_eq!(table.len(), 3);
    let lows: Vec<f64> = table.iter().map(|s| s.speed_low_kmh).collect();
    assert_eq!(lows, vec![0.0, 40.0, 80.0]);
}

#[test]
fn loads_parameters_and_default_options() {
    let doc = from_yaml_str(FULL).unwrap();
    let params = load_parameters(&doc).unwrap();
    assert_eq!(params.target_speed_kmh, 100.0);
    assert_eq!(params.brake_build_time_s, 1.5);
    assert_eq!(doc.options.coverage, CoveragePolicy::Strict);
}

#[test]
fn null_and_absent_parameters_are_all_reported() {
    let doc = from_yaml_str(
        r#"
version: 2
name: partial
segments:
  - { speed_low_kmh: 0, speed_high_kmh: 40, acc_cm_s2: 83.3 }
parameters:
  init_speed_kmh: 0
  target_speed_kmh: ~
  constant_speed_kmh: 100
  constant_time_s: 60
  decel_acc_cms2: -83.3
  coast_speed_kmh: 40
"#,
    )
    .unwrap();

    let err = load_parameters(&doc).unwrap_err();
    assert_eq!(
        err,
        MotionError::MissingParameter {
            keys: vec![
                "target_speed_kmh".to_string(),
                "traction_switch_delay_s".to_string(),
                "brake_build_time_s".to_string(),
            ]
        }
    );
}

#[test]
fn empty_segment_sheet_is_rejected() {
    let doc = from_yaml_str("version: 2\nname: empty\n").unwrap();
    assert!(matches!(
        load_segments(&doc),
        Err(MotionError::EmptyData { .. })
    ));
}

#[test]
fn inverted_segment_is_rejected() {
    let doc = from_yaml_str(
        "version: 2\nname: bad\nsegments:\n  - { speed_low_kmh: 40, speed_high_kmh: 0, acc_cm_s2: 10 }\n",
    )
    .unwrap();
    assert!(matches!(
        load_segments(&doc),
        Err(MotionError::InvalidRange { .. })
    ));
}

#[test]
fn version_one_legacy_key_is_migrated() {
    let legacy = FULL
        .replace("version: 2", "version: 1")
        .replace("decel_acc_cms2", "decel_acc_cm_s2");
    let doc = from_yaml_str(&legacy).unwrap();
    assert_eq!(doc.version, 2);
    assert!(doc.parameters.contains_key("decel_acc_cms2"));
    assert_eq!(load_parameters(&doc).unwrap().decel_acc_cms2, -83.3);
}

#[test]
fn unknown_parameter_is_rejected() {
    let bad = FULL.replace("coast_speed_kmh: 40", "coast_speed_kmh: 40\n  top_speed_kmh: 160");
    let err = from_yaml_str(&bad).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::UnknownParameter { .. })
    ));
}

#[test]
fn newer_version_is_rejected() {
    let err = from_yaml_str(&FULL.replace("version: 2", "version: 9")).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Validation(ValidationError::UnsupportedVersion { version: 9 })
    ));
}

#[test]
fn options_are_read() {
    let doc = from_yaml_str(&format!(
        "{FULL}options:\n  coverage: permissive\n  continuity: strict\n"
    ))
    .unwrap();
    assert_eq!(doc.options.coverage, CoveragePolicy::Permissive);
}
