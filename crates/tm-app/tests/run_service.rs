use chrono::NaiveDate;
use tm_app::{
    AppError, ExportFormat, ProfileInputs, RunMode, RunRequest, apply_overrides,
    default_export_name, points_csv, profile_json, run,
};
use tm_profile::{
    ContinuityPolicy, CoveragePolicy, EngineOptions, ParameterSet, PhaseKind, RawSegmentRow,
    SegmentTable,
};

fn inputs() -> ProfileInputs {
    let segments = SegmentTable::from_rows(
        [(0.0, 40.0, 83.3), (40.0, 80.0, 55.6), (80.0, 120.0, 27.8)]
            .into_iter()
            .map(|(low, high, acc)| RawSegmentRow {
                speed_low_kmh: Some(low),
                speed_high_kmh: Some(high),
                acc_cm_s2: Some(acc),
            }),
    )
    .unwrap();
    ProfileInputs {
        name: "metro".to_string(),
        segments,
        params: ParameterSet {
            init_speed_kmh: 0.0,
            target_speed_kmh: 100.0,
            constant_speed_kmh: 100.0,
            constant_time_s: 60.0,
            decel_acc_cms2: -83.3,
            coast_speed_kmh: 40.0,
            traction_switch_delay_s: 2.0,
            brake_build_time_s: 1.5,
        },
        options: EngineOptions::default(),
    }
}

#[test]
fn all_phases_outcome() {
    let outcome = run(&inputs(), &RunRequest::default()).unwrap();
    assert_eq!(outcome.mode, RunMode::AllPhases);
    assert_eq!(outcome.phases.len(), 5);
    assert_eq!(outcome.points.len(), 12);
    let sum: f64 = outcome.phases.iter().map(|p| p.duration_s()).sum();
    assert!((outcome.total_time_s - sum).abs() < 1e-9);
}

#[test]
fn acceleration_only_totals_are_the_phase_values() {
    let request = RunRequest {
        mode: RunMode::AccelerationOnly,
        ..RunRequest::default()
    };
    let outcome = run(&inputs(), &request).unwrap();
    assert_eq!(outcome.phases.len(), 1);
    let accel = &outcome.phases[0];
    assert_eq!(accel.kind(), PhaseKind::Acceleration);
    assert_eq!(outcome.total_time_s, accel.duration_s());
    assert_eq!(outcome.total_distance_m, accel.distance_m());
    assert_eq!(outcome.points.len(), 4);
}

#[test]
fn overrides_do_not_touch_loaded_parameters() {
    let inputs = inputs();
    let request = RunRequest {
        overrides: vec!["constant_time_s=30".to_string(), "coast_speed_kmh = 20".to_string()],
        ..RunRequest::default()
    };
    let outcome = run(&inputs, &request).unwrap();
    assert_eq!(outcome.parameters.constant_time_s, 30.0);
    assert_eq!(outcome.parameters.coast_speed_kmh, 20.0);
    assert_eq!(inputs.params.constant_time_s, 60.0);

    let cruise = outcome
        .phases
        .iter()
        .find(|p| p.kind() == PhaseKind::ConstantSpeed)
        .unwrap();
    assert_eq!(cruise.duration_s(), 30.0);
}

#[test]
fn malformed_overrides_are_rejected() {
    let params = inputs().params;
    for bad in ["constant_time_s", "constant_time_s=fast"] {
        let err = apply_overrides(&params, &[bad.to_string()]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "{bad}");
    }
    let err = apply_overrides(&params, &["top_speed=10".to_string()]).unwrap_err();
    assert!(matches!(err, AppError::Calculation(_)));
}

#[test]
fn request_options_replace_document_options() {
    let request = RunRequest {
        overrides: vec!["target_speed_kmh=150".to_string()],
        options: Some(EngineOptions {
            coverage: CoveragePolicy::Permissive,
            continuity: ContinuityPolicy::Permissive,
        }),
        ..RunRequest::default()
    };
    // Strict coverage (document default) fails, permissive truncates at 120.
    assert!(
        run(
            &inputs(),
            &RunRequest {
                options: None,
                ..request.clone()
            }
        )
        .is_err()
    );
    let outcome = run(&inputs(), &request).unwrap();
    assert!((outcome.phases[0].end().speed_kmh - 120.0).abs() < 1e-9);
}

#[test]
fn failed_run_returns_no_outcome() {
    let request = RunRequest {
        overrides: vec!["target_speed_kmh=0".to_string()],
        ..RunRequest::default()
    };
    let err = run(&inputs(), &request).unwrap_err();
    assert!(err.to_string().contains("Invalid range"));
}

#[test]
fn csv_export_tags_points_with_phase() {
    let outcome = run(&inputs(), &RunRequest::default()).unwrap();
    let csv = points_csv(&outcome);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "phase,speed_kmh,distance_m");
    assert_eq!(lines.len(), 1 + 12);
    assert!(lines[1].starts_with("acceleration,0,0"));
    assert!(lines.last().unwrap().starts_with("deceleration,40,"));
}

#[test]
fn json_export_contains_totals() {
    let outcome = run(&inputs(), &RunRequest::default()).unwrap();
    let json = profile_json(&outcome).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["mode"], "all_phases");
    assert_eq!(value["phases"].as_array().unwrap().len(), 5);
    assert_eq!(value["phases"][1]["kind"], "traction_switch");
    assert_eq!(value["parameters"]["decel_acc_cms2"], -83.3);
    assert!(value["total_distance_m"].as_f64().unwrap() > 0.0);
}

#[test]
fn export_names_and_formats() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(8, 30, 5)
        .unwrap();
    assert_eq!(
        default_export_name("speed_distance", ExportFormat::Csv, now),
        "speed_distance_20261019_083005.csv"
    );
    assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    assert!("png".parse::<ExportFormat>().is_err());
}
