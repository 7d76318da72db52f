use pksim::prelude::*;

const RENAL: &str = r#"{
    "model": "oral_first_order",
    "dose": 500.0,
    "vd": 25.0,
    "ka": 0.5,
    "interval": 12.0,
    "dose_count": 4,
    "patients": [
        { "label": "normal", "kel": 0.2 },
        { "label": "renal", "kel": 0.04 }
    ],
    "window": { "mec": 5.0, "msc": 30.0 },
    "grid": { "margin": 24.0, "points": 720 }
}"#;

#[test]
fn scenario_runs_both_patients() {
    let scenario: Scenario = RENAL.parse().unwrap();
    let comparison = scenario.run().unwrap();

    assert_eq!(comparison.outcomes.len(), 2);
    // dose times and each patient's per-dose peak time are added to the 720 even points
    assert!(comparison.times().len() > 720);
    assert_eq!(*comparison.times().last().unwrap(), 72.0);
    for dose_time in [12.0, 24.0, 36.0] {
        assert!(comparison.times().contains(&dose_time));
    }

    let normal = comparison.patient("normal").unwrap();
    let renal = comparison.patient("renal").unwrap();
    assert_eq!(normal.classification(), WindowClass::Therapeutic);
    assert_eq!(renal.classification(), WindowClass::Toxic);
    assert!(renal.metrics.auc > normal.metrics.auc);
}

#[test]
fn comparison_exports_one_column_per_patient() {
    let comparison = RENAL.parse::<Scenario>().unwrap().run().unwrap();
    let table = ConcentrationTable::from_comparison(&comparison).unwrap();
    let csv = table.to_csv_string().unwrap();

    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("time_h,normal,renal"));
    assert_eq!(lines.next(), Some("0,0,0"));
    assert_eq!(csv.lines().count(), comparison.times().len() + 1);
}

#[test]
fn scenario_file_round_trip() {
    let path = std::env::temp_dir().join("pksim_scenario_round_trip.json");
    let scenario: Scenario = RENAL.parse().unwrap();
    std::fs::write(&path, scenario.to_json().unwrap()).unwrap();

    let loaded = Scenario::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, scenario);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Scenario::from_file("/nonexistent/pksim/scenario.json").unwrap_err();
    assert!(matches!(err, ScenarioError::Io(_)));
}

#[test]
fn invalid_window_is_reported() {
    let err = r#"{ "window": { "mec": 40.0, "msc": 10.0 } }"#
        .parse::<Scenario>()
        .unwrap_err();
    match err {
        ScenarioError::Invalid(PkError::InvalidParameter { field, .. }) => assert_eq!(field, "mec"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn comparison_serializes_to_json() {
    let comparison = Scenario::default().run().unwrap();
    let json = serde_json::to_value(&comparison).unwrap();
    assert_eq!(json["outcomes"][0]["label"], "Patient A");
    assert_eq!(json["outcomes"][1]["metrics"]["classification"], "toxic");
}
