use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use ot_project::reference_model;
use nalgebra::DMatrix;
use ot_results::{ResultsError, RunManifest, RunStore, compute_run_id};
use ot_sim::{
    CasePreset, CaseSelector, SimOptions, TemperatureHistory, ThermalNetwork, run_orbit,
};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

#[test]
fn save_list_load_roundtrip() {
    let model_dir = unique_temp_dir("ot_results_model");
    fs::create_dir_all(&model_dir).expect("failed to create temp model dir");
    let model_path = model_dir.join("model.yaml");
    ot_project::save_yaml(&model_path, &reference_model()).expect("failed to write model file");

    let store = RunStore::for_model(&model_path).expect("failed to create run store");

    let model = reference_model();
    let network = ThermalNetwork::from_model(&model).unwrap();
    let preset = CasePreset::select(&model, CaseSelector::Cold).unwrap();
    let opts = SimOptions {
        duration_s: 120.0,
        ..SimOptions::default()
    };
    let history = run_orbit(&network, &preset, &opts).unwrap();

    let run_id = compute_run_id(&model, CaseSelector::Cold, &opts, "0.1.0");
    let manifest = RunManifest {
        run_id: run_id.clone(),
        model_name: model.name.clone(),
        case: "cold".to_string(),
        timestamp: "2026-02-26T00:00:00Z".to_string(),
        dt_s: opts.dt_s,
        duration_s: opts.duration_s,
        steps: history.steps(),
        solar_model: "shared".to_string(),
        solver_version: "0.1.0".to_string(),
    };

    assert!(!store.has_run(&run_id));
    store
        .save_history(&manifest, &history, &network.geometry)
        .expect("failed to save run");
    assert!(store.has_run(&run_id));

    let runs = store.list_runs(Some(&model.name)).expect("failed to list runs");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0], manifest);
    assert!(store.list_runs(Some("other")).unwrap().is_empty());

    let records = store.load_timeseries(&run_id).expect("failed to load records");
    assert_eq!(records.len(), 120);
    assert_eq!(records[0].theta_deg, 0.0);

    let loaded = store.load_history(&run_id).expect("failed to load history");
    assert_eq!(loaded, history);

    store.delete_run(&run_id).unwrap();
    assert!(matches!(
        store.load_manifest(&run_id),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn truncated_timeseries_is_reported() {
    let store = RunStore::new(unique_temp_dir("ot_results_corrupt")).unwrap();
    let model = reference_model();
    let network = ThermalNetwork::from_model(&model).unwrap();
    let preset = CasePreset::select(&model, CaseSelector::Hot).unwrap();
    let opts = SimOptions {
        duration_s: 10.0,
        ..SimOptions::default()
    };
    let history = run_orbit(&network, &preset, &opts).unwrap();
    let mut records = ot_results::records_from_history(&history, &network.geometry);
    records.pop();

    let manifest = RunManifest {
        run_id: "truncated".to_string(),
        model_name: model.name.clone(),
        case: "hot".to_string(),
        timestamp: "2026-02-26T00:00:00Z".to_string(),
        dt_s: 1.0,
        duration_s: 10.0,
        steps: 10,
        solar_model: "shared".to_string(),
        solver_version: "0.1.0".to_string(),
    };
    store.save_run(&manifest, &records).unwrap();

    assert!(matches!(
        store.load_history("truncated"),
        Err(ResultsError::Corrupt { .. })
    ));
    // unreadable entries count as cache misses
    assert!(store.has_run("truncated"));
    assert!(store.cached_history("truncated").is_none());
}

#[test]
fn diverged_history_is_not_stored() {
    let store = RunStore::new(unique_temp_dir("ot_results_nan")).unwrap();
    let network = ThermalNetwork::from_model(&reference_model()).unwrap();
    let mut data = DMatrix::from_element(15, 3, 290.0);
    data[(0, 2)] = f64::NAN;
    let history = TemperatureHistory::from_matrix(data, 1.0).unwrap();

    let manifest = RunManifest {
        run_id: "diverged".to_string(),
        model_name: "reference".to_string(),
        case: "hot".to_string(),
        timestamp: "2026-02-26T00:00:00Z".to_string(),
        dt_s: 1.0,
        duration_s: 3.0,
        steps: 3,
        solar_model: "shared".to_string(),
        solver_version: "0.1.0".to_string(),
    };

    assert!(matches!(
        store.save_history(&manifest, &history, &network.geometry),
        Err(ResultsError::NonFinite { step: 2, .. })
    ));
    assert!(!store.has_run("diverged"));
    assert!(store.cached_history("diverged").is_none());

    let mut finite = history.matrix().clone();
    finite[(0, 2)] = 291.0;
    let history = TemperatureHistory::from_matrix(finite, 1.0).unwrap();
    store
        .save_history(&manifest, &history, &network.geometry)
        .unwrap();
    assert_eq!(store.cached_history("diverged"), Some(history));
}
