//! Run storage API.

use crate::types::{RunManifest, TimeseriesRecord};
use crate::{ResultsError, ResultsResult};
use nalgebra::DMatrix;
use ot_core::constants::TOTAL_NODES;
use ot_sim::{OrbitGeometry, TemperatureHistory};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store next to a model file, under `.orbitherm/runs`.
    pub fn for_model(model_path: &Path) -> ResultsResult<Self> {
        let model_dir = model_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "model path has no parent directory".to_string(),
            })?;
        let runs_dir = model_dir.join(".orbitherm").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[TimeseriesRecord],
    ) -> ResultsResult<()> {
        // JSON has no encoding for NaN or inf
        if let Some(step) = records
            .iter()
            .position(|r| r.temperatures_k.iter().any(|t| !t.is_finite()))
        {
            return Err(ResultsError::NonFinite {
                run_id: manifest.run_id.clone(),
                step,
            });
        }

        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_path = run_dir.join("manifest.json");
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(manifest_path, manifest_json)?;

        let timeseries_path = run_dir.join("timeseries.jsonl");
        let mut timeseries_content = String::new();
        for record in records {
            let line = serde_json::to_string(record)?;
            timeseries_content.push_str(&line);
            timeseries_content.push('\n');
        }
        fs::write(timeseries_path, timeseries_content)?;

        tracing::debug!(run_id = %manifest.run_id, records = records.len(), "saved run");
        Ok(())
    }

    /// Save a history, one record per column.
    pub fn save_history(
        &self,
        manifest: &RunManifest,
        history: &TemperatureHistory,
        geometry: &OrbitGeometry,
    ) -> ResultsResult<()> {
        let records = records_from_history(history, geometry);
        self.save_run(manifest, &records)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_timeseries(&self, run_id: &str) -> ResultsResult<Vec<TimeseriesRecord>> {
        let timeseries_path = self.run_dir(run_id).join("timeseries.jsonl");

        if !timeseries_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(timeseries_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: TimeseriesRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Load a stored run back into a temperature history.
    pub fn load_history(&self, run_id: &str) -> ResultsResult<TemperatureHistory> {
        let manifest = self.load_manifest(run_id)?;
        let records = self.load_timeseries(run_id)?;
        if records.len() != manifest.steps {
            return Err(ResultsError::Corrupt {
                run_id: run_id.to_string(),
                message: format!(
                    "manifest lists {} steps, found {} records",
                    manifest.steps,
                    records.len()
                ),
            });
        }
        history_from_records(&records, manifest.dt_s).map_err(|message| ResultsError::Corrupt {
            run_id: run_id.to_string(),
            message,
        })
    }

    /// Cached history for `run_id`, or `None` when absent or unreadable.
    pub fn cached_history(&self, run_id: &str) -> Option<TemperatureHistory> {
        if !self.has_run(run_id) {
            return None;
        }
        match self.load_history(run_id) {
            Ok(history) => Some(history),
            Err(err) => {
                tracing::warn!(run_id, error = %err, "ignoring unreadable cached run");
                None
            }
        }
    }

    /// Every stored run, optionally restricted to one model name.
    pub fn list_runs(&self, model_name: Option<&str>) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && model_name.is_none_or(|name| manifest.model_name == name)
                {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

pub fn records_from_history(
    history: &TemperatureHistory,
    geometry: &OrbitGeometry,
) -> Vec<TimeseriesRecord> {
    (0..history.steps())
        .map(|p| {
            let time_s = history.time_s(p);
            TimeseriesRecord {
                time_s,
                theta_deg: geometry.theta_deg(time_s),
                temperatures_k: history.column(p).to_vec(),
            }
        })
        .collect()
}

pub fn history_from_records(
    records: &[TimeseriesRecord],
    dt_s: f64,
) -> Result<TemperatureHistory, String> {
    let mut data = Vec::with_capacity(records.len() * TOTAL_NODES);
    for (p, record) in records.iter().enumerate() {
        if record.temperatures_k.len() != TOTAL_NODES {
            return Err(format!(
                "record {p} has {} temperatures, expected {TOTAL_NODES}",
                record.temperatures_k.len()
            ));
        }
        data.extend_from_slice(&record.temperatures_k);
    }
    let matrix = DMatrix::from_vec(TOTAL_NODES, records.len(), data);
    TemperatureHistory::from_matrix(matrix, dt_s).map_err(|e| e.to_string())
}
