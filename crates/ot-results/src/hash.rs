//! Content-based hashing for run IDs.

use ot_project::ModelDef;
use ot_sim::{CaseSelector, SimOptions};
use sha2::{Digest, Sha256};

/// Hash of everything that determines a run's history.
///
/// `parallel` and progress settings do not change results and are excluded.
pub fn compute_run_id(
    model: &ModelDef,
    case: CaseSelector,
    opts: &SimOptions,
    solver_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let model_json = serde_json::to_string(model).unwrap_or_default();
    hasher.update(model_json.as_bytes());

    hasher.update(case.as_str().as_bytes());
    hasher.update(opts.dt_s.to_le_bytes());
    hasher.update(opts.duration_s.to_le_bytes());

    hasher.update(solver_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
