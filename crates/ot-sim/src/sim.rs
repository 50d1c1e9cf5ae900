//! Orbit simulation runner.

use ot_core::constants::{PLANET_ROW, SPACE_ROW};
use ot_core::ensure_finite;
use ot_project::SimulationDef;

use crate::balance::NodeBalance;
use crate::case::CasePreset;
use crate::error::{SimError, SimResult};
use crate::history::TemperatureHistory;
use crate::integrator::{ForwardEuler, Integrator};
use crate::network::ThermalNetwork;

/// Upper bound on history columns (15 × 8 bytes each).
pub const MAX_STEPS: usize = 5_000_000;

/// Options for orbit runs.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt_s: f64,
    /// Simulated window (seconds); any remainder shorter than `dt_s` is dropped
    pub duration_s: f64,
    /// Evaluate the node updates of each step with rayon
    pub parallel: bool,
    /// Report progress every N steps (0 disables)
    pub progress_every: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt_s: 1.0,
            duration_s: 6000.0,
            parallel: false,
            progress_every: 600,
        }
    }
}

impl SimOptions {
    pub fn from_def(def: &SimulationDef) -> Self {
        Self {
            dt_s: def.dt_s,
            duration_s: def.duration_s,
            ..Self::default()
        }
    }

    /// Number of history columns: `floor(duration / dt)`.
    pub fn step_count(&self) -> SimResult<usize> {
        let dt = ensure_finite(self.dt_s, "dt_s")?;
        let duration = ensure_finite(self.duration_s, "duration_s")?;
        if dt <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if duration < dt {
            return Err(SimError::InvalidArg {
                what: "duration must cover at least one step",
            });
        }
        let ratio = (duration / dt).floor();
        if !ratio.is_finite() || ratio > MAX_STEPS as f64 {
            return Err(SimError::InvalidArg {
                what: "duration/dt exceeds the step limit",
            });
        }
        Ok(ratio as usize)
    }
}

/// Progress snapshot passed to the callback of [`run_orbit_with_progress`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimProgress {
    pub step: usize,
    pub steps: usize,
    pub sim_time: f64,
    pub t_end: f64,
    pub theta_deg: f64,
    pub fraction_complete: f64,
}

/// Run one orbit window for `preset` on `network`.
pub fn run_orbit(
    network: &ThermalNetwork,
    preset: &CasePreset,
    opts: &SimOptions,
) -> SimResult<TemperatureHistory> {
    run_orbit_with_progress(network, preset, opts, None)
}

/// Same as [`run_orbit`], reporting progress every `opts.progress_every` steps.
pub fn run_orbit_with_progress(
    network: &ThermalNetwork,
    preset: &CasePreset,
    opts: &SimOptions,
    mut progress_cb: Option<&mut dyn FnMut(SimProgress)>,
) -> SimResult<TemperatureHistory> {
    let steps = opts.step_count()?;
    let dt = opts.dt_s;
    let t_end = (steps - 1) as f64 * dt;

    tracing::info!(
        model = %network.name,
        case = %preset.selector,
        dt_s = dt,
        steps,
        parallel = opts.parallel,
        "starting orbit run"
    );

    let balance = NodeBalance::new(network, preset);
    let integrator = ForwardEuler {
        parallel: opts.parallel,
    };
    let env = &network.environment;
    let mut history = TemperatureHistory::new(&preset.initial, steps, dt);

    for p in 1..steps {
        let sim_time = p as f64 * dt;
        let theta = network.geometry.theta_deg(sim_time);
        let (prev, next) = history.step_columns(p);
        integrator.step(&balance, theta, dt, prev, next);
        next[PLANET_ROW] = env.planet_temperature_k;
        next[SPACE_ROW] = env.space_temperature_k;

        if opts.progress_every > 0 && (p % opts.progress_every == 0 || p + 1 == steps) {
            tracing::debug!(step = p, sim_time, theta_deg = theta, "orbit progress");
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(SimProgress {
                    step: p,
                    steps,
                    sim_time,
                    t_end,
                    theta_deg: theta,
                    fraction_complete: p as f64 / (steps - 1) as f64,
                });
            }
        }
    }

    let last = history.column(steps - 1);
    if last.iter().any(|t| !t.is_finite() || *t <= 0.0) {
        tracing::warn!(
            dt_s = dt,
            "non-physical temperatures at end of run; time step may exceed the stability limit"
        );
    }

    tracing::info!(steps, "orbit run complete");
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt_s, 1.0);
        assert_eq!(opts.duration_s, 6000.0);
        assert!(!opts.parallel);
        assert_eq!(opts.step_count().unwrap(), 6000);
    }

    #[test]
    fn step_count_floors_remainder() {
        let opts = SimOptions {
            duration_s: 6000.5,
            ..SimOptions::default()
        };
        assert_eq!(opts.step_count().unwrap(), 6000);

        let opts = SimOptions {
            dt_s: 0.5,
            duration_s: 10.2,
            ..SimOptions::default()
        };
        assert_eq!(opts.step_count().unwrap(), 20);
    }

    #[test]
    fn sim_options_invalid() {
        let zero_dt = SimOptions {
            dt_s: 0.0,
            ..SimOptions::default()
        };
        assert!(zero_dt.step_count().is_err());

        let too_short = SimOptions {
            dt_s: 2.0,
            duration_s: 1.0,
            ..SimOptions::default()
        };
        assert!(too_short.step_count().is_err());

        let nan = SimOptions {
            duration_s: f64::NAN,
            ..SimOptions::default()
        };
        assert!(matches!(nan.step_count(), Err(SimError::Numeric(_))));
    }

    #[test]
    fn step_count_is_capped() {
        let tiny_dt = SimOptions {
            dt_s: 1e-300,
            duration_s: 1e300,
            ..SimOptions::default()
        };
        assert!(matches!(
            tiny_dt.step_count(),
            Err(SimError::InvalidArg { .. })
        ));

        let one_over = SimOptions {
            dt_s: 1.0,
            duration_s: (MAX_STEPS + 1) as f64,
            ..SimOptions::default()
        };
        assert!(one_over.step_count().is_err());

        let at_limit = SimOptions {
            dt_s: 1.0,
            duration_s: MAX_STEPS as f64,
            ..SimOptions::default()
        };
        assert_eq!(at_limit.step_count().unwrap(), MAX_STEPS);
    }
}
