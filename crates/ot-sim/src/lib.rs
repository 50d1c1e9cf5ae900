//! Transient orbit simulation for a lumped thermal network.
//!
//! Provides:
//! - Orbit geometry and illumination windows
//! - External flux model (direct solar, albedo, planetary infrared)
//! - Hot/cold case presets with dissipated-power rules
//! - Per-node energy balance and a fixed-step forward Euler integrator
//! - Extremes, allowable-temperature checks and face load sweeps

pub mod balance;
pub mod case;
pub mod error;
pub mod flux;
pub mod history;
pub mod integrator;
pub mod loads;
pub mod network;
pub mod orbit;
pub mod report;
pub mod sim;

// Re-exports for public API
pub use balance::{HeatFlows, NodeBalance};
pub use case::{CasePreset, CaseSelector, DissipationRule, PowerBand};
pub use error::{SimError, SimResult};
pub use flux::{Derating, Environment, Optical, Surface};
pub use history::TemperatureHistory;
pub use integrator::{ForwardEuler, Integrator};
pub use loads::{FaceLoadSweep, FaceLoads, LoadMode, face_load_sweep};
pub use network::{NodeKind, NodeSpec, SolarModel, ThermalNetwork};
pub use orbit::{Face, OrbitGeometry};
pub use report::{LimitCheck, LimitStatus, NodeExtremes, check_limits, node_extremes};
pub use sim::{MAX_STEPS, SimOptions, SimProgress, run_orbit, run_orbit_with_progress};
