//! Model file schema definitions.
//!
//! A model file carries every fixed input of an orbit thermal analysis: orbit
//! and environment constants, the node table, both coupling matrices, the two
//! case presets and the allowable flight temperatures.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDef {
    pub version: u32,
    pub name: String,
    pub orbit: OrbitDef,
    pub environment: EnvironmentDef,
    #[serde(default)]
    pub derating: DeratingDef,
    /// Emissivity of the bare aluminium interior used for node-to-node radiation.
    pub interior_emissivity: f64,
    pub nodes: Vec<NodeDef>,
    /// Conductive couplings [W/K], 13×13, row i / column j.
    pub conductance: Vec<Vec<f64>>,
    /// Internal radiative view factors, 13×13.
    pub view_factors: Vec<Vec<f64>>,
    pub cases: CasesDef,
    #[serde(default)]
    pub limits: Vec<LimitDef>,
    #[serde(default)]
    pub simulation: SimulationDef,
    #[serde(default)]
    pub solar_model: SolarModelDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrbitDef {
    pub period_s: f64,
    /// Critical orbital angles c1 < c2 < c3 < c4 [deg].
    pub critical_angles_deg: [f64; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentDef {
    pub planet_temperature_k: f64,
    pub space_temperature_k: f64,
    /// Solar constant at the planet's distance [W/m²].
    pub solar_constant_w_m2: f64,
    /// Planetary bond albedo fraction.
    pub albedo: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeratingDef {
    /// Electrical efficiency factor applied to panel solar and albedo loads.
    pub efficiency: f64,
    /// Effective area factor applied to panel solar, albedo and IR loads.
    pub effective_area: f64,
}

impl Default for DeratingDef {
    fn default() -> Self {
        Self {
            efficiency: 1.0,
            effective_area: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    /// Report label, 1..=13.
    pub id: u8,
    pub name: String,
    pub kind: NodeKindDef,
    pub mass_kg: f64,
    pub cp_j_per_kg_k: f64,
    pub area_m2: f64,
    #[serde(default)]
    pub planet_view_factor: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<FaceDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKindDef {
    /// Externally exposed solar-array panel.
    Panel,
    /// Externally exposed face with white thermal coating.
    CoatedFace,
    /// Internal structural tray.
    Tray,
    /// Internal electronics box with dissipation.
    AvionicsBox,
}

impl NodeKindDef {
    pub fn is_exposed(self) -> bool {
        matches!(self, NodeKindDef::Panel | NodeKindDef::CoatedFace)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FaceDef {
    #[serde(rename = "z+")]
    ZPlus,
    #[serde(rename = "z-")]
    ZMinus,
    #[serde(rename = "x+")]
    XPlus,
    #[serde(rename = "x-")]
    XMinus,
    #[serde(rename = "y+")]
    YPlus,
    #[serde(rename = "y-")]
    YMinus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CasesDef {
    pub hot: CaseDef,
    pub cold: CaseDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub solar_array: OpticalDef,
    pub white_coating: OpticalDef,
    /// 15 entries [K]: nodes 1..13, planet, space.
    pub initial_temperatures_k: Vec<f64>,
    #[serde(default)]
    pub dissipation: Vec<DissipationDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OpticalDef {
    pub absorptivity: f64,
    pub emissivity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DissipationDef {
    pub node: u8,
    /// Power dissipated at every orbital angle [W].
    #[serde(default)]
    pub constant_w: f64,
    /// Power inside open angular bands, added to `constant_w`.
    #[serde(default)]
    pub bands: Vec<PowerBandDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PowerBandDef {
    pub start_deg: f64,
    pub end_deg: f64,
    pub power_w: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitDef {
    pub node: u8,
    pub label: String,
    pub min_c: f64,
    pub max_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    pub duration_s: f64,
    pub dt_s: f64,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            duration_s: 6000.0,
            dt_s: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolarModelDef {
    /// Every exposed node sees the planet-facing cosine and quadrant window.
    #[default]
    Shared,
    /// Each exposed node uses its own face orientation.
    PerFace,
}
