//! Compiled thermal network: the validated node table and coupling matrices.

use nalgebra::SMatrix;
use ot_core::NodeId;
use ot_core::constants::PHYSICAL_NODES;
use ot_project::{ModelDef, NodeKindDef, SolarModelDef, validate_model};

use crate::error::{SimError, SimResult};
use crate::flux::{Derating, Environment};
use crate::orbit::{Face, OrbitGeometry};

/// 13×13 coupling matrix between physical nodes, indexed by row.
pub type Coupling = SMatrix<f64, PHYSICAL_NODES, PHYSICAL_NODES>;

/// Role a node plays in the energy balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Panel,
    CoatedFace,
    Tray,
    AvionicsBox,
}

impl From<NodeKindDef> for NodeKind {
    fn from(def: NodeKindDef) -> Self {
        match def {
            NodeKindDef::Panel => NodeKind::Panel,
            NodeKindDef::CoatedFace => NodeKind::CoatedFace,
            NodeKindDef::Tray => NodeKind::Tray,
            NodeKindDef::AvionicsBox => NodeKind::AvionicsBox,
        }
    }
}

/// How direct sunlight is distributed over the exposed nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolarModel {
    /// Every exposed node uses the planet-facing cosine and quadrant window.
    #[default]
    Shared,
    /// Each exposed node uses its own face orientation.
    PerFace,
}

impl SolarModel {
    pub fn as_str(self) -> &'static str {
        match self {
            SolarModel::Shared => "shared",
            SolarModel::PerFace => "per_face",
        }
    }
}

impl From<SolarModelDef> for SolarModel {
    fn from(def: SolarModelDef) -> Self {
        match def {
            SolarModelDef::Shared => SolarModel::Shared,
            SolarModelDef::PerFace => SolarModel::PerFace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub mass_kg: f64,
    pub cp_j_per_kg_k: f64,
    pub area_m2: f64,
    pub planet_view_factor: f64,
    pub face: Option<Face>,
}

impl NodeSpec {
    /// Lumped heat capacity `m·cp` [J/K].
    pub fn heat_capacity(&self) -> f64 {
        self.mass_kg * self.cp_j_per_kg_k
    }
}

/// Immutable, validated network shared by every step of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalNetwork {
    pub name: String,
    /// Physical nodes in row order (node `n` at index `n - 1`).
    pub nodes: Vec<NodeSpec>,
    pub conductance: Coupling,
    pub view_factors: Coupling,
    pub interior_emissivity: f64,
    pub environment: Environment,
    pub geometry: OrbitGeometry,
    pub derating: Derating,
    pub solar_model: SolarModel,
}

impl ThermalNetwork {
    /// Validate a model and compile it into row-indexed form.
    pub fn from_model(model: &ModelDef) -> SimResult<Self> {
        validate_model(model)?;

        let mut nodes = model
            .nodes
            .iter()
            .map(|def| {
                let id = NodeId::from_number(def.id).ok_or(SimError::InvalidArg {
                    what: "node id out of range",
                })?;
                Ok(NodeSpec {
                    id,
                    name: def.name.clone(),
                    kind: def.kind.into(),
                    mass_kg: def.mass_kg,
                    cp_j_per_kg_k: def.cp_j_per_kg_k,
                    area_m2: def.area_m2,
                    planet_view_factor: def.planet_view_factor,
                    face: def.face.map(Face::from),
                })
            })
            .collect::<SimResult<Vec<_>>>()?;
        nodes.sort_by_key(|n| n.id);

        tracing::debug!(model = %model.name, nodes = nodes.len(), "compiled thermal network");

        Ok(Self {
            name: model.name.clone(),
            nodes,
            conductance: Coupling::from_fn(|i, j| model.conductance[i][j]),
            view_factors: Coupling::from_fn(|i, j| model.view_factors[i][j]),
            interior_emissivity: model.interior_emissivity,
            environment: Environment::from_def(&model.environment),
            geometry: OrbitGeometry::from_def(&model.orbit),
            derating: Derating::from(&model.derating),
            solar_model: model.solar_model.into(),
        })
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeSpec> {
        self.nodes.get(id.row())
    }

    pub fn with_solar_model(mut self, solar_model: SolarModel) -> Self {
        self.solar_model = solar_model;
        self
    }
}
