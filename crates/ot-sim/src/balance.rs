//! Per-node energy balance and explicit Euler update.

use ot_core::constants::{PHYSICAL_NODES, PLANET_ROW, SIGMA, SPACE_ROW};
use ot_core::pow4;

use crate::case::CasePreset;
use crate::flux::{self, Derating, Surface};
use crate::network::{NodeKind, NodeSpec, SolarModel, ThermalNetwork};
use crate::orbit::Face;

/// Heat flow terms into one node [W]. Positive values heat the node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeatFlows {
    pub solar: f64,
    pub albedo: f64,
    pub planet_ir: f64,
    pub space: f64,
    pub conduction: f64,
    pub radiation: f64,
    pub dissipation: f64,
}

impl HeatFlows {
    pub fn total(&self) -> f64 {
        self.solar
            + self.albedo
            + self.planet_ir
            + self.space
            + self.conduction
            + self.radiation
            + self.dissipation
    }
}

/// Energy balance of every physical node for one case.
#[derive(Debug, Clone, Copy)]
pub struct NodeBalance<'a> {
    pub network: &'a ThermalNetwork,
    pub preset: &'a CasePreset,
}

impl<'a> NodeBalance<'a> {
    pub fn new(network: &'a ThermalNetwork, preset: &'a CasePreset) -> Self {
        Self { network, preset }
    }

    /// Optical surface of an exposed node; `None` for interior nodes.
    pub fn surface(&self, node: &NodeSpec) -> Option<Surface> {
        let (optical, derating) = match node.kind {
            NodeKind::Panel => (self.preset.solar_array, self.network.derating),
            NodeKind::CoatedFace => (self.preset.white_coating, Derating::NONE),
            NodeKind::Tray | NodeKind::AvionicsBox => return None,
        };
        Some(Surface {
            area_m2: node.area_m2,
            optical,
            planet_view_factor: node.planet_view_factor,
            derating,
        })
    }

    /// Face whose cosine and window drive a node's direct solar load.
    fn solar_face(&self, node: &NodeSpec) -> Option<Face> {
        match self.network.solar_model {
            SolarModel::Shared => Some(Face::ZPlus),
            SolarModel::PerFace => node.face,
        }
    }

    /// Every heat flow into node `row` for the temperature vector `temps`.
    ///
    /// `temps` holds all 15 entries; the planet and space temperatures are
    /// read from it.
    pub fn heat_flows(&self, row: usize, theta_deg: f64, temps: &[f64]) -> HeatFlows {
        let net = self.network;
        let node = &net.nodes[row];
        let ti = temps[row];
        let ti4 = pow4(ti);

        let mut flows = HeatFlows::default();

        for j in 0..PHYSICAL_NODES {
            if j == row {
                continue;
            }
            flows.conduction += net.conductance[(row, j)] * (temps[j] - ti);
            flows.radiation += net.interior_emissivity
                * SIGMA
                * net.view_factors[(row, j)]
                * node.area_m2
                * (pow4(temps[j]) - ti4);
        }

        if let Some(surface) = self.surface(node) {
            let env = &net.environment;
            if let Some(face) = self.solar_face(node) {
                flows.solar = flux::direct_solar(&net.geometry, face, theta_deg, env, &surface);
            }
            flows.albedo = flux::albedo(&net.geometry, theta_deg, env, &surface);
            flows.planet_ir = flux::planetary_ir(temps[PLANET_ROW], &surface);
            flows.space = flux::space_exchange(temps[SPACE_ROW], ti, &surface);
        }

        if node.kind == NodeKind::AvionicsBox {
            flows.dissipation = self.preset.dissipation_w(node.id, theta_deg);
        }

        flows
    }

    /// Forward Euler update of node `row`: `T + Δt/(m·cp)·Σq`.
    ///
    /// Pure; `temps` is only read.
    pub fn next_temperature(&self, row: usize, theta_deg: f64, temps: &[f64], dt_s: f64) -> f64 {
        let node = &self.network.nodes[row];
        let q = self.heat_flows(row, theta_deg, temps).total();
        temps[row] + dt_s / node.heat_capacity() * q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseSelector;
    use approx::assert_relative_eq;
    use ot_project::reference_model;

    fn setup(selector: CaseSelector) -> (ThermalNetwork, CasePreset) {
        let model = reference_model();
        (
            ThermalNetwork::from_model(&model).unwrap(),
            CasePreset::select(&model, selector).unwrap(),
        )
    }

    #[test]
    fn isothermal_interior_has_no_internal_exchange() {
        let (net, preset) = setup(CaseSelector::Cold);
        let bal = NodeBalance::new(&net, &preset);
        let mut temps = [290.0; 15];
        temps[PLANET_ROW] = 228.0;
        temps[SPACE_ROW] = 3.0;
        let tray = bal.heat_flows(10, 30.0, &temps);
        assert_eq!(tray.conduction, 0.0);
        assert_eq!(tray.radiation, 0.0);
        assert_eq!(tray.total(), 0.0);
    }

    #[test]
    fn tray_only_conducts_and_radiates() {
        let (net, preset) = setup(CaseSelector::Hot);
        let bal = NodeBalance::new(&net, &preset);
        let flows = bal.heat_flows(10, 0.0, &preset.initial);
        assert_eq!(flows.solar, 0.0);
        assert_eq!(flows.albedo, 0.0);
        assert_eq!(flows.planet_ir, 0.0);
        assert_eq!(flows.space, 0.0);
        assert_eq!(flows.dissipation, 0.0);
    }

    #[test]
    fn avionics_box_picks_up_dissipation() {
        let (net, preset) = setup(CaseSelector::Hot);
        let bal = NodeBalance::new(&net, &preset);
        assert_eq!(bal.heat_flows(11, 50.0, &preset.initial).dissipation, 50.0);
        assert_eq!(bal.heat_flows(11, 180.0, &preset.initial).dissipation, 0.0);
        assert_eq!(bal.heat_flows(12, 180.0, &preset.initial).dissipation, 15.0);
    }

    #[test]
    fn panel_terms_follow_flux_laws() {
        let (net, preset) = setup(CaseSelector::Hot);
        let bal = NodeBalance::new(&net, &preset);
        let t = preset.initial;
        let flows = bal.heat_flows(0, 100.0, &t);
        let a = 0.045;
        let expected_sol = -(100.0_f64.to_radians().cos()) * 2611.0 * a * 0.92;
        let expected_space = 0.85 * a * SIGMA * (pow4(t[SPACE_ROW]) - pow4(t[0]));
        let expected_ir = 0.8277 * 0.85 * a * SIGMA * pow4(228.0);
        assert_relative_eq!(flows.solar, expected_sol, max_relative = 1e-12);
        assert_eq!(flows.albedo, 0.0);
        assert_relative_eq!(flows.space, expected_space, max_relative = 1e-12);
        assert_relative_eq!(flows.planet_ir, expected_ir, max_relative = 1e-12);
    }

    #[test]
    fn coated_face_uses_white_coating() {
        let (net, preset) = setup(CaseSelector::Cold);
        let bal = NodeBalance::new(&net, &preset);
        let cover = &net.nodes[8];
        let surface = bal.surface(cover).unwrap();
        assert_eq!(surface.optical, preset.white_coating);
        assert_eq!(surface.derating, Derating::NONE);
        assert!(bal.surface(&net.nodes[10]).is_none());
    }

    // Every exposed node shares the planet-facing cosine by default, so even
    // the Y covers (which never see the sun geometrically) pick up solar load.
    #[test]
    fn shared_solar_model_lights_every_exposed_node() {
        let (net, preset) = setup(CaseSelector::Hot);
        let bal = NodeBalance::new(&net, &preset);
        let cover = bal.heat_flows(8, 100.0, &preset.initial);
        assert!(cover.solar > 0.0);

        let per_face = net.clone().with_solar_model(SolarModel::PerFace);
        let bal = NodeBalance::new(&per_face, &preset);
        assert_eq!(bal.heat_flows(8, 100.0, &preset.initial).solar, 0.0);
    }

    #[test]
    fn next_temperature_is_pure_euler_step() {
        let (net, preset) = setup(CaseSelector::Cold);
        let bal = NodeBalance::new(&net, &preset);
        let before = preset.initial;
        let q = bal.heat_flows(3, 20.0, &before).total();
        let next = bal.next_temperature(3, 20.0, &before, 1.0);
        assert_relative_eq!(next, before[3] + q / net.nodes[3].heat_capacity());
        assert_eq!(before, preset.initial);
    }
}
