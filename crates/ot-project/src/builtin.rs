//! Built-in reference model: a 2U-class CubeSat in a circular Venus orbit.
//!
//! Nodes 1..8 are solar-array panels in symmetric pairs (Z+, X−, Z−, X+),
//! 9/10 the white-coated Y± covers, 11 the internal tray, 12 the OBC/AOCS
//! stack and 13 the battery/propellant tank.

use crate::schema::*;
use ot_core::c_to_k;

const PLANET_T_K: f64 = 228.0;
const SPACE_T_K: f64 = 3.0;

const F_PLANET_ZPLUS: f64 = 0.8277;
const F_PLANET_LATERAL: f64 = 0.3638;
const F_PLANET_ZMINUS: f64 = 0.0;

const PANEL_MASS_KG: f64 = 0.20565;
const PANEL_CP: f64 = 1156.57;
const PANEL_AREA_M2: f64 = 0.045;

const COVER_MASS_KG: f64 = 0.2493;
const COVER_CP: f64 = 937.0;
const COVER_AREA_M2: f64 = 0.09;

const BOX_AREA_M2: f64 = 0.2 * 0.2;

fn panel(id: u8, name: &str, face: FaceDef, planet_view_factor: f64) -> NodeDef {
    NodeDef {
        id,
        name: name.to_string(),
        kind: NodeKindDef::Panel,
        mass_kg: PANEL_MASS_KG,
        cp_j_per_kg_k: PANEL_CP,
        area_m2: PANEL_AREA_M2,
        planet_view_factor,
        face: Some(face),
    }
}

fn cover(id: u8, name: &str, face: FaceDef) -> NodeDef {
    NodeDef {
        id,
        name: name.to_string(),
        kind: NodeKindDef::CoatedFace,
        mass_kg: COVER_MASS_KG,
        cp_j_per_kg_k: COVER_CP,
        area_m2: COVER_AREA_M2,
        planet_view_factor: F_PLANET_LATERAL,
        face: Some(face),
    }
}

fn internal(id: u8, name: &str, kind: NodeKindDef, mass_kg: f64, cp: f64, area_m2: f64) -> NodeDef {
    NodeDef {
        id,
        name: name.to_string(),
        kind,
        mass_kg,
        cp_j_per_kg_k: cp,
        area_m2,
        planet_view_factor: 0.0,
        face: None,
    }
}

fn nodes() -> Vec<NodeDef> {
    vec![
        panel(1, "Z+ panel A", FaceDef::ZPlus, F_PLANET_ZPLUS),
        panel(2, "Z+ panel B", FaceDef::ZPlus, F_PLANET_ZPLUS),
        panel(3, "X- panel A", FaceDef::XMinus, F_PLANET_LATERAL),
        panel(4, "X- panel B", FaceDef::XMinus, F_PLANET_LATERAL),
        panel(5, "Z- panel A", FaceDef::ZMinus, F_PLANET_ZMINUS),
        panel(6, "Z- panel B", FaceDef::ZMinus, F_PLANET_ZMINUS),
        panel(7, "X+ panel A", FaceDef::XPlus, F_PLANET_LATERAL),
        panel(8, "X+ panel B", FaceDef::XPlus, F_PLANET_LATERAL),
        cover(9, "Y+ cover", FaceDef::YPlus),
        cover(10, "Y- cover", FaceDef::YMinus),
        internal(11, "Tray", NodeKindDef::Tray, COVER_MASS_KG, COVER_CP, COVER_AREA_M2),
        internal(12, "OBC/AOCS", NodeKindDef::AvionicsBox, 5.0, 960.0, BOX_AREA_M2),
        internal(13, "Battery/tank", NodeKindDef::AvionicsBox, 5.0, 2000.0, BOX_AREA_M2),
    ]
}

#[rustfmt::skip]
fn conductance() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.352, 0.0872, 0.0, 0.0, 0.0, 0.0872, 0.0, 0.2241, 0.0, 0.2265, 0.0, 0.0],
        vec![0.352, 0.0, 0.0, 0.0872, 0.0, 0.0, 0.0, 0.0872, 0.0, 0.2241, 0.2265, 0.0, 0.0],
        vec![0.0872, 0.0, 0.0, 0.352, 0.0872, 0.0, 0.0, 0.0, 0.2241, 0.0, 0.2265, 0.0, 0.0],
        vec![0.0, 0.0872, 0.352, 0.0, 0.0, 0.0872, 0.0, 0.0, 0.0, 0.2241, 0.2265, 0.0, 0.0],
        vec![0.0, 0.0, 0.0872, 0.0, 0.0, 0.352, 0.0872, 0.0, 0.2241, 0.0, 0.2265, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0872, 0.352, 0.0, 0.0, 0.0872, 0.0, 0.2241, 0.2265, 0.0, 0.0],
        vec![0.0872, 0.0, 0.0, 0.0, 0.0872, 0.0, 0.0, 0.352, 0.2241, 0.0, 0.2265, 0.0, 0.0],
        vec![0.0, 0.0872, 0.0, 0.0, 0.0, 0.0872, 0.352, 0.0, 0.0, 0.2241, 0.2265, 0.0, 0.0],
        vec![0.2241, 0.0, 0.2241, 0.0, 0.2241, 0.0, 0.2241, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.2241, 0.0, 0.2241, 0.0, 0.2241, 0.0, 0.2241, 0.0, 0.0, 0.0, 0.0, 0.0],
        vec![0.2265, 0.2265, 0.2265, 0.2265, 0.2265, 0.2265, 0.2265, 0.2265, 0.0, 0.0, 0.0, 110.94, 100.94],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.94, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.94, 0.0, 0.0],
    ]
}

#[rustfmt::skip]
fn view_factors() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 0.0, 0.15, 0.0, 0.015, 0.0, 0.15, 0.0, 0.33, 0.0, 0.37, 0.16, 0.0],
        vec![0.0, 0.0, 0.0, 0.15, 0.0, 0.015, 0.0, 0.15, 0.0, 0.33, 0.37, 0.0, 0.16],
        vec![0.15, 0.0, 0.0, 0.0, 0.15, 0.0, 0.015, 0.0, 0.33, 0.0, 0.37, 0.16, 0.0],
        vec![0.0, 0.15, 0.0, 0.0, 0.0, 0.15, 0.0, 0.015, 0.0, 0.33, 0.37, 0.0, 0.16],
        vec![0.015, 0.0, 0.15, 0.0, 0.0, 0.0, 0.15, 0.0, 0.33, 0.0, 0.37, 0.16, 0.0],
        vec![0.0, 0.015, 0.0, 0.15, 0.0, 0.0, 0.0, 0.15, 0.0, 0.33, 0.37, 0.0, 0.16],
        vec![0.15, 0.0, 0.015, 0.0, 0.15, 0.0, 0.0, 0.0, 0.33, 0.0, 0.37, 0.16, 0.0],
        vec![0.0, 0.15, 0.0, 0.015, 0.0, 0.15, 0.0, 0.0, 0.0, 0.33, 0.37, 0.0, 0.16],
        vec![0.33, 0.0, 0.33, 0.0, 0.33, 0.0, 0.33, 0.0, 0.0, 0.0, 0.37, 0.39, 0.0],
        vec![0.0, 0.33, 0.0, 0.33, 0.0, 0.33, 0.0, 0.33, 0.0, 0.0, 0.37, 0.0, 0.39],
        vec![0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 0.0, 0.08, 0.08],
        vec![0.16, 0.0, 0.16, 0.0, 0.16, 0.0, 0.16, 0.0, 0.39, 0.0, 0.08, 0.0, 0.0],
        vec![0.0, 0.16, 0.0, 0.16, 0.0, 0.16, 0.0, 0.16, 0.0, 0.39, 0.08, 0.0, 0.0],
    ]
}

/// Initial column from per-node Celsius offsets plus the two environment sources.
fn initial_from_celsius(celsius: [f64; 13]) -> Vec<f64> {
    let mut out: Vec<f64> = celsius.iter().copied().map(c_to_k).collect();
    out.push(PLANET_T_K);
    out.push(SPACE_T_K);
    out
}

fn hot_case() -> CaseDef {
    CaseDef {
        description: "End of life optics, full operational dissipation".to_string(),
        solar_array: OpticalDef {
            absorptivity: 0.92,
            emissivity: 0.85,
        },
        white_coating: OpticalDef {
            absorptivity: 0.38,
            emissivity: 0.852,
        },
        initial_temperatures_k: initial_from_celsius([
            51.768380887451315,
            51.766202110884535,
            23.43624663704486,
            23.43346705086799,
            13.159464848627977,
            13.157062190410727,
            23.43624663704486,
            23.43346705086799,
            17.688041454037204,
            17.679055033100724,
            22.106952394620237,
            22.414968196217615,
            22.153055266061358,
        ]),
        dissipation: vec![
            DissipationDef {
                node: 12,
                constant_w: 0.0,
                bands: vec![
                    PowerBandDef {
                        start_deg: 0.0,
                        end_deg: 108.0,
                        power_w: 50.0,
                    },
                    PowerBandDef {
                        start_deg: 236.0,
                        end_deg: 272.0,
                        power_w: 15.0,
                    },
                ],
            },
            DissipationDef {
                node: 13,
                constant_w: 15.0,
                bands: vec![],
            },
        ],
    }
}

fn cold_case() -> CaseDef {
    CaseDef {
        description: "Beginning of life optics, no dissipation".to_string(),
        solar_array: OpticalDef {
            absorptivity: 0.65,
            emissivity: 0.95,
        },
        white_coating: OpticalDef {
            absorptivity: 0.212,
            emissivity: 0.89,
        },
        initial_temperatures_k: initial_from_celsius([
            3.304536468119295,
            3.304204908677832,
            -19.958827414203995,
            -19.959197582088336,
            -29.881899035517677,
            -29.88200030554924,
            -19.958827414203995,
            -19.959197582088336,
            -22.423850457711808,
            -22.425049514203266,
            -34.28890318418789,
            -34.291808049396565,
            -34.30208303181928,
        ]),
        dissipation: vec![],
    }
}

fn limits() -> Vec<LimitDef> {
    vec![
        LimitDef {
            node: 12,
            label: "OBC/AOCS".to_string(),
            min_c: -25.0,
            max_c: 65.0,
        },
        LimitDef {
            node: 13,
            label: "Battery".to_string(),
            min_c: -10.0,
            max_c: 50.0,
        },
        LimitDef {
            node: 13,
            label: "Butane tank".to_string(),
            min_c: 0.0,
            max_c: 35.0,
        },
    ]
}

/// The reference Venus-orbit model with one-orbit simulation defaults.
pub fn reference_model() -> ModelDef {
    ModelDef {
        version: LATEST_VERSION,
        name: "Venus orbit CubeSat".to_string(),
        orbit: OrbitDef {
            period_s: 5980.55,
            critical_angles_deg: [90.0, 115.0, 245.0, 270.0],
        },
        environment: EnvironmentDef {
            planet_temperature_k: PLANET_T_K,
            space_temperature_k: SPACE_T_K,
            solar_constant_w_m2: 2611.0,
            albedo: 0.77,
        },
        derating: DeratingDef::default(),
        interior_emissivity: 0.125,
        nodes: nodes(),
        conductance: conductance(),
        view_factors: view_factors(),
        cases: CasesDef {
            hot: hot_case(),
            cold: cold_case(),
        },
        limits: limits(),
        simulation: SimulationDef::default(),
        solar_model: SolarModelDef::Shared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conductance_is_symmetric_where_declared() {
        let c = conductance();
        // The tray/box couplings are not mirrored (110.94 vs 100.94), the faces are.
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(c[i][j], c[j][i], "C[{i}][{j}]");
            }
        }
    }

    #[test]
    fn environment_rows_match_sources() {
        let model = reference_model();
        for case in [&model.cases.hot, &model.cases.cold] {
            assert_eq!(case.initial_temperatures_k[13], PLANET_T_K);
            assert_eq!(case.initial_temperatures_k[14], SPACE_T_K);
        }
    }
}
