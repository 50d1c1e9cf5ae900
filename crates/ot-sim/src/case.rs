//! Hot and cold case presets.
//!
//! A preset bundles the optical properties of both surface finishes, the
//! 15-entry initial temperature vector and the dissipated-power rule. Presets
//! are plain values handed to the integrator.

use std::fmt;
use std::str::FromStr;

use ot_core::NodeId;
use ot_core::constants::TOTAL_NODES;
use ot_project::{CaseDef, ModelDef};

use crate::error::{SimError, SimResult};
use crate::flux::Optical;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSelector {
    Hot,
    Cold,
}

impl CaseSelector {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseSelector::Hot => "hot",
            CaseSelector::Cold => "cold",
        }
    }
}

impl fmt::Display for CaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseSelector {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(CaseSelector::Hot),
            "cold" => Ok(CaseSelector::Cold),
            _ => Err(SimError::InvalidScenario {
                value: s.to_string(),
            }),
        }
    }
}

/// Power dissipated strictly inside `(start_deg, end_deg)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBand {
    pub start_deg: f64,
    pub end_deg: f64,
    pub power_w: f64,
}

impl PowerBand {
    pub fn contains(&self, theta_deg: f64) -> bool {
        self.start_deg < theta_deg && theta_deg < self.end_deg
    }
}

/// Dissipation of one node as a function of orbital angle.
#[derive(Debug, Clone, PartialEq)]
pub struct DissipationRule {
    pub node: NodeId,
    pub constant_w: f64,
    pub bands: Vec<PowerBand>,
}

impl DissipationRule {
    pub fn power_w(&self, theta_deg: f64) -> f64 {
        self.constant_w
            + self
                .bands
                .iter()
                .filter(|b| b.contains(theta_deg))
                .map(|b| b.power_w)
                .sum::<f64>()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CasePreset {
    pub selector: CaseSelector,
    pub solar_array: Optical,
    pub white_coating: Optical,
    /// Initial temperatures [K]: nodes 1..13, planet, space.
    pub initial: [f64; TOTAL_NODES],
    pub dissipation: Vec<DissipationRule>,
}

impl CasePreset {
    /// Pick the preset for `selector` out of a model's case table.
    pub fn select(model: &ModelDef, selector: CaseSelector) -> SimResult<Self> {
        let def = match selector {
            CaseSelector::Hot => &model.cases.hot,
            CaseSelector::Cold => &model.cases.cold,
        };
        Self::from_def(selector, def)
    }

    pub fn from_def(selector: CaseSelector, def: &CaseDef) -> SimResult<Self> {
        let initial: [f64; TOTAL_NODES] = def
            .initial_temperatures_k
            .as_slice()
            .try_into()
            .map_err(|_| SimError::InvalidArg {
                what: "initial temperature vector must have 15 entries",
            })?;

        let dissipation = def
            .dissipation
            .iter()
            .map(|d| {
                let node = NodeId::from_number(d.node).ok_or(SimError::InvalidArg {
                    what: "dissipation node out of range",
                })?;
                Ok(DissipationRule {
                    node,
                    constant_w: d.constant_w,
                    bands: d
                        .bands
                        .iter()
                        .map(|b| PowerBand {
                            start_deg: b.start_deg,
                            end_deg: b.end_deg,
                            power_w: b.power_w,
                        })
                        .collect(),
                })
            })
            .collect::<SimResult<Vec<_>>>()?;

        Ok(Self {
            selector,
            solar_array: def.solar_array.into(),
            white_coating: def.white_coating.into(),
            initial,
            dissipation,
        })
    }

    /// Power dissipated by `node` at `theta_deg`; zero for nodes without a rule.
    pub fn dissipation_w(&self, node: NodeId, theta_deg: f64) -> f64 {
        self.dissipation
            .iter()
            .filter(|rule| rule.node == node)
            .map(|rule| rule.power_w(theta_deg))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ot_project::reference_model;

    fn node(n: u8) -> NodeId {
        NodeId::from_number(n).unwrap()
    }

    #[test]
    fn selector_parses_case_insensitively() {
        assert_eq!("hot".parse::<CaseSelector>().unwrap(), CaseSelector::Hot);
        assert_eq!(" Cold ".parse::<CaseSelector>().unwrap(), CaseSelector::Cold);
        assert_eq!(CaseSelector::Hot.to_string(), "hot");
    }

    #[test]
    fn unknown_selector_fails_fast() {
        let err = "warm".parse::<CaseSelector>().unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidScenario {
                value: "warm".to_string()
            }
        );
        assert!(err.to_string().contains("warm"));
        assert!("".parse::<CaseSelector>().is_err());
    }

    #[test]
    fn cold_case_dissipates_nothing() {
        let cold = CasePreset::select(&reference_model(), CaseSelector::Cold).unwrap();
        for i in 0..720 {
            let th = i as f64 * 0.5;
            for id in NodeId::physical() {
                assert_eq!(cold.dissipation_w(id, th), 0.0);
            }
        }
    }

    #[test]
    fn hot_case_avionics_bands() {
        let hot = CasePreset::select(&reference_model(), CaseSelector::Hot).unwrap();
        let obc = node(12);
        assert_eq!(hot.dissipation_w(obc, 0.0), 0.0);
        assert_eq!(hot.dissipation_w(obc, 50.0), 50.0);
        assert_eq!(hot.dissipation_w(obc, 108.0), 0.0);
        assert_eq!(hot.dissipation_w(obc, 180.0), 0.0);
        assert_eq!(hot.dissipation_w(obc, 250.0), 15.0);
        assert_eq!(hot.dissipation_w(obc, 272.0), 0.0);
        assert_eq!(hot.dissipation_w(obc, 300.0), 0.0);
    }

    #[test]
    fn hot_case_battery_is_constant() {
        let hot = CasePreset::select(&reference_model(), CaseSelector::Hot).unwrap();
        for th in [0.0, 45.0, 108.0, 200.0, 359.9] {
            assert_eq!(hot.dissipation_w(node(13), th), 15.0);
            assert_eq!(hot.dissipation_w(node(1), th), 0.0);
        }
    }

    #[test]
    fn preset_carries_initial_vector() {
        let model = reference_model();
        let hot = CasePreset::select(&model, CaseSelector::Hot).unwrap();
        assert_eq!(hot.initial.to_vec(), model.cases.hot.initial_temperatures_k);
        assert_eq!(hot.solar_array.absorptivity, 0.92);
    }

    #[test]
    fn short_initial_vector_is_rejected() {
        let mut model = reference_model();
        model.cases.cold.initial_temperatures_k.truncate(13);
        assert!(CasePreset::select(&model, CaseSelector::Cold).is_err());
    }
}
