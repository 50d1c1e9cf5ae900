//! Face load sweep: external loads per spacecraft face over one revolution.
//!
//! Each face uses its own orientation and window, regardless of the solar
//! model chosen for the transient run. Output is tabular, for plotting
//! elsewhere.

use std::fmt;
use std::str::FromStr;

use crate::case::{CasePreset, CaseSelector};
use crate::error::{SimError, SimResult};
use crate::flux::{self, Derating, Optical, Surface};
use crate::network::{NodeKind, ThermalNetwork};
use crate::orbit::Face;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Incident flux per unit area [W/m²], unit optics, no de-rating.
    Incident,
    /// Absorbed power with beginning-of-life (cold case) optics [W].
    Bol,
    /// Absorbed power with end-of-life (hot case) optics [W].
    Eol,
}

impl LoadMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadMode::Incident => "inc",
            LoadMode::Bol => "bol",
            LoadMode::Eol => "eol",
        }
    }

    fn case(self) -> Option<CaseSelector> {
        match self {
            LoadMode::Incident => None,
            LoadMode::Bol => Some(CaseSelector::Cold),
            LoadMode::Eol => Some(CaseSelector::Hot),
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inc" | "incident" => Ok(LoadMode::Incident),
            "bol" => Ok(LoadMode::Bol),
            "eol" => Ok(LoadMode::Eol),
            _ => Err(SimError::InvalidArg {
                what: "load mode must be one of inc, bol, eol",
            }),
        }
    }
}

/// Load series of one face, sampled at [`FaceLoadSweep::theta_deg`].
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLoads {
    pub face: Face,
    /// Total area of the nodes on this face (1 in incident mode).
    pub area_m2: f64,
    pub solar: Vec<f64>,
    pub albedo: Vec<f64>,
    pub planet_ir: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceLoadSweep {
    pub mode: LoadMode,
    pub theta_deg: Vec<f64>,
    pub faces: Vec<FaceLoads>,
}

/// Sample solar, albedo and planetary-IR loads of every populated face at
/// `samples` evenly spaced angles over `[0, 360]`.
pub fn face_load_sweep(
    network: &ThermalNetwork,
    presets: (&CasePreset, &CasePreset),
    mode: LoadMode,
    samples: usize,
) -> SimResult<FaceLoadSweep> {
    if samples < 2 {
        return Err(SimError::InvalidArg {
            what: "sweep needs at least two samples",
        });
    }
    let (hot, cold) = presets;
    let preset = match mode.case() {
        Some(CaseSelector::Hot) => Some(hot),
        Some(CaseSelector::Cold) => Some(cold),
        None => None,
    };

    let theta_deg: Vec<f64> = (0..samples)
        .map(|i| 360.0 * i as f64 / (samples - 1) as f64)
        .collect();
    let env = &network.environment;

    let mut faces = Vec::new();
    for face in Face::ALL {
        let members: Vec<_> = network
            .nodes
            .iter()
            .filter(|n| n.face == Some(face))
            .collect();
        let Some(first) = members.first() else {
            continue;
        };

        let surface = match preset {
            None => Surface {
                area_m2: 1.0,
                optical: Optical::UNIT,
                planet_view_factor: first.planet_view_factor,
                derating: Derating::NONE,
            },
            Some(p) => {
                let (optical, derating) = match first.kind {
                    NodeKind::Panel => (p.solar_array, network.derating),
                    _ => (p.white_coating, Derating::NONE),
                };
                Surface {
                    area_m2: members.iter().map(|n| n.area_m2).sum(),
                    optical,
                    planet_view_factor: first.planet_view_factor,
                    derating,
                }
            }
        };

        let ir = flux::planetary_ir(env.planet_temperature_k, &surface);
        faces.push(FaceLoads {
            face,
            area_m2: surface.area_m2,
            solar: theta_deg
                .iter()
                .map(|&th| flux::direct_solar(&network.geometry, face, th, env, &surface))
                .collect(),
            albedo: theta_deg
                .iter()
                .map(|&th| flux::albedo(&network.geometry, th, env, &surface))
                .collect(),
            planet_ir: vec![ir; samples],
        });
    }

    Ok(FaceLoadSweep {
        mode,
        theta_deg,
        faces,
    })
}
