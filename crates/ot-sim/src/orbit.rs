//! Orbital geometry: orbit angle, eclipse band and per-face illumination.
//!
//! The four critical angles split one revolution as follows:
//!
//! ```text
//!   0 ──── c1 ──── c2 ──── c3 ──── c4 ──── 360
//!   |  lit  | eclipse band (c1, c4)  |  lit  |
//!            (c1,c2)         (c3,c4)            Z+ quadrant windows
//! ```
//!
//! Every window predicate lives here so the flux model and the node balance
//! read the same definition.

use ot_core::wrap_degrees;
use ot_project::{FaceDef, OrbitDef};

/// Orbit period plus the critical angles `c1 < c2 < c3 < c4` (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGeometry {
    pub period_s: f64,
    pub critical_deg: [f64; 4],
}

impl OrbitGeometry {
    pub fn new(period_s: f64, critical_deg: [f64; 4]) -> Self {
        Self {
            period_s,
            critical_deg,
        }
    }

    pub fn from_def(def: &OrbitDef) -> Self {
        Self::new(def.period_s, def.critical_angles_deg)
    }

    pub fn c1(&self) -> f64 {
        self.critical_deg[0]
    }

    pub fn c2(&self) -> f64 {
        self.critical_deg[1]
    }

    pub fn c3(&self) -> f64 {
        self.critical_deg[2]
    }

    pub fn c4(&self) -> f64 {
        self.critical_deg[3]
    }

    /// Orbital angle in `[0, 360)` degrees after `elapsed_s` seconds.
    pub fn theta_deg(&self, elapsed_s: f64) -> f64 {
        wrap_degrees((360.0 / self.period_s) * elapsed_s)
    }

    /// Strictly inside the eclipse band `(c1, c4)`.
    pub fn in_eclipse(&self, theta_deg: f64) -> bool {
        self.c1() < theta_deg && theta_deg < self.c4()
    }

    /// Albedo band `[0, c1] ∪ [c4, 360)`: the complement of the eclipse band.
    pub fn albedo_active(&self, theta_deg: f64) -> bool {
        !self.in_eclipse(theta_deg)
    }

    /// Quadrant windows `(c1, c2) ∪ (c3, c4)` in which the planet-facing
    /// panels see the sun.
    pub fn quadrant_lit(&self, theta_deg: f64) -> bool {
        (self.c1() < theta_deg && theta_deg < self.c2())
            || (self.c3() < theta_deg && theta_deg < self.c4())
    }
}

/// Outward normal of an exposed face in the spacecraft body frame.
///
/// Z+ points at the planet, Z− away from it, X± lie in the orbit plane and
/// Y± are normal to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    ZPlus,
    ZMinus,
    XPlus,
    XMinus,
    YPlus,
    YMinus,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::ZPlus,
        Face::ZMinus,
        Face::XPlus,
        Face::XMinus,
        Face::YPlus,
        Face::YMinus,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Face::ZPlus => "Z+",
            Face::ZMinus => "Z-",
            Face::XPlus => "X+",
            Face::XMinus => "X-",
            Face::YPlus => "Y+",
            Face::YMinus => "Y-",
        }
    }

    /// Signed cosine between the face normal and the sun direction.
    pub fn cos_phi(self, theta_deg: f64) -> f64 {
        let th = theta_deg.to_radians();
        match self {
            Face::ZPlus => -th.cos(),
            Face::ZMinus => th.cos(),
            Face::XPlus => -th.sin(),
            Face::XMinus => th.sin(),
            Face::YPlus | Face::YMinus => 0.0,
        }
    }

    /// Whether direct sunlight reaches this face at `theta_deg`.
    pub fn is_lit(self, geometry: &OrbitGeometry, theta_deg: f64) -> bool {
        match self {
            Face::ZPlus => geometry.quadrant_lit(theta_deg),
            Face::ZMinus => geometry.albedo_active(theta_deg),
            Face::XPlus => theta_deg >= geometry.c3(),
            Face::XMinus => theta_deg <= geometry.c2(),
            Face::YPlus | Face::YMinus => false,
        }
    }
}

impl From<FaceDef> for Face {
    fn from(def: FaceDef) -> Self {
        match def {
            FaceDef::ZPlus => Face::ZPlus,
            FaceDef::ZMinus => Face::ZMinus,
            FaceDef::XPlus => Face::XPlus,
            FaceDef::XMinus => Face::XMinus,
            FaceDef::YPlus => Face::YPlus,
            FaceDef::YMinus => Face::YMinus,
        }
    }
}
