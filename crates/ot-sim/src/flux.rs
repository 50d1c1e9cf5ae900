//! External heat loads on an exposed surface.
//!
//! Three sources reach an exposed face: direct sunlight, sunlight reflected by
//! the planet (albedo) and the planet's own infrared emission. All functions
//! are pure and return watts absorbed by the surface.

use ot_core::constants::SIGMA;
use ot_core::pow4;
use ot_project::{DeratingDef, EnvironmentDef, OpticalDef};

use crate::orbit::{Face, OrbitGeometry};

/// Planet and sun constants seen by the spacecraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Solar constant at the planet [W/m²].
    pub solar_constant: f64,
    /// Bond albedo fraction.
    pub albedo: f64,
    pub planet_temperature_k: f64,
    pub space_temperature_k: f64,
}

impl Environment {
    pub fn from_def(def: &EnvironmentDef) -> Self {
        Self {
            solar_constant: def.solar_constant_w_m2,
            albedo: def.albedo,
            planet_temperature_k: def.planet_temperature_k,
            space_temperature_k: def.space_temperature_k,
        }
    }
}

/// Absorptivity / emissivity pair of a surface finish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optical {
    pub absorptivity: f64,
    pub emissivity: f64,
}

impl Optical {
    /// Unit optics, used to report incident rather than absorbed flux.
    pub const UNIT: Optical = Optical {
        absorptivity: 1.0,
        emissivity: 1.0,
    };
}

impl From<OpticalDef> for Optical {
    fn from(def: OpticalDef) -> Self {
        Self {
            absorptivity: def.absorptivity,
            emissivity: def.emissivity,
        }
    }
}

/// Solar-array de-rating: electrical efficiency η and effective-area factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derating {
    pub efficiency: f64,
    pub effective_area: f64,
}

impl Derating {
    /// No de-rating (coated faces and incident-flux reports).
    pub const NONE: Derating = Derating {
        efficiency: 1.0,
        effective_area: 1.0,
    };

    /// Factor applied to shortwave loads (solar, albedo): `η · f_Aeff`.
    pub fn shortwave(&self) -> f64 {
        self.efficiency * self.effective_area
    }

    /// Factor applied to planetary infrared: `f_Aeff` only.
    pub fn longwave(&self) -> f64 {
        self.effective_area
    }
}

impl From<&DeratingDef> for Derating {
    fn from(def: &DeratingDef) -> Self {
        Self {
            efficiency: def.efficiency,
            effective_area: def.effective_area,
        }
    }
}

/// Everything about an exposed surface the flux laws need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub area_m2: f64,
    pub optical: Optical,
    /// Fraction of the planet disk seen by the face; 0 for faces turned away.
    pub planet_view_factor: f64,
    pub derating: Derating,
}

/// Direct solar load for a face presenting `face`'s cosine and window.
///
/// `q_sol = cosφ(θ)·S·A·α·η·f_Aeff` inside the window, exactly 0 outside.
pub fn direct_solar(
    geometry: &OrbitGeometry,
    face: Face,
    theta_deg: f64,
    env: &Environment,
    surface: &Surface,
) -> f64 {
    if !face.is_lit(geometry, theta_deg) {
        return 0.0;
    }
    face.cos_phi(theta_deg)
        * env.solar_constant
        * surface.area_m2
        * surface.optical.absorptivity
        * surface.derating.shortwave()
}

/// Planetary albedo load.
///
/// `q_alb = F·cos(θ)·γ·S·A·α·η·f_Aeff` in `[0, c1] ∪ [c4, 360)`, 0 in eclipse.
pub fn albedo(
    geometry: &OrbitGeometry,
    theta_deg: f64,
    env: &Environment,
    surface: &Surface,
) -> f64 {
    if surface.planet_view_factor == 0.0 || !geometry.albedo_active(theta_deg) {
        return 0.0;
    }
    surface.planet_view_factor
        * theta_deg.to_radians().cos()
        * env.albedo
        * env.solar_constant
        * surface.area_m2
        * surface.optical.absorptivity
        * surface.derating.shortwave()
}

/// Planetary infrared load, independent of orbit angle.
///
/// `q_ir = F·ε·A·σ·T_planet⁴·f_Aeff`
pub fn planetary_ir(planet_temperature_k: f64, surface: &Surface) -> f64 {
    if surface.planet_view_factor == 0.0 {
        return 0.0;
    }
    surface.planet_view_factor
        * surface.optical.emissivity
        * surface.area_m2
        * SIGMA
        * pow4(planet_temperature_k)
        * surface.derating.longwave()
}

/// Net radiative exchange with deep space, `ε·A·σ·(T_space⁴ − T⁴)`.
///
/// Negative whenever the surface is warmer than space; never clamped.
pub fn space_exchange(space_temperature_k: f64, temperature_k: f64, surface: &Surface) -> f64 {
    surface.optical.emissivity
        * surface.area_m2
        * SIGMA
        * (pow4(space_temperature_k) - pow4(temperature_k))
}
