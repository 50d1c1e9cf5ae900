//! Physical constants.

/// Stefan-Boltzmann constant [W/m²K⁴]
pub const SIGMA: f64 = 5.67e-8;

/// Number of physical (integrated) nodes in the network.
pub const PHYSICAL_NODES: usize = 13;

/// Physical nodes plus the planet and deep-space sources.
pub const TOTAL_NODES: usize = 15;

/// Row of the planet source in a temperature vector (0-based).
pub const PLANET_ROW: usize = 13;

/// Row of the deep-space sink in a temperature vector (0-based).
pub const SPACE_ROW: usize = 14;
