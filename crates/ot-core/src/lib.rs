//! ot-core: stable foundation for orbitherm.
//!
//! Contains:
//! - units (uom SI types + constructors, Kelvin/Celsius helpers)
//! - numeric (Real + float helpers)
//! - ids (compact 1-based node identifiers)
//! - constants (physical constants shared by the flux model)
//! - timing (wall-clock timers for run summaries)
//! - error (shared error types)

pub mod constants;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OtError, OtResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
