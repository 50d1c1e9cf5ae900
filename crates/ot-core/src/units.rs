// ot-core/src/units.rs

use uom::si::f64::ThermodynamicTemperature;

/// Canonical temperature type (SI, f64).
pub type Temperature = ThermodynamicTemperature;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

/// Kelvin value of a temperature.
#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Celsius value of a temperature.
#[inline]
pub fn celsius_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

/// Convert a raw Kelvin reading to Celsius for presentation.
#[inline]
pub fn k_to_c(kelvin: f64) -> f64 {
    celsius_of(k(kelvin))
}

/// Convert a raw Celsius reading to Kelvin.
#[inline]
pub fn c_to_k(celsius: f64) -> f64 {
    kelvin_of(degc(celsius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn constructors_agree() {
        assert_relative_eq!(kelvin_of(degc(0.0)), 273.15, max_relative = 1e-9);
        assert_relative_eq!(celsius_of(k(300.0)), 26.85, max_relative = 1e-9);
    }

    #[test]
    fn celsius_round_trip() {
        assert_abs_diff_eq!(k_to_c(273.15), 0.0, epsilon = 1e-9);
        assert_relative_eq!(c_to_k(-25.0), 248.15, max_relative = 1e-9);
        assert_relative_eq!(k_to_c(c_to_k(65.0)), 65.0, max_relative = 1e-9);
    }
}
