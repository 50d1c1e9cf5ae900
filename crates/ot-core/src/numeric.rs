use crate::OtError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, OtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(OtError::NonFinite { what, value: v })
    }
}

/// Fourth power, written out so that hot loops avoid `powi` dispatch.
///
/// Negative inputs are not clamped; callers get the mathematically exact sign
/// of any difference they form from the result.
#[inline]
pub fn pow4(v: Real) -> Real {
    let sq = v * v;
    sq * sq
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_degrees(deg: Real) -> Real {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
