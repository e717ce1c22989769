//! Scalar helpers shared by planning and control.

/// Tolerance used by every floating-point comparison in the crate.
pub const EPSILON: f64 = 1e-6;

#[inline]
pub(crate) fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

#[inline]
pub(crate) fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// `-1`, `0` or `1`; zero maps to zero.
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    abs(a - b) <= EPSILON
}
