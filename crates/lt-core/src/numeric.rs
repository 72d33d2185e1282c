/// Floating point type used throughout the system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Round to the nearest integer, halves away from zero.
///
/// Callers must have checked finiteness; non-finite input saturates at the
/// i64 boundaries rather than invoking undefined casts.
pub fn round_nearest(v: Real) -> i64 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(i64::MIN as Real, i64::MAX as Real) as i64
}
