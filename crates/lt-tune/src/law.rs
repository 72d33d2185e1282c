//! Control-law evaluation with constraint clamping.

use crate::config::Config;
use crate::error::{TuneError, TuneResult};
use lt_constraints::Registry;
use lt_core::Real;

/// Evaluate the control law and clamp the result through the constraint of
/// the active output channel.
///
/// The raw signal is
/// `u = b0 + x1·b1 + b2·ln(target + b3 + b4·exp(b5·x2))`.
///
/// A non-positive or non-finite logarithm argument is a domain error carrying
/// the offending inputs; NaN never reaches the clamp step. The returned value
/// always satisfies the output channel's constraint.
pub fn evaluate(x1: Real, x2: Real, cfg: &Config, registry: &Registry) -> TuneResult<Real> {
    let b = &cfg.b;

    let arg = cfg.target_y + b[3] + b[4] * (b[5] * x2).exp();
    if !arg.is_finite() || arg <= 0.0 {
        return Err(TuneError::Domain {
            arg,
            x2,
            target: cfg.target_y,
        });
    }

    let u = b[0] + x1 * b[1] + b[2] * arg.ln();
    if !u.is_finite() {
        return Err(TuneError::NonFiniteSignal { u, x1, x2 });
    }

    let constraint = registry.lookup(&cfg.output_constraint_key())?;
    let clamped = constraint.fit(u);
    tracing::trace!(x1, x2, raw = u, clamped, "control law evaluated");
    Ok(clamped)
}
