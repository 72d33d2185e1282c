//! Constraint variants: discrete set, discrete range, continuous range.
//!
//! All three support the same three operations:
//! - `check`: does the value satisfy the constraint? Total over all reals;
//!   non-finite values never pass.
//! - `fit`: project a value onto the admissible set. `check(fit(v))` holds
//!   for every input, including NaN and the infinities, and `fit` is
//!   idempotent.
//! - `describe`: human-readable admissible-set text for diagnostics.

use crate::error::{ConstraintError, ConstraintResult};
use lt_core::{Real, round_nearest};
use std::fmt;

/// A single bounded-value validator/projector for one numeric channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Ordered list of admissible integers.
    DiscreteSet { values: Vec<i64> },
    /// Closed integer interval [min, max].
    DiscreteRange { min: i64, max: i64 },
    /// Closed real interval [min, max].
    ContinuousRange { min: Real, max: Real },
}

impl Constraint {
    /// Discrete set constraint over the given admissible integers.
    ///
    /// Order is preserved: it decides the tie-break in `fit`.
    pub fn discrete_set(values: Vec<i64>) -> ConstraintResult<Self> {
        if values.is_empty() {
            return Err(ConstraintError::EmptySet);
        }
        Ok(Self::DiscreteSet { values })
    }

    /// Integer interval constraint [min, max].
    pub fn discrete_range(min: i64, max: i64) -> ConstraintResult<Self> {
        if min > max {
            return Err(ConstraintError::InvertedRange {
                min: min as f64,
                max: max as f64,
            });
        }
        Ok(Self::DiscreteRange { min, max })
    }

    /// Real interval constraint [min, max]. Bounds must be finite.
    pub fn continuous_range(min: Real, max: Real) -> ConstraintResult<Self> {
        if !min.is_finite() {
            return Err(ConstraintError::NonFiniteBound { what: "min" });
        }
        if !max.is_finite() {
            return Err(ConstraintError::NonFiniteBound { what: "max" });
        }
        if min > max {
            return Err(ConstraintError::InvertedRange { min, max });
        }
        Ok(Self::ContinuousRange { min, max })
    }

    /// Test whether `v` satisfies the constraint.
    ///
    /// Discrete variants round to the nearest integer first. NaN and the
    /// infinities always fail.
    pub fn check(&self, v: Real) -> bool {
        if !v.is_finite() {
            return false;
        }
        match self {
            Self::DiscreteSet { values } => values.contains(&round_nearest(v)),
            Self::DiscreteRange { min, max } => {
                let iv = round_nearest(v);
                *min <= iv && iv <= *max
            }
            Self::ContinuousRange { min, max } => *min <= v && v <= *max,
        }
    }

    /// Project `v` onto the nearest admissible value.
    ///
    /// - Discrete set: the admissible integer with the smallest absolute
    ///   distance to `v`; ties go to the first candidate in declared order.
    ///   Non-finite input projects to the first declared value.
    /// - Discrete range: clamp the raw real to [min, max], then round, so
    ///   the result always passes `check`. NaN projects to `min`.
    /// - Continuous range: plain clamp; NaN projects to `min`.
    pub fn fit(&self, v: Real) -> Real {
        match self {
            Self::DiscreteSet { values } => {
                if !v.is_finite() {
                    return values[0] as Real;
                }
                let mut best = values[0];
                let mut best_dist = Real::INFINITY;
                for &candidate in values {
                    let dist = (candidate as Real - v).abs();
                    if dist < best_dist {
                        best_dist = dist;
                        best = candidate;
                    }
                }
                best as Real
            }
            Self::DiscreteRange { min, max } => {
                if v.is_nan() {
                    return *min as Real;
                }
                let clamped = v.clamp(*min as Real, *max as Real);
                round_nearest(clamped) as Real
            }
            Self::ContinuousRange { min, max } => {
                if v.is_nan() {
                    return *min;
                }
                v.clamp(*min, *max)
            }
        }
    }

    /// Human-readable admissible-set description for diagnostics.
    pub fn describe(&self) -> String {
        format!("{self}")
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiscreteSet { values } => {
                write!(f, "value must be in {{")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "}}")
            }
            Self::DiscreteRange { min, max } => {
                write!(f, "value must be an integer in [{min}, {max}]")
            }
            Self::ContinuousRange { min, max } => {
                write!(f, "value must be in [{min}, {max}]")
            }
        }
    }
}
