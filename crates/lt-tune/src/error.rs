//! Error types for control-law evaluation and tuning.

use lt_constraints::ConstraintError;
use lt_plant::PlantError;
use thiserror::Error;

/// Result type for tuning operations.
pub type TuneResult<T> = Result<T, TuneError>;

/// Errors raised while evaluating the control law or running trials.
#[derive(Error, Debug)]
pub enum TuneError {
    /// Logarithm argument went non-positive or non-finite for the current
    /// coefficients. Carries the offending inputs for diagnostics.
    #[error(
        "Control law domain error: log argument {arg} is not positive \
         (x2 = {x2}, target = {target})"
    )]
    Domain { arg: f64, x2: f64, target: f64 },

    /// The control signal itself came out non-finite before clamping.
    #[error("Control signal is not finite: u = {u} (x1 = {x1}, x2 = {x2})")]
    NonFiniteSignal { u: f64, x1: f64, x2: f64 },

    /// Constraint lookup or construction failure (e.g. the active output
    /// channel has no registered constraint).
    #[error("Constraint error: {0}")]
    Constraint(#[from] ConstraintError),

    /// Plant measurement or actuation failure; aborts the trial in progress.
    #[error("Plant error: {0}")]
    Plant(#[from] PlantError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
