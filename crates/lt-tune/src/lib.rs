//! lt-tune: constraint-bounded control-law evaluation and coefficient search.
//!
//! The tuning pipeline:
//! 1. load a constraint `Registry` (lt-constraints) and a `Config`;
//! 2. `evaluate` computes the control signal and clamps it through the
//!    constraint of the active output channel;
//! 3. `run_trial` drives measure→compute→actuate→measure cycles against a
//!    `Plant`, accumulating mean-squared tracking error;
//! 4. `search_coefficient` grid-searches one coefficient at a time for the
//!    error minimizer; `run_schedule` chains sweeps into one pass of
//!    coordinate descent.

pub mod config;
pub mod error;
pub mod law;
pub mod search;
pub mod trial;

// Internal modules
mod schema_util;

pub use config::{Config, FieldIssue};
pub use error::{TuneError, TuneResult};
pub use law::evaluate;
pub use search::{SweepOutcome, SweepSpec, run_schedule, search_coefficient};
pub use trial::{ActuationMode, run_trial};
