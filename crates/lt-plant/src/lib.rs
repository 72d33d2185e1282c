//! lt-plant: the plant seam.
//!
//! Provides:
//! - `Plant`, the blocking measure/control trait the trial loop drives
//! - `Channel`, a small-integer plant port selector
//! - `FirstOrderPlant`, a simulated plant with first-order lag dynamics
//! - deterministic stubs for tests

pub mod channel;
pub mod error;
pub mod plant;
pub mod sim;
pub mod stub;

pub use channel::Channel;
pub use error::{PlantError, PlantResult};
pub use plant::Plant;
pub use sim::FirstOrderPlant;
pub use stub::{ConstantPlant, RecordingPlant};
