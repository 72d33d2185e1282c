//! Error types for plant interactions.

use crate::channel::Channel;
use thiserror::Error;

/// Result type for plant operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors raised by a plant during measurement or actuation.
///
/// Plant failures are fatal to the trial in progress and are never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    /// Channel selector does not name a port on this plant.
    #[error("No such plant channel: {channel} (plant has {num_channels} channels)")]
    BadChannel { channel: Channel, num_channels: usize },

    /// Device-level failure (sensor fault, actuator fault, lost link).
    #[error("Plant device error: {what}")]
    Device { what: String },
}
