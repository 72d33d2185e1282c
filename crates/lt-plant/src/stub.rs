//! Deterministic plant stubs for tests and dry runs.

use crate::channel::Channel;
use crate::error::PlantResult;
use crate::plant::Plant;

/// Plant whose every channel measures a fixed value; actuation is a no-op.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPlant {
    pub value: f64,
}

impl ConstantPlant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Plant for ConstantPlant {
    fn measure(&mut self, _channel: Channel) -> PlantResult<f64> {
        Ok(self.value)
    }

    fn control(&mut self, _channel: Channel, _value: f64) -> PlantResult<()> {
        Ok(())
    }
}

/// Plant that measures a fixed value and records every actuation.
///
/// Useful for asserting what the trial loop actually sent to the device.
#[derive(Clone, Debug, Default)]
pub struct RecordingPlant {
    pub measured: f64,
    /// Every (channel, value) pair passed to `control`, in call order.
    pub actuations: Vec<(Channel, f64)>,
}

impl RecordingPlant {
    pub fn new(measured: f64) -> Self {
        Self {
            measured,
            actuations: Vec::new(),
        }
    }
}

impl Plant for RecordingPlant {
    fn measure(&mut self, _channel: Channel) -> PlantResult<f64> {
        Ok(self.measured)
    }

    fn control(&mut self, channel: Channel, value: f64) -> PlantResult<()> {
        self.actuations.push((channel, value));
        Ok(())
    }
}
