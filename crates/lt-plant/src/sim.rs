//! Simulated plant with first-order lag dynamics.
//!
//! Stands in for a physical device during development and end-to-end tests.
//! Each channel is a scalar state; actuating a channel drives its state
//! toward the command through a first-order lag, stepped with forward Euler
//! on every `control` call.

use crate::channel::Channel;
use crate::error::{PlantError, PlantResult};
use crate::plant::Plant;
use lt_core::Real;

/// Bank of first-order lag channels.
///
/// Dynamics per actuated channel: dx/dt = (cmd - x) / tau, advanced by `dt`
/// on each `control` call. Measurement reads the channel state directly.
#[derive(Clone, Debug)]
pub struct FirstOrderPlant {
    states: Vec<Real>,
    /// Time constant (seconds), shared by all channels.
    tau: Real,
    /// Step size (seconds) applied per control call.
    dt: Real,
}

impl FirstOrderPlant {
    /// Create a plant with `num_channels` channels, all states at zero.
    pub fn new(num_channels: usize, tau: Real, dt: Real) -> PlantResult<Self> {
        if !tau.is_finite() || tau <= 0.0 {
            return Err(PlantError::Device {
                what: "tau must be positive".to_string(),
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PlantError::Device {
                what: "dt must be positive".to_string(),
            });
        }
        Ok(Self {
            states: vec![0.0; num_channels],
            tau,
            dt,
        })
    }

    /// Preset a channel state, e.g. a nonzero initial condition.
    pub fn set_state(&mut self, channel: Channel, value: Real) -> PlantResult<()> {
        let idx = self.index(channel)?;
        self.states[idx] = value;
        Ok(())
    }

    fn index(&self, channel: Channel) -> PlantResult<usize> {
        let idx = channel.index();
        if idx >= self.states.len() {
            return Err(PlantError::BadChannel {
                channel,
                num_channels: self.states.len(),
            });
        }
        Ok(idx)
    }
}

impl Plant for FirstOrderPlant {
    fn measure(&mut self, channel: Channel) -> PlantResult<f64> {
        let idx = self.index(channel)?;
        Ok(self.states[idx])
    }

    fn control(&mut self, channel: Channel, value: f64) -> PlantResult<()> {
        let idx = self.index(channel)?;
        let x = self.states[idx];
        let dxdt = (value - x) / self.tau;
        self.states[idx] = x + dxdt * self.dt;
        Ok(())
    }
}
