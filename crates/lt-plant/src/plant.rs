//! The plant trait: the only contract the tuning core relies on.

use crate::channel::Channel;
use crate::error::PlantResult;

/// A measurable, controllable external system.
///
/// Calls are blocking and synchronous; the trial loop will not proceed until
/// a call returns. There is no timeout or cancellation, and failures are not
/// retried. Initialization is the implementor's constructor.
pub trait Plant {
    /// Read the current value at a measurement channel.
    fn measure(&mut self, channel: Channel) -> PlantResult<f64>;

    /// Apply an actuation value at a control channel.
    fn control(&mut self, channel: Channel, value: f64) -> PlantResult<()>;
}
