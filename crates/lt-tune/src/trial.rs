//! Trial loop: measure → compute → actuate → measure, accumulating error.

use crate::config::Config;
use crate::error::{TuneError, TuneResult};
use crate::law::evaluate;
use lt_constraints::Registry;
use lt_plant::Plant;

/// What the trial loop sends to the plant's control channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActuationMode {
    /// Actuate with the loop index, reproducing the reference tool: there
    /// the computed control signal is only echoed, never applied. Kept as
    /// the default for compatibility; see DESIGN.md.
    #[default]
    LoopIndex,
    /// Actuate with the clamped control signal.
    ControlSignal,
}

/// Run one trial sequence and return the mean-squared tracking error.
///
/// For each of `cfg.n` cycles: measure `x1`/`x2`, evaluate the clamped
/// control signal, actuate the output channel per `mode`, measure feedback
/// `y`, and accumulate `(target − y)²`. There is no early termination and no
/// retry; a plant failure aborts the run.
pub fn run_trial<P: Plant + ?Sized>(
    cfg: &Config,
    registry: &Registry,
    plant: &mut P,
    mode: ActuationMode,
) -> TuneResult<f64> {
    if cfg.n == 0 {
        return Err(TuneError::InvalidArg {
            what: "trial count must be positive",
        });
    }

    let n = cfg.n as f64;
    let mut q = 0.0;
    for i in 0..cfg.n {
        let x1 = plant.measure(cfg.m1_channel())?;
        let x2 = plant.measure(cfg.m2_channel())?;
        let u = evaluate(x1, x2, cfg, registry)?;

        let actuation = match mode {
            ActuationMode::LoopIndex => i as f64,
            ActuationMode::ControlSignal => u,
        };
        plant.control(cfg.output_channel(), actuation)?;

        let y = plant.measure(cfg.feedback_channel())?;
        let e = cfg.target_y - y;
        q += e * e;
        tracing::debug!(cycle = i, x1, x2, u, y, running_mse = q / n, "trial cycle");
    }
    Ok(q / n)
}
