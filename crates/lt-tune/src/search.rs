//! Per-coefficient grid search for the trial-error minimizer.

use crate::config::{Config, NUM_COEFFS};
use crate::error::{TuneError, TuneResult};
use crate::trial::{ActuationMode, run_trial};
use lt_constraints::Registry;
use lt_plant::Plant;
use serde::{Deserialize, Serialize};

/// One-dimensional sweep over a single coefficient's admissible range.
///
/// The grid covers `[min, max)` in `steps` equal increments; `max` itself is
/// never evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    /// Coefficient index, 0..=5.
    pub index: usize,
    pub min: f64,
    pub max: f64,
    pub steps: u32,
}

/// Result of one coefficient sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    /// Grid point with the smallest trial error.
    pub best_value: f64,
    /// Mean-squared error at that point.
    pub best_error: f64,
}

/// Grid-search one coefficient, holding all others fixed.
///
/// Each grid point overwrites `cfg.b[spec.index]` and re-runs the trial
/// loop; the strictly smaller error wins, so ties go to the earlier grid
/// point. The search is destructive and single-owner: after the sweep the
/// best value stays in `cfg.b[spec.index]`. Callers wanting isolation clone
/// the config first.
pub fn search_coefficient<P: Plant + ?Sized>(
    spec: SweepSpec,
    cfg: &mut Config,
    registry: &Registry,
    plant: &mut P,
    mode: ActuationMode,
) -> TuneResult<SweepOutcome> {
    if spec.index >= NUM_COEFFS {
        return Err(TuneError::InvalidArg {
            what: "coefficient index out of range",
        });
    }
    if spec.steps == 0 {
        return Err(TuneError::InvalidArg {
            what: "sweep must have at least one step",
        });
    }
    if !spec.min.is_finite() || !spec.max.is_finite() || spec.min >= spec.max {
        return Err(TuneError::InvalidArg {
            what: "sweep bounds must be finite with min < max",
        });
    }

    let db = (spec.max - spec.min).abs() / spec.steps as f64;
    let mut best_error = f64::INFINITY;
    let mut best_value = spec.min;

    for k in 0..spec.steps {
        let bi = spec.min + k as f64 * db;
        if bi >= spec.max {
            break;
        }
        cfg.b[spec.index] = bi;
        let q = run_trial(cfg, registry, plant, mode)?;
        tracing::debug!(index = spec.index, bi, q, "sweep point evaluated");
        if q < best_error {
            best_error = q;
            best_value = bi;
        }
    }

    // The winner stays in place for subsequent sweeps.
    cfg.b[spec.index] = best_value;
    tracing::info!(index = spec.index, best_value, best_error, "sweep complete");
    Ok(SweepOutcome {
        best_value,
        best_error,
    })
}

/// Run an ordered sequence of sweeps: one pass of coordinate descent.
///
/// Each sweep holds all other coefficients at their current, possibly
/// previously optimized, values. This does not generally reach a joint
/// minimum.
pub fn run_schedule<P: Plant + ?Sized>(
    specs: &[SweepSpec],
    cfg: &mut Config,
    registry: &Registry,
    plant: &mut P,
    mode: ActuationMode,
) -> TuneResult<Vec<SweepOutcome>> {
    let mut outcomes = Vec::with_capacity(specs.len());
    for spec in specs {
        outcomes.push(search_coefficient(*spec, cfg, registry, plant, mode)?);
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lt_constraints::schema::from_json_str;
    use lt_plant::{Channel, Plant, PlantResult};

    fn registry() -> Registry {
        let (r, _) = from_json_str(
            r#"[{"name": "L2", "type": "floating", "minval": -100.0, "maxval": 100.0}]"#,
        )
        .unwrap();
        r
    }

    fn config() -> Config {
        Config {
            m1: 0,
            m2: 1,
            l: 2,
            j: 3,
            n: 1,
            b: [0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            target_y: 1.0,
        }
    }

    /// Plant whose feedback equals the last actuation it received, so the
    /// trial error directly reflects the swept coefficient.
    struct EchoPlant {
        last: f64,
    }

    impl Plant for EchoPlant {
        fn measure(&mut self, channel: Channel) -> PlantResult<f64> {
            if channel == Channel(3) { Ok(self.last) } else { Ok(0.0) }
        }

        fn control(&mut self, _channel: Channel, value: f64) -> PlantResult<()> {
            self.last = value;
            Ok(())
        }
    }

    #[test]
    fn sweep_visits_exactly_the_half_open_grid() {
        // index=0, [-1, 1), steps=2 must evaluate exactly {-1, 0}
        let mut cfg = config();
        let mut plant = EchoPlant { last: 0.0 };
        let spec = SweepSpec { index: 0, min: -1.0, max: 1.0, steps: 2 };

        // With ControlSignal mode, u = b0 exactly (the other terms vanish
        // since b1 = 0 and b2 = 0).
        let outcome =
            search_coefficient(spec, &mut cfg, &registry(), &mut plant, ActuationMode::ControlSignal)
                .unwrap();

        // Feedback echoes u = b0; target is 1, so error = (1 - b0)².
        // Grid {-1, 0}: errors {4, 1}; 0 wins and stays in the config.
        assert_eq!(outcome.best_value, 0.0);
        assert_eq!(outcome.best_error, 1.0);
        assert_eq!(cfg.b[0], 0.0);
    }

    #[test]
    fn tie_breaks_to_the_earlier_grid_point() {
        // Constant plant: every grid point produces the same error, so the
        // first one (min) must win.
        let mut cfg = config();
        let mut plant = lt_plant::ConstantPlant::new(0.0);
        let spec = SweepSpec { index: 0, min: -1.0, max: 1.0, steps: 4 };
        let outcome =
            search_coefficient(spec, &mut cfg, &registry(), &mut plant, ActuationMode::LoopIndex)
                .unwrap();
        assert_eq!(outcome.best_value, -1.0);
        assert_eq!(cfg.b[0], -1.0);
    }

    #[test]
    fn search_mutates_config_in_place() {
        let mut cfg = config();
        cfg.b[1] = 42.0;
        let mut plant = lt_plant::ConstantPlant::new(0.0);
        let spec = SweepSpec { index: 1, min: 0.0, max: 10.0, steps: 5 };
        search_coefficient(spec, &mut cfg, &registry(), &mut plant, ActuationMode::LoopIndex)
            .unwrap();
        // The pre-search value is gone; the winner (first grid point on a
        // constant plant) is left behind.
        assert_eq!(cfg.b[1], 0.0);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut cfg = config();
        let mut plant = lt_plant::ConstantPlant::new(0.0);
        let bad = [
            SweepSpec { index: 6, min: 0.0, max: 1.0, steps: 2 },
            SweepSpec { index: 0, min: 0.0, max: 1.0, steps: 0 },
            SweepSpec { index: 0, min: 1.0, max: 0.0, steps: 2 },
            SweepSpec { index: 0, min: f64::NAN, max: 1.0, steps: 2 },
        ];
        for spec in bad {
            assert!(matches!(
                search_coefficient(spec, &mut cfg, &registry(), &mut plant, ActuationMode::LoopIndex),
                Err(TuneError::InvalidArg { .. })
            ));
        }
    }

    #[test]
    fn schedule_runs_sweeps_in_order() {
        let mut cfg = config();
        let mut plant = EchoPlant { last: 0.0 };
        let specs = [
            SweepSpec { index: 0, min: -1.0, max: 1.0, steps: 4 },
            SweepSpec { index: 1, min: -1.0, max: 1.0, steps: 4 },
        ];
        let outcomes = run_schedule(
            &specs,
            &mut cfg,
            &registry(),
            &mut plant,
            ActuationMode::ControlSignal,
        )
        .unwrap();
        assert_eq!(outcomes.len(), 2);
        // Best b0 from the first sweep is still in place during the second.
        assert_eq!(cfg.b[0], outcomes[0].best_value);
        assert_eq!(cfg.b[1], outcomes[1].best_value);
    }
}
