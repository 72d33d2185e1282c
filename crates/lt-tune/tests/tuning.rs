//! End-to-end tests: registry + config + plant + trial loop + search.

use lt_constraints::schema::from_json_str;
use lt_core::{Tolerances, nearly_equal};
use lt_plant::{ConstantPlant, FirstOrderPlant};
use lt_tune::{ActuationMode, Config, SweepSpec, run_schedule, run_trial, search_coefficient};

const CONSTRAINTS: &str = r#"[
    {"name": "M", "type": "discrete", "values": [0, 1, 2, 3]},
    {"name": "L", "type": "discrete", "values": [2]},
    {"name": "J", "type": "discrete_range", "minval": 0, "maxval": 3},
    {"name": "N", "type": "discrete_range", "minval": 1, "maxval": 1000},
    {"name": "L2", "type": "floating", "minval": -50.0, "maxval": 50.0}
]"#;

const CONFIG: &str = r#"{
    "M1": 0, "M2": 1, "L": 2, "J": 3, "N": 20,
    "B": [0.0, 0.0, 0.0, 1.0, 0.0, 0.0], "Y": 5.0
}"#;

fn load() -> (lt_constraints::Registry, Config) {
    let (registry, reg_issues) = from_json_str(CONSTRAINTS).unwrap();
    assert!(reg_issues.is_empty());
    let (cfg, cfg_issues) = Config::from_json_str(CONFIG).unwrap();
    assert!(cfg_issues.is_empty());
    assert!(cfg.validate(&registry).is_empty());
    (registry, cfg)
}

#[test]
fn dead_plant_mse_is_exactly_target_squared() {
    let (registry, cfg) = load();
    let mut plant = ConstantPlant::new(0.0);
    let mse = run_trial(&cfg, &registry, &mut plant, ActuationMode::default()).unwrap();
    assert_eq!(mse, 25.0);
}

#[test]
fn tuning_against_the_simulated_plant_reduces_error() {
    let (registry, mut cfg) = load();

    // The plant's feedback channel follows whatever the control channel
    // drives it to, so with ControlSignal actuation a larger constant term
    // b0 pushes the feedback toward the target of 5.
    let mut plant = FirstOrderPlant::new(4, 1.0, 0.5).unwrap();
    // Point the feedback selector at the actuated channel so y tracks u.
    cfg.j = 2;

    let baseline = {
        let mut probe = plant.clone();
        run_trial(&cfg, &registry, &mut probe, ActuationMode::ControlSignal).unwrap()
    };

    let spec = SweepSpec {
        index: 0,
        min: 0.0,
        max: 10.0,
        steps: 20,
    };
    let outcome =
        search_coefficient(spec, &mut cfg, &registry, &mut plant, ActuationMode::ControlSignal)
            .unwrap();

    assert!(outcome.best_error <= baseline);
    assert_eq!(cfg.b[0], outcome.best_value);

    // Replaying the tuned config is deterministic on identical fresh plants.
    let mut fresh_a = FirstOrderPlant::new(4, 1.0, 0.5).unwrap();
    let mut fresh_b = FirstOrderPlant::new(4, 1.0, 0.5).unwrap();
    let replay_a = run_trial(&cfg, &registry, &mut fresh_a, ActuationMode::ControlSignal).unwrap();
    let replay_b = run_trial(&cfg, &registry, &mut fresh_b, ActuationMode::ControlSignal).unwrap();
    assert!(replay_a.is_finite());
    assert!(nearly_equal(replay_a, replay_b, Tolerances::default()));
}

#[test]
fn schedule_is_one_pass_of_coordinate_descent() {
    let (registry, mut cfg) = load();
    cfg.j = 2;
    let mut plant = FirstOrderPlant::new(4, 1.0, 0.5).unwrap();

    let specs = [
        SweepSpec { index: 0, min: -10.0, max: 10.0, steps: 10 },
        SweepSpec { index: 1, min: -1.0, max: 1.0, steps: 10 },
        SweepSpec { index: 2, min: -1.0, max: 1.0, steps: 10 },
    ];
    let outcomes =
        run_schedule(&specs, &mut cfg, &registry, &mut plant, ActuationMode::ControlSignal).unwrap();
    assert_eq!(outcomes.len(), 3);
    for (spec, outcome) in specs.iter().zip(&outcomes) {
        assert!(outcome.best_value >= spec.min);
        assert!(outcome.best_value < spec.max);
        assert_eq!(cfg.b[spec.index], outcome.best_value);
    }
}

#[test]
fn degraded_config_is_caught_before_running() {
    let (registry, _) = load();
    let (cfg, issues) = Config::from_json_str(
        r#"{"M1": 0, "M2": 1, "L": 2, "J": 3, "N": "bogus",
            "B": [0, 0, 0, 1, 0, 0], "Y": 5.0}"#,
    )
    .unwrap();
    assert_eq!(issues.len(), 1);
    // The zero-defaulted trial count fails the N constraint.
    let problems = cfg.validate(&registry);
    assert!(problems.iter().any(|p| p.field == "N"));
}
