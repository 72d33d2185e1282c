use clap::{Args, Parser, Subcommand};
use lt_constraints::{LoadError, Registry, schema};
use lt_plant::FirstOrderPlant;
use lt_tune::{ActuationMode, Config, SweepSpec, run_schedule, run_trial};
use std::path::{Path, PathBuf};

mod prompt;

#[derive(Parser)]
#[command(name = "lt-cli")]
#[command(about = "looptune CLI - constraint-bounded control-law tuning tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a constraint declaration file
    Validate {
        /// Path to the constraints JSON/YAML file
        constraints_path: PathBuf,
    },
    /// Load a configuration and check it against the constraints
    CheckConfig {
        /// Path to the constraints JSON/YAML file
        constraints_path: PathBuf,
        /// Path to the configuration JSON/YAML file
        config_path: PathBuf,
    },
    /// Build a configuration interactively, re-prompting on invalid input
    PromptConfig {
        /// Path to the constraints JSON/YAML file
        constraints_path: PathBuf,
    },
    /// Run one trial sequence and report the mean-squared error
    Trial {
        /// Path to the constraints JSON/YAML file
        constraints_path: PathBuf,
        /// Path to the configuration JSON/YAML file
        config_path: PathBuf,
        #[command(flatten)]
        plant: PlantArgs,
        /// Actuate with the computed control signal instead of the loop index
        #[arg(long)]
        apply_control: bool,
    },
    /// Run a sweep schedule and report the winning coefficients
    Tune {
        /// Path to the constraints JSON/YAML file
        constraints_path: PathBuf,
        /// Path to the configuration JSON/YAML file
        config_path: PathBuf,
        /// Path to the sweep schedule JSON/YAML file
        schedule_path: PathBuf,
        #[command(flatten)]
        plant: PlantArgs,
        /// Actuate with the computed control signal instead of the loop index
        #[arg(long)]
        apply_control: bool,
    },
}

/// Simulated plant parameters.
#[derive(Args)]
struct PlantArgs {
    /// Number of simulated plant channels
    #[arg(long, default_value_t = 4)]
    channels: usize,
    /// First-order lag time constant (seconds)
    #[arg(long, default_value_t = 1.0)]
    tau: f64,
    /// Step size per control call (seconds)
    #[arg(long, default_value_t = 0.1)]
    dt: f64,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Load(#[from] lt_constraints::LoadError),

    #[error("{0}")]
    Constraint(#[from] lt_constraints::ConstraintError),

    #[error("{0}")]
    Plant(#[from] lt_plant::PlantError),

    #[error("{0}")]
    Tune(#[from] lt_tune::TuneError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration is invalid; fix the reported fields and retry")]
    InvalidConfig,
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { constraints_path } => cmd_validate(&constraints_path),
        Commands::CheckConfig {
            constraints_path,
            config_path,
        } => cmd_check_config(&constraints_path, &config_path),
        Commands::PromptConfig { constraints_path } => cmd_prompt_config(&constraints_path),
        Commands::Trial {
            constraints_path,
            config_path,
            plant,
            apply_control,
        } => cmd_trial(&constraints_path, &config_path, &plant, apply_control),
        Commands::Tune {
            constraints_path,
            config_path,
            schedule_path,
            plant,
            apply_control,
        } => cmd_tune(
            &constraints_path,
            &config_path,
            &schedule_path,
            &plant,
            apply_control,
        ),
    }
}

fn load_registry(path: &Path) -> CliResult<Registry> {
    let (registry, issues) = if is_yaml(path) {
        schema::load_yaml(path)?
    } else {
        schema::load_json(path)?
    };
    for issue in &issues {
        eprintln!("warning: constraint {issue}");
    }
    Ok(registry)
}

fn load_config(path: &Path, registry: &Registry) -> CliResult<Config> {
    let (cfg, issues) = if is_yaml(path) {
        Config::load_yaml(path)?
    } else {
        Config::load_json(path)?
    };
    for issue in &issues {
        eprintln!("warning: config field {issue}");
    }
    let problems = cfg.validate(registry);
    if !problems.is_empty() {
        for p in &problems {
            eprintln!("error: {p}");
        }
        return Err(CliError::InvalidConfig);
    }
    Ok(cfg)
}

fn load_schedule(path: &Path) -> CliResult<Vec<SweepSpec>> {
    let content = std::fs::read_to_string(path)?;
    let specs: Vec<SweepSpec> = if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(LoadError::Yaml)?
    } else {
        serde_json::from_str(&content).map_err(LoadError::Json)?
    };
    Ok(specs)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn actuation_mode(apply_control: bool) -> ActuationMode {
    if apply_control {
        ActuationMode::ControlSignal
    } else {
        ActuationMode::LoopIndex
    }
}

fn make_plant(args: &PlantArgs) -> CliResult<FirstOrderPlant> {
    Ok(FirstOrderPlant::new(args.channels, args.tau, args.dt)?)
}

fn cmd_validate(constraints_path: &Path) -> CliResult<()> {
    println!("Validating constraints: {}", constraints_path.display());
    let registry = load_registry(constraints_path)?;
    let mut names: Vec<&str> = registry.names().collect();
    names.sort_unstable();
    for name in &names {
        let constraint = registry.lookup(name)?;
        println!("  {name}: {}", constraint.describe());
    }
    println!("✓ {} constraints loaded", registry.len());
    Ok(())
}

fn cmd_check_config(constraints_path: &Path, config_path: &Path) -> CliResult<()> {
    let registry = load_registry(constraints_path)?;
    let cfg = load_config(config_path, &registry)?;
    println!("✓ Configuration is valid");
    println!(
        "  inputs M1={} M2={}, output L={} (constraint {}), feedback J={}",
        cfg.m1,
        cfg.m2,
        cfg.l,
        cfg.output_constraint_key(),
        cfg.j
    );
    println!("  trials N={}, target Y={}", cfg.n, cfg.target_y);
    println!("  coefficients B={:?}", cfg.b);
    Ok(())
}

fn cmd_prompt_config(constraints_path: &Path) -> CliResult<()> {
    let registry = load_registry(constraints_path)?;
    let cfg = prompt::prompt_config(&registry)?;
    println!("{}", serde_json::to_string_pretty(&cfg).map_err(LoadError::Json)?);
    Ok(())
}

fn cmd_trial(
    constraints_path: &Path,
    config_path: &Path,
    plant_args: &PlantArgs,
    apply_control: bool,
) -> CliResult<()> {
    let registry = load_registry(constraints_path)?;
    let cfg = load_config(config_path, &registry)?;
    let mut plant = make_plant(plant_args)?;
    let mse = run_trial(&cfg, &registry, &mut plant, actuation_mode(apply_control))?;
    println!("✓ Trial complete: {} cycles, MSE = {mse}", cfg.n);
    Ok(())
}

fn cmd_tune(
    constraints_path: &Path,
    config_path: &Path,
    schedule_path: &Path,
    plant_args: &PlantArgs,
    apply_control: bool,
) -> CliResult<()> {
    let registry = load_registry(constraints_path)?;
    let mut cfg = load_config(config_path, &registry)?;
    let specs = load_schedule(schedule_path)?;
    let mut plant = make_plant(plant_args)?;
    tracing::info!(
        sweeps = specs.len(),
        trials = cfg.n,
        "starting coefficient search"
    );

    println!(
        "Tuning {} coefficients over the schedule in {}",
        specs.len(),
        schedule_path.display()
    );
    let outcomes = run_schedule(
        &specs,
        &mut cfg,
        &registry,
        &mut plant,
        actuation_mode(apply_control),
    )?;

    for (spec, outcome) in specs.iter().zip(&outcomes) {
        println!(
            "  b{} = {} (MSE {})",
            spec.index, outcome.best_value, outcome.best_error
        );
    }
    println!("✓ Final coefficients: {:?}", cfg.b);
    Ok(())
}
