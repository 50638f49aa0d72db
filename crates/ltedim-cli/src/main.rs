//! ltedim - LTE coverage dimensioning from the command line
//!
//! Reads a scenario from YAML (see [`config`]), applies command-line
//! overrides and prints the planner results as a table or as JSON.

mod config;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

use config::{LogFormat, PlannerConfig};
use ltedim_core::{
    compare_models, evaluate_model, survey_bands, sweep_path_loss, Environment, LinkBudget,
    LteParameters, PropagationModel,
};

#[derive(Parser, Debug)]
#[command(name = "ltedim")]
#[command(author, version, about = "LTE propagation and site dimensioning", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the standard search path)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use a named scenario from the configuration's profiles
    #[arg(short, long, global = true, value_name = "NAME")]
    profile: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

/// Per-run parameter overrides
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Carrier frequency in MHz
    #[arg(long, global = true)]
    frequency: Option<f64>,

    /// Environment: urban, suburban or rural
    #[arg(long, global = true)]
    environment: Option<Environment>,

    /// Target area in km²
    #[arg(long, global = true)]
    target_area: Option<f64>,

    /// eNodeB transmit power in dBm
    #[arg(long, global = true)]
    tx_power: Option<f64>,

    /// eNodeB antenna height in metres
    #[arg(long, global = true)]
    tx_height: Option<f64>,
}

impl Overrides {
    fn apply(&self, params: LteParameters) -> LteParameters {
        LteParameters {
            frequency: self.frequency.unwrap_or(params.frequency),
            environment: self.environment.unwrap_or(params.environment),
            target_area: self.target_area.unwrap_or(params.target_area),
            tx_power: self.tx_power.unwrap_or(params.tx_power),
            tx_antenna_height: self.tx_height.unwrap_or(params.tx_antenna_height),
            ..params
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare all three propagation models
    Compare,
    /// Dimension with a single model
    Evaluate {
        /// okumura-hata, cost231-hata or 3gpp
        model: PropagationModel,
    },
    /// Path loss of every model along a distance grid
    Sweep {
        /// Last distance in km (defaults to the configured sweep length)
        #[arg(long, value_name = "KM")]
        max_distance: Option<f64>,
    },
    /// Compare the models on every standard LTE band
    Bands,
    /// Print an example configuration file
    ExampleConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::ExampleConfig => {
            print!("{}", PlannerConfig::example_yaml());
            Ok(())
        }
        Command::Compare => {
            let params = load_scenario(&cli)?.parameters;
            let cmp = compare_models(&params);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print!("{}", report::scenario(&params));
                println!();
                print!("{}", report::comparison(&cmp));
            }
            Ok(())
        }
        Command::Evaluate { model } => {
            let params = load_scenario(&cli)?.parameters;
            let (lo, hi) = model.frequency_range_mhz();
            if !(lo..=hi).contains(&params.frequency) {
                warn!(
                    "{} MHz is outside the {} range of {}-{} MHz",
                    params.frequency,
                    model.name(),
                    lo,
                    hi
                );
            }
            let result = evaluate_model(model, &params);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::scenario(&params));
                println!();
                print!("{}", report::calculation(&result));
            }
            Ok(())
        }
        Command::Sweep { .. } => {
            let config = load_scenario(&cli)?;
            let params = config.parameters;
            let points: Vec<_> = sweep_path_loss(&params, config.sweep.max_distance_km).collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                let mapl = LinkBudget::from_params(&params).max_allowed_path_loss_db;
                print!("{}", report::sweep(&points, mapl));
            }
            Ok(())
        }
        Command::Bands => {
            let params = load_scenario(&cli)?.parameters;
            let results = survey_bands(&params);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", report::bands(&results));
            }
            Ok(())
        }
    }
}

/// Load the configuration, start logging and resolve the scenario to run.
fn load_scenario(cli: &Cli) -> Result<PlannerConfig> {
    let config = match &cli.config {
        Some(path) => PlannerConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlannerConfig::load().context("Failed to load config")?,
    };

    init_logging(&config);
    resolve_scenario(cli, config)
}

/// Apply profile selection and command-line overrides, then validate.
fn resolve_scenario(cli: &Cli, mut config: PlannerConfig) -> Result<PlannerConfig> {
    if let Some(name) = &cli.profile {
        config = config.with_profile(name)?;
    }

    config.parameters = cli.overrides.apply(config.parameters);
    if let Command::Sweep {
        max_distance: Some(km),
    } = cli.command
    {
        config.sweep.max_distance_km = km;
    }
    config.validate().context("Invalid scenario")?;

    debug!("Scenario: {:?}", config.parameters);
    Ok(config)
}

/// Initializes the tracing subscriber for logging
fn init_logging(config: &PlannerConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }
}
