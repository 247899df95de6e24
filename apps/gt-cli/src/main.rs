mod error;
mod plan;
mod report;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gt_core::{ms, seconds};
use gt_train::{GearTrain, IntersectionScope, ShaftParams, TrainOptions};
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};
use crate::plan::Step;
use crate::report::TrainReport;

const STEP_HELP: &str = "\
Build step, applied in order (repeatable):
  mount:<shaft>:<kind>:<teeth>:<width>:<pitch>[:<offset>[:<mate teeth>]]
  mesh:<gear>:<angle deg>:<teeth>:<bore>
  remove-gear:<gear>
  remove-shaft:<shaft>
Shafts and gears are numbered from 0 in creation order; shaft 0 is the driver.
kind is spur, helical, helical-left or bevel.";

#[derive(Parser)]
#[command(name = "gt-cli")]
#[command(about = "GearTrain CLI - build, inspect and spin gear trains", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a train and list its shafts and gears
    Inspect(BuildArgs),
    /// Build a train, run it for a number of ticks and list the final state
    Simulate {
        #[command(flatten)]
        build: BuildArgs,
        /// Tick interval in milliseconds
        #[arg(long, default_value_t = 50.0)]
        dt_ms: f64,
        /// Number of ticks to run
        #[arg(long, default_value_t = 20)]
        ticks: u32,
        /// Global speed scalar
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
    },
}

#[derive(Args)]
struct BuildArgs {
    #[arg(long = "step", value_name = "STEP", long_help = STEP_HELP)]
    steps: Vec<Step>,
    /// Bodies a new gear is checked against
    #[arg(long, value_enum, default_value_t = Scope::Subtree)]
    scope: Scope,
    /// Radius of the driver shaft
    #[arg(long, default_value_t = 5.0)]
    root_radius: f64,
    /// Report rejected steps and continue instead of stopping
    #[arg(long)]
    keep_going: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scope {
    Subtree,
    Train,
}

impl From<Scope> for IntersectionScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Subtree => IntersectionScope::Subtree,
            Scope::Train => IntersectionScope::Train,
        }
    }
}

fn main() -> CliResult<()> {
    // Logs go to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(build) => cmd_inspect(&build),
        Commands::Simulate {
            build,
            dt_ms,
            ticks,
            speed,
        } => cmd_simulate(&build, dt_ms, ticks, speed),
    }
}

fn build_train(args: &BuildArgs) -> CliResult<GearTrain> {
    let options = TrainOptions {
        intersection_scope: args.scope.into(),
        ..TrainOptions::default()
    };
    let root = ShaftParams {
        radius: args.root_radius,
        ..ShaftParams::default()
    };
    let mut train = GearTrain::new(root, options)?;

    for step in &args.steps {
        match step.apply(&mut train) {
            Ok(outcome) => debug!(?step, ?outcome, "applied step"),
            Err(err) if args.keep_going => warn!(?step, error = %err, "step rejected"),
            Err(err) => return Err(err),
        }
    }
    Ok(train)
}

fn emit(report: &TrainReport, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        report.print_text();
    }
    Ok(())
}

fn cmd_inspect(args: &BuildArgs) -> CliResult<()> {
    let train = build_train(args)?;
    emit(&TrainReport::from_train(&train, 0.0), args.json)
}

fn cmd_simulate(args: &BuildArgs, dt_ms: f64, ticks: u32, speed: f64) -> CliResult<()> {
    if !(dt_ms.is_finite() && dt_ms > 0.0) {
        return Err(CliError::InvalidInput(format!(
            "tick interval must be positive, got {dt_ms} ms"
        )));
    }
    let mut train = build_train(args)?;
    train.set_speed(speed)?;
    train.start(ms(dt_ms))?;

    let mut elapsed = 0.0;
    for _ in 0..ticks {
        if train.tick_if_running()? {
            elapsed += seconds(train.tick_interval());
        }
    }
    train.stop();

    emit(&TrainReport::from_train(&train, elapsed), args.json)
}
