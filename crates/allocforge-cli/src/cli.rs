//! Argument parsing and the solve / check commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use allocforge::{
    components_from_config, standard_deltas, AllocError, Assignment, ChangeNeighborhoodExplorer,
    ConfigError, GreedyConstructor, HardSoftCost, Instance, LocalSearchType, MoveTestReport,
    MoveTester, SolutionManager, Solver, SolverConfig, SolverError,
};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Random moves applied by `--check` after the full neighborhood test.
const CHECK_WALK_STEPS: usize = 1000;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Local search method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Hill climbing
    #[value(name = "HC", alias = "hc")]
    HillClimbing,
    /// Steepest descent
    #[value(name = "SD", alias = "sd")]
    SteepestDescent,
    /// Simulated annealing
    #[value(name = "SA", alias = "sa")]
    SimulatedAnnealing,
}

impl From<Method> for LocalSearchType {
    fn from(method: Method) -> Self {
        match method {
            Method::HillClimbing => LocalSearchType::HillClimbing,
            Method::SteepestDescent => LocalSearchType::SteepestDescent,
            Method::SimulatedAnnealing => LocalSearchType::SimulatedAnnealing,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "allocforge")]
#[command(about = "Assign clients to capacitated resources", long_about = None)]
pub struct Args {
    /// Instance file (TOML, or YAML with a .yaml/.yml extension)
    #[arg(long)]
    pub instance: PathBuf,

    /// Solver configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Local search method, overriding the configuration
    #[arg(long, value_enum)]
    pub method: Option<Method>,

    /// Initial assignment, in the output format
    #[arg(long)]
    pub init_state: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Number of independent runs
    #[arg(long)]
    pub restarts: Option<usize>,

    /// Check incremental costs on the initial state instead of solving
    #[arg(long)]
    pub check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable solver logging
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Fallback tracing filter for the console.
    pub fn log_directive(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "off",
            (false, 0) => "allocforge_solver=info",
            (false, 1) => "allocforge_solver=debug",
            (false, _) => "allocforge_solver=trace",
        }
    }

    /// The configuration file (or defaults) with command line overrides.
    pub fn solver_config(&self) -> Result<SolverConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(seed) = self.seed {
            config = config.with_random_seed(seed);
        }
        if let Some(method) = self.method {
            config = config.with_local_search_type(method.into());
        }
        if let Some(restarts) = self.restarts {
            config = config.with_restart_count(restarts);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Runs the command described by `args`.
pub fn run(args: &Args) -> Result<ExitCode, CliError> {
    let config = args.solver_config()?;
    let instance = Instance::load(&args.instance)?;
    let initial = match &args.init_state {
        Some(path) => Assignment::read_from(&instance, &read_file(path)?)?,
        None => Assignment::new(&instance),
    };

    if args.check {
        let report = check(&config, initial);
        emit(args.output_file.as_deref(), &report.to_string())?;
        return Ok(if report.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let start = Instant::now();
    let result = Solver::new(config)?.solve_from(&initial)?;
    let text = render(&result.assignment, result.cost, start.elapsed());
    emit(args.output_file.as_deref(), &text)?;
    Ok(ExitCode::SUCCESS)
}

/// Checks every move of `state` (completed greedily when partial), then a
/// random walk from it.
pub fn check(config: &SolverConfig, mut state: Assignment<'_>) -> MoveTestReport {
    let components = components_from_config(&config.components);
    let manager = SolutionManager::new(components);
    let explorer = ChangeNeighborhoodExplorer::new(standard_deltas(&components));
    GreedyConstructor::new()
        .with_fallback_resource(config.construction.fallback_resource)
        .run(&mut state);

    let tester = MoveTester::new(&manager, &explorer);
    let mut report = tester.check_state(&state);
    let mut rng = StdRng::seed_from_u64(config.random_seed.unwrap_or(0));
    let walk = tester.random_walk(&mut state, CHECK_WALK_STEPS, &mut rng);
    report.merge(walk);
    report
}

/// Assignment dump followed by the `Cost:` and `Time:` lines.
pub fn render(assignment: &Assignment<'_>, cost: HardSoftCost, elapsed: Duration) -> String {
    format!(
        "{}Cost: {}\nTime: {:.3}s\n",
        assignment,
        cost.total(),
        elapsed.as_secs_f64()
    )
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn emit(output_file: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output_file {
        Some(path) => fs::write(path, text).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
