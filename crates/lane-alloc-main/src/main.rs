// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use clap::{Args, Parser, Subcommand};
use lane_alloc_core::length::Length;
use lane_alloc_model::prelude::*;
use lane_alloc_solver::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    name = "lane-alloc",
    about = "Online lane allocation heuristics for ferry decks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allocate the vehicles of an instance file and print the lanes.
    Solve(SolveArgs),
    /// Write a synthetic instance file.
    Generate(GenerateArgs),
    /// Compare heuristics over repeated random trials.
    Experiment(ExperimentArgs),
    /// Mean overflow as a function of the chunk size.
    SweepChunks(SweepChunksArgs),
    /// Mean overflow as a function of the lane count on a fixed deck.
    SweepLanes(SweepLanesArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Instance file: capacity, lane count, then one length per line.
    instance: PathBuf,
    #[arg(short, long, default_value = "first-fit")]
    policy: Policy,
    /// Sort consecutive chunks of this many vehicles before placing them.
    #[arg(short = 'k', long, conflicts_with = "greedy")]
    chunk_size: Option<usize>,
    /// Sort every vehicle up front and fill the lanes one by one.
    #[arg(long)]
    greedy: bool,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Drop zero-length entries instead of rejecting the file.
    #[arg(long)]
    skip_zero_length: bool,
    /// Also write the allocation as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(short, long)]
    output: PathBuf,
    #[arg(long, default_value_t = 3000)]
    capacity: usize,
    #[arg(long, default_value_t = 85)]
    lanes: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Vehicle mix as JSON; defaults to the ferry mix.
    #[arg(long)]
    mix: Option<PathBuf>,
}

#[derive(Args)]
struct ExperimentArgs {
    /// Experiment configuration as JSON; missing fields take defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long, default_value = "experiment_report.json")]
    output: PathBuf,
}

#[derive(Args)]
struct SweepChunksArgs {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    max_chunk_size: Option<usize>,
    #[arg(short, long, default_value = "chunk_sweep.json")]
    output: PathBuf,
}

#[derive(Args)]
struct SweepLanesArgs {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long)]
    max_lanes: Option<usize>,
    #[arg(short, long, default_value = "lane_sweep.json")]
    output: PathBuf,
}

#[derive(Debug)]
enum CliError {
    Io(PathBuf, std::io::Error),
    Json(PathBuf, serde_json::Error),
    Loader(PathBuf, InstanceLoaderError),
    Configuration(InvalidConfigurationError),
    VehicleMix(VehicleMixError),
    Allocation(AllocationError),
    Experiment(ExperimentError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(p, e) => write!(f, "{}: {e}", p.display()),
            CliError::Json(p, e) => write!(f, "{}: {e}", p.display()),
            CliError::Loader(p, e) => write!(f, "{}: {e}", p.display()),
            CliError::Configuration(e) => write!(f, "{e}"),
            CliError::VehicleMix(e) => write!(f, "{e}"),
            CliError::Allocation(e) => write!(f, "{e}"),
            CliError::Experiment(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<InvalidConfigurationError> for CliError {
    fn from(e: InvalidConfigurationError) -> Self {
        CliError::Configuration(e)
    }
}

impl From<VehicleMixError> for CliError {
    fn from(e: VehicleMixError) -> Self {
        CliError::VehicleMix(e)
    }
}

impl From<AllocationError> for CliError {
    fn from(e: AllocationError) -> Self {
        CliError::Allocation(e)
    }
}

impl From<ExperimentError> for CliError {
    fn from(e: ExperimentError) -> Self {
        CliError::Experiment(e)
    }
}

fn read_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, CliError> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let file = File::open(path).map_err(|e| CliError::Io(path.to_path_buf(), e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::Json(path.to_path_buf(), e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| CliError::Io(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| CliError::Json(path.to_path_buf(), e))?;
    writer
        .flush()
        .map_err(|e| CliError::Io(path.to_path_buf(), e))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn print_allocation(allocation: &Allocation) {
    let lanes = allocation.lanes();
    let capacity = lanes.capacity().value();
    println!();
    for (lane, content) in lanes.iter() {
        let lengths: Vec<String> = content
            .vehicles()
            .iter()
            .map(|l| l.value().to_string())
            .collect();
        println!(
            "Lane {:>4} | {:>6} / {capacity} | {}",
            lane.value(),
            content.occupied().value(),
            lengths.join(" ")
        );
    }
    let overflow = allocation.overflow();
    println!();
    println!(
        "Placed:   {} cm in {} vehicles",
        allocation.placed_total().value(),
        lanes.vehicle_count()
    );
    println!(
        "Overflow: {} cm in {} vehicles",
        overflow.total().value(),
        overflow.len()
    );
}

fn solve(args: SolveArgs) -> Result<(), CliError> {
    let instance = InstanceLoader::new()
        .skip_zero_length(args.skip_zero_length)
        .from_path(&args.instance)
        .map_err(|e| CliError::Loader(args.instance.clone(), e))?;
    info!(
        vehicles = instance.vehicle_count(),
        lanes = instance.num_lanes(),
        capacity = %instance.capacity(),
        "loaded instance"
    );

    let heuristic = match (args.greedy, args.chunk_size) {
        (true, _) => Heuristic::GreedyOffline,
        (false, Some(k)) => Heuristic::chunked(args.policy, k),
        (false, None) => Heuristic::online(args.policy),
    };
    let t0 = Instant::now();
    let allocation = HeuristicSolver::new(heuristic, args.seed).solve(&instance)?;
    info!(%heuristic, elapsed_us = t0.elapsed().as_micros() as u64, "solved");

    print_allocation(&allocation);
    if let Some(path) = &args.json {
        write_json(path, &allocation)?;
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<(), CliError> {
    let mix: VehicleMixConfig = read_json(args.mix.as_deref())?;
    let mut generator = VehicleGenerator::new(mix.with_seed(args.seed))?;
    let instance = generator.generate_instance(Length::new(args.capacity), args.lanes)?;

    let file = File::create(&args.output).map_err(|e| CliError::Io(args.output.clone(), e))?;
    let mut writer = BufWriter::new(file);
    instance
        .write_to(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| CliError::Io(args.output.clone(), e))?;
    info!(
        vehicles = instance.vehicle_count(),
        total = %instance.total_vehicle_length(),
        deck = %instance.deck_length(),
        "wrote {}",
        args.output.display()
    );
    Ok(())
}

fn experiment(args: ExperimentArgs) -> Result<(), CliError> {
    let mut config: ExperimentConfig = read_json(args.config.as_deref())?;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let report = Experiment::new(config)?.run()?;
    for s in &report.summaries {
        if let Some(stats) = s.stats {
            println!(
                "{:<24} mean {:>10.1}  sd {:>9.1}  median {:>8.1}  max {:>8.1}",
                s.label, stats.mean, stats.std_dev, stats.median, stats.max
            );
        }
    }
    if let Some(anova) = report.anova {
        println!(
            "ANOVA: F({}, {}) = {:.3}, p = {:.3e}",
            anova.df_between, anova.df_within, anova.f_statistic, anova.p_value
        );
    }
    if let Some(best) = report.best() {
        println!("Lowest mean overflow: {}", best.label);
    }
    write_json(&args.output, &report)
}

fn sweep_chunks(args: SweepChunksArgs) -> Result<(), CliError> {
    let mut config: ChunkSweepConfig = read_json(args.config.as_deref())?;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(k) = args.max_chunk_size {
        config.max_chunk_size = k;
    }
    let report = chunk_sweep(&config)?;
    print_trends(&report);
    write_json(&args.output, &report)
}

fn sweep_lanes(args: SweepLanesArgs) -> Result<(), CliError> {
    let mut config: LaneSweepConfig = read_json(args.config.as_deref())?;
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(n) = args.max_lanes {
        config.max_lanes = n;
    }
    let report = lane_sweep(&config)?;
    print_trends(&report);
    write_json(&args.output, &report)
}

fn print_trends(report: &SweepReport) {
    for s in &report.series {
        match s.trend {
            Some(t) => println!(
                "{:<20} spearman({}, overflow) = {:>7.4}, p = {:.3e}",
                s.label, report.parameter, t.rho, t.p_value
            ),
            None => println!("{:<20} no trend (constant overflow)", s.label),
        }
    }
}

fn main() -> ExitCode {
    enable_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve(args) => solve(args),
        Command::Generate(args) => generate(args),
        Command::Experiment(args) => experiment(args),
        Command::SweepChunks(args) => sweep_chunks(args),
        Command::SweepLanes(args) => sweep_lanes(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
