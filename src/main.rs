//! Crash signals - main entry point
//!
//! This binary provides four subcommands:
//! - signal: Estimate the exceedance probability and print the market signal
//! - probability: Print simulated and analytic exceedance probabilities
//! - volatility: Print the volatility of the history
//! - classify: Classify a probability percentage

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "crash-signals")]
#[command(about = "Exceedance probabilities and market signals for crash-style multipliers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to a file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

/// Simulation overrides shared by the estimating subcommands
#[derive(Args, Debug, Clone)]
pub struct SimulationArgs {
    /// Path to a JSON simulation config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of Monte Carlo trials
    #[arg(long)]
    pub trials: Option<usize>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Where the multiplier history comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// CSV file with one multiplier per row
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Inline comma-separated multipliers. E.g., "1.2,3.4,2.0"
    #[arg(long)]
    pub values: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate the probability of reaching a target and print the signal
    Signal {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        sim: SimulationArgs,

        /// Target multiplier
        #[arg(short, long, default_value = "2.0", allow_negative_numbers = true)]
        target: f64,

        /// Print the signal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print simulated and analytic exceedance probabilities
    Probability {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        sim: SimulationArgs,

        /// Target multiplier
        #[arg(short, long, default_value = "2.0", allow_negative_numbers = true)]
        target: f64,
    },

    /// Print the volatility (sample standard deviation) of the history
    Volatility {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Classify a probability percentage into a market regime
    Classify {
        /// Probability in percent. E.g., 45.5
        #[arg(short, long, allow_negative_numbers = true)]
        probability: f64,
    },
}

fn setup_logging(verbose: bool, command_name: &str, log_dir: Option<&PathBuf>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console goes to stderr so command output on stdout stays clean
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(true);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        return Ok(());
    };

    std::fs::create_dir_all(dir)?;

    // Log file naming pattern: {command}_{date}.log
    let log_filename = format!(
        "{}_{}.log",
        command_name,
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let file_appender = tracing_appender::rolling::never(dir, &log_filename);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!("Log file: {}", dir.join(&log_filename).display());
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let command_name = match &cli.command {
        Commands::Signal { .. } => "signal",
        Commands::Probability { .. } => "probability",
        Commands::Volatility { .. } => "volatility",
        Commands::Classify { .. } => "classify",
    };

    setup_logging(cli.verbose, command_name, cli.log_dir.as_ref())?;

    match cli.command {
        Commands::Signal {
            input,
            sim,
            target,
            json,
        } => commands::signal::run(input, sim, target, json),

        Commands::Probability { input, sim, target } => {
            commands::probability::run(input, sim, target)
        }

        Commands::Volatility { input } => commands::volatility::run(input),

        Commands::Classify { probability } => commands::classify::run(probability),
    }
}
