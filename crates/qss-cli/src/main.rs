//! QSS Command-Line Interface
//!
//! Builds, simulates and decodes quantum subset-sum circuits.
//!
//! ```text
//! qss solve   --values 5,7,8,9,1 --target 16
//! qss circuit --values 5,7,8,9,1 --target 16
//! qss counts  --values 5,2,1 --target 3 --seed 7
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{circuit, counts, solve, version};

/// QSS - quantum subset-sum solver
#[derive(Parser)]
#[command(name = "qss")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// The problem instance shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ProblemArgs {
    /// Comma-separated input values
    #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Vec<i64>,

    /// Target sum
    #[arg(long, allow_hyphen_values = true)]
    pub target: i64,
}

/// Output format for results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an instance on the statevector simulator
    Solve {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Number of shots
        #[arg(short, long, env = "QSS_SHOTS")]
        shots: Option<u32>,

        /// Sampling seed
        #[arg(long, env = "QSS_SEED")]
        seed: Option<u64>,

        /// Amplification rounds (default floor(sqrt(2^n)))
        #[arg(long)]
        iterations: Option<usize>,

        /// Keep scanning past the first non-solution
        #[arg(long)]
        exhaustive: bool,

        /// Drop candidates below this probability
        #[arg(long)]
        min_probability: Option<f64>,

        /// Skip the sum-register range check on the target
        #[arg(long)]
        no_range_check: bool,

        /// Solver configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Compare against a classical brute-force search
        #[arg(long)]
        verify: bool,
    },

    /// Show the register layout and gate counts of the circuit
    Circuit {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Amplification rounds (default floor(sqrt(2^n)))
        #[arg(long)]
        iterations: Option<usize>,

        /// Skip the sum-register range check on the target
        #[arg(long)]
        no_range_check: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print raw measurement counts as JSON
    Counts {
        #[command(flatten)]
        problem: ProblemArgs,

        /// Number of shots
        #[arg(short, long, default_value = "1024", env = "QSS_SHOTS")]
        shots: u32,

        /// Sampling seed
        #[arg(long, env = "QSS_SEED")]
        seed: Option<u64>,

        /// Amplification rounds (default floor(sqrt(2^n)))
        #[arg(long)]
        iterations: Option<usize>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Solve {
            problem,
            shots,
            seed,
            iterations,
            exhaustive,
            min_probability,
            no_range_check,
            config,
            format,
            verify,
        } => {
            let overrides = solve::Overrides {
                shots,
                iterations,
                exhaustive,
                min_probability,
                no_range_check,
            };
            solve::execute(&problem, config.as_deref(), overrides, seed, format, verify).await
        }

        Commands::Circuit {
            problem,
            iterations,
            no_range_check,
            format,
        } => circuit::execute(&problem, iterations, no_range_check, format),

        Commands::Counts {
            problem,
            shots,
            seed,
            iterations,
        } => counts::execute(&problem, shots, seed, iterations).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
