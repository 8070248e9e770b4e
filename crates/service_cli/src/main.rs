//! optbook - closed-form option pricing functions from the command line
//!
//! # Commands
//!
//! - `optbook eval <function> [args...]` - Evaluate one function, e.g.
//!   `optbook eval bsm_delta 100 95 0.5 0.03 0 0.25 put`
//! - `optbook functions` - List the registered functions and their signatures
//! - `optbook batch --input <file>` - Evaluate one function call per CSV row
//!
//! Results go to stdout and logs to stderr, so output can be piped.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricer_models::batch::{BatchConfig, BatchEvaluator, DEFAULT_PARALLEL_THRESHOLD};
use pricer_models::functions::{FunctionRegistry, OptionTypePolicy};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

use commands::OutputFormat;
pub use error::{CliError, Result};

/// Closed-form BSM and Black-76 pricing functions
#[derive(Parser)]
#[command(name = "optbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Treat unrecognised option types the way the workbook add-in did
    #[arg(long, global = true)]
    legacy: bool,

    /// Batch size from which rows are evaluated in parallel
    #[arg(long, global = true, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single function
    Eval {
        /// Function name, e.g. bsm, bsm_vega, black76_rho
        function: String,

        /// Positional arguments or name=value pairs; `_` takes the default
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// List the available functions
    Functions {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Evaluate a CSV file of function calls
    Batch {
        /// Headerless CSV, one `function,arg1,arg2,...` call per row
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.parallel_threshold == 0 {
        return Err(CliError::InvalidArgument(
            "--parallel-threshold must be at least 1".to_string(),
        ));
    }

    let policy = if cli.legacy {
        OptionTypePolicy::Legacy
    } else {
        OptionTypePolicy::Strict
    };
    let registry = FunctionRegistry::new(policy);
    debug!(policy = %policy, "registry ready");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Eval { function, args } => {
            commands::eval::run(&registry, &function, &args, &mut out)?
        }
        Commands::Functions { format } => commands::functions::run(&registry, format, &mut out)?,
        Commands::Batch { input, format } => {
            let evaluator = BatchEvaluator::new(
                registry,
                BatchConfig {
                    parallel_threshold: cli.parallel_threshold,
                },
            );
            commands::batch::run(&evaluator, &input, format, &mut out)?
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
