//! optbook Pricer Server
//!
//! REST API for closed-form option prices and Greeks.

use anyhow::Context;
use clap::Parser;
use pricer_server::config::{build_config, CliArgs as ConfigCliArgs};
use pricer_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// optbook Pricer Server - REST API for option pricing functions
#[derive(Parser, Debug)]
#[command(name = "pricer_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE", env = "PRICER_CONFIG")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRICER_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRICER_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRICER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Option type policy (strict, legacy)
    #[arg(long, env = "PRICER_OPTION_TYPE_POLICY")]
    option_type_policy: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            option_type_policy: args.option_type_policy,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args).context("invalid server configuration")?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!("optbook Pricer Server v{}", pricer_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        option_type_policy = %config.option_type_policy,
        max_batch_size = config.max_batch_size,
        parallel_threshold = config.parallel_threshold,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    let addr = server.config().socket_addr();
    tracing::info!(address = %addr, "Starting server");

    server
        .run()
        .await
        .with_context(|| format!("server on {} failed", addr))?;

    Ok(())
}
