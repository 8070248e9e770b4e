//! Server configuration management
//!
//! Handles loading configuration from environment variables, TOML files, and CLI arguments.

use pricer_models::batch::{BatchConfig, DEFAULT_PARALLEL_THRESHOLD};
use pricer_models::functions::OptionTypePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port outside 1..=65535
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    /// Unrecognised log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unrecognised option type policy
    #[error("Invalid option type policy: {0}. Must be one of: strict, legacy")]
    InvalidPolicy(String),

    /// Batch limit of zero
    #[error("Invalid max batch size: {0}. Must be at least 1")]
    InvalidBatchSize(usize),

    /// Unreadable or malformed TOML file
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-call evaluation events
    Trace,
    /// Per-call evaluation events
    Debug,
    /// Lifecycle events
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
    /// Strict validation or legacy workbook quirks
    #[serde(deserialize_with = "deserialize_policy")]
    pub option_type_policy: OptionTypePolicy,
    /// Largest accepted `/api/v1/batch` request
    pub max_batch_size: usize,
    /// Batches at least this long are evaluated in parallel
    pub parallel_threshold: usize,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_policy<'de, D>(deserializer: D) -> Result<OptionTypePolicy, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_policy(&s).map_err(serde::de::Error::custom)
}

fn parse_policy(s: &str) -> Result<OptionTypePolicy, ConfigError> {
    OptionTypePolicy::from_str(s).map_err(|_| ConfigError::InvalidPolicy(s.to_string()))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            shutdown_timeout_secs: 30,
            option_type_policy: OptionTypePolicy::Strict,
            max_batch_size: 10_000,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

fn env_number<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{} is not a valid number: {}", name, value)))
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields whose `PRICER_*` variable is set.
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("PRICER_SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PRICER_SERVER_PORT") {
            self.port = env_number("PRICER_SERVER_PORT", &port)?;
        }
        if let Ok(log_level) = std::env::var("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Ok(timeout) = std::env::var("PRICER_SHUTDOWN_TIMEOUT_SECS") {
            self.shutdown_timeout_secs = env_number("PRICER_SHUTDOWN_TIMEOUT_SECS", &timeout)?;
        }
        if let Ok(policy) = std::env::var("PRICER_OPTION_TYPE_POLICY") {
            self.option_type_policy = parse_policy(&policy)?;
        }
        if let Ok(size) = std::env::var("PRICER_MAX_BATCH_SIZE") {
            self.max_batch_size = env_number("PRICER_MAX_BATCH_SIZE", &size)?;
        }
        if let Ok(threshold) = std::env::var("PRICER_PARALLEL_THRESHOLD") {
            self.parallel_threshold = env_number("PRICER_PARALLEL_THRESHOLD", &threshold)?;
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.max_batch_size));
        }

        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Batch settings derived from this configuration
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            parallel_threshold: self.parallel_threshold,
        }
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        if let Some(policy) = &cli.option_type_policy {
            self.option_type_policy = parse_policy(policy)?;
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Option type policy override
    pub option_type_policy: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    config.apply_env()?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching PRICER_* variables must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 7] = [
        "PRICER_SERVER_HOST",
        "PRICER_SERVER_PORT",
        "PRICER_LOG_LEVEL",
        "PRICER_SHUTDOWN_TIMEOUT_SECS",
        "PRICER_OPTION_TYPE_POLICY",
        "PRICER_MAX_BATCH_SIZE",
        "PRICER_PARALLEL_THRESHOLD",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.option_type_policy, OptionTypePolicy::Strict);
        assert_eq!(config.max_batch_size, 10_000);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPort(0))));

        config.port = 65535;
        assert!(config.validate().is_ok());

        config.max_batch_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = ServerConfig::default();
        let cli = CliArgs {
            host: Some("192.168.1.1".to_string()),
            port: Some(9000),
            log_level: Some("debug".to_string()),
            option_type_policy: Some("Legacy".to_string()),
            config_file: None,
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.host, "192.168.1.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.option_type_policy, OptionTypePolicy::Legacy);
    }

    #[test]
    fn test_cli_args_reject_bad_values() {
        let mut config = ServerConfig::default();
        let cli = CliArgs {
            option_type_policy: Some("lenient".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.merge_with_cli(&cli),
            Err(ConfigError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            host = "127.0.0.1"
            port = 3000
            log_level = "debug"
            shutdown_timeout_secs = 60
            option_type_policy = "legacy"
            max_batch_size = 500
            parallel_threshold = 8
        "#;

        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.shutdown_timeout_secs, 60);
        assert_eq!(config.option_type_policy, OptionTypePolicy::Legacy);
        assert_eq!(config.max_batch_size, 500);
        assert_eq!(config.batch_config().parallel_threshold, 8);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: ServerConfig = toml::from_str("port = 9000").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.option_type_policy, OptionTypePolicy::Strict);
    }

    #[test]
    fn test_toml_rejects_unknown_policy() {
        assert!(toml::from_str::<ServerConfig>(r#"option_type_policy = "loose""#).is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("optbook-config-{}.toml", std::process::id()));
        std::fs::write(&path, "port = 7070\nmax_batch_size = 32\n").unwrap();
        let config = ServerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.port, 7070);
        assert_eq!(config.max_batch_size, 32);

        let missing = ServerConfig::from_file(Path::new("/nonexistent/optbook.toml"));
        assert!(matches!(missing, Err(ConfigError::FileError(_))));
    }

    #[test]
    fn test_build_config_with_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = build_config(&CliArgs::default()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_build_config_precedence() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var("PRICER_SERVER_PORT", "7000");
        std::env::set_var("PRICER_OPTION_TYPE_POLICY", "legacy");
        std::env::set_var("PRICER_PARALLEL_THRESHOLD", "16");

        let cli = CliArgs {
            port: Some(7001),
            ..Default::default()
        };
        let config = build_config(&cli).unwrap();
        clear_env();

        assert_eq!(config.port, 7001);
        assert_eq!(config.option_type_policy, OptionTypePolicy::Legacy);
        assert_eq!(config.parallel_threshold, 16);
    }

    #[test]
    fn test_build_config_rejects_malformed_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        std::env::set_var("PRICER_MAX_BATCH_SIZE", "lots");

        let result = build_config(&CliArgs::default());
        clear_env();

        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    }

    #[test]
    fn test_config_error_display() {
        assert!(ConfigError::InvalidPort(0).to_string().contains("Invalid port"));
        assert!(ConfigError::InvalidLogLevel("bad".into())
            .to_string()
            .contains("Invalid log level"));
        assert!(ConfigError::InvalidPolicy("bad".into())
            .to_string()
            .contains("strict, legacy"));
    }
}
