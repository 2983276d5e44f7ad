//! Configuration loading from disk, command line and environment.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides the listening port.
pub const PORT_ENV: &str = "PORT";

/// Command-line flags for the relay binary.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cors-relay")]
#[command(about = "Relays requests to the URL embedded in the path, adding permissive CORS headers", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Server port (default 3228, overridden by $PORT)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Enable pretty (human-readable) log output
    #[arg(long = "pretty", visible_alias = "pp")]
    pub pretty: bool,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { name: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { name, value } => {
                write!(f, "Invalid value {:?} for ${}", value, name)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RelayConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration.
///
/// Precedence, lowest first: defaults, config file, flags, `$PORT`.
pub fn resolve_config(args: &CliArgs, env_port: Option<&str>) -> Result<RelayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(port) = args.port {
        config.listener.port = port;
    }
    if let Some(host) = &args.host {
        config.listener.host = host.clone();
    }
    if args.pretty {
        config.logging.pretty = true;
    }

    if let Some(raw) = env_port.map(str::trim).filter(|v| !v.is_empty()) {
        config.listener.port = raw.parse().map_err(|_| ConfigError::Env {
            name: PORT_ENV,
            value: raw.to_string(),
        })?;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve configuration from the real process arguments and environment.
pub fn from_env() -> Result<RelayConfig, ConfigError> {
    let args = CliArgs::parse();
    let env_port = std::env::var(PORT_ENV).ok();
    resolve_config(&args, env_port.as_deref())
}
