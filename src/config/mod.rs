//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → config file (TOML, optional)   loader.rs
//!     → command-line flags             loader.rs (clap)
//!     → $PORT                          loader.rs
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → passed by reference to the bootstrap
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved
//! - All fields have defaults to allow minimal configs
//! - The relay handler never reads the config; it only receives what it needs

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{CliArgs, ConfigError};
pub use schema::RelayConfig;
pub use schema::{DiagnosticsConfig, ListenerConfig, LoggingConfig, UpstreamConfig};
