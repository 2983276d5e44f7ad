//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3228;

/// Default prefix reserved for the diagnostics endpoints.
pub const DEFAULT_DIAGNOSTICS_PREFIX: &str = "/debug/";

/// Root configuration for the relay process.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Log sink settings.
    pub logging: LoggingConfig,

    /// Diagnostics endpoint settings.
    pub diagnostics: DiagnosticsConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// Socket address string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Log sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Human-readable output instead of JSON lines.
    pub pretty: bool,

    /// Fallback filter directive when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            filter: "cors_relay=info,tower_http=info".to_string(),
        }
    }
}

/// Diagnostics endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Serve diagnostics under `prefix`. When off, those paths are relayed.
    pub enabled: bool,

    /// Reserved path prefix, with leading and trailing slash.
    pub prefix: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefix: DEFAULT_DIAGNOSTICS_PREFIX.to_string(),
        }
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User-Agent sent when the caller supplied none.
    pub user_agent: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.listener.port, 3228);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3228");
        assert!(!config.logging.pretty);
        assert!(config.diagnostics.enabled);
        assert_eq!(config.diagnostics.prefix, "/debug/");
        assert!(config.upstream.user_agent.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [listener]
            port = 9000

            [logging]
            pretty = true
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert!(config.logging.pretty);
        assert_eq!(config.diagnostics, DiagnosticsConfig::default());
    }
}
