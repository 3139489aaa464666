use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Main configuration structure for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver the raw queries are forwarded to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_dns_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_address")]
    pub address: String,

    #[serde(default = "default_dns_port")]
    pub port: u16,

    /// Bounded wait for the upstream's single reply, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_upstream_address(),
            port: default_dns_port(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dns-relay.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dns-relay.toml").exists() {
            Self::from_file("dns-relay.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(upstream) = overrides.upstream {
            match upstream.rsplit_once(':') {
                Some((host, port_str)) if port_str.parse::<u16>().is_ok() => {
                    self.upstream.address = host.to_string();
                    self.upstream.port = port_str.parse().unwrap_or(53);
                }
                _ => self.upstream.address = upstream,
            }
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.upstream.timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }
        self.upstream_addr().map(|_| ())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn upstream_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.upstream.address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid upstream address '{}'",
                self.upstream.address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.upstream.port))
    }
}

/// Command-line overrides for configuration.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream: Option<String>,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_upstream_address() -> String {
    "114.114.114.114".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}
