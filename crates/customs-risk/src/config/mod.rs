use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use crate::ruleset::{load_rules, RuleConfiguration, RulesError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the estimator service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub rules: RulesSettings,
}

impl AppConfig {
    /// Read `.env` (when present) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = AppEnvironment::parse(&read("APP_ENV", "development"));
        let host = read("APP_HOST", "127.0.0.1");
        let raw_port = read("APP_PORT", "3000");
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: raw_port })?;
        let log_level = read("APP_LOG_LEVEL", "info");
        let rules_path = lookup("RULES_PATH")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            rules: RulesSettings { path: rules_path },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Which rule table the process runs with.
#[derive(Debug, Clone, Default)]
pub struct RulesSettings {
    /// Alternate rule table on disk; the built-in table is used when absent.
    pub path: Option<PathBuf>,
}

impl RulesSettings {
    pub fn resolve(&self) -> Result<Arc<RuleConfiguration>, RulesError> {
        match &self.path {
            Some(path) => RuleConfiguration::from_path(path).map(Arc::new),
            None => load_rules().map(|rules| Arc::new(rules.clone())),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort { value: String },
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "APP_PORT must be a valid u16, found '{value}'")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
