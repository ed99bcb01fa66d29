use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::agents::job_matching::{MatchWeights, MatchingConfig};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                include_targets: environment == AppEnvironment::Development,
            },
            engine: EngineConfig::from_env()?,
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
    pub include_targets: bool,
}

/// Dials for the scoring agents that operators tune per deployment.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub max_distance_miles: f64,
    pub minimum_match_score: f64,
    pub max_candidates: usize,
    pub lead_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let matching = MatchingConfig::default();
        Self {
            max_distance_miles: matching.max_distance_miles,
            minimum_match_score: matching.minimum_match_score,
            max_candidates: matching.max_candidates,
            lead_seed: None,
        }
    }
}

impl EngineConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_distance_miles = match env::var("TREEHUB_MAX_DISTANCE_MILES") {
            Ok(raw) => parse_positive(&raw, "TREEHUB_MAX_DISTANCE_MILES")?,
            Err(_) => defaults.max_distance_miles,
        };
        let minimum_match_score = match env::var("TREEHUB_MIN_MATCH_SCORE") {
            Ok(raw) => {
                let value = raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidValue {
                    key: "TREEHUB_MIN_MATCH_SCORE",
                    value: raw.clone(),
                })?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(ConfigError::InvalidValue {
                        key: "TREEHUB_MIN_MATCH_SCORE",
                        value: raw,
                    });
                }
                value
            }
            Err(_) => defaults.minimum_match_score,
        };
        let max_candidates = match env::var("TREEHUB_MAX_CANDIDATES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "TREEHUB_MAX_CANDIDATES",
                    value: raw,
                })?,
            Err(_) => defaults.max_candidates,
        };
        let lead_seed = match env::var("TREEHUB_LEAD_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "TREEHUB_LEAD_SEED",
                    value: raw.clone(),
                }
            })?),
            Err(_) => None,
        };

        Ok(Self {
            max_distance_miles,
            minimum_match_score,
            max_candidates,
            lead_seed,
        })
    }

    /// Matching configuration using the default factor weights.
    pub fn matching(&self) -> MatchingConfig {
        MatchingConfig {
            weights: MatchWeights::default(),
            max_distance_miles: self.max_distance_miles,
            minimum_match_score: self.minimum_match_score,
            max_candidates: self.max_candidates,
        }
    }
}

fn parse_positive(raw: &str, key: &'static str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "{key} has an unusable value '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
