//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `GRADER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_EMBED_TIMEOUT_MS, DEFAULT_MODEL_CACHE_CAPACITY, DEFAULT_MODEL_ID};
use crate::scoring::ScoringConfig;
use crate::similarity::SimilarityMethod;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GRADER_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding one subdirectory per embedding model checkpoint.
    ///
    /// When unset, embedding methods run on stub embeddings.
    pub model_root: Option<PathBuf>,

    /// Model id used when a request names none. Default: `all-MiniLM-L6-v2`.
    pub default_model: String,

    /// Similarity method used when a request names none. Default: `cosine`.
    pub default_method: SimilarityMethod,

    /// Per-request grading deadline in milliseconds. Default: `5000`.
    pub embed_timeout_ms: u64,

    /// Max loaded embedding models kept in memory. Default: `8`.
    pub model_cache_capacity: u64,

    /// Scoring knobs (`GRADER_PENALTY_WEIGHT` and friends).
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_root: None,
            default_model: DEFAULT_MODEL_ID.to_string(),
            default_method: SimilarityMethod::default(),
            embed_timeout_ms: DEFAULT_EMBED_TIMEOUT_MS,
            model_cache_capacity: DEFAULT_MODEL_CACHE_CAPACITY,
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GRADER_PORT";
    const ENV_BIND_ADDR: &'static str = "GRADER_BIND_ADDR";
    const ENV_MODEL_ROOT: &'static str = "GRADER_MODEL_ROOT";
    const ENV_MODEL: &'static str = "GRADER_MODEL";
    const ENV_METHOD: &'static str = "GRADER_METHOD";
    const ENV_EMBED_TIMEOUT_MS: &'static str = "GRADER_EMBED_TIMEOUT_MS";
    const ENV_MODEL_CACHE_CAPACITY: &'static str = "GRADER_MODEL_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_root = Self::parse_optional_path_from_env(Self::ENV_MODEL_ROOT);
        let default_model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.default_model);
        let default_method = Self::parse_method_from_env(defaults.default_method)?;
        let embed_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_EMBED_TIMEOUT_MS, defaults.embed_timeout_ms)?;
        let model_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_MODEL_CACHE_CAPACITY,
            defaults.model_cache_capacity,
        )?;
        let scoring = ScoringConfig::from_env()?;

        Ok(Self {
            port,
            bind_addr,
            model_root,
            default_model,
            default_method,
            embed_timeout_ms,
            model_cache_capacity,
            scoring,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_root {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::EmptyModelId);
        }

        if self.embed_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBED_TIMEOUT_MS,
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.model_cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MODEL_CACHE_CAPACITY,
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        self.scoring.validate()?;
        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Grading deadline as a [`Duration`].
    pub fn embed_timeout(&self) -> Duration {
        Duration::from_millis(self.embed_timeout_ms)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_method_from_env(default: SimilarityMethod) -> Result<SimilarityMethod, ConfigError> {
        match env::var(Self::ENV_METHOD) {
            Ok(value) if !value.trim().is_empty() => {
                let parsed = value.parse::<SimilarityMethod>();
                parsed.map_err(|e| ConfigError::InvalidValue {
                    name: Self::ENV_METHOD,
                    reason: e.to_string(),
                    value,
                })
            }
            _ => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => {
                let parsed = value.trim().parse::<u64>();
                parsed.map_err(|e| ConfigError::InvalidValue {
                    name: var_name,
                    reason: e.to_string(),
                    value,
                })
            }
            _ => Ok(default),
        }
    }
}
