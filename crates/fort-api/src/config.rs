//! # Service Configuration
//!
//! Built once from environment variables at startup and validated eagerly:
//! a bad value stops the process before it binds a port.
//!
//! | Variable            | Default                                          |
//! |---------------------|--------------------------------------------------|
//! | `AGG_SK_BASE64`     | required                                         |
//! | `MODEL_PATH`        | `model/global_model.json`                        |
//! | `DATA_DIR`          | `data`                                           |
//! | `LEDGER_PATTERN`    | `client_*.csv`                                   |
//! | `WINDOW_DAYS`       | `90`                                             |
//! | `VERIFY_MODEL_HASH` | `false`                                          |
//! | `CORS_ORIGINS`      | `http://localhost:5173,http://127.0.0.1:5173`    |
//! | `PORT`              | `8000`                                           |
//!
//! Only the process environment is read; a `.env` file is not loaded. Export
//! it before starting (`set -a; . ./.env; set +a`) or have the supervisor
//! inject the variables.

use std::path::PathBuf;

use axum::http::HeaderValue;
use fort_scoring::DEFAULT_WINDOW_DAYS;

pub const DEFAULT_MODEL_PATH: &str = "model/global_model.json";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LEDGER_PATTERN: &str = "client_*.csv";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
pub const DEFAULT_PORT: u16 = 8000;

/// Validated service configuration.
///
/// Custom `Debug` redacts the signing seed.
#[derive(Clone)]
pub struct AppConfig {
    /// Base64 Ed25519 seed of the aggregator key.
    pub signing_seed_b64: String,
    pub model_path: PathBuf,
    pub data_dir: PathBuf,
    /// Filename glob selecting candidate ledgers in `data_dir`.
    pub ledger_pattern: glob::Pattern,
    pub window_days: usize,
    /// Reject a declared model hash that does not match the weights.
    pub verify_model_hash: bool,
    pub cors_origins: Vec<HeaderValue>,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("signing_seed_b64", &"[REDACTED]")
            .field("model_path", &self.model_path)
            .field("data_dir", &self.data_dir)
            .field("ledger_pattern", &self.ledger_pattern.as_str())
            .field("window_days", &self.window_days)
            .field("verify_model_hash", &self.verify_model_hash)
            .field("cors_origins", &self.cors_origins)
            .field("port", &self.port)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("AGG_SK_BASE64 environment variable is required")]
    MissingSigningKey,
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl From<ConfigError> for fort_core::FortError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let signing_seed_b64 = get("AGG_SK_BASE64").ok_or(ConfigError::MissingSigningKey)?;

        let ledger_pattern = get("LEDGER_PATTERN")
            .unwrap_or_else(|| DEFAULT_LEDGER_PATTERN.to_string());
        let ledger_pattern =
            glob::Pattern::new(&ledger_pattern).map_err(|e| ConfigError::Invalid {
                var: "LEDGER_PATTERN",
                reason: e.to_string(),
            })?;

        let window_days = match get("WINDOW_DAYS") {
            None => DEFAULT_WINDOW_DAYS,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "WINDOW_DAYS",
                    reason: format!("expected a positive integer, got {raw:?}"),
                })?,
        };

        let verify_model_hash = match get("VERIFY_MODEL_HASH") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                var: "VERIFY_MODEL_HASH",
                reason: format!("expected true/false, got {raw:?}"),
            })?,
        };

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    reason: format!("{origin:?}: {e}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("expected a port number, got {raw:?}"),
            })?,
        };

        Ok(Self {
            signing_seed_b64,
            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            data_dir: get("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ledger_pattern,
            window_days,
            verify_model_hash,
            cors_origins,
            port,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
