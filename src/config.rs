//! Configuration management for the UpStac workflow server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured via `dotenvy`, which does not write to stdout (MCP uses
//! stdout for communication).

use crate::error::{ConfigError, ConfigResult};
use crate::models::{Role, User};
use std::env;
use std::path::PathBuf;

/// Configuration for the UpStac workflow server.
#[derive(Debug, Clone)]
pub struct Config {
    /// ID of the user the server acts as
    pub user_id: i64,

    /// Name of the user the server acts as
    pub user_name: String,

    /// Role of the user the server acts as
    pub user_role: Role,

    /// Optional JSON file of test requests to preload
    pub seed_file: Option<PathBuf>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `UPSTAC_USER_ID`: numeric ID of the acting user
    /// - `UPSTAC_USER_NAME`: name of the acting user
    /// - `UPSTAC_USER_ROLE`: `tester` or `doctor`
    ///
    /// Optional environment variables:
    /// - `UPSTAC_SEED_FILE`: path to a JSON array of test requests
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let raw_id = Self::required("UPSTAC_USER_ID")?;
        let user_id = raw_id.trim().parse::<i64>().map_err(|_| ConfigError::InvalidValue {
            var: "UPSTAC_USER_ID".to_string(),
            reason: format!("Must be an integer, got: {}", raw_id),
        })?;

        let user_name = Self::required("UPSTAC_USER_NAME")?;
        if user_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "UPSTAC_USER_NAME".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let user_role = Self::required("UPSTAC_USER_ROLE")?
            .parse::<Role>()
            .map_err(|reason| ConfigError::InvalidValue {
                var: "UPSTAC_USER_ROLE".to_string(),
                reason,
            })?;

        let seed_file = env::var("UPSTAC_SEED_FILE")
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            user_id,
            user_name: user_name.trim().to_string(),
            user_role,
            seed_file,
            log_level,
        })
    }

    /// The user the server acts as.
    pub fn session_user(&self) -> User {
        User::new(self.user_id, self.user_name.clone(), self.user_role)
    }

    fn required(var_name: &str) -> ConfigResult<String> {
        env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_id: 1,
            user_name: "tester".to_string(),
            user_role: Role::Tester,
            seed_file: None,
            log_level: "error".to_string(),
        }
    }
}
