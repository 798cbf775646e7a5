//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TAHADU_API_BASE_URL` - Base path of the remote order service
//!   (default: the production service)
//! - `TAHADU_DATA_DIR` - Directory for the persistent cache
//!   (default: `.tahadu`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::api::DEFAULT_BASE_URL;

/// Default cache directory, relative to the working directory.
const DEFAULT_DATA_DIR: &str = ".tahadu";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base path of the remote order service
    pub api_base_url: String,
    /// Directory holding the persistent cache files
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from the environment, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but empty or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = match env::var("TAHADU_API_BASE_URL") {
            Ok(url) if url.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "TAHADU_API_BASE_URL".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(url) => url,
            Err(_) => DEFAULT_BASE_URL.to_owned(),
        };

        let data_dir = match env::var("TAHADU_DATA_DIR") {
            Ok(dir) if dir.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "TAHADU_DATA_DIR".to_owned(),
                    "must not be empty".to_owned(),
                ));
            }
            Ok(dir) => PathBuf::from(dir),
            Err(_) => PathBuf::from(DEFAULT_DATA_DIR),
        };

        Ok(Self {
            api_base_url,
            data_dir,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_owned(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}
