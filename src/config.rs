//! Runtime configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const BASE_URL_VAR: &str = "SAP_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "SAP_API_TIMEOUT_SECS";
pub const INPUT_PATH_VAR: &str = "SAP_API_INPUT_PATH";

pub const DEFAULT_BASE_URL: &str = "https://sandbox.api.sap.com/s4hanacloud/sap/opu/odata/sap";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_INPUT_PATH: &str = "./Inputs/SDC_Purchase_Requisition_Header_sample.json";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("SAP_API_BASE_URL must not be empty")]
    EmptyBaseUrl,

    #[error("SAP_API_BASE_URL is not an absolute URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("SAP_API_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without a trailing slash; the service name is appended to it.
    pub base_url: String,
    pub timeout: Duration,
    pub input_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from `lookup`, falling back to the defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let input_path = lookup(INPUT_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));

        Ok(Self {
            base_url,
            timeout,
            input_path,
        })
    }

    /// Replaces the input path, e.g. with a command-line argument.
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }
}
