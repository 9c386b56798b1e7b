//! Server configuration.

use std::net::SocketAddr;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Directory holding the network tables.
pub const DATA_DIR_VAR: &str = "FARES_DATA_DIR";
/// Address the HTTP server listens on.
pub const BIND_ADDR_VAR: &str = "FARES_BIND_ADDR";
/// Cap on the number of names a suggestion request returns.
pub const MAX_SUGGESTIONS_VAR: &str = "FARES_MAX_SUGGESTIONS";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_MAX_SUGGESTIONS: usize = 50;

/// Suggested when the section search box is empty.
const MAIN_TOWNS: [&str; 10] = [
    "Colombo",
    "Kandy",
    "Galle",
    "Jaffna",
    "Anuradhapura",
    "Kurunegala",
    "Badulla",
    "Trincomalee",
    "Matara",
    "Batticaloa",
];

/// Errors reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value:?}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("{var} is not a number: {value:?}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Configuration for the fare server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory containing the JSON tables
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Upper bound for `limit` on suggestion endpoints
    pub max_suggestions: usize,
    /// Section names offered for an empty query
    pub default_suggestions: Vec<String>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_addr =
                value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidAddr {
                        var: BIND_ADDR_VAR,
                        value: value.clone(),
                        source,
                    })?;
        }

        if let Some(value) = lookup(MAX_SUGGESTIONS_VAR) {
            let max: usize =
                value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidNumber {
                        var: MAX_SUGGESTIONS_VAR,
                        value: value.clone(),
                        source,
                    })?;
            if max == 0 {
                return Err(ConfigError::Zero {
                    var: MAX_SUGGESTIONS_VAR,
                });
            }
            config.max_suggestions = max;
        }

        Ok(config)
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the suggestion cap.
    pub fn with_max_suggestions(mut self, n: usize) -> Self {
        self.max_suggestions = n;
        self
    }

    /// Replace the names offered for an empty query.
    pub fn with_default_suggestions<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.default_suggestions = names.into_iter().map(Into::into).collect();
        self
    }

    /// Clamp a requested suggestion count to `1..=max_suggestions`.
    pub fn suggestion_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.max_suggestions)
            .clamp(1, self.max_suggestions.max(1))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            default_suggestions: MAIN_TOWNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
