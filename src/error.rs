//! Error types for agent construction

use std::fmt;

/// Result type alias for configuration validation
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while validating an agent's configuration
///
/// Validation happens once, at agent construction, before any network
/// call. A failing agent never starts polling.
#[derive(Debug)]
pub enum ConfigError {
    /// A required identity or credential field is missing or empty
    MissingField {
        agent: String,
        field: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField { agent, field } => {
                write!(
                    f,
                    "agent {agent:?}: required field `{field}` is missing or empty"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
