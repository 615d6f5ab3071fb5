use thiserror::Error;

/// Watchtower error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid simulator configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("No Tokio runtime available to schedule ticks: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

impl Error {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised while validating a simulator configuration
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
