use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("confidence must lie strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    #[error("sample count must be positive and finite, got {0}")]
    InvalidSampleCount(f64),

    #[error("range of merit must be positive and finite, got {0}")]
    InvalidRange(f64),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
