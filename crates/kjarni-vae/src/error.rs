//! Error types for the encoder layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::encoder::EncoderType;

/// Errors raised while configuring or running an encoder.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Aggregation name not recognised by the seq2seq encoder.
    #[error("{0} aggregation not available.")]
    UnsupportedAggregation(String),

    /// Encoder type name not recognised.
    #[error("{0}")]
    UnknownEncoderType(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encoder called with the wrong kind of input.
    #[error("{encoder} encoder expects {expected} input")]
    InputMismatch {
        encoder: EncoderType,
        expected: &'static str,
    },

    /// Configuration text could not be parsed.
    #[error("Failed to parse encoder configuration: {0}")]
    ConfigParse(String),

    /// Configuration file could not be read.
    #[error("Failed to read encoder configuration '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure inside the wrapped architecture or a tensor operation.
    #[error(transparent)]
    Compute(#[from] anyhow::Error),
}

impl EncoderError {
    /// True for errors caused by configuration rather than by input data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EncoderError::UnsupportedAggregation(_)
                | EncoderError::UnknownEncoderType(_)
                | EncoderError::InvalidConfig(_)
                | EncoderError::ConfigParse(_)
        )
    }
}

impl From<serde_json::Error> for EncoderError {
    fn from(err: serde_json::Error) -> Self {
        EncoderError::ConfigParse(err.to_string())
    }
}

impl From<toml::de::Error> for EncoderError {
    fn from(err: toml::de::Error) -> Self {
        EncoderError::ConfigParse(err.to_string())
    }
}

/// Result type for encoder operations.
pub type EncoderResult<T> = Result<T, EncoderError>;
