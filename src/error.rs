//! Error types for spark-typewriter.
//!
//! The playback engine itself never fails. Errors only come from the edges:
//! reading scripts, parsing arguments, and talking to the terminal.

use thiserror::Error;

/// Result type alias for fallible spark-typewriter operations.
pub type TypewriterResult<T> = Result<T, TypewriterError>;

/// Errors raised while loading configuration or driving the terminal.
#[derive(Debug, Error)]
pub enum TypewriterError {
    /// Script file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid YAML or does not match the schema.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A configuration value was rejected.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong.
        message: String,
    },

    /// Terminal setup, rendering or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),
}

impl TypewriterError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TypewriterError::config("--pause expects a number");
        assert_eq!(
            err.to_string(),
            "Configuration error: --pause expects a number"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err: TypewriterError = io.into();
        assert!(matches!(err, TypewriterError::Io(_)));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
