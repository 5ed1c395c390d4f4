//! Error types for the preparation pipeline.
//!
//! All pipeline operations are deterministic pure computations over in-memory
//! data, so every error is fatal to the run; there is no retry path. Errors
//! carry the stage and, where relevant, the column that produced them.

use std::fmt;

/// Error type shared by all pipeline stages.
#[derive(Debug)]
pub enum PipelineError {
    /// Bad or missing column name, or an invalid parameter value.
    Configuration {
        /// Stage that rejected the configuration.
        stage: &'static str,
        /// Human-readable description of the problem.
        message: String,
    },
    /// A required aggregate (median, mode, min/max, ...) is undefined because
    /// the source column has no valid values.
    InsufficientData {
        /// Stage that needed the aggregate.
        stage: &'static str,
        /// Column with no valid values.
        column: String,
    },
    /// I/O error while reading input data.
    Io(String),
    /// Serialization or deserialization error for fitted parameters.
    Serialization(String),
}

impl PipelineError {
    /// Shorthand for a [`PipelineError::Configuration`].
    pub fn config(stage: &'static str, message: impl Into<String>) -> Self {
        PipelineError::Configuration {
            stage,
            message: message.into(),
        }
    }

    /// Shorthand for a [`PipelineError::InsufficientData`].
    pub fn insufficient(stage: &'static str, column: impl Into<String>) -> Self {
        PipelineError::InsufficientData {
            stage,
            column: column.into(),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Configuration { stage, message } => {
                write!(f, "configuration error in {}: {}", stage, message)
            }
            PipelineError::InsufficientData { stage, column } => {
                write!(
                    f,
                    "insufficient data in {}: column '{}' has no valid values",
                    stage, column
                )
            }
            PipelineError::Io(msg) => write!(f, "I/O error: {}", msg),
            PipelineError::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Io(err.to_string())
    }
}

impl From<bincode::Error> for PipelineError {
    fn from(err: bincode::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display_names_stage() {
        let err = PipelineError::config("scaler", "no column named 'Age'");
        let msg = err.to_string();
        assert!(msg.contains("scaler"));
        assert!(msg.contains("Age"));
    }

    #[test]
    fn test_insufficient_data_display_names_column() {
        let err = PipelineError::insufficient("cleaner", "Income");
        assert!(err.to_string().contains("Income"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io_err.into();
        assert!(matches!(err, PipelineError::Io(_)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PipelineError::config("test", "bad");
        let _: &dyn std::error::Error = &err;
    }
}
