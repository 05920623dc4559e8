//! Error types for the precip-forecast library.
//!
//! The prediction engine itself never fails: missing data and numeric
//! degeneracies are absorbed into the "no prediction" sentinel. Errors only
//! surface at the boundaries (file ingestion, configuration, station edits).

use thiserror::Error;

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, PrecipError>;

/// Errors that can occur outside the pure prediction path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrecipError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reading a file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// No station with the given identifier.
    #[error("unknown station: {0}")]
    UnknownStation(String),
}

impl From<std::io::Error> for PrecipError {
    fn from(err: std::io::Error) -> Self {
        PrecipError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for PrecipError {
    fn from(err: toml::de::Error) -> Self {
        PrecipError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = PrecipError::InvalidParameter("lower limit above upper".to_string());
        assert_eq!(
            err.to_string(),
            "invalid parameter: lower limit above upper"
        );

        let err = PrecipError::UnknownStation("42".to_string());
        assert_eq!(err.to_string(), "unknown station: 42");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: PrecipError = io.into();
        assert!(matches!(err, PrecipError::Io(msg) if msg.contains("missing.csv")));
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = PrecipError::Config("expected a table".to_string());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
