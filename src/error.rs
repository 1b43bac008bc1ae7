//! Error types for tegraplot

use std::io;
use thiserror::Error;

/// Result type alias for tegraplot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
///
/// Unrecognized log lines are never an error: the parser simply reports the
/// metrics it could find. Everything here is an I/O, configuration or
/// presentation failure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error (configuration files)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value outside its supported range
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Summary statistics requested for a series with no samples
    #[error("Series '{0}' has no samples")]
    EmptySeries(String),

    /// Chart backend failure
    #[error("Chart error: {0}")]
    Chart(String),

    /// A required optional component was not compiled in
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_messages() {
        let err = Error::EmptySeries("video1".to_string());
        assert_eq!(err.to_string(), "Series 'video1' has no samples");
        let err = Error::MissingDependency("plotters".to_string());
        assert_eq!(err.to_string(), "Missing dependency: plotters");
        let err = Error::InvalidValue("interval".to_string());
        assert_eq!(err.to_string(), "Invalid value: interval");
    }
}
