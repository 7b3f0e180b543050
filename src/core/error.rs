//! Error types for the wheel scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// Symbol not found or empty price history
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// No option expirations listed for the symbol
    #[error("Options unavailable: {0}")]
    OptionsUnavailable(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn data_unavailable(msg: impl Into<String>) -> Self {
        Self::DataUnavailable(msg.into())
    }

    pub fn options_unavailable(msg: impl Into<String>) -> Self {
        Self::OptionsUnavailable(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn numerical(msg: impl Into<String>) -> Self {
        Self::Numerical(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScanError::data_unavailable("No data found for this symbol");
        assert_eq!(err.to_string(), "Data unavailable: No data found for this symbol");

        let err = ScanError::options_unavailable("No options data available");
        assert_eq!(err.to_string(), "Options unavailable: No options data available");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ScanError = io.into();
        assert!(matches!(err, ScanError::IO(_)));
    }
}
