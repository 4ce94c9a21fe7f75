//! Error handling for the mining worker
//!
//! A single crate-wide error type covering work validation, header codecs,
//! version decoding, and worker lifecycle failures.

use thiserror::Error;

/// Result type alias for mining operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mining worker
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors (in-memory cursor reads during decoding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized work buffer errors
    #[error("Work error: {message}")]
    Work { message: String },

    /// Target validation errors
    #[error("Invalid target: {message}")]
    Target { message: String },

    /// Chainweb version decoding errors
    #[error("Invalid chainweb version: {message}")]
    Version { message: String },

    /// Block header decoding errors
    #[error("Header error: {message}")]
    Header { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Worker thread errors
    #[error("Worker error: {message}")]
    Worker { message: String },

    /// Cancellation of an in-flight mining run
    #[error("Operation was cancelled: {operation}")]
    Cancelled { operation: String },
}

impl Error {
    /// Create a work buffer error
    pub fn work(message: impl Into<String>) -> Self {
        Self::Work {
            message: message.into(),
        }
    }

    /// Create a target error
    pub fn target(message: impl Into<String>) -> Self {
        Self::Target {
            message: message.into(),
        }
    }

    /// Create a version error
    pub fn version(message: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
        }
    }

    /// Create a header error
    pub fn header(message: impl Into<String>) -> Self {
        Self::Header {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// True for errors raised by preemption or shutdown rather than failure
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::work("truncated buffer");
        assert!(err.to_string().contains("truncated buffer"));

        let err = Error::version("unknown wire tag 0x03");
        assert!(err.to_string().contains("unknown wire tag"));
    }

    #[test]
    fn test_cancellation_predicate() {
        assert!(Error::cancelled("mining run").is_cancellation());
        assert!(!Error::worker("thread died").is_cancellation());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
