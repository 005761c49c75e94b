//! Error types for the matrix pipeline.

/// Errors surfaced by palette lookup, encoding and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Animated palette configured with no colour stops
    InvalidPalette,
    /// Pixel data handed to an encoder does not cover the full matrix
    InvalidBufferSize { expected: usize, actual: usize },
    /// Difficulty table is empty, unsorted or not monotonic
    InvalidDifficulty(String),
    /// Configuration could not be parsed
    Config(String),
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::InvalidPalette => write!(f, "palette has no colour stops"),
            MatrixError::InvalidBufferSize { expected, actual } => {
                write!(f, "frame has {} pixels, expected {}", actual, expected)
            }
            MatrixError::InvalidDifficulty(reason) => {
                write!(f, "invalid difficulty table: {}", reason)
            }
            MatrixError::Config(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for MatrixError {}

impl From<serde_json::Error> for MatrixError {
    fn from(err: serde_json::Error) -> Self {
        MatrixError::Config(err.to_string())
    }
}
