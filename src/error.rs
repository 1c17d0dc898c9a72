//! Error types for random-utility
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for parameter text parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The text does not consist of exactly three parameter lines
    #[error("Expected 3 parameter lines, got {actual}")]
    LineCount { actual: usize },

    /// A line carried a different number of values than the candidate line
    #[error("Token count mismatch on line {line}: expected {expected}, got {actual}")]
    TokenCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A numeric token failed to parse as a float
    #[error("Invalid number on line {line}: {token:?}")]
    InvalidNumber { line: usize, token: String },

    /// The family label on the candidate line is not recognized
    #[error("Unknown noise family: {0:?}")]
    UnknownFamily(String),
}

/// Top-level error type for model operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// A parameter vector does not match the candidate count
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The same candidate identity was supplied twice
    #[error("Duplicate candidate: {0}")]
    DuplicateCandidate(String),

    /// A model needs at least one candidate
    #[error("Candidate list is empty")]
    EmptyCandidates,

    /// A candidate identity is absent from the candidate index
    #[error("Candidate not found: {0}")]
    UnknownCandidate(String),

    /// A ranking is not a total order over the model's candidates
    #[error("Invalid ranking: {0}")]
    InvalidRanking(String),

    /// Parameters make a probability computation undefined
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed parameter text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Profile (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
