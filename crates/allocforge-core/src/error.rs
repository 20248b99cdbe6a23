//! Error types for allocforge

use thiserror::Error;

/// Main error type for allocforge operations
#[derive(Debug, Error)]
pub enum AllocError {
    /// The instance data violates a model invariant
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// A textual assignment or move could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading an instance or solution file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML instance data could not be deserialized
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML instance data could not be deserialized
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The maintained load aggregate drifted from the assignment
    #[error(transparent)]
    Inconsistent(#[from] ConsistencyError),
}

/// A resource whose maintained load differs from the recomputed one.
///
/// This is a programming error: loads are only ever changed together with
/// the assignment they aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("load of resource {resource} is {maintained}, recomputed {recomputed}")]
pub struct ConsistencyError {
    pub resource: usize,
    pub maintained: i64,
    pub recomputed: i64,
}

/// Result type alias for allocforge operations
pub type Result<T> = std::result::Result<T, AllocError>;
