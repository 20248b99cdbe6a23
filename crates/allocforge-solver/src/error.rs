//! Error types for the solver.

use allocforge_config::ConfigError;
use allocforge_core::{AllocError, ConsistencyError, HardSoftCost};
use thiserror::Error;

/// Errors raised while configuring or running the solver.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error("Inconsistent state: {0}")]
    Inconsistent(#[from] ConsistencyError),

    /// The incrementally tracked cost drifted from a full recomputation.
    #[error("Cost drift after step {step}: maintained {maintained}, recomputed {recomputed}")]
    CostDrift {
        step: u64,
        maintained: HardSoftCost,
        recomputed: HardSoftCost,
    },

    #[error("Fallback resource {resource} out of range ({resource_count} resources)")]
    InvalidFallback {
        resource: usize,
        resource_count: usize,
    },
}

/// A move's textual form could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Move parse error: {message}")]
pub struct MoveParseError {
    pub message: String,
}

impl MoveParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
