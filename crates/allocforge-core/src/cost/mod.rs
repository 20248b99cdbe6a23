//! Cost types for representing solution quality
//!
//! Costs are minimized. A cost component contributes its weighted value to
//! either the hard or the soft level of a [`HardSoftCost`].

mod hard_soft;


use thiserror::Error;

pub use hard_soft::HardSoftCost;

/// Level a cost component contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostLevel {
    /// Hard constraints - must reach zero for feasibility.
    Hard,
    /// Soft constraints - optimization objectives.
    Soft,
}

impl CostLevel {
    /// Converts from the boolean hard flag used in component declarations.
    pub fn from_hard_flag(hard: bool) -> Self {
        if hard {
            CostLevel::Hard
        } else {
            CostLevel::Soft
        }
    }
}

/// Error when parsing a cost from string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cost parse error: {message}")]
pub struct CostParseError {
    pub message: String,
}
