//! Construction heuristics
//!
//! Build a complete initial assignment from an all-unassigned state.

mod greedy;
mod random;

#[cfg(test)]
mod tests;

use std::fmt::Debug;
use std::time::Duration;

use allocforge_core::Assignment;
use rand::Rng;

pub use greedy::GreedyConstructor;
pub use random::RandomConstructor;

/// Builds an initial assignment.
///
/// Implementations leave no client unassigned.
pub trait Constructor: Send + Sync + Debug {
    fn construct<R: Rng>(&self, state: &mut Assignment<'_>, rng: &mut R) -> ConstructionSummary;

    /// Name used in phase events.
    fn phase_name(&self) -> &'static str;
}

/// What a construction run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructionSummary {
    /// Clients placed by the heuristic itself.
    pub placed: usize,
    /// Clients sent to the fallback resource.
    pub fallback: usize,
    pub duration: Duration,
}
