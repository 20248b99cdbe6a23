//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a move should be taken given its cost delta.

mod hill_climbing;
mod simulated_annealing;


use std::fmt::Debug;

use allocforge_core::HardSoftCost;
use rand::rngs::StdRng;

pub use hill_climbing::{HillClimbingAcceptor, ImprovingAcceptor};
pub use simulated_annealing::SimulatedAnnealingAcceptor;

/// Trait for accepting or rejecting moves in local search.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move changing the cost by `delta` should be taken.
    fn is_accepted(&mut self, delta: HardSoftCost, rng: &mut StdRng) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self) {}

    /// Called at the end of every step, accepted or not.
    fn step_ended(&mut self) {}

    /// True once the acceptor can accept nothing new, ending the phase.
    fn is_exhausted(&self) -> bool {
        false
    }
}
