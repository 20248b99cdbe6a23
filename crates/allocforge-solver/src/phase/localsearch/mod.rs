//! Local search phase
//!
//! Improves a complete assignment by repeatedly applying moves that the
//! acceptor lets through, keeping track of the best assignment seen.

mod acceptor;
mod phase;


pub use acceptor::{
    Acceptor, HillClimbingAcceptor, ImprovingAcceptor, SimulatedAnnealingAcceptor,
};
pub use phase::{LocalSearchOutcome, LocalSearchPhase, MoveSelection};
