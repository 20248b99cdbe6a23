//! Solver phases.
//!
//! A run is a construction phase, which turns the empty assignment into a
//! complete one, optionally followed by a local search phase.

pub mod construction;
pub mod localsearch;

pub use construction::{ConstructionSummary, Constructor, GreedyConstructor, RandomConstructor};
pub use localsearch::{LocalSearchOutcome, LocalSearchPhase, MoveSelection};
