//! allocforge Solver Engine
//!
//! This crate provides the solving machinery for assignment problems:
//! - Change moves, their incremental costs and the change neighborhood
//! - The [`SolutionManager`] owning the cost components
//! - Phases (greedy/random construction, local search)
//! - Termination conditions and statistics
//! - The [`MoveTester`](tester::MoveTester) cross-checking deltas
//! - The [`Solver`] running parallel restarts from a configuration

pub mod error;
pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod solver;
pub mod stats;
pub mod termination;
pub mod tester;

pub use error::{MoveParseError, SolverError};
pub use heuristic::{
    standard_deltas, ChangeDeltaCapacity, ChangeDeltaOpening, ChangeDeltaSupply, ChangeMove,
    ChangeNeighborhoodExplorer, MoveIter, NeighborhoodExplorer, StandardDeltas,
};
pub use manager::{components_from_config, CostAnalysis, SolutionManager};
pub use phase::construction::{
    ConstructionSummary, Constructor, GreedyConstructor, RandomConstructor,
};
pub use phase::localsearch::{
    Acceptor, HillClimbingAcceptor, ImprovingAcceptor, LocalSearchOutcome, LocalSearchPhase,
    MoveSelection, SimulatedAnnealingAcceptor,
};
pub use solver::{solve_with_restarts, SolveResult, Solver};
pub use stats::{PhaseStats, SolverStats};
pub use termination::Termination;
pub use tester::{MoveTestReport, MoveTester, NeighborhoodReport};
