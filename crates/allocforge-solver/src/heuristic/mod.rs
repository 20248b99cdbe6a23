//! Moves, their incremental costs and the neighborhoods that produce them.

pub mod delta;
pub mod explorer;
pub mod r#move;

pub use delta::{
    standard_deltas, ChangeDeltaCapacity, ChangeDeltaOpening, ChangeDeltaSupply, StandardDeltas,
};
pub use explorer::{ChangeNeighborhoodExplorer, MoveIter, NeighborhoodExplorer};
pub use r#move::ChangeMove;
