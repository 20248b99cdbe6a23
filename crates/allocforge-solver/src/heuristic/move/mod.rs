//! Moves applied by the local search.
//!
//! The assignment model has a single move type, [`ChangeMove`].

mod change;

#[cfg(test)]
mod tests;

pub use change::ChangeMove;
