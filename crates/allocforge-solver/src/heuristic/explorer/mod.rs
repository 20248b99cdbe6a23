//! Neighborhood exploration.
//!
//! A [`NeighborhoodExplorer`] knows the moves of one neighborhood: how to
//! draw one at random, how to enumerate all of them in a canonical order,
//! how to score them incrementally and how to commit one.

mod change;


use std::fmt::Debug;

use allocforge_core::HardSoftCost;
use rand::Rng;

pub use change::ChangeNeighborhoodExplorer;

/// Move generation, scoring and application for one neighborhood.
pub trait NeighborhoodExplorer<S>: Send + Sync {
    type Move: Clone + Debug;

    /// Draws a random feasible move, or `None` if the neighborhood is empty.
    fn random_move<R: Rng>(&self, state: &S, rng: &mut R) -> Option<Self::Move>;

    /// Returns true if `mv` may be applied to `state`.
    fn is_feasible(&self, state: &S, mv: &Self::Move) -> bool;

    /// Applies a feasible move.
    fn make_move(&self, state: &mut S, mv: &Self::Move);

    /// First move of the canonical enumeration.
    fn first_move(&self, state: &S) -> Option<Self::Move>;

    /// Advances `mv` to the next move of the enumeration.
    ///
    /// Returns false once the enumeration is exhausted; `mv` is then left
    /// unspecified.
    fn next_move(&self, state: &S, mv: &mut Self::Move) -> bool;

    /// Weighted cost change of applying `mv` to `state`.
    fn delta_cost(&self, state: &S, mv: &Self::Move) -> HardSoftCost;

    /// Iterates the canonical enumeration.
    fn moves<'e, 's>(&'e self, state: &'s S) -> MoveIter<'e, 's, S, Self>
    where
        Self: Sized,
    {
        MoveIter::new(self, state)
    }
}

/// Iterator adapter over `first_move` / `next_move`.
pub struct MoveIter<'e, 's, S, E: NeighborhoodExplorer<S>> {
    explorer: &'e E,
    state: &'s S,
    current: Option<E::Move>,
    started: bool,
}

impl<'e, 's, S, E: NeighborhoodExplorer<S>> MoveIter<'e, 's, S, E> {
    pub fn new(explorer: &'e E, state: &'s S) -> Self {
        Self {
            explorer,
            state,
            current: None,
            started: false,
        }
    }
}

impl<S, E: NeighborhoodExplorer<S>> Iterator for MoveIter<'_, '_, S, E> {
    type Item = E::Move;

    fn next(&mut self) -> Option<E::Move> {
        let next = match self.current.take() {
            None if !self.started => {
                self.started = true;
                self.explorer.first_move(self.state)
            }
            None => None,
            Some(mut mv) => self
                .explorer
                .next_move(self.state, &mut mv)
                .then_some(mv),
        };
        self.current = next.clone();
        next
    }
}

impl<S, E: NeighborhoodExplorer<S>> Debug for MoveIter<'_, '_, S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveIter")
            .field("current", &self.current)
            .field("started", &self.started)
            .finish()
    }
}
