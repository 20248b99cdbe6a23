//! Delta cost components for change moves.

mod change;


use allocforge_scoring::StandardComponents;

pub use change::{ChangeDeltaCapacity, ChangeDeltaOpening, ChangeDeltaSupply};

/// Deltas of [`StandardComponents`], in the same order.
pub type StandardDeltas = (ChangeDeltaSupply, ChangeDeltaOpening, ChangeDeltaCapacity);

/// Builds the deltas tracking each of `components`.
pub fn standard_deltas(components: &StandardComponents) -> StandardDeltas {
    let (supply, opening, capacity) = *components;
    (
        ChangeDeltaSupply::new(supply),
        ChangeDeltaOpening::new(opening),
        ChangeDeltaCapacity::new(capacity),
    )
}
