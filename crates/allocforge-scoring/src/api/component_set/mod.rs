// Tuple-based component and delta sets.

mod sets;

#[cfg(test)]
mod tests;

pub use sets::{ComponentSet, DeltaSet};
