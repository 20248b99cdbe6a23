//! The cost components of the assignment model.

mod capacity;
mod opening;
mod supply;

#[cfg(test)]
mod tests;

pub use capacity::CapacityCost;
pub use opening::OpeningCost;
pub use supply::SupplyCost;

/// The standard component set: supply and opening soft, capacity hard.
pub type StandardComponents = (SupplyCost, OpeningCost, CapacityCost);

/// Builds [`StandardComponents`] with default weights.
pub fn standard_components() -> StandardComponents {
    (
        SupplyCost::default(),
        OpeningCost::default(),
        CapacityCost::default(),
    )
}
