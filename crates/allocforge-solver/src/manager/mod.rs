//! State management around a component set.
//!
//! The manager module provides:
//! - [`SolutionManager`]: construction, evaluation and analysis of states
//! - [`components_from_config`]: the standard components weighted as configured

mod solution_manager;


use allocforge_config::ComponentsConfig;
use allocforge_scoring::{CapacityCost, OpeningCost, StandardComponents, SupplyCost};

pub use solution_manager::{CostAnalysis, SolutionManager};

/// Builds the standard components with the configured weights and levels.
pub fn components_from_config(config: &ComponentsConfig) -> StandardComponents {
    (
        SupplyCost::new(config.supply.weight, config.supply.hard),
        OpeningCost::new(config.opening.weight, config.opening.hard),
        CapacityCost::new(config.capacity.weight, config.capacity.hard),
    )
}
