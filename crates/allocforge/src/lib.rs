//! allocforge - Resource Assignment with Incremental Costs
//!
//! Assign clients with a requirement to capacitated resources, minimizing
//! supply, opening and overload costs with construction heuristics and
//! local search.
//!
//! # Example
//!
//! ```rust
//! use allocforge::prelude::*;
//!
//! let instance = Instance::builder()
//!     .with_client(Client::new("S1", 2))
//!     .with_client(Client::new("S2", 3))
//!     .with_resource(Resource::new("W1", 4, 10))
//!     .with_resource(Resource::new("W2", 4, 10))
//!     .with_unit_costs(vec![vec![1, 5], vec![5, 1]])
//!     .build()
//!     .unwrap();
//!
//! let config = SolverConfig::new()
//!     .with_random_seed(0)
//!     .with_local_search_type(LocalSearchType::SteepestDescent);
//! let result = solve_with_restarts(&instance, config).unwrap();
//! assert!(result.cost.is_feasible());
//! ```

// Problem model and costs
pub use allocforge_core::{
    AllocError, Assignment, Client, ConsistencyError, Coordinates, HardSoftCost, Instance,
    InstanceBuilder, InstanceData, Resource, UNBOUNDED,
};

// Cost components
pub use allocforge_scoring::{
    standard_components, CapacityCost, ComponentResult, ComponentSet, CostComponent,
    DeltaCostComponent, DeltaSet, OpeningCost, StandardComponents, SupplyCost,
};

// Solving
pub use allocforge_solver::{
    components_from_config, solve_with_restarts, standard_deltas, ChangeMove,
    ChangeNeighborhoodExplorer, CostAnalysis, GreedyConstructor, MoveTestReport, MoveTester,
    NeighborhoodExplorer, SolutionManager, SolveResult, Solver, SolverError,
};

// Configuration
pub use allocforge_config::{
    ConfigError, ConstructionType, EnvironmentMode, LocalSearchType, SolverConfig,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        Assignment, Client, HardSoftCost, Instance, Resource, UNBOUNDED,
    };
    pub use super::{standard_components, ComponentSet, CostComponent, DeltaCostComponent};
    pub use super::{
        solve_with_restarts, ChangeMove, ChangeNeighborhoodExplorer, NeighborhoodExplorer,
        SolutionManager, Solver,
    };
    pub use super::{ConstructionType, EnvironmentMode, LocalSearchType, SolverConfig};
}
