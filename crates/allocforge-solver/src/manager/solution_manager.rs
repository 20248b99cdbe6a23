//! SolutionManager for state construction and cost analysis.
//!
//! Provides the high-level API for:
//! - Building initial states (random or greedy)
//! - Checking the load invariant
//! - Evaluating a state, as a total or per component
//! - Reporting violations

use std::fmt;

use allocforge_core::{Assignment, ConsistencyError, HardSoftCost};
use allocforge_scoring::{ComponentResult, ComponentSet};
use rand::Rng;

use crate::phase::construction::{
    ConstructionSummary, Constructor, GreedyConstructor, RandomConstructor,
};

/// Breakdown of a state's cost by component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostAnalysis {
    /// The total cost.
    pub cost: HardSoftCost,
    /// Analysis of each component, in set order.
    pub components: Vec<ComponentResult>,
}

impl CostAnalysis {
    /// Returns true when the hard part of the cost is zero.
    pub fn is_feasible(&self) -> bool {
        self.cost.is_feasible()
    }
}

impl fmt::Display for CostAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.components {
            writeln!(
                f,
                "{} ({}, weight {}): {}",
                c.name,
                if c.is_hard { "hard" } else { "soft" },
                c.weight,
                c.value
            )?;
        }
        write!(f, "Total: {}", self.cost)
    }
}

/// Owner of a component set, with the operations drivers need around it.
///
/// # Example
///
/// ```
/// use allocforge_core::{Assignment, HardSoftCost};
/// use allocforge_scoring::standard_components;
/// use allocforge_solver::SolutionManager;
/// # use allocforge_core::{Client, Instance, Resource};
/// # let instance = Instance::builder()
/// #     .with_client(Client::new("S1", 2))
/// #     .with_client(Client::new("S2", 3))
/// #     .with_client(Client::new("S3", 1))
/// #     .with_resource(Resource::new("W1", 4, 10))
/// #     .with_resource(Resource::new("W2", 4, 10))
/// #     .with_unit_costs(vec![vec![1, 5], vec![5, 1], vec![2, 2]])
/// #     .build()
/// #     .unwrap();
///
/// let manager = SolutionManager::new(standard_components());
/// let mut state = Assignment::new(&instance);
/// manager.greedy_state(&mut state);
///
/// assert_eq!(manager.evaluate(&state), HardSoftCost::of(0, 27));
/// ```
#[derive(Debug, Clone)]
pub struct SolutionManager<C> {
    components: C,
    greedy: GreedyConstructor,
}

impl<C> SolutionManager<C> {
    pub fn new(components: C) -> Self {
        Self {
            components,
            greedy: GreedyConstructor::new(),
        }
    }

    /// Sets the resource greedy construction falls back to.
    pub fn with_fallback_resource(mut self, resource: usize) -> Self {
        self.greedy = self.greedy.with_fallback_resource(resource);
        self
    }

    pub fn components(&self) -> &C {
        &self.components
    }

    /// Resets `state` and assigns every client to a random resource.
    pub fn random_state<R: Rng>(
        &self,
        state: &mut Assignment<'_>,
        rng: &mut R,
    ) -> ConstructionSummary {
        state.reset();
        RandomConstructor::new().construct(state, rng)
    }

    /// Resets `state` and builds it with the greedy constructor.
    pub fn greedy_state(&self, state: &mut Assignment<'_>) -> ConstructionSummary {
        state.reset();
        self.greedy.run(state)
    }

    /// Recomputes the loads of `state` from scratch.
    pub fn check_consistency(&self, state: &Assignment<'_>) -> Result<(), ConsistencyError> {
        state.check_consistency()
    }

    /// Total weighted cost of `state`.
    pub fn evaluate<'a>(&self, state: &Assignment<'a>) -> HardSoftCost
    where
        C: ComponentSet<Assignment<'a>>,
    {
        self.components.evaluate_all(state)
    }

    /// Cost of every component of `state`.
    pub fn evaluate_each<'a>(&self, state: &Assignment<'a>) -> Vec<ComponentResult>
    where
        C: ComponentSet<Assignment<'a>>,
    {
        self.components.evaluate_each(state)
    }

    /// Total and per-component cost of `state`.
    pub fn analyze<'a>(&self, state: &Assignment<'a>) -> CostAnalysis
    where
        C: ComponentSet<Assignment<'a>>,
    {
        let components = self.components.evaluate_each(state);
        let cost = components.iter().map(|c| c.cost).sum();
        CostAnalysis { cost, components }
    }

    /// Violation report of `state`, one block per component with
    /// violations.
    pub fn violations<'a>(&self, state: &Assignment<'a>) -> String
    where
        C: ComponentSet<Assignment<'a>>,
    {
        let mut report = String::new();
        for (name, lines) in self.components.violations_each(state) {
            if lines.is_empty() {
                continue;
            }
            report.push_str(&format!("{} ({}):\n", name, lines.len()));
            for line in lines {
                report.push_str("  ");
                report.push_str(&line);
                report.push('\n');
            }
        }
        report
    }
}
