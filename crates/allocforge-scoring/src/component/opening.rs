//! Opening cost: the fixed cost of every resource in use.

use allocforge_core::Assignment;

use crate::api::CostComponent;

/// Σ of `fixed_cost(r)` over resources whose load is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningCost {
    weight: i64,
    hard: bool,
}

impl OpeningCost {
    pub const NAME: &'static str = "Opening";

    pub const fn new(weight: i64, hard: bool) -> Self {
        Self { weight, hard }
    }
}

impl Default for OpeningCost {
    fn default() -> Self {
        Self::new(1, false)
    }
}

impl<'a> CostComponent<Assignment<'a>> for OpeningCost {
    fn compute_cost(&self, state: &Assignment<'a>) -> i64 {
        let instance = state.instance();
        (0..instance.resource_count())
            .filter(|&r| state.is_open(r))
            .map(|r| instance.fixed_cost(r))
            .sum()
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_hard(&self) -> bool {
        self.hard
    }

    fn weight(&self) -> i64 {
        self.weight
    }

    fn violations(&self, state: &Assignment<'a>) -> Vec<String> {
        let instance = state.instance();
        (0..instance.resource_count())
            .filter(|&r| state.is_open(r))
            .map(|r| {
                format!(
                    "Resource {} open at fixed cost {}",
                    instance.resource(r).code(),
                    instance.fixed_cost(r)
                )
            })
            .collect()
    }
}
