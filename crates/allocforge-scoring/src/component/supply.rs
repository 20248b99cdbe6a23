//! Supply cost: what it costs to serve every client from its resource.

use allocforge_core::Assignment;

use crate::api::CostComponent;

/// Σ over assigned clients of `requirement(c) * unit_cost(c, assigned(c))`.
///
/// Unassigned clients contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyCost {
    weight: i64,
    hard: bool,
}

impl SupplyCost {
    pub const NAME: &'static str = "Supply";

    pub const fn new(weight: i64, hard: bool) -> Self {
        Self { weight, hard }
    }
}

impl Default for SupplyCost {
    fn default() -> Self {
        Self::new(1, false)
    }
}

impl<'a> CostComponent<Assignment<'a>> for SupplyCost {
    fn compute_cost(&self, state: &Assignment<'a>) -> i64 {
        let instance = state.instance();
        state
            .assignments()
            .iter()
            .enumerate()
            .filter_map(|(c, r)| r.map(|r| instance.supply_cost(c, r)))
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

    /// One line per assigned client: amount, resource, total and unit cost.
    fn violations(&self, state: &Assignment<'a>) -> Vec<String> {
        let instance = state.instance();
        state
            .assignments()
            .iter()
            .enumerate()
            .filter_map(|(c, r)| {
                r.map(|r| {
                    format!(
                        "Client {} supplied {} units from {} at cost {} ({} per unit)",
                        instance.client(c).code(),
                        instance.requirement(c),
                        instance.resource(r).code(),
                        instance.supply_cost(c, r),
                        instance.unit_cost(c, r)
                    )
                })
            })
            .collect()
    }
}
