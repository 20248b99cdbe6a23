//! Capacity cost: load beyond what each resource can serve.

use allocforge_core::Assignment;

use crate::api::CostComponent;

/// Σ over resources of `max(0, load(r) - capacity(r))`.
///
/// Hard by default: a solution with any overload is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityCost {
    weight: i64,
    hard: bool,
}

impl CapacityCost {
    pub const NAME: &'static str = "Capacity";

    pub const fn new(weight: i64, hard: bool) -> Self {
        Self { weight, hard }
    }

    /// Overload of a resource carrying `load`.
    #[inline]
    pub fn excess(load: i64, capacity: i64) -> i64 {
        (load - capacity).max(0)
    }
}

impl Default for CapacityCost {
    fn default() -> Self {
        Self::new(1, true)
    }
}

impl<'a> CostComponent<Assignment<'a>> for CapacityCost {
    fn compute_cost(&self, state: &Assignment<'a>) -> i64 {
        let instance = state.instance();
        (0..instance.resource_count())
            .map(|r| Self::excess(state.load(r), instance.capacity(r)))
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
            .filter_map(|r| {
                let capacity = instance.capacity(r);
                let excess = Self::excess(state.load(r), capacity);
                (excess > 0).then(|| {
                    format!(
                        "Resource {} overloaded by {} (load {}, capacity {})",
                        instance.resource(r).code(),
                        excess,
                        state.load(r),
                        capacity
                    )
                })
            })
            .collect()
    }
}
