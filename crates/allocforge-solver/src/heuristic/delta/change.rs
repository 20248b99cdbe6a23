//! Constant-time deltas of the standard components under a [`ChangeMove`].
//!
//! Every delta returns 0 for a move that keeps the client where it is.

use allocforge_core::Assignment;
use allocforge_scoring::{CapacityCost, DeltaCostComponent, OpeningCost, SupplyCost};

use crate::heuristic::r#move::ChangeMove;

/// Supply delta: `-req * cost(c, from) + req * cost(c, to)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDeltaSupply {
    component: SupplyCost,
}

impl ChangeDeltaSupply {
    pub const fn new(component: SupplyCost) -> Self {
        Self { component }
    }
}

impl<'a> DeltaCostComponent<Assignment<'a>, ChangeMove> for ChangeDeltaSupply {
    type Component = SupplyCost;

    fn component(&self) -> &SupplyCost {
        &self.component
    }

    #[inline]
    fn compute_delta_cost(&self, state: &Assignment<'a>, mv: &ChangeMove) -> i64 {
        if mv.is_noop() {
            return 0;
        }
        let instance = state.instance();
        let added = instance.supply_cost(mv.client, mv.to);
        match mv.from {
            Some(from) => added - instance.supply_cost(mv.client, from),
            None => added,
        }
    }
}

/// Opening delta.
///
/// The origin closes when the client was its only load; the target opens
/// when it was empty and the client brings some load. Both may apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDeltaOpening {
    component: OpeningCost,
}

impl ChangeDeltaOpening {
    pub const fn new(component: OpeningCost) -> Self {
        Self { component }
    }
}

impl<'a> DeltaCostComponent<Assignment<'a>, ChangeMove> for ChangeDeltaOpening {
    type Component = OpeningCost;

    fn component(&self) -> &OpeningCost {
        &self.component
    }

    #[inline]
    fn compute_delta_cost(&self, state: &Assignment<'a>, mv: &ChangeMove) -> i64 {
        if mv.is_noop() {
            return 0;
        }
        let instance = state.instance();
        let requirement = instance.requirement(mv.client);
        let mut delta = 0;

        if let Some(from) = mv.from {
            let load = state.load(from);
            // sole occupant leaves
            if load > 0 && load == requirement {
                delta -= instance.fixed_cost(from);
            }
        }
        if state.load(mv.to) == 0 && requirement > 0 {
            delta += instance.fixed_cost(mv.to);
        }
        delta
    }
}

/// Capacity delta: the change in overload of the origin and the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDeltaCapacity {
    component: CapacityCost,
}

impl ChangeDeltaCapacity {
    pub const fn new(component: CapacityCost) -> Self {
        Self { component }
    }
}

impl<'a> DeltaCostComponent<Assignment<'a>, ChangeMove> for ChangeDeltaCapacity {
    type Component = CapacityCost;

    fn component(&self) -> &CapacityCost {
        &self.component
    }

    #[inline]
    fn compute_delta_cost(&self, state: &Assignment<'a>, mv: &ChangeMove) -> i64 {
        if mv.is_noop() {
            return 0;
        }
        let instance = state.instance();
        let requirement = instance.requirement(mv.client);
        let mut delta = 0;

        if let Some(from) = mv.from {
            let load = state.load(from);
            let capacity = instance.capacity(from);
            delta += CapacityCost::excess(load - requirement, capacity)
                - CapacityCost::excess(load, capacity);
        }
        let load = state.load(mv.to);
        let capacity = instance.capacity(mv.to);
        delta += CapacityCost::excess(load + requirement, capacity)
            - CapacityCost::excess(load, capacity);
        delta
    }
}
