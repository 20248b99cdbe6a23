// Tuple-based component sets.
//
// Components are grouped in plain tuples so that evaluation is fully
// monomorphized: `(SupplyCost, OpeningCost, CapacityCost)` is a
// `ComponentSet<S>` without any boxing.

use allocforge_core::HardSoftCost;

use crate::api::traits::{ComponentResult, CostComponent, DeltaCostComponent, DeltaResult};

/// A group of cost components evaluated together.
pub trait ComponentSet<S>: Send + Sync {
    /// Sum of the weighted costs of every component.
    fn evaluate_all(&self, state: &S) -> HardSoftCost;

    fn component_count(&self) -> usize;

    /// Per-component results, in tuple order.
    fn evaluate_each(&self, state: &S) -> Vec<ComponentResult>;

    /// Violation report of each component, paired with its name.
    fn violations_each(&self, state: &S) -> Vec<(String, Vec<String>)>;
}

/// A group of delta components scoring the same move type.
pub trait DeltaSet<S, M>: Send + Sync {
    /// Sum of the weighted deltas of every component.
    fn delta_all(&self, state: &S, mv: &M) -> HardSoftCost;

    fn delta_count(&self) -> usize;

    /// Per-component deltas, in tuple order.
    fn delta_each(&self, state: &S, mv: &M) -> Vec<DeltaResult>;

    /// Unweighted absolute cost of each underlying component, in tuple order.
    fn cost_each(&self, state: &S) -> Vec<i64>;
}

impl<S> ComponentSet<S> for () {
    #[inline]
    fn evaluate_all(&self, _state: &S) -> HardSoftCost {
        HardSoftCost::ZERO
    }

    #[inline]
    fn component_count(&self) -> usize {
        0
    }

    fn evaluate_each(&self, _state: &S) -> Vec<ComponentResult> {
        Vec::new()
    }

    fn violations_each(&self, _state: &S) -> Vec<(String, Vec<String>)> {
        Vec::new()
    }
}

impl<S, M> DeltaSet<S, M> for () {
    #[inline]
    fn delta_all(&self, _state: &S, _mv: &M) -> HardSoftCost {
        HardSoftCost::ZERO
    }

    #[inline]
    fn delta_count(&self) -> usize {
        0
    }

    fn delta_each(&self, _state: &S, _mv: &M) -> Vec<DeltaResult> {
        Vec::new()
    }

    fn cost_each(&self, _state: &S) -> Vec<i64> {
        Vec::new()
    }
}

macro_rules! impl_component_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<S, $($T),+> ComponentSet<S> for ($($T,)+)
        where
            $($T: CostComponent<S>,)+
        {
            #[inline]
            fn evaluate_all(&self, state: &S) -> HardSoftCost {
                let mut total = HardSoftCost::ZERO;
                $(total += self.$idx.weighted_cost(state);)+
                total
            }

            #[inline]
            fn component_count(&self) -> usize {
                let mut count = 0;
                $(let _ = &self.$idx; count += 1;)+
                count
            }

            fn evaluate_each(&self, state: &S) -> Vec<ComponentResult> {
                vec![$({
                    let component = &self.$idx;
                    let value = component.compute_cost(state);
                    ComponentResult {
                        name: component.name().to_string(),
                        value,
                        weight: component.weight(),
                        is_hard: component.is_hard(),
                        cost: HardSoftCost::weighted(value, component.weight(), component.level()),
                    }
                }),+]
            }

            fn violations_each(&self, state: &S) -> Vec<(String, Vec<String>)> {
                vec![$((self.$idx.name().to_string(), self.$idx.violations(state))),+]
            }
        }
    };
}

macro_rules! impl_delta_set_for_tuple {
    ($($idx:tt: $T:ident),+) => {
        impl<S, M, $($T),+> DeltaSet<S, M> for ($($T,)+)
        where
            $($T: DeltaCostComponent<S, M>,)+
        {
            #[inline]
            fn delta_all(&self, state: &S, mv: &M) -> HardSoftCost {
                let mut total = HardSoftCost::ZERO;
                $(total += self.$idx.weighted_delta_cost(state, mv);)+
                total
            }

            #[inline]
            fn delta_count(&self) -> usize {
                let mut count = 0;
                $(let _ = &self.$idx; count += 1;)+
                count
            }

            fn delta_each(&self, state: &S, mv: &M) -> Vec<DeltaResult> {
                vec![$({
                    let delta = &self.$idx;
                    let component = delta.component();
                    let value = delta.compute_delta_cost(state, mv);
                    DeltaResult {
                        name: component.name().to_string(),
                        delta: value,
                        cost: HardSoftCost::weighted(value, component.weight(), component.level()),
                    }
                }),+]
            }

            fn cost_each(&self, state: &S) -> Vec<i64> {
                vec![$(self.$idx.component().compute_cost(state)),+]
            }
        }
    };
}

impl_component_set_for_tuple!(0: C0);
impl_component_set_for_tuple!(0: C0, 1: C1);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6);
impl_component_set_for_tuple!(0: C0, 1: C1, 2: C2, 3: C3, 4: C4, 5: C5, 6: C6, 7: C7);

impl_delta_set_for_tuple!(0: D0);
impl_delta_set_for_tuple!(0: D0, 1: D1);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2, 3: D3);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2, 3: D3, 4: D4);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2, 3: D3, 4: D4, 5: D5);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2, 3: D3, 4: D4, 5: D5, 6: D6);
impl_delta_set_for_tuple!(0: D0, 1: D1, 2: D2, 3: D3, 4: D4, 5: D5, 6: D6, 7: D7);
