// Cost component traits.

use allocforge_core::{CostLevel, HardSoftCost};

/// One dimension of the objective, evaluated by a full scan of the state.
///
/// A component is tagged hard or soft and carries an integer weight; its
/// weighted contribution lands on the matching level of a [`HardSoftCost`].
///
/// # Example
///
/// ```
/// use allocforge_core::HardSoftCost;
/// use allocforge_scoring::CostComponent;
///
/// struct Unassigned;
///
/// impl CostComponent<Vec<Option<usize>>> for Unassigned {
///     fn compute_cost(&self, state: &Vec<Option<usize>>) -> i64 {
///         state.iter().filter(|r| r.is_none()).count() as i64
///     }
///     fn name(&self) -> &str {
///         "Unassigned"
///     }
///     fn is_hard(&self) -> bool {
///         true
///     }
///     fn weight(&self) -> i64 {
///         1
///     }
/// }
///
/// let state = vec![Some(0), None, None];
/// assert_eq!(Unassigned.weighted_cost(&state), HardSoftCost::of_hard(2));
/// ```
pub trait CostComponent<S>: Send + Sync {
    /// Unweighted cost of `state`; never negative.
    fn compute_cost(&self, state: &S) -> i64;

    fn name(&self) -> &str;

    fn is_hard(&self) -> bool;

    fn weight(&self) -> i64;

    /// Human-readable description of every violation in `state`.
    ///
    /// Diagnostic only. The default reports nothing.
    fn violations(&self, _state: &S) -> Vec<String> {
        Vec::new()
    }

    fn level(&self) -> CostLevel {
        CostLevel::from_hard_flag(self.is_hard())
    }

    /// Cost of `state` multiplied by the weight and placed on its level.
    fn weighted_cost(&self, state: &S) -> HardSoftCost {
        HardSoftCost::weighted(self.compute_cost(state), self.weight(), self.level())
    }
}

/// Constant-time change in one component's cost caused by move `M`.
///
/// For every state `s` and feasible move `m`,
/// `compute_delta_cost(s, m)` equals the component's cost after applying
/// `m` minus its cost before.
pub trait DeltaCostComponent<S, M>: Send + Sync {
    /// The component whose cost this delta tracks.
    type Component: CostComponent<S>;

    fn component(&self) -> &Self::Component;

    /// Unweighted cost change of applying `mv` to `state`.
    fn compute_delta_cost(&self, state: &S, mv: &M) -> i64;

    fn weighted_delta_cost(&self, state: &S, mv: &M) -> HardSoftCost {
        let component = self.component();
        HardSoftCost::weighted(
            self.compute_delta_cost(state, mv),
            component.weight(),
            component.level(),
        )
    }
}

/// Evaluation of a single component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentResult {
    pub name: String,
    /// Unweighted cost.
    pub value: i64,
    pub weight: i64,
    pub is_hard: bool,
    /// `value * weight` on the component's level.
    pub cost: HardSoftCost,
}

impl ComponentResult {
    pub fn level(&self) -> CostLevel {
        CostLevel::from_hard_flag(self.is_hard)
    }
}

/// Delta of a single component for one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaResult {
    pub name: String,
    /// Unweighted delta.
    pub delta: i64,
    pub cost: HardSoftCost,
}
