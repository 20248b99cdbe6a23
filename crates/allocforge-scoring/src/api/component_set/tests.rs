use allocforge_core::HardSoftCost;

use super::*;
use crate::api::traits::{CostComponent, DeltaCostComponent};

// Toy state: a vector of counters. A move adds `1` to one counter.
type Counters = Vec<i64>;

struct Sum {
    weight: i64,
}

impl CostComponent<Counters> for Sum {
    fn compute_cost(&self, state: &Counters) -> i64 {
        state.iter().sum()
    }
    fn name(&self) -> &str {
        "Sum"
    }
    fn is_hard(&self) -> bool {
        false
    }
    fn weight(&self) -> i64 {
        self.weight
    }
}

struct AboveTwo;

impl CostComponent<Counters> for AboveTwo {
    fn compute_cost(&self, state: &Counters) -> i64 {
        state.iter().map(|v| (v - 2).max(0)).sum()
    }
    fn name(&self) -> &str {
        "AboveTwo"
    }
    fn is_hard(&self) -> bool {
        true
    }
    fn weight(&self) -> i64 {
        1
    }
    fn violations(&self, state: &Counters) -> Vec<String> {
        state
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 2)
            .map(|(i, v)| format!("counter {} is {}", i, v))
            .collect()
    }
}

struct Increment(usize);

struct SumDelta(Sum);

impl DeltaCostComponent<Counters, Increment> for SumDelta {
    type Component = Sum;
    fn component(&self) -> &Sum {
        &self.0
    }
    fn compute_delta_cost(&self, _state: &Counters, _mv: &Increment) -> i64 {
        1
    }
}

struct AboveTwoDelta(AboveTwo);

impl DeltaCostComponent<Counters, Increment> for AboveTwoDelta {
    type Component = AboveTwo;
    fn component(&self) -> &AboveTwo {
        &self.0
    }
    fn compute_delta_cost(&self, state: &Counters, mv: &Increment) -> i64 {
        if state[mv.0] >= 2 {
            1
        } else {
            0
        }
    }
}

#[test]
fn test_empty_sets() {
    let state = vec![5];
    assert_eq!(().evaluate_all(&state), HardSoftCost::ZERO);
    assert_eq!(ComponentSet::<Counters>::component_count(&()), 0);
    assert_eq!(DeltaSet::<Counters, Increment>::delta_count(&()), 0);
    assert_eq!(().delta_all(&state, &Increment(0)), HardSoftCost::ZERO);
}

#[test]
fn test_evaluate_all_and_each() {
    let set = (Sum { weight: 2 }, AboveTwo);
    let state = vec![1, 4, 3];

    assert_eq!(set.component_count(), 2);
    assert_eq!(set.evaluate_all(&state), HardSoftCost::of(3, 16));

    let results = set.evaluate_each(&state);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Sum");
    assert_eq!(results[0].value, 8);
    assert_eq!(results[0].weight, 2);
    assert_eq!(results[0].cost, HardSoftCost::of_soft(16));
    assert!(results[1].is_hard);
    assert_eq!(results[1].cost, HardSoftCost::of_hard(3));
}

#[test]
fn test_violations_each() {
    let set = (Sum { weight: 1 }, AboveTwo);
    let report = set.violations_each(&vec![3, 0]);
    assert_eq!(report[0], ("Sum".to_string(), Vec::new()));
    assert_eq!(report[1].1, vec!["counter 0 is 3".to_string()]);
}

#[test]
fn test_delta_set_matches_recomputation() {
    let deltas = (SumDelta(Sum { weight: 3 }), AboveTwoDelta(AboveTwo));
    let mut state = vec![0, 2];
    let components = (Sum { weight: 3 }, AboveTwo);

    for target in [0, 1, 1, 0, 0] {
        let mv = Increment(target);
        let before = components.evaluate_all(&state);
        let delta = deltas.delta_all(&state, &mv);
        let costs_before = deltas.cost_each(&state);
        let each = deltas.delta_each(&state, &mv);

        state[target] += 1;

        assert_eq!(components.evaluate_all(&state) - before, delta);
        let costs_after = deltas.cost_each(&state);
        for (i, result) in each.iter().enumerate() {
            assert_eq!(costs_after[i] - costs_before[i], result.delta, "{}", result.name);
        }
    }
}
