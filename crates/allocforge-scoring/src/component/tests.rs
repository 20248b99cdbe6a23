use allocforge_core::{Assignment, HardSoftCost};
use allocforge_test::generator::{random_assignment, random_instance, GeneratorConfig};
use allocforge_test::reference::state_costs;
use allocforge_test::{capacity_instance, scenario_instance};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::api::{ComponentSet, CostComponent};

#[test]
fn test_scenario_costs() {
    let instance = scenario_instance();
    let mut state = Assignment::new(&instance);
    state.assign(0, 0);
    state.assign(1, 1);
    state.assign(2, 0);

    assert_eq!(SupplyCost::default().compute_cost(&state), 7);
    assert_eq!(OpeningCost::default().compute_cost(&state), 20);
    assert_eq!(CapacityCost::default().compute_cost(&state), 0);
    assert_eq!(
        standard_components().evaluate_all(&state),
        HardSoftCost::of(0, 27)
    );
}

#[test]
fn test_unassigned_contributes_nothing() {
    let instance = scenario_instance();
    let mut state = Assignment::new(&instance);
    assert_eq!(standard_components().evaluate_all(&state), HardSoftCost::ZERO);

    state.assign(1, 0);
    assert_eq!(SupplyCost::default().compute_cost(&state), 15);
    assert_eq!(OpeningCost::default().compute_cost(&state), 10);
}

#[test]
fn test_capacity_violations() {
    let instance = capacity_instance();
    let mut state = Assignment::new(&instance);
    state.assign(0, 0);
    state.assign(1, 0);
    state.assign(2, 1);

    let capacity = CapacityCost::default();
    assert_eq!(capacity.compute_cost(&state), 2);
    assert_eq!(
        capacity.violations(&state),
        vec!["Resource W1 overloaded by 2 (load 7, capacity 5)".to_string()]
    );
}

#[test]
fn test_supply_and_opening_reports() {
    let instance = scenario_instance();
    let mut state = Assignment::new(&instance);
    assert!(SupplyCost::default().violations(&state).is_empty());
    assert!(OpeningCost::default().violations(&state).is_empty());

    state.assign(0, 0);
    assert_eq!(
        SupplyCost::default().violations(&state),
        vec!["Client S1 supplied 2 units from W1 at cost 2 (1 per unit)".to_string()]
    );
    assert_eq!(
        OpeningCost::default().violations(&state),
        vec!["Resource W1 open at fixed cost 10".to_string()]
    );

    state.assign(1, 1);
    let supply = SupplyCost::default().violations(&state);
    assert_eq!(supply.len(), 2);
    assert_eq!(
        supply[1],
        "Client S2 supplied 3 units from W2 at cost 3 (1 per unit)"
    );
    assert_eq!(OpeningCost::default().violations(&state).len(), 2);
}

#[test]
fn test_weights_and_levels() {
    let instance = capacity_instance();
    let mut state = Assignment::new(&instance);
    state.assign(0, 0);
    state.assign(1, 0);

    let components = (
        SupplyCost::new(3, false),
        OpeningCost::new(1, true),
        CapacityCost::new(5, true),
    );
    // supply 7 * 3 soft; opening 0 hard; capacity 2 * 5 hard
    assert_eq!(components.evaluate_all(&state), HardSoftCost::of(10, 21));

    let each = components.evaluate_each(&state);
    assert_eq!(each[2].name, CapacityCost::NAME);
    assert_eq!(each[2].value, 2);
    assert_eq!(each[2].cost, HardSoftCost::of_hard(10));
}

#[test]
fn test_unbounded_resource_never_overloads() {
    let instance = allocforge_core::Instance::builder()
        .with_client(allocforge_core::Client::new("S1", 1_000_000))
        .with_resource(allocforge_core::Resource::unbounded("W1", 5))
        .with_unit_costs(vec![vec![1]])
        .build()
        .unwrap();
    let mut state = Assignment::new(&instance);
    state.assign(0, 0);
    assert_eq!(CapacityCost::default().compute_cost(&state), 0);
}

#[test]
fn test_components_agree_with_reference_on_random_states() {
    let components = standard_components();
    for seed in 0..20 {
        let instance = random_instance(GeneratorConfig::default(), seed);
        let mut state = Assignment::new(&instance);
        let mut rng = StdRng::seed_from_u64(seed);
        random_assignment(&mut state, &mut rng);

        let reference = state_costs(&state);
        let each = components.evaluate_each(&state);
        assert_eq!(each[0].value, reference.supply);
        assert_eq!(each[1].value, reference.opening);
        assert_eq!(each[2].value, reference.capacity);
    }
}
