use allocforge_core::{Assignment, Client, Instance, Resource};
use allocforge_scoring::{standard_components, ComponentSet};
use allocforge_test::generator::{random_instance, GeneratorConfig};
use allocforge_test::{capacity_instance, scenario_instance};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

#[test]
fn test_greedy_scenario() {
    let instance = scenario_instance();
    let mut state = Assignment::new(&instance);
    let summary = GreedyConstructor::new().run(&mut state);

    assert_eq!(state.assignments(), &[Some(0), Some(1), Some(0)]);
    assert_eq!(summary.placed, 3);
    assert_eq!(summary.fallback, 0);

    let each = standard_components().evaluate_each(&state);
    assert_eq!(each[0].value, 7);
    assert_eq!(each[1].value, 20);
    assert_eq!(each[2].value, 0);
}

#[test]
fn test_greedy_requires_strict_residual() {
    // S1 needs exactly the capacity of W1, so it can only use W2
    let instance = Instance::builder()
        .with_client(Client::new("S1", 4))
        .with_resource(Resource::new("W1", 4, 0))
        .with_resource(Resource::new("W2", 5, 0))
        .with_unit_costs(vec![vec![1, 9]])
        .build()
        .unwrap();
    let mut state = Assignment::new(&instance);
    GreedyConstructor::new().run(&mut state);
    assert_eq!(state.assignment(0), Some(1));
}

#[test]
fn test_greedy_first_found_wins_ties() {
    let instance = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_client(Client::new("S2", 1))
        .with_resource(Resource::new("W1", 10, 0))
        .with_resource(Resource::new("W2", 10, 0))
        .with_unit_costs(vec![vec![3, 3], vec![3, 3]])
        .build()
        .unwrap();
    let mut state = Assignment::new(&instance);
    GreedyConstructor::new().run(&mut state);
    assert_eq!(state.assignments(), &[Some(0), Some(0)]);
}

#[test]
fn test_greedy_fallback_accepts_overload() {
    let instance = capacity_instance();
    let mut state = Assignment::new(&instance);
    let summary = GreedyConstructor::new()
        .with_fallback_resource(1)
        .run(&mut state);

    assert!(state.is_complete());
    assert!(summary.fallback > 0);
    assert_eq!(summary.placed + summary.fallback, 3);
    assert!(state.check_consistency().is_ok());
}

#[test]
fn test_greedy_out_of_range_fallback_uses_first_resource() {
    let instance = Instance::builder()
        .with_client(Client::new("S1", 9))
        .with_resource(Resource::new("W1", 1, 0))
        .with_unit_costs(vec![vec![1]])
        .build()
        .unwrap();
    let mut state = Assignment::new(&instance);
    let summary = GreedyConstructor::new()
        .with_fallback_resource(7)
        .run(&mut state);
    assert_eq!(state.assignment(0), Some(0));
    assert_eq!(summary.fallback, 1);
}

#[test]
fn test_greedy_totality_on_random_instances() {
    for seed in 0..30 {
        let instance = random_instance(GeneratorConfig::default().with_size(10, 3), seed);
        let mut state = Assignment::new(&instance);
        let mut rng = StdRng::seed_from_u64(seed);
        GreedyConstructor::new().construct(&mut state, &mut rng);
        assert_eq!(state.unassigned_count(), 0);
        assert!(state.check_consistency().is_ok());
    }
}

#[test]
fn test_greedy_on_empty_instance() {
    let instance = Instance::builder().build().unwrap();
    let mut state = Assignment::new(&instance);
    let summary = GreedyConstructor::new().run(&mut state);
    assert_eq!(summary.placed, 0);
    assert!(state.is_complete());
}

#[test]
fn test_random_construction_is_seeded() {
    let instance = random_instance(GeneratorConfig::default(), 2);
    let mut a = Assignment::new(&instance);
    let mut b = Assignment::new(&instance);
    RandomConstructor::new().construct(&mut a, &mut StdRng::seed_from_u64(11));
    RandomConstructor::new().construct(&mut b, &mut StdRng::seed_from_u64(11));
    assert!(a.is_complete());
    assert_eq!(a, b);
}
