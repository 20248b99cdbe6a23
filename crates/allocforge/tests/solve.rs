use allocforge::prelude::*;

const INSTANCE: &str = r#"
unit_costs = [[1, 5, 9], [5, 1, 9], [2, 2, 1], [4, 3, 2]]

[[clients]]
id = "S1"
requirement = 2

[[clients]]
id = "S2"
requirement = 3

[[clients]]
id = "S3"
requirement = 1

[[clients]]
id = "S4"
requirement = 2

[[resources]]
id = "W1"
capacity = 4
fixed_cost = 10

[[resources]]
id = "W2"
capacity = 4
fixed_cost = 10

[[resources]]
id = "W3"
fixed_cost = 30
"#;

#[test]
fn test_solve_dump_and_reload() {
    let instance = Instance::from_toml_str(INSTANCE).unwrap();
    let config = SolverConfig::new()
        .with_random_seed(1)
        .with_restart_count(3)
        .with_local_search_type(LocalSearchType::SimulatedAnnealing)
        .with_step_count_limit(5_000);

    let result = solve_with_restarts(&instance, config).unwrap();
    assert!(result.cost.is_feasible());

    let manager = SolutionManager::new(standard_components());
    assert_eq!(manager.evaluate(&result.assignment), result.cost);

    let dump = result.assignment.to_string();
    let reloaded = Assignment::read_from(&instance, &dump).unwrap();
    assert_eq!(reloaded, result.assignment);
}

#[test]
fn test_cost_never_beats_brute_force() {
    let instance = Instance::from_toml_str(INSTANCE).unwrap();
    let (_, optimum) =
        allocforge_test::exhaustive_optimum(&instance, HardSoftCost::DEFAULT_HARD_WEIGHT);

    let config = SolverConfig::new()
        .with_random_seed(0)
        .with_restart_count(8)
        .with_construction_type(ConstructionType::Random)
        .with_local_search_type(LocalSearchType::SimulatedAnnealing)
        .with_step_count_limit(20_000);
    let result = Solver::new(config).unwrap().solve(&instance).unwrap();
    assert!(result.cost.total() >= optimum);
}
