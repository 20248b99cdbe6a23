use super::*;
use crate::error::AllocError;

fn scenario() -> Instance {
    Instance::builder()
        .with_client(Client::new("S1", 2))
        .with_client(Client::new("S2", 3))
        .with_client(Client::new("S3", 1))
        .with_resource(Resource::new("W1", 4, 10))
        .with_resource(Resource::new("W2", 4, 10))
        .with_unit_costs(vec![vec![1, 5], vec![5, 1], vec![2, 2]])
        .build()
        .unwrap()
}

#[test]
fn test_instance_accessors() {
    let instance = scenario();
    assert_eq!(instance.client_count(), 3);
    assert_eq!(instance.resource_count(), 2);
    assert_eq!(instance.requirement(1), 3);
    assert_eq!(instance.capacity(0), 4);
    assert_eq!(instance.fixed_cost(1), 10);
    assert_eq!(instance.unit_cost(1, 0), 5);
    assert_eq!(instance.supply_cost(1, 0), 15);
    assert_eq!(instance.client_index("S3"), Some(2));
    assert_eq!(instance.resource_index("W2"), Some(1));
    assert_eq!(instance.resource_index("W9"), None);
    assert_eq!(instance.total_requirement(), 6);
    assert_eq!(instance.total_capacity(), 8);
}

#[test]
fn test_unbounded_capacity_saturates() {
    let instance = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_resource(Resource::unbounded("W1", 0))
        .with_resource(Resource::new("W2", 5, 0))
        .with_unit_costs(vec![vec![1, 1]])
        .build()
        .unwrap();
    assert!(instance.resource(0).is_unbounded());
    assert_eq!(instance.total_capacity(), UNBOUNDED);
}

#[test]
fn test_empty_instance_is_valid() {
    let instance = Instance::builder().build().unwrap();
    assert_eq!(instance.client_count(), 0);
    assert_eq!(instance.resource_count(), 0);
}

#[test]
fn test_rejects_invalid_instances() {
    let no_resource = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_unit_costs(vec![vec![]])
        .build();
    assert!(matches!(no_resource, Err(AllocError::InvalidInstance(_))));

    let duplicate = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_client(Client::new("S1", 2))
        .with_resource(Resource::new("W1", 4, 0))
        .with_unit_costs(vec![vec![1], vec![1]])
        .build();
    assert!(matches!(duplicate, Err(AllocError::InvalidInstance(_))));

    let negative = Instance::builder()
        .with_client(Client::new("S1", -1))
        .with_resource(Resource::new("W1", 4, 0))
        .with_unit_costs(vec![vec![1]])
        .build();
    assert!(matches!(negative, Err(AllocError::InvalidInstance(_))));

    let bad_shape = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_resource(Resource::new("W1", 4, 0))
        .with_resource(Resource::new("W2", 4, 0))
        .with_unit_costs(vec![vec![1]])
        .build();
    assert!(matches!(bad_shape, Err(AllocError::InvalidInstance(_))));

    let negative_cost = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_resource(Resource::new("W1", 4, 0))
        .with_unit_costs(vec![vec![-3]])
        .build();
    assert!(matches!(negative_cost, Err(AllocError::InvalidInstance(_))));

    let no_costs = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_resource(Resource::new("W1", 4, 0))
        .build();
    assert!(matches!(no_costs, Err(AllocError::InvalidInstance(_))));
}

#[test]
fn test_rejects_overflowing_quantities() {
    let supply = Instance::builder()
        .with_client(Client::new("S1", i64::MAX / 2))
        .with_resource(Resource::new("W1", 4, 0))
        .with_unit_costs(vec![vec![3]])
        .build();
    assert!(matches!(supply, Err(AllocError::InvalidInstance(_))));

    let total = Instance::builder()
        .with_client(Client::new("S1", i64::MAX / 2 + 1))
        .with_client(Client::new("S2", i64::MAX / 2 + 1))
        .with_resource(Resource::unbounded("W1", 0))
        .with_unit_costs(vec![vec![0], vec![0]])
        .build();
    assert!(matches!(total, Err(AllocError::InvalidInstance(_))));

    let opening = Instance::builder()
        .with_client(Client::new("S1", 1))
        .with_resource(Resource::new("W1", 4, i64::MAX))
        .with_unit_costs(vec![vec![1]])
        .build();
    assert!(matches!(opening, Err(AllocError::InvalidInstance(_))));

    let largest_valid = Instance::builder()
        .with_client(Client::new("S1", i64::MAX / 2))
        .with_resource(Resource::new("W1", 4, 0))
        .with_unit_costs(vec![vec![2]])
        .build()
        .unwrap();
    assert_eq!(largest_valid.supply_cost(0, 0), i64::MAX - 1);
}

#[test]
fn test_distance_costs() {
    let instance = Instance::builder()
        .with_client(Client::new("S1", 2).with_coordinates(0.0, 0.0))
        .with_resource(Resource::new("W1", 4, 0).with_coordinates(3.0, 4.0))
        .with_resource(Resource::new("W2", 4, 0).with_coordinates(1.0, 1.0))
        .with_distance_costs()
        .build()
        .unwrap();
    assert_eq!(instance.unit_cost(0, 0), 5);
    assert_eq!(instance.unit_cost(0, 1), 1);

    let missing = Instance::builder()
        .with_client(Client::new("S1", 2))
        .with_resource(Resource::new("W1", 4, 0).with_coordinates(3.0, 4.0))
        .with_distance_costs()
        .build();
    assert!(missing.is_err());
}

#[test]
fn test_load_from_toml() {
    let toml = r#"
        unit_costs = [[1, 5], [5, 1]]

        [[clients]]
        id = "S1"
        requirement = 2

        [[clients]]
        id = "S2"
        requirement = 3
        incompatible = ["S1"]

        [[resources]]
        id = "W1"
        capacity = 4
        fixed_cost = 10

        [[resources]]
        id = "W2"
        fixed_cost = 7
    "#;
    let instance = Instance::from_toml_str(toml).unwrap();
    assert_eq!(instance.client_count(), 2);
    assert_eq!(instance.unit_cost(0, 1), 5);
    assert_eq!(instance.client(1).incompatible(), ["S1".to_string()]);
    assert!(instance.resource(1).is_unbounded());
    assert_eq!(instance.fixed_cost(1), 7);
}

#[test]
fn test_load_from_yaml_with_coordinates() {
    let yaml = r#"
clients:
  - id: S1
    requirement: 2
    coordinates: [0.0, 0.0]
resources:
  - id: W1
    capacity: 4
    fixed_cost: 10
    coordinates: [6.0, 8.0]
"#;
    let instance = Instance::from_yaml_str(yaml).unwrap();
    assert_eq!(instance.unit_cost(0, 0), 10);
    assert_eq!(instance.supply_cost(0, 0), 20);
}

#[test]
fn test_load_rejects_malformed_toml() {
    let result = Instance::from_toml_str("[[clients]]\nid = 3");
    assert!(matches!(result, Err(AllocError::Toml(_))));
}

#[test]
fn test_assign_updates_loads() {
    let instance = scenario();
    let mut state = Assignment::new(&instance);
    assert_eq!(state.unassigned_count(), 3);
    assert!(!state.is_complete());

    assert_eq!(state.assign(0, 0), None);
    assert_eq!(state.assign(1, 0), None);
    assert_eq!(state.load(0), 5);
    assert_eq!(state.residual_capacity(0), -1);
    assert!(state.is_open(0));
    assert!(!state.is_open(1));

    assert_eq!(state.assign(1, 1), Some(0));
    assert_eq!(state.loads(), &[2, 3]);
    assert_eq!(state.clients_of(0).collect::<Vec<_>>(), vec![0]);

    assert_eq!(state.unassign(0), Some(0));
    assert_eq!(state.unassign(0), None);
    assert_eq!(state.load(0), 0);
    assert_eq!(state.unassigned_count(), 2);
    assert!(state.check_consistency().is_ok());
}

#[test]
fn test_load_invariant_after_move_sequence() {
    let instance = scenario();
    let mut state = Assignment::new(&instance);
    let sequence = [(0, 0), (1, 1), (2, 0), (0, 1), (2, 1), (1, 0), (0, 0), (2, 0)];
    for (client, resource) in sequence {
        state.assign(client, resource);
        assert!(state.check_consistency().is_ok());
    }
    for r in 0..instance.resource_count() {
        let expected: i64 = state.clients_of(r).map(|c| instance.requirement(c)).sum();
        assert_eq!(state.load(r), expected);
    }
}

#[test]
fn test_reset_is_idempotent() {
    let instance = scenario();
    let mut state = Assignment::new(&instance);
    state.assign(0, 1);
    state.assign(2, 0);

    state.reset();
    let once = state.clone();
    state.reset();
    assert_eq!(state, once);
    assert_eq!(state, Assignment::new(&instance));
    assert_eq!(state.loads(), &[0, 0]);
    assert_eq!(state.unassigned_count(), 3);
}

#[test]
fn test_dump_and_read_back() {
    let instance = scenario();
    let mut state = Assignment::new(&instance);
    state.assign(0, 0);
    state.assign(1, 1);

    let dump = state.to_string();
    assert_eq!(dump, "S1 1 W1\nS2 1 W2\nS3 0\n");

    let text = format!("{}Cost: 27\nTime: 0.01s\n", dump);
    let restored = Assignment::read_from(&instance, &text).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.loads(), state.loads());
}

#[test]
fn test_read_rejects_bad_dumps() {
    let instance = scenario();

    let unknown_client = Assignment::read_from(&instance, "S9 1 W1\n");
    assert!(matches!(unknown_client, Err(AllocError::Parse { line: 1, .. })));

    let unknown_resource = Assignment::read_from(&instance, "S1 1 W1\nS2 1 W7\n");
    assert!(matches!(unknown_resource, Err(AllocError::Parse { line: 2, .. })));

    let multiple = Assignment::read_from(&instance, "S1 2 W1 W2\n");
    assert!(matches!(multiple, Err(AllocError::Parse { .. })));

    let short = Assignment::read_from(&instance, "S1 1\n");
    assert!(matches!(short, Err(AllocError::Parse { .. })));

    let twice = Assignment::read_from(&instance, "S1 1 W1\nS1 1 W2\n");
    assert!(matches!(twice, Err(AllocError::Parse { line: 2, .. })));
}

#[test]
fn test_consistency_error_names_resource() {
    let err = crate::error::ConsistencyError {
        resource: 1,
        maintained: 4,
        recomputed: 3,
    };
    assert_eq!(err.to_string(), "load of resource 1 is 4, recomputed 3");
    let wrapped: AllocError = err.into();
    assert!(matches!(wrapped, AllocError::Inconsistent(_)));
}
