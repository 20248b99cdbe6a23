//! Small warehouse instances whose optimal and greedy solutions are known.

use allocforge_core::{Client, Instance, Resource};

/// Three stores, two warehouses.
///
/// - requirements `{2, 3, 1}`
/// - capacities `{4, 4}`, fixed costs `{10, 10}`
/// - unit costs `[[1, 5], [5, 1], [2, 2]]`
///
/// Greedy construction assigns S1 and S3 to W1 and S2 to W2, for a supply
/// cost of 7, an opening cost of 20 and no overload.
pub fn scenario_instance() -> Instance {
    Instance::builder()
        .with_client(Client::new("S1", 2))
        .with_client(Client::new("S2", 3))
        .with_client(Client::new("S3", 1))
        .with_resource(Resource::new("W1", 4, 10))
        .with_resource(Resource::new("W2", 4, 10))
        .with_unit_costs(vec![vec![1, 5], vec![5, 1], vec![2, 2]])
        .build()
        .expect("scenario instance is valid")
}

/// Two stores, three warehouses with distinct fixed costs `{10, 25, 40}`.
///
/// Used to check opening deltas when a sole occupant moves to an empty
/// warehouse.
pub fn opening_instance() -> Instance {
    Instance::builder()
        .with_client(Client::new("S1", 3))
        .with_client(Client::new("S2", 2))
        .with_resource(Resource::new("W1", 10, 10))
        .with_resource(Resource::new("W2", 10, 25))
        .with_resource(Resource::new("W3", 10, 40))
        .with_unit_costs(vec![vec![1, 2, 3], vec![3, 2, 1]])
        .build()
        .expect("opening instance is valid")
}

/// Three stores competing for two tight warehouses (capacity 5 each).
///
/// Requirements `{4, 3, 2}`: any two stores share a warehouse with
/// overload, except S2 with S3.
pub fn capacity_instance() -> Instance {
    Instance::builder()
        .with_client(Client::new("S1", 4))
        .with_client(Client::new("S2", 3))
        .with_client(Client::new("S3", 2))
        .with_resource(Resource::new("W1", 5, 0))
        .with_resource(Resource::new("W2", 5, 0))
        .with_unit_costs(vec![vec![1, 1], vec![1, 1], vec![1, 1]])
        .build()
        .expect("capacity instance is valid")
}
