//! Seeded random instances for property-style tests.

use allocforge_core::{Assignment, Client, Instance, Resource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of a generated instance.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub clients: usize,
    pub resources: usize,
    /// Requirements are drawn from `0..=max_requirement`.
    pub max_requirement: i64,
    /// Capacities are drawn from `0..=max_capacity`.
    pub max_capacity: i64,
    pub max_fixed_cost: i64,
    pub max_unit_cost: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            clients: 8,
            resources: 4,
            max_requirement: 6,
            max_capacity: 15,
            max_fixed_cost: 50,
            max_unit_cost: 9,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(mut self, clients: usize, resources: usize) -> Self {
        self.clients = clients;
        self.resources = resources;
        self
    }
}

/// Generates a valid instance; the same seed yields the same instance.
///
/// Zero requirements and zero capacities are deliberately possible, so
/// generated instances reach the boundary cases of every cost component.
pub fn random_instance(config: GeneratorConfig, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);

    let clients: Vec<Client> = (0..config.clients)
        .map(|i| Client::new(format!("S{}", i + 1), rng.random_range(0..=config.max_requirement)))
        .collect();
    let resources: Vec<Resource> = (0..config.resources)
        .map(|i| {
            Resource::new(
                format!("W{}", i + 1),
                rng.random_range(0..=config.max_capacity),
                rng.random_range(0..=config.max_fixed_cost),
            )
        })
        .collect();
    let costs: Vec<Vec<i64>> = (0..config.clients)
        .map(|_| {
            (0..config.resources)
                .map(|_| rng.random_range(0..=config.max_unit_cost))
                .collect()
        })
        .collect();

    Instance::builder()
        .with_clients(clients)
        .with_resources(resources)
        .with_unit_costs(costs)
        .build()
        .expect("generated instance is valid")
}

/// Assigns every client of `state` to a uniformly drawn resource.
pub fn random_assignment<R: Rng>(state: &mut Assignment<'_>, rng: &mut R) {
    let resources = state.instance().resource_count();
    if resources == 0 {
        return;
    }
    for client in 0..state.instance().client_count() {
        state.assign(client, rng.random_range(0..resources));
    }
}
