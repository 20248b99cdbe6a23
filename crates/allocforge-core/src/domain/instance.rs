//! Immutable problem data.

use std::collections::HashMap;

use crate::error::{AllocError, Result};

/// Capacity of a resource that can serve any load.
pub const UNBOUNDED: i64 = i64::MAX;

/// Planar coordinates used to derive distance-based unit costs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The demand side of the problem: a store, a game.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    code: String,
    requirement: i64,
    coordinates: Option<Coordinates>,
    incompatible: Vec<String>,
    unavailable: Vec<String>,
}

impl Client {
    /// Creates a client with the given id and requirement.
    pub fn new(code: impl Into<String>, requirement: i64) -> Self {
        Self {
            code: code.into(),
            requirement,
            coordinates: None,
            incompatible: Vec::new(),
            unavailable: Vec::new(),
        }
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates::new(x, y));
        self
    }

    /// Records entities this client cannot be combined with.
    pub fn with_incompatible<I, T>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.incompatible.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Records time windows in which this client cannot be served.
    pub fn with_unavailable<I, T>(mut self, windows: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.unavailable.extend(windows.into_iter().map(Into::into));
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn requirement(&self) -> i64 {
        self.requirement
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn incompatible(&self) -> &[String] {
        &self.incompatible
    }

    pub fn unavailable(&self) -> &[String] {
        &self.unavailable
    }
}

/// The supply side of the problem: a warehouse, a referee.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    code: String,
    capacity: i64,
    fixed_cost: i64,
    coordinates: Option<Coordinates>,
}

impl Resource {
    /// Creates a resource with a finite capacity and an opening cost.
    pub fn new(code: impl Into<String>, capacity: i64, fixed_cost: i64) -> Self {
        Self {
            code: code.into(),
            capacity,
            fixed_cost,
            coordinates: None,
        }
    }

    /// Creates a resource without capacity limit.
    pub fn unbounded(code: impl Into<String>, fixed_cost: i64) -> Self {
        Self::new(code, UNBOUNDED, fixed_cost)
    }

    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some(Coordinates::new(x, y));
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn is_unbounded(&self) -> bool {
        self.capacity == UNBOUNDED
    }

    pub fn fixed_cost(&self) -> i64 {
        self.fixed_cost
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

/// Immutable problem data shared by every state evaluated during a run.
///
/// Clients and resources are addressed by their position (id order).
/// `unit_cost(c, r)` is the per-unit cost of serving client `c` from `r`.
#[derive(Debug, Clone)]
pub struct Instance {
    clients: Vec<Client>,
    resources: Vec<Resource>,
    // row-major, one row per client
    unit_costs: Vec<i64>,
    client_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
}

impl Instance {
    /// Starts building an instance.
    pub fn builder() -> InstanceBuilder {
        InstanceBuilder::new()
    }

    #[inline]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    #[inline]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn client(&self, client: usize) -> &Client {
        &self.clients[client]
    }

    pub fn resource(&self, resource: usize) -> &Resource {
        &self.resources[resource]
    }

    #[inline]
    pub fn requirement(&self, client: usize) -> i64 {
        self.clients[client].requirement
    }

    #[inline]
    pub fn capacity(&self, resource: usize) -> i64 {
        self.resources[resource].capacity
    }

    #[inline]
    pub fn fixed_cost(&self, resource: usize) -> i64 {
        self.resources[resource].fixed_cost
    }

    /// Per-unit cost of serving `client` from `resource`.
    #[inline]
    pub fn unit_cost(&self, client: usize, resource: usize) -> i64 {
        self.unit_costs[client * self.resources.len() + resource]
    }

    /// Cost of serving the whole requirement of `client` from `resource`.
    #[inline]
    pub fn supply_cost(&self, client: usize, resource: usize) -> i64 {
        self.requirement(client) * self.unit_cost(client, resource)
    }

    /// Looks up a client position by its id.
    pub fn client_index(&self, code: &str) -> Option<usize> {
        self.client_index.get(code).copied()
    }

    /// Looks up a resource position by its id.
    pub fn resource_index(&self, code: &str) -> Option<usize> {
        self.resource_index.get(code).copied()
    }

    pub fn is_valid_client(&self, client: usize) -> bool {
        client < self.clients.len()
    }

    pub fn is_valid_resource(&self, resource: usize) -> bool {
        resource < self.resources.len()
    }

    /// Sum of all client requirements.
    pub fn total_requirement(&self) -> i64 {
        self.clients.iter().map(|c| c.requirement).sum()
    }

    /// Sum of all capacities, saturating at [`UNBOUNDED`].
    pub fn total_capacity(&self) -> i64 {
        self.resources
            .iter()
            .fold(0i64, |acc, r| acc.saturating_add(r.capacity))
    }
}

/// Source of the unit cost matrix.
#[derive(Debug, Clone, Default)]
enum CostSource {
    #[default]
    Unset,
    Matrix(Vec<Vec<i64>>),
    Distances,
}

/// Builder validating the model invariants before producing an [`Instance`].
///
/// # Example
///
/// ```
/// use allocforge_core::{Client, Instance, Resource};
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 2))
///     .with_client(Client::new("S2", 3))
///     .with_resource(Resource::new("W1", 4, 10))
///     .with_unit_costs(vec![vec![1], vec![5]])
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.supply_cost(1, 0), 15);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    clients: Vec<Client>,
    resources: Vec<Resource>,
    costs: CostSource,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    pub fn with_clients(mut self, clients: impl IntoIterator<Item = Client>) -> Self {
        self.clients.extend(clients);
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    pub fn with_resources(mut self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources.extend(resources);
        self
    }

    /// Uses an explicit client-by-resource unit cost matrix.
    pub fn with_unit_costs(mut self, rows: Vec<Vec<i64>>) -> Self {
        self.costs = CostSource::Matrix(rows);
        self
    }

    /// Derives unit costs from the rounded euclidean distance between each
    /// client and each resource. Every entity must carry coordinates.
    pub fn with_distance_costs(mut self) -> Self {
        self.costs = CostSource::Distances;
        self
    }

    /// Validates the data and builds the instance.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::InvalidInstance`] on duplicate ids, negative
    /// quantities, a cost matrix of the wrong shape, missing coordinates,
    /// clients without any resource to serve them, or quantities so large
    /// that a total cost or load could overflow `i64`.
    pub fn build(self) -> Result<Instance> {
        let mut client_index = HashMap::with_capacity(self.clients.len());
        for (i, c) in self.clients.iter().enumerate() {
            if c.requirement < 0 {
                return Err(invalid(format!(
                    "client {} has negative requirement {}",
                    c.code, c.requirement
                )));
            }
            if client_index.insert(c.code.clone(), i).is_some() {
                return Err(invalid(format!("duplicate client id {}", c.code)));
            }
        }

        let mut resource_index = HashMap::with_capacity(self.resources.len());
        for (i, r) in self.resources.iter().enumerate() {
            if r.capacity < 0 {
                return Err(invalid(format!(
                    "resource {} has negative capacity {}",
                    r.code, r.capacity
                )));
            }
            if r.fixed_cost < 0 {
                return Err(invalid(format!(
                    "resource {} has negative fixed cost {}",
                    r.code, r.fixed_cost
                )));
            }
            if resource_index.insert(r.code.clone(), i).is_some() {
                return Err(invalid(format!("duplicate resource id {}", r.code)));
            }
        }

        if !self.clients.is_empty() && self.resources.is_empty() {
            return Err(invalid("clients present but no resource to serve them"));
        }

        let n_resources = self.resources.len();
        let unit_costs = match self.costs {
            CostSource::Matrix(rows) => {
                if rows.len() != self.clients.len() {
                    return Err(invalid(format!(
                        "cost matrix has {} rows, expected {}",
                        rows.len(),
                        self.clients.len()
                    )));
                }
                let mut flat = Vec::with_capacity(rows.len() * n_resources);
                for (c, row) in rows.into_iter().enumerate() {
                    if row.len() != n_resources {
                        return Err(invalid(format!(
                            "cost row of client {} has {} entries, expected {}",
                            self.clients[c].code,
                            row.len(),
                            n_resources
                        )));
                    }
                    if let Some(v) = row.iter().find(|v| **v < 0) {
                        return Err(invalid(format!(
                            "cost row of client {} contains negative cost {}",
                            self.clients[c].code, v
                        )));
                    }
                    flat.extend(row);
                }
                flat
            }
            CostSource::Distances => distance_costs(&self.clients, &self.resources)?,
            CostSource::Unset if self.clients.is_empty() || n_resources == 0 => Vec::new(),
            CostSource::Unset => return Err(invalid("no unit cost matrix or coordinates given")),
        };
        check_cost_bounds(&self.clients, &self.resources, &unit_costs)?;

        Ok(Instance {
            clients: self.clients,
            resources: self.resources,
            unit_costs,
            client_index,
            resource_index,
        })
    }
}

/// Rejects instances whose worst-case supply plus opening cost, or whose
/// total requirement, does not fit in `i64`. Every cost and load computed on
/// a valid instance is then overflow free.
fn check_cost_bounds(clients: &[Client], resources: &[Resource], unit_costs: &[i64]) -> Result<()> {
    let overflow = || invalid("quantities too large: total cost or load overflows i64");
    let n_resources = resources.len();
    let mut worst_cost: i64 = 0;
    let mut total_requirement: i64 = 0;
    for (c, client) in clients.iter().enumerate() {
        total_requirement = total_requirement
            .checked_add(client.requirement)
            .ok_or_else(overflow)?;
        let mut worst_supply = 0;
        for &unit in &unit_costs[c * n_resources..(c + 1) * n_resources] {
            let supply = client.requirement.checked_mul(unit).ok_or_else(overflow)?;
            worst_supply = worst_supply.max(supply);
        }
        worst_cost = worst_cost.checked_add(worst_supply).ok_or_else(overflow)?;
    }
    for r in resources {
        worst_cost = worst_cost.checked_add(r.fixed_cost).ok_or_else(overflow)?;
    }
    Ok(())
}

fn distance_costs(clients: &[Client], resources: &[Resource]) -> Result<Vec<i64>> {
    let mut flat = Vec::with_capacity(clients.len() * resources.len());
    for c in clients {
        let from = c
            .coordinates
            .ok_or_else(|| invalid(format!("client {} has no coordinates", c.code)))?;
        for r in resources {
            let to = r
                .coordinates
                .ok_or_else(|| invalid(format!("resource {} has no coordinates", r.code)))?;
            flat.push(from.distance_to(&to).round() as i64);
        }
    }
    Ok(flat)
}

fn invalid(message: impl Into<String>) -> AllocError {
    AllocError::InvalidInstance(message.into())
}
