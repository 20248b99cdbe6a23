//! Serde-backed instance files.
//!
//! Instances are described in TOML or YAML:
//!
//! ```toml
//! unit_costs = [[1]]
//!
//! [[clients]]
//! id = "S1"
//! requirement = 2
//!
//! [[resources]]
//! id = "W1"
//! capacity = 4
//! fixed_cost = 10
//! ```
//!
//! A resource without `capacity` is unbounded. When `unit_costs` is absent,
//! every client and resource needs `coordinates = [x, y]` and the unit cost
//! is the rounded euclidean distance.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::instance::{Client, Instance, Resource, UNBOUNDED};
use crate::error::{AllocError, Result};

/// File representation of a client.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientData {
    pub id: String,
    pub requirement: i64,
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    #[serde(default)]
    pub incompatible: Vec<String>,
    #[serde(default)]
    pub unavailable: Vec<String>,
}

/// File representation of a resource.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResourceData {
    pub id: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub fixed_cost: i64,
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
}

/// File representation of a whole instance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InstanceData {
    #[serde(default)]
    pub clients: Vec<ClientData>,
    #[serde(default)]
    pub resources: Vec<ResourceData>,
    #[serde(default)]
    pub unit_costs: Option<Vec<Vec<i64>>>,
}

impl TryFrom<InstanceData> for Instance {
    type Error = AllocError;

    fn try_from(data: InstanceData) -> Result<Self> {
        let clients = data.clients.into_iter().map(|c| {
            let mut client = Client::new(c.id, c.requirement)
                .with_incompatible(c.incompatible)
                .with_unavailable(c.unavailable);
            if let Some([x, y]) = c.coordinates {
                client = client.with_coordinates(x, y);
            }
            client
        });
        let resources = data.resources.into_iter().map(|r| {
            let mut resource = Resource::new(r.id, r.capacity.unwrap_or(UNBOUNDED), r.fixed_cost);
            if let Some([x, y]) = r.coordinates {
                resource = resource.with_coordinates(x, y);
            }
            resource
        });

        let builder = Instance::builder()
            .with_clients(clients)
            .with_resources(resources);
        match data.unit_costs {
            Some(rows) => builder.with_unit_costs(rows).build(),
            None => builder.with_distance_costs().build(),
        }
    }
}

impl Instance {
    /// Parses and validates an instance from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let data: InstanceData = toml::from_str(s)?;
        Instance::try_from(data)
    }

    /// Parses and validates an instance from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let data: InstanceData = serde_yaml::from_str(s)?;
        Instance::try_from(data)
    }

    /// Loads an instance file; `.yaml`/`.yml` files are read as YAML,
    /// anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }
}
