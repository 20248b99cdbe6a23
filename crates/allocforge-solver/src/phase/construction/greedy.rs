//! Least-marginal-cost construction.

use std::time::Instant;

use allocforge_core::Assignment;
use rand::Rng;
use tracing::{debug, info};

use super::{ConstructionSummary, Constructor};

/// Greedy constructor.
///
/// At each step, over every unassigned client `c` and every resource `r`
/// with `residual_capacity(r) > requirement(c)`, computes the marginal cost
///
/// ```text
/// requirement(c) * cost(c, r) + fixed(r) * requirement(c) / capacity(r)   (r empty)
/// requirement(c) * cost(c, r)                                             (r open)
/// ```
///
/// and commits the cheapest pair, the first one found on ties (clients then
/// resources in id order). When no pair fits, the remaining clients all go
/// to the fallback resource, whatever the overload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyConstructor {
    fallback_resource: usize,
}

impl GreedyConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource receiving the clients that fit nowhere.
    ///
    /// An index beyond the instance's resources falls back to resource 0.
    pub fn with_fallback_resource(mut self, resource: usize) -> Self {
        self.fallback_resource = resource;
        self
    }

    pub fn fallback_resource(&self) -> usize {
        self.fallback_resource
    }

    /// Cheapest fitting (client, resource) pair, if any.
    fn best_pair(state: &Assignment<'_>) -> Option<(usize, usize)> {
        let instance = state.instance();
        let mut best: Option<(f64, usize, usize)> = None;

        for client in (0..instance.client_count()).filter(|&c| state.assignment(c).is_none()) {
            let requirement = instance.requirement(client);
            for resource in 0..instance.resource_count() {
                if state.residual_capacity(resource) <= requirement {
                    continue;
                }
                let mut cost = instance.supply_cost(client, resource) as f64;
                if state.load(resource) == 0 {
                    cost += instance.fixed_cost(resource) as f64 * requirement as f64
                        / instance.capacity(resource) as f64;
                }
                if best.map_or(true, |(b, _, _)| cost < b) {
                    best = Some((cost, client, resource));
                }
            }
        }
        best.map(|(_, c, r)| (c, r))
    }

    /// Runs the construction on `state`.
    pub fn run(&self, state: &mut Assignment<'_>) -> ConstructionSummary {
        let start = Instant::now();
        let mut summary = ConstructionSummary::default();

        while let Some((client, resource)) = Self::best_pair(state) {
            state.assign(client, resource);
            summary.placed += 1;
            debug!(event = "step", step = summary.placed, client, resource);
        }

        let resources = state.instance().resource_count();
        if resources > 0 {
            let fallback = if self.fallback_resource < resources {
                self.fallback_resource
            } else {
                0
            };
            for client in 0..state.instance().client_count() {
                if state.assignment(client).is_none() {
                    state.assign(client, fallback);
                    summary.fallback += 1;
                }
            }
            if summary.fallback > 0 {
                info!(
                    event = "construction_fallback",
                    resource = fallback,
                    clients = summary.fallback,
                );
            }
        }

        summary.duration = start.elapsed();
        summary
    }
}

impl Constructor for GreedyConstructor {
    fn construct<R: Rng>(&self, state: &mut Assignment<'_>, _rng: &mut R) -> ConstructionSummary {
        self.run(state)
    }

    fn phase_name(&self) -> &'static str {
        "Greedy Construction"
    }
}
