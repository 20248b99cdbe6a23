//! Uniformly random construction.

use std::time::Instant;

use allocforge_core::Assignment;
use rand::Rng;

use super::{ConstructionSummary, Constructor};

/// Assigns every unassigned client to a uniformly drawn resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomConstructor;

impl RandomConstructor {
    pub fn new() -> Self {
        Self
    }
}

impl Constructor for RandomConstructor {
    fn construct<R: Rng>(&self, state: &mut Assignment<'_>, rng: &mut R) -> ConstructionSummary {
        let start = Instant::now();
        let mut summary = ConstructionSummary::default();
        let resources = state.instance().resource_count();
        if resources == 0 {
            return summary;
        }

        for client in 0..state.instance().client_count() {
            if state.assignment(client).is_none() {
                state.assign(client, rng.random_range(0..resources));
                summary.placed += 1;
            }
        }
        summary.duration = start.elapsed();
        summary
    }

    fn phase_name(&self) -> &'static str {
        "Random Construction"
    }
}
