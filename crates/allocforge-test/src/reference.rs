//! Brute-force reference computations.
//!
//! These functions only read the assignment vector and the instance; they
//! never look at the maintained loads, so they can be used to validate the
//! incremental machinery.

use allocforge_core::{Assignment, Instance};

/// Unweighted cost of each dimension, recomputed from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceCosts {
    pub supply: i64,
    pub opening: i64,
    pub capacity: i64,
}

impl ReferenceCosts {
    /// `supply + opening + hard_weight * capacity`.
    pub fn total(&self, hard_weight: i64) -> i64 {
        self.supply + self.opening + hard_weight * self.capacity
    }
}

/// Computes the reference costs of `assignment` on `instance`.
pub fn reference_costs(instance: &Instance, assignment: &[Option<usize>]) -> ReferenceCosts {
    let mut load = vec![0i64; instance.resource_count()];
    let mut supply = 0;
    for (client, resource) in assignment.iter().enumerate() {
        if let Some(r) = *resource {
            let requirement = instance.requirement(client);
            load[r] += requirement;
            supply += requirement * instance.unit_cost(client, r);
        }
    }

    let mut opening = 0;
    let mut capacity = 0;
    for (r, l) in load.iter().enumerate() {
        if *l > 0 {
            opening += instance.fixed_cost(r);
        }
        capacity += (l - instance.capacity(r)).max(0);
    }

    ReferenceCosts {
        supply,
        opening,
        capacity,
    }
}

/// Reference costs of a state.
pub fn state_costs(state: &Assignment<'_>) -> ReferenceCosts {
    reference_costs(state.instance(), state.assignments())
}

/// Best complete assignment by exhaustive enumeration, ranked by
/// `ReferenceCosts::total(hard_weight)`.
///
/// Exponential; only meant for instances with a handful of clients.
pub fn exhaustive_optimum(instance: &Instance, hard_weight: i64) -> (Vec<Option<usize>>, i64) {
    let clients = instance.client_count();
    let resources = instance.resource_count();
    let mut current = vec![0usize; clients];
    let mut best: Option<(Vec<Option<usize>>, i64)> = None;

    if resources == 0 {
        return (Vec::new(), 0);
    }

    loop {
        let assignment: Vec<Option<usize>> = current.iter().map(|r| Some(*r)).collect();
        let total = reference_costs(instance, &assignment).total(hard_weight);
        if best.as_ref().map_or(true, |(_, b)| total < *b) {
            best = Some((assignment, total));
        }

        // odometer increment
        let mut pos = 0;
        loop {
            if pos == clients {
                return best.unwrap_or_default();
            }
            current[pos] += 1;
            if current[pos] < resources {
                break;
            }
            current[pos] = 0;
            pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::scenario_instance;

    #[test]
    fn test_reference_costs_of_scenario() {
        let instance = scenario_instance();
        let costs = reference_costs(&instance, &[Some(0), Some(1), Some(0)]);
        assert_eq!(
            costs,
            ReferenceCosts {
                supply: 7,
                opening: 20,
                capacity: 0
            }
        );

        let crowded = reference_costs(&instance, &[Some(0), Some(0), Some(0)]);
        assert_eq!(crowded.capacity, 2);
        assert_eq!(crowded.opening, 10);
        assert_eq!(crowded.supply, 2 + 15 + 2);
    }

    #[test]
    fn test_exhaustive_optimum_of_scenario() {
        let instance = scenario_instance();
        let (_, total) = exhaustive_optimum(&instance, 1000);
        assert_eq!(total, 27);
    }
}
