//! Change neighborhood: every client to every other resource.

use allocforge_core::{Assignment, HardSoftCost};
use allocforge_scoring::DeltaSet;
use rand::Rng;

use super::NeighborhoodExplorer;
use crate::heuristic::r#move::ChangeMove;

/// Explorer of the change neighborhood, scoring moves with a delta set.
///
/// Enumeration visits clients in id order and, for each client, resources
/// in id order, skipping the resource the client currently occupies.
/// An unassigned client may go to any resource.
///
/// # Example
///
/// ```
/// use allocforge_core::{Assignment, Client, Instance, Resource};
/// use allocforge_solver::{ChangeNeighborhoodExplorer, NeighborhoodExplorer};
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 1))
///     .with_client(Client::new("S2", 1))
///     .with_resource(Resource::new("W1", 5, 0))
///     .with_resource(Resource::new("W2", 5, 0))
///     .with_resource(Resource::new("W3", 5, 0))
///     .with_unit_costs(vec![vec![1, 1, 1], vec![1, 1, 1]])
///     .build()
///     .unwrap();
/// let mut state = Assignment::new(&instance);
/// state.assign(0, 0);
/// state.assign(1, 2);
///
/// let explorer = ChangeNeighborhoodExplorer::standard();
/// let moves: Vec<String> = explorer.moves(&state).map(|m| m.to_string()).collect();
/// assert_eq!(moves, ["0:0->1", "0:0->2", "1:2->0", "1:2->1"]);
/// ```
#[derive(Debug, Clone)]
pub struct ChangeNeighborhoodExplorer<D> {
    deltas: D,
}

impl<D> ChangeNeighborhoodExplorer<D> {
    pub fn new(deltas: D) -> Self {
        Self { deltas }
    }

    pub fn deltas(&self) -> &D {
        &self.deltas
    }
}

impl ChangeNeighborhoodExplorer<crate::heuristic::delta::StandardDeltas> {
    /// Explorer over the standard components with default weights.
    pub fn standard() -> Self {
        Self::new(crate::heuristic::delta::standard_deltas(
            &allocforge_scoring::standard_components(),
        ))
    }
}

/// First move at or after `(client, resource)` in enumeration order.
fn scan_from(state: &Assignment<'_>, mut client: usize, mut resource: usize) -> Option<ChangeMove> {
    let instance = state.instance();
    let clients = instance.client_count();
    let resources = instance.resource_count();

    while client < clients {
        let current = state.assignment(client);
        while resource < resources {
            if current != Some(resource) {
                return Some(ChangeMove::new(client, current, resource));
            }
            resource += 1;
        }
        client += 1;
        resource = 0;
    }
    None
}

impl<'a, D> NeighborhoodExplorer<Assignment<'a>> for ChangeNeighborhoodExplorer<D>
where
    D: DeltaSet<Assignment<'a>, ChangeMove>,
{
    type Move = ChangeMove;

    fn random_move<R: Rng>(
        &self,
        state: &Assignment<'a>,
        rng: &mut R,
    ) -> Option<ChangeMove> {
        let instance = state.instance();
        let clients = instance.client_count();
        let resources = instance.resource_count();
        if clients == 0 || resources < 2 {
            return None;
        }

        let client = rng.random_range(0..clients);
        let from = state.assignment(client);
        let to = loop {
            let r = rng.random_range(0..resources);
            if from != Some(r) {
                break r;
            }
        };
        Some(ChangeMove::new(client, from, to))
    }

    fn is_feasible(&self, state: &Assignment<'a>, mv: &ChangeMove) -> bool {
        let instance = state.instance();
        instance.is_valid_client(mv.client)
            && instance.is_valid_resource(mv.to)
            && state.assignment(mv.client) == mv.from
            && !mv.is_noop()
    }

    fn make_move(&self, state: &mut Assignment<'a>, mv: &ChangeMove) {
        debug_assert!(self.is_feasible(state, mv), "infeasible move {}", mv);
        state.assign(mv.client, mv.to);
    }

    fn first_move(&self, state: &Assignment<'a>) -> Option<ChangeMove> {
        scan_from(state, 0, 0)
    }

    fn next_move(&self, state: &Assignment<'a>, mv: &mut ChangeMove) -> bool {
        match scan_from(state, mv.client, mv.to + 1) {
            Some(next) => {
                *mv = next;
                true
            }
            None => false,
        }
    }

    #[inline]
    fn delta_cost(&self, state: &Assignment<'a>, mv: &ChangeMove) -> HardSoftCost {
        self.deltas.delta_all(state, mv)
    }
}
