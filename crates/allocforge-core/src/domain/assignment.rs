//! Mutable assignment state with incrementally maintained loads.

use crate::error::ConsistencyError;

use super::instance::Instance;

/// Assignment of every client to at most one resource.
///
/// `load(r)` always equals the sum of the requirements of the clients
/// assigned to `r`: every mutation goes through [`assign`](Self::assign) or
/// [`unassign`](Self::unassign), which update the assignment and the loads
/// of the touched resources together.
///
/// The state borrows its [`Instance`]; any number of states may share one
/// instance, each owned by a single search worker.
///
/// # Example
///
/// ```
/// use allocforge_core::{Assignment, Client, Instance, Resource};
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 2))
///     .with_client(Client::new("S2", 3))
///     .with_resource(Resource::new("W1", 4, 10))
///     .with_resource(Resource::new("W2", 4, 10))
///     .with_unit_costs(vec![vec![1, 5], vec![5, 1]])
///     .build()
///     .unwrap();
///
/// let mut state = Assignment::new(&instance);
/// state.assign(0, 0);
/// state.assign(1, 0);
/// assert_eq!(state.load(0), 5);
///
/// state.assign(1, 1);
/// assert_eq!(state.load(0), 2);
/// assert_eq!(state.load(1), 3);
/// assert!(state.check_consistency().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Assignment<'a> {
    instance: &'a Instance,
    assignment: Vec<Option<usize>>,
    load: Vec<i64>,
    unassigned: usize,
}

impl<'a> Assignment<'a> {
    /// Creates an all-unassigned state over `instance`.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            assignment: vec![None; instance.client_count()],
            load: vec![0; instance.resource_count()],
            unassigned: instance.client_count(),
        }
    }

    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Returns to the all-unassigned state.
    pub fn reset(&mut self) {
        self.assignment.fill(None);
        self.load.fill(0);
        self.unassigned = self.assignment.len();
    }

    /// Resource currently serving `client`, if any.
    #[inline]
    pub fn assignment(&self, client: usize) -> Option<usize> {
        self.assignment[client]
    }

    /// Read-only view of the whole assignment, one entry per client.
    pub fn assignments(&self) -> &[Option<usize>] {
        &self.assignment
    }

    #[inline]
    pub fn load(&self, resource: usize) -> i64 {
        self.load[resource]
    }

    pub fn loads(&self) -> &[i64] {
        &self.load
    }

    /// Capacity left on `resource`; negative when it is overloaded.
    #[inline]
    pub fn residual_capacity(&self, resource: usize) -> i64 {
        self.instance.capacity(resource) - self.load[resource]
    }

    /// A resource is open while it carries some load.
    #[inline]
    pub fn is_open(&self, resource: usize) -> bool {
        self.load[resource] > 0
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned
    }

    /// Returns true once every client has a resource.
    pub fn is_complete(&self) -> bool {
        self.unassigned == 0
    }

    /// Clients assigned to `resource`, in id order.
    pub fn clients_of(&self, resource: usize) -> impl Iterator<Item = usize> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .filter(move |(_, r)| **r == Some(resource))
            .map(|(c, _)| c)
    }

    /// Assigns `client` to `resource`, releasing its previous resource.
    ///
    /// Returns the previous resource. Both loads are updated before the
    /// call returns.
    pub fn assign(&mut self, client: usize, resource: usize) -> Option<usize> {
        let requirement = self.instance.requirement(client);
        let previous = self.assignment[client].replace(resource);
        match previous {
            Some(old) => self.load[old] -= requirement,
            None => self.unassigned -= 1,
        }
        self.load[resource] += requirement;
        previous
    }

    /// Removes `client` from its resource, returning that resource.
    pub fn unassign(&mut self, client: usize) -> Option<usize> {
        let previous = self.assignment[client].take();
        if let Some(old) = previous {
            self.load[old] -= self.instance.requirement(client);
            self.unassigned += 1;
        }
        previous
    }

    /// Recomputes every load from the assignment and compares it against the
    /// maintained aggregate.
    ///
    /// # Errors
    ///
    /// Returns the first resource whose load drifted.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut recomputed = vec![0i64; self.load.len()];
        for (client, resource) in self.assignment.iter().enumerate() {
            if let Some(r) = resource {
                recomputed[*r] += self.instance.requirement(client);
            }
        }
        for (resource, (&maintained, &recomputed)) in
            self.load.iter().zip(recomputed.iter()).enumerate()
        {
            if maintained != recomputed {
                return Err(ConsistencyError {
                    resource,
                    maintained,
                    recomputed,
                });
            }
        }
        Ok(())
    }
}

impl PartialEq for Assignment<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.instance, other.instance) && self.assignment == other.assignment
    }
}

impl Eq for Assignment<'_> {}
