//! Local search phase implementation.

use allocforge_core::{Assignment, HardSoftCost};
use allocforge_scoring::ComponentSet;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::error::SolverError;
use crate::heuristic::explorer::NeighborhoodExplorer;
use crate::manager::SolutionManager;
use crate::phase::localsearch::Acceptor;
use crate::stats::PhaseStats;
use crate::termination::Termination;

/// How a step picks its candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    /// One random move per step.
    Random,
    /// The cheapest move of the whole neighborhood; the first one in
    /// enumeration order wins ties. The phase ends when it is rejected.
    BestOfNeighborhood,
}

/// What a local search phase left behind.
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome {
    /// Cost of the best assignment, now held by the state.
    pub cost: HardSoftCost,
    pub stats: PhaseStats,
}

/// Local search phase that improves an existing assignment.
///
/// Each step:
/// 1. Picks a candidate move (random, or best of the neighborhood)
/// 2. Scores it with the explorer's delta set
/// 3. Applies it if the acceptor agrees, updating the running cost
///
/// The best assignment is only copied when the search is about to leave it
/// with a worsening move, and is restored into the state when the phase
/// ends.
///
/// # Example
///
/// ```
/// use allocforge_core::{Assignment, Client, Instance, Resource};
/// use allocforge_scoring::standard_components;
/// use allocforge_solver::phase::localsearch::{
///     ImprovingAcceptor, LocalSearchPhase, MoveSelection,
/// };
/// use allocforge_solver::termination::Termination;
/// use allocforge_solver::{ChangeNeighborhoodExplorer, SolutionManager};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 1))
///     .with_resource(Resource::new("W1", 5, 0))
///     .with_resource(Resource::new("W2", 5, 0))
///     .with_unit_costs(vec![vec![9, 1]])
///     .build()
///     .unwrap();
/// let manager = SolutionManager::new(standard_components());
/// let explorer = ChangeNeighborhoodExplorer::standard();
/// let mut state = Assignment::new(&instance);
/// state.assign(0, 0);
///
/// let mut phase = LocalSearchPhase::new(
///     ImprovingAcceptor::new(),
///     MoveSelection::BestOfNeighborhood,
///     Termination::new(),
/// );
/// let outcome = phase
///     .solve(&manager, &explorer, &mut state, &mut StdRng::seed_from_u64(0))
///     .unwrap();
/// assert_eq!(state.assignment(0), Some(1));
/// assert_eq!(outcome.cost.soft(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearchPhase<A> {
    acceptor: A,
    selection: MoveSelection,
    termination: Termination,
    phase_name: &'static str,
    phase_index: usize,
    consistency_check_interval: Option<u64>,
}

impl<A: Acceptor> LocalSearchPhase<A> {
    /// Creates a new local search phase.
    pub fn new(acceptor: A, selection: MoveSelection, termination: Termination) -> Self {
        let phase_name = match selection {
            MoveSelection::Random => "Local Search",
            MoveSelection::BestOfNeighborhood => "Steepest Descent",
        };
        Self {
            acceptor,
            selection,
            termination,
            phase_name,
            phase_index: 1,
            consistency_check_interval: None,
        }
    }

    /// Sets the name reported in phase events.
    pub fn with_phase_name(mut self, name: &'static str) -> Self {
        self.phase_name = name;
        self
    }

    pub fn with_phase_index(mut self, index: usize) -> Self {
        self.phase_index = index;
        self
    }

    /// Recomputes loads and cost every `interval` steps and at the end,
    /// failing the phase on any drift.
    pub fn with_consistency_checks(mut self, interval: u64) -> Self {
        self.consistency_check_interval = Some(interval.max(1));
        self
    }

    pub fn phase_name(&self) -> &'static str {
        self.phase_name
    }

    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }

    /// Improves `state` in place and leaves the best assignment found in it.
    ///
    /// # Errors
    ///
    /// Only fails with consistency checks enabled, when loads or the running
    /// cost no longer match a full recomputation.
    pub fn solve<'a, C, E>(
        &mut self,
        manager: &SolutionManager<C>,
        explorer: &E,
        state: &mut Assignment<'a>,
        rng: &mut StdRng,
    ) -> Result<LocalSearchOutcome, SolverError>
    where
        C: ComponentSet<Assignment<'a>>,
        E: NeighborhoodExplorer<Assignment<'a>>,
    {
        let mut stats = PhaseStats::new(self.phase_index, self.phase_name);
        let mut current = manager.evaluate(state);
        let mut best = current;
        // Copy of the best assignment while the state has moved away from it.
        let mut best_snapshot: Option<Assignment<'a>> = None;

        info!(
            event = "phase_start",
            phase = self.phase_name,
            phase_index = self.phase_index,
            score = %current,
        );
        self.acceptor.phase_started();

        loop {
            if self.termination.is_terminated(&stats) || self.acceptor.is_exhausted() {
                break;
            }

            let candidate = match self.selection {
                MoveSelection::Random => explorer.random_move(state, rng).map(|mv| {
                    let delta = explorer.delta_cost(state, &mv);
                    stats.record_evaluations(1);
                    (mv, delta)
                }),
                MoveSelection::BestOfNeighborhood => {
                    best_of_neighborhood(explorer, state, &mut stats)
                }
            };
            let Some((mv, delta)) = candidate else {
                debug!(event = "empty_neighborhood", step = stats.step_count);
                break;
            };

            let accepted = self.acceptor.is_accepted(delta, rng);
            if !accepted && self.selection == MoveSelection::BestOfNeighborhood {
                debug!(event = "local_optimum", step = stats.step_count, score = %current);
                break;
            }

            stats.record_step();
            if accepted {
                stats.record_accepted();
                if best_snapshot.is_none() && delta > HardSoftCost::ZERO {
                    best_snapshot = Some(state.clone());
                }
                explorer.make_move(state, &mv);
                current = current + delta;

                if current < best {
                    best = current;
                    best_snapshot = None;
                    stats.record_improvement();
                    debug!(event = "new_best", step = stats.step_count, score = %best);
                } else {
                    if current == best {
                        best_snapshot = None;
                    }
                    stats.record_unimproved();
                }
            } else {
                stats.record_unimproved();
            }

            trace!(
                event = "step",
                step = stats.step_count,
                mv = ?mv,
                delta = %delta,
                score = %current,
                accepted,
            );
            self.acceptor.step_ended();

            if let Some(interval) = self.consistency_check_interval {
                if stats.step_count % interval == 0 {
                    verify(manager, state, current, stats.step_count)?;
                }
            }
        }

        if let Some(snapshot) = best_snapshot {
            *state = snapshot;
        }
        if self.consistency_check_interval.is_some() {
            verify(manager, state, best, stats.step_count)?;
        }

        info!(
            event = "phase_end",
            phase = self.phase_name,
            phase_index = self.phase_index,
            duration_ms = stats.elapsed_ms(),
            steps = stats.step_count,
            speed = stats.moves_per_second(),
            score = %best,
        );

        Ok(LocalSearchOutcome { cost: best, stats })
    }
}

/// Cheapest move of the neighborhood, with its delta.
fn best_of_neighborhood<'a, E>(
    explorer: &E,
    state: &Assignment<'a>,
    stats: &mut PhaseStats,
) -> Option<(E::Move, HardSoftCost)>
where
    E: NeighborhoodExplorer<Assignment<'a>>,
{
    let mut best: Option<(E::Move, HardSoftCost)> = None;
    let mut evaluated = 0;
    for mv in explorer.moves(state) {
        let delta = explorer.delta_cost(state, &mv);
        evaluated += 1;
        if best.as_ref().map_or(true, |(_, b)| delta < *b) {
            best = Some((mv, delta));
        }
    }
    stats.record_evaluations(evaluated);
    best
}

fn verify<'a, C>(
    manager: &SolutionManager<C>,
    state: &Assignment<'a>,
    maintained: HardSoftCost,
    step: u64,
) -> Result<(), SolverError>
where
    C: ComponentSet<Assignment<'a>>,
{
    manager.check_consistency(state)?;
    let recomputed = manager.evaluate(state);
    if recomputed != maintained {
        return Err(SolverError::CostDrift {
            step,
            maintained,
            recomputed,
        });
    }
    Ok(())
}
