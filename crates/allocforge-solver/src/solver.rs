//! Solver: construction, local search and parallel restarts wired from a
//! [`SolverConfig`].

use allocforge_config::{
    ConfigError, ConstructionType, EnvironmentMode, LocalSearchType, SolverConfig,
};
use allocforge_core::{Assignment, HardSoftCost, Instance};
use allocforge_scoring::StandardComponents;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::info;

use crate::error::SolverError;
use crate::heuristic::delta::{standard_deltas, StandardDeltas};
use crate::heuristic::explorer::ChangeNeighborhoodExplorer;
use crate::manager::{components_from_config, SolutionManager};
use crate::phase::construction::{
    ConstructionSummary, Constructor, GreedyConstructor, RandomConstructor,
};
use crate::phase::localsearch::{
    Acceptor, HillClimbingAcceptor, ImprovingAcceptor, LocalSearchOutcome, LocalSearchPhase,
    MoveSelection, SimulatedAnnealingAcceptor,
};
use crate::stats::SolverStats;
use crate::termination::Termination;

/// Best assignment of a solve, with the run that produced it.
#[derive(Debug, Clone)]
pub struct SolveResult<'a> {
    pub assignment: Assignment<'a>,
    pub cost: HardSoftCost,
    /// Seed of the winning run.
    pub seed: u64,
    pub stats: SolverStats,
}

/// Runs the configured phases, once per restart.
///
/// Restart `i` uses seed `base + i`, where `base` is the configured seed,
/// `0` in reproducible modes, or drawn from the OS otherwise. Restarts run
/// in parallel on a shared instance and the cheapest result wins; ties go
/// to the lowest seed.
///
/// # Example
///
/// ```
/// use allocforge_config::{LocalSearchType, SolverConfig};
/// use allocforge_core::{Client, HardSoftCost, Instance, Resource};
/// use allocforge_solver::Solver;
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 2))
///     .with_client(Client::new("S2", 3))
///     .with_client(Client::new("S3", 1))
///     .with_resource(Resource::new("W1", 4, 10))
///     .with_resource(Resource::new("W2", 4, 10))
///     .with_unit_costs(vec![vec![1, 5], vec![5, 1], vec![2, 2]])
///     .build()
///     .unwrap();
///
/// let config = SolverConfig::new()
///     .with_random_seed(3)
///     .with_restart_count(2)
///     .with_local_search_type(LocalSearchType::SteepestDescent);
/// let result = Solver::new(config).unwrap().solve(&instance).unwrap();
/// assert_eq!(result.cost, HardSoftCost::of(0, 27));
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Seed of the first restart.
    pub fn base_seed(&self) -> u64 {
        match (self.config.random_seed, self.config.environment_mode) {
            (Some(seed), _) => seed,
            (None, EnvironmentMode::NonReproducible) => rand::random(),
            (None, _) => 0,
        }
    }

    /// Solves `instance` from the empty assignment.
    pub fn solve<'a>(&self, instance: &'a Instance) -> Result<SolveResult<'a>, SolverError> {
        self.solve_from(&Assignment::new(instance))
    }

    /// Solves starting every restart from a copy of `initial`. Construction
    /// only places the clients `initial` leaves unassigned.
    pub fn solve_from<'a>(
        &self,
        initial: &Assignment<'a>,
    ) -> Result<SolveResult<'a>, SolverError> {
        let instance = initial.instance();
        self.check_fallback(instance)?;

        let base_seed = self.base_seed();
        let restarts = self.config.restart_count;
        info!(
            event = "solve_start",
            client_count = instance.client_count(),
            resource_count = instance.resource_count(),
            restarts,
            seed = base_seed,
        );

        let results: Vec<Result<SolveResult<'a>, SolverError>> = (0..restarts)
            .into_par_iter()
            .map(|i| self.run(initial.clone(), base_seed.wrapping_add(i as u64)))
            .collect();

        let mut best: Option<SolveResult<'a>> = None;
        for result in results {
            let result = result?;
            if best.as_ref().map_or(true, |b| result.cost < b.cost) {
                best = Some(result);
            }
        }
        let best = best.ok_or_else(|| {
            SolverError::Config(ConfigError::Invalid(
                "restart_count must be at least 1".to_string(),
            ))
        })?;

        info!(
            event = "solve_end",
            score = %best.cost,
            seed = best.seed,
            steps = best.stats.step_count,
            moves_evaluated = best.stats.moves_evaluated,
        );
        Ok(best)
    }

    /// One run: construction, then local search if configured.
    pub fn run<'a>(
        &self,
        mut state: Assignment<'a>,
        seed: u64,
    ) -> Result<SolveResult<'a>, SolverError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut stats = SolverStats::default();
        stats.start();

        let components = components_from_config(&self.config.components);
        let manager = SolutionManager::new(components);
        let explorer = ChangeNeighborhoodExplorer::new(standard_deltas(&components));

        let summary = self.construct(&mut state, &mut rng);
        stats.constructed = summary.placed;
        stats.fallback = summary.fallback;
        if self.config.is_asserting() {
            manager.check_consistency(&state)?;
        }

        let mut cost = manager.evaluate(&state);
        if let Some(ls) = &self.config.local_search {
            let termination = Termination::from_config(&ls.termination);
            let outcome = match ls.local_search_type {
                LocalSearchType::HillClimbing => self.improve(
                    LocalSearchPhase::new(
                        HillClimbingAcceptor::new(),
                        MoveSelection::Random,
                        termination,
                    )
                    .with_phase_name("Hill Climbing"),
                    &manager,
                    &explorer,
                    &mut state,
                    &mut rng,
                )?,
                LocalSearchType::SteepestDescent => self.improve(
                    LocalSearchPhase::new(
                        ImprovingAcceptor::new(),
                        MoveSelection::BestOfNeighborhood,
                        termination,
                    ),
                    &manager,
                    &explorer,
                    &mut state,
                    &mut rng,
                )?,
                LocalSearchType::SimulatedAnnealing => self.improve(
                    LocalSearchPhase::new(
                        SimulatedAnnealingAcceptor::from_config(&ls.simulated_annealing),
                        MoveSelection::Random,
                        termination,
                    )
                    .with_phase_name("Simulated Annealing"),
                    &manager,
                    &explorer,
                    &mut state,
                    &mut rng,
                )?,
            };
            stats.absorb(&outcome.stats);
            cost = outcome.cost;
        }

        stats.stop();
        Ok(SolveResult {
            assignment: state,
            cost,
            seed,
            stats,
        })
    }

    fn construct(&self, state: &mut Assignment<'_>, rng: &mut StdRng) -> ConstructionSummary {
        let construction = &self.config.construction;
        let greedy = GreedyConstructor::new().with_fallback_resource(construction.fallback_resource);
        let random = RandomConstructor::new();
        let phase = match construction.construction_type {
            ConstructionType::Greedy => greedy.phase_name(),
            ConstructionType::Random => random.phase_name(),
        };

        info!(event = "phase_start", phase, phase_index = 0);
        let summary = match construction.construction_type {
            ConstructionType::Greedy => greedy.construct(state, rng),
            ConstructionType::Random => random.construct(state, rng),
        };
        info!(
            event = "phase_end",
            phase,
            phase_index = 0,
            duration_ms = summary.duration.as_millis() as u64,
            steps = summary.placed as u64,
            fallback = summary.fallback,
        );
        summary
    }

    fn improve<'a, A: Acceptor>(
        &self,
        phase: LocalSearchPhase<A>,
        manager: &SolutionManager<StandardComponents>,
        explorer: &ChangeNeighborhoodExplorer<StandardDeltas>,
        state: &mut Assignment<'a>,
        rng: &mut StdRng,
    ) -> Result<LocalSearchOutcome, SolverError> {
        let mut phase = if self.config.is_asserting() {
            phase.with_consistency_checks(self.config.consistency_check_interval)
        } else {
            phase
        };
        phase.solve(manager, explorer, state, rng)
    }

    fn check_fallback(&self, instance: &Instance) -> Result<(), SolverError> {
        let resource = self.config.construction.fallback_resource;
        let resource_count = instance.resource_count();
        if self.config.construction.construction_type == ConstructionType::Greedy
            && resource_count > 0
            && resource >= resource_count
        {
            return Err(SolverError::InvalidFallback {
                resource,
                resource_count,
            });
        }
        Ok(())
    }
}

/// Solves `instance` with `config`, running its restarts in parallel.
pub fn solve_with_restarts<'a>(
    instance: &'a Instance,
    config: SolverConfig,
) -> Result<SolveResult<'a>, SolverError> {
    Solver::new(config)?.solve(instance)
}

#[cfg(test)]
mod tests {
    use allocforge_config::TerminationConfig;
    use allocforge_core::{Assignment, HardSoftCost};
    use allocforge_test::generator::{random_instance, GeneratorConfig};
    use allocforge_test::{scenario_instance, state_costs};

    use super::*;

    fn config(local_search: LocalSearchType) -> SolverConfig {
        SolverConfig::new()
            .with_random_seed(17)
            .with_local_search_type(local_search)
            .with_step_count_limit(2_000)
    }

    #[test]
    fn test_every_method_finds_scenario_optimum() {
        let instance = scenario_instance();
        for method in [
            LocalSearchType::HillClimbing,
            LocalSearchType::SteepestDescent,
            LocalSearchType::SimulatedAnnealing,
        ] {
            let result = solve_with_restarts(&instance, config(method)).unwrap();
            assert_eq!(result.cost, HardSoftCost::of(0, 27), "{:?}", method);
            assert!(result.assignment.is_complete());
        }
    }

    #[test]
    fn test_construction_only() {
        let instance = random_instance(GeneratorConfig::default(), 5);
        let config = SolverConfig::new()
            .with_random_seed(5)
            .with_construction_type(ConstructionType::Random);
        let result = Solver::new(config).unwrap().solve(&instance).unwrap();

        assert!(result.assignment.is_complete());
        assert_eq!(result.stats.constructed, instance.client_count());
        assert_eq!(result.stats.step_count, 0);
        let reference = state_costs(&result.assignment);
        assert_eq!(
            result.cost,
            HardSoftCost::of(reference.capacity, reference.supply + reference.opening)
        );
    }

    #[test]
    fn test_same_seed_same_result() {
        let instance = random_instance(GeneratorConfig::default().with_size(15, 5), 9);
        let config = config(LocalSearchType::SimulatedAnnealing)
            .with_construction_type(ConstructionType::Random);
        let solver = Solver::new(config).unwrap();

        let a = solver.solve(&instance).unwrap();
        let b = solver.solve(&instance).unwrap();
        assert_eq!(a.assignment, b.assignment);
        assert_eq!(a.cost, b.cost);
        assert_eq!(a.seed, 17);
    }

    #[test]
    fn test_restarts_never_lose_to_first_run() {
        let instance = random_instance(GeneratorConfig::default().with_size(12, 4), 13);
        let config = config(LocalSearchType::HillClimbing)
            .with_construction_type(ConstructionType::Random)
            .with_restart_count(6);
        let solver = Solver::new(config).unwrap();

        let first = solver.run(Assignment::new(&instance), 17).unwrap();
        let best = solver.solve(&instance).unwrap();
        assert!(best.cost <= first.cost);
        assert!((17..23).contains(&best.seed));
    }

    #[test]
    fn test_local_search_never_worsens_construction() {
        for seed in 0..5 {
            let instance = random_instance(GeneratorConfig::default(), seed);
            let greedy = Solver::new(SolverConfig::new().with_random_seed(seed))
                .unwrap()
                .solve(&instance)
                .unwrap();
            let improved = Solver::new(config(LocalSearchType::SimulatedAnnealing))
                .unwrap()
                .solve(&instance)
                .unwrap();
            assert!(improved.cost <= greedy.cost);
            let reference = state_costs(&improved.assignment);
            assert_eq!(improved.cost.soft(), reference.supply + reference.opening);
            assert_eq!(improved.cost.hard(), reference.capacity);
        }
    }

    #[test]
    fn test_full_assert_mode() {
        let instance = random_instance(GeneratorConfig::default(), 1);
        let mut config = config(LocalSearchType::HillClimbing)
            .with_environment_mode(EnvironmentMode::FullAssert);
        config.consistency_check_interval = 10;
        let result = Solver::new(config).unwrap().solve(&instance).unwrap();
        assert!(result.assignment.check_consistency().is_ok());
    }

    #[test]
    fn test_unbounded_termination_uses_default_limit() {
        let instance = random_instance(GeneratorConfig::default(), 2);
        let mut config = config(LocalSearchType::HillClimbing);
        if let Some(ls) = config.local_search.as_mut() {
            ls.termination = TerminationConfig::default();
        }
        let result = Solver::new(config).unwrap().solve(&instance).unwrap();
        assert!(result.stats.step_count >= crate::termination::DEFAULT_UNIMPROVED_STEP_COUNT_LIMIT);
    }

    #[test]
    fn test_solve_from_keeps_initial_clients() {
        let instance = scenario_instance();
        let mut initial = Assignment::new(&instance);
        initial.assign(0, 1);

        let result = Solver::new(SolverConfig::new().with_random_seed(0))
            .unwrap()
            .solve_from(&initial)
            .unwrap();
        assert_eq!(result.assignment.assignment(0), Some(1));
        assert_eq!(result.stats.constructed, 2);
    }

    #[test]
    fn test_invalid_fallback_rejected() {
        let instance = scenario_instance();
        let mut config = SolverConfig::new();
        config.construction.fallback_resource = 2;
        let result = solve_with_restarts(&instance, config);
        assert!(matches!(
            result,
            Err(SolverError::InvalidFallback {
                resource: 2,
                resource_count: 2
            })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Solver::new(SolverConfig::new().with_restart_count(0));
        assert!(matches!(result, Err(SolverError::Config(_))));
    }

    #[test]
    fn test_base_seed() {
        let reproducible =
            Solver::new(SolverConfig::new().with_environment_mode(EnvironmentMode::Reproducible))
                .unwrap();
        assert_eq!(reproducible.base_seed(), 0);
        let seeded = Solver::new(SolverConfig::new().with_random_seed(99)).unwrap();
        assert_eq!(seeded.base_seed(), 99);
    }
}
