//! Move tester: checks incremental costs against full recomputation.
//!
//! For a given state, every enumerated move is applied to a clone and the
//! predicted per-component deltas are compared with what the components
//! report before and after. The neighborhood itself is checked for size and
//! duplicates.

use std::collections::HashSet;
use std::fmt;

use allocforge_core::{Assignment, HardSoftCost};
use allocforge_scoring::{ComponentSet, DeltaSet};
use rand::Rng;
use tracing::{info, warn};

use crate::heuristic::explorer::{ChangeNeighborhoodExplorer, NeighborhoodExplorer};
use crate::heuristic::r#move::ChangeMove;
use crate::manager::SolutionManager;

/// A component whose predicted delta disagrees with recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaMismatch {
    pub mv: ChangeMove,
    pub component: String,
    pub predicted: i64,
    pub actual: i64,
}

impl fmt::Display for DeltaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "move {} component {}: predicted {}, actual {}",
            self.mv, self.component, self.predicted, self.actual
        )
    }
}

/// A move whose total weighted delta disagrees with the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalMismatch {
    pub mv: ChangeMove,
    pub predicted: HardSoftCost,
    pub actual: HardSoftCost,
}

/// Shape of the change neighborhood of a state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborhoodReport {
    /// `R - 1` moves per assigned client, `R` per unassigned one.
    pub expected: usize,
    pub enumerated: usize,
    pub distinct: usize,
    pub infeasible: usize,
}

impl NeighborhoodReport {
    pub fn is_ok(&self) -> bool {
        self.enumerated == self.expected
            && self.distinct == self.enumerated
            && self.infeasible == 0
    }
}

/// Outcome of a move test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveTestReport {
    pub moves_checked: usize,
    pub delta_mismatches: Vec<DeltaMismatch>,
    pub total_mismatches: Vec<TotalMismatch>,
    /// Set by [`MoveTester::check_state`].
    pub neighborhood: Option<NeighborhoodReport>,
    /// Load drift found after a random walk, as a message.
    pub inconsistency: Option<String>,
}

impl MoveTestReport {
    pub fn is_ok(&self) -> bool {
        self.delta_mismatches.is_empty()
            && self.total_mismatches.is_empty()
            && self.neighborhood.map_or(true, |n| n.is_ok())
            && self.inconsistency.is_none()
    }

    /// Folds `other` into this report. The first neighborhood and the first
    /// inconsistency seen are kept.
    pub fn merge(&mut self, other: MoveTestReport) {
        self.moves_checked += other.moves_checked;
        self.delta_mismatches.extend(other.delta_mismatches);
        self.total_mismatches.extend(other.total_mismatches);
        self.neighborhood = self.neighborhood.or(other.neighborhood);
        self.inconsistency = self.inconsistency.take().or(other.inconsistency);
    }
}

impl fmt::Display for MoveTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moves checked: {}", self.moves_checked)?;
        if let Some(n) = &self.neighborhood {
            writeln!(
                f,
                "Neighborhood: {} moves ({} expected, {} distinct, {} infeasible)",
                n.enumerated, n.expected, n.distinct, n.infeasible
            )?;
        }
        for m in &self.delta_mismatches {
            writeln!(f, "  {}", m)?;
        }
        for m in &self.total_mismatches {
            writeln!(
                f,
                "  move {} total: predicted {}, actual {}",
                m.mv, m.predicted, m.actual
            )?;
        }
        if let Some(message) = &self.inconsistency {
            writeln!(f, "  {}", message)?;
        }
        write!(f, "Result: {}", if self.is_ok() { "OK" } else { "FAILED" })
    }
}

/// Cross-checks a change explorer's deltas against a solution manager.
///
/// # Example
///
/// ```
/// use allocforge_core::{Assignment, Client, Instance, Resource};
/// use allocforge_scoring::standard_components;
/// use allocforge_solver::tester::MoveTester;
/// use allocforge_solver::{ChangeNeighborhoodExplorer, SolutionManager};
///
/// let instance = Instance::builder()
///     .with_client(Client::new("S1", 3))
///     .with_resource(Resource::new("W1", 2, 10))
///     .with_resource(Resource::new("W2", 5, 20))
///     .with_unit_costs(vec![vec![1, 2]])
///     .build()
///     .unwrap();
/// let manager = SolutionManager::new(standard_components());
/// let explorer = ChangeNeighborhoodExplorer::standard();
/// let mut state = Assignment::new(&instance);
/// state.assign(0, 0);
///
/// let report = MoveTester::new(&manager, &explorer).check_state(&state);
/// assert!(report.is_ok());
/// assert_eq!(report.moves_checked, 1);
/// ```
#[derive(Debug)]
pub struct MoveTester<'t, C, D> {
    manager: &'t SolutionManager<C>,
    explorer: &'t ChangeNeighborhoodExplorer<D>,
}

impl<'t, C, D> MoveTester<'t, C, D> {
    pub fn new(manager: &'t SolutionManager<C>, explorer: &'t ChangeNeighborhoodExplorer<D>) -> Self {
        Self { manager, explorer }
    }

    /// Checks one move applied to `state`.
    pub fn check_move<'a>(&self, state: &Assignment<'a>, mv: &ChangeMove) -> MoveTestReport
    where
        C: ComponentSet<Assignment<'a>>,
        D: DeltaSet<Assignment<'a>, ChangeMove>,
    {
        let deltas = self.explorer.deltas();
        let predicted = deltas.delta_each(state, mv);
        let predicted_total = self.explorer.delta_cost(state, mv);
        let costs_before = deltas.cost_each(state);
        let total_before = self.manager.evaluate(state);

        let mut after = state.clone();
        self.explorer.make_move(&mut after, mv);
        let costs_after = deltas.cost_each(&after);
        let total_after = self.manager.evaluate(&after);

        let mut report = MoveTestReport {
            moves_checked: 1,
            ..MoveTestReport::default()
        };
        for (i, result) in predicted.into_iter().enumerate() {
            let actual = costs_after[i] - costs_before[i];
            if actual != result.delta {
                report.delta_mismatches.push(DeltaMismatch {
                    mv: *mv,
                    component: result.name,
                    predicted: result.delta,
                    actual,
                });
            }
        }
        let actual_total = total_after - total_before;
        if actual_total != predicted_total {
            report.total_mismatches.push(TotalMismatch {
                mv: *mv,
                predicted: predicted_total,
                actual: actual_total,
            });
        }
        report
    }

    /// Counts the enumerated moves of `state` and checks them for duplicates
    /// and feasibility.
    pub fn check_neighborhood<'a>(&self, state: &Assignment<'a>) -> NeighborhoodReport
    where
        D: DeltaSet<Assignment<'a>, ChangeMove>,
    {
        let resources = state.instance().resource_count();
        let expected = (0..state.instance().client_count())
            .map(|c| match state.assignment(c) {
                Some(_) => resources.saturating_sub(1),
                None => resources,
            })
            .sum();

        let mut seen = HashSet::new();
        let mut report = NeighborhoodReport {
            expected,
            ..NeighborhoodReport::default()
        };
        for mv in self.explorer.moves(state) {
            report.enumerated += 1;
            if seen.insert(mv) {
                report.distinct += 1;
            }
            if !self.explorer.is_feasible(state, &mv) {
                report.infeasible += 1;
            }
        }
        report
    }

    /// Checks every move of the neighborhood of `state`, plus its shape.
    pub fn check_state<'a>(&self, state: &Assignment<'a>) -> MoveTestReport
    where
        C: ComponentSet<Assignment<'a>>,
        D: DeltaSet<Assignment<'a>, ChangeMove>,
    {
        let mut report = MoveTestReport {
            neighborhood: Some(self.check_neighborhood(state)),
            ..MoveTestReport::default()
        };
        for mv in self.explorer.moves(state) {
            report.merge(self.check_move(state, &mv));
        }
        log_report(&report);
        report
    }

    /// Applies `steps` random moves to `state`, checking each one before it
    /// is made, then checks the loads.
    pub fn random_walk<'a, R: Rng>(
        &self,
        state: &mut Assignment<'a>,
        steps: usize,
        rng: &mut R,
    ) -> MoveTestReport
    where
        C: ComponentSet<Assignment<'a>>,
        D: DeltaSet<Assignment<'a>, ChangeMove>,
    {
        let mut report = MoveTestReport::default();
        for _ in 0..steps {
            let Some(mv) = self.explorer.random_move(state, rng) else {
                break;
            };
            report.merge(self.check_move(state, &mv));
            self.explorer.make_move(state, &mv);
        }
        report.inconsistency = self
            .manager
            .check_consistency(state)
            .err()
            .map(|e| e.to_string());
        log_report(&report);
        report
    }
}

fn log_report(report: &MoveTestReport) {
    if report.is_ok() {
        info!(event = "move_test", moves = report.moves_checked, ok = true);
    } else {
        warn!(
            event = "move_test",
            moves = report.moves_checked,
            delta_mismatches = report.delta_mismatches.len(),
            total_mismatches = report.total_mismatches.len(),
            ok = false,
        );
    }
}

#[cfg(test)]
mod tests {
    use allocforge_core::{Assignment, HardSoftCost};
    use allocforge_scoring::{standard_components, StandardComponents};
    use allocforge_test::generator::{random_assignment, random_instance, GeneratorConfig};
    use allocforge_test::scenario_instance;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::heuristic::delta::{standard_deltas, StandardDeltas};

    fn fixtures() -> (
        SolutionManager<StandardComponents>,
        ChangeNeighborhoodExplorer<StandardDeltas>,
    ) {
        (
            SolutionManager::new(standard_components()),
            ChangeNeighborhoodExplorer::standard(),
        )
    }

    #[test]
    fn test_scenario_neighborhood_is_consistent() {
        let instance = scenario_instance();
        let (manager, explorer) = fixtures();
        let mut state = Assignment::new(&instance);
        manager.greedy_state(&mut state);

        let report = MoveTester::new(&manager, &explorer).check_state(&state);
        assert!(report.is_ok(), "{}", report);
        assert_eq!(report.moves_checked, 3);
        assert_eq!(
            report.neighborhood,
            Some(NeighborhoodReport {
                expected: 3,
                enumerated: 3,
                distinct: 3,
                infeasible: 0,
            })
        );
    }

    #[test]
    fn test_partial_state_counts_every_resource_for_unassigned() {
        let instance = scenario_instance();
        let (manager, explorer) = fixtures();
        let mut state = Assignment::new(&instance);
        state.assign(1, 0);

        let report = MoveTester::new(&manager, &explorer).check_state(&state);
        assert!(report.is_ok(), "{}", report);
        assert_eq!(report.moves_checked, 2 + 1 + 2);
    }

    #[test]
    fn test_random_states_and_walks() {
        for seed in 0..10 {
            let instance = random_instance(GeneratorConfig::default(), seed);
            let (manager, explorer) = fixtures();
            let tester = MoveTester::new(&manager, &explorer);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = Assignment::new(&instance);
            random_assignment(&mut state, &mut rng);

            assert!(tester.check_state(&state).is_ok());
            let walk = tester.random_walk(&mut state, 100, &mut rng);
            assert!(walk.is_ok(), "{}", walk);
            assert_eq!(walk.moves_checked, 100);
        }
    }

    #[test]
    fn test_merge_keeps_first_findings() {
        let neighborhood = NeighborhoodReport {
            expected: 3,
            enumerated: 3,
            distinct: 3,
            infeasible: 0,
        };
        let mut report = MoveTestReport {
            moves_checked: 3,
            neighborhood: Some(neighborhood),
            inconsistency: Some("resource 0 load drifted".to_string()),
            ..MoveTestReport::default()
        };
        report.merge(MoveTestReport {
            moves_checked: 10,
            inconsistency: Some("resource 1 load drifted".to_string()),
            ..MoveTestReport::default()
        });
        assert_eq!(report.moves_checked, 13);
        assert_eq!(report.neighborhood, Some(neighborhood));
        assert_eq!(
            report.inconsistency.as_deref(),
            Some("resource 0 load drifted")
        );
        assert!(!report.is_ok());

        let mut clean = MoveTestReport::default();
        clean.merge(report.clone());
        assert_eq!(clean.inconsistency, report.inconsistency);
        assert_eq!(clean.neighborhood, Some(neighborhood));
    }

    #[test]
    fn test_weight_mismatch_is_reported() {
        let instance = scenario_instance();
        // manager weighs opening twice as much as the explorer does
        let mut components = standard_components();
        components.1 = allocforge_scoring::OpeningCost::new(2, false);
        let manager = SolutionManager::new(components);
        let explorer = ChangeNeighborhoodExplorer::new(standard_deltas(&standard_components()));

        let mut state = Assignment::new(&instance);
        state.assign(0, 0);
        state.assign(1, 1);
        state.assign(2, 0);

        let report = MoveTester::new(&manager, &explorer).check_state(&state);
        assert!(!report.is_ok());
        assert!(report.delta_mismatches.is_empty());
        // only 1:1->0 closes a resource
        assert_eq!(report.total_mismatches.len(), 1);
        let mismatch = &report.total_mismatches[0];
        assert_eq!(mismatch.mv.client, 1);
        assert_eq!(mismatch.predicted, HardSoftCost::of(2, 2));
        assert_eq!(mismatch.actual, HardSoftCost::of(2, -8));
        assert!(report.to_string().ends_with("Result: FAILED"));
    }
}
