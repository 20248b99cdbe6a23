//! Simulated annealing acceptor.

use allocforge_config::SimulatedAnnealingConfig;
use allocforge_core::HardSoftCost;
use rand::rngs::StdRng;
use rand::Rng;

use super::Acceptor;

/// Simulated annealing acceptor - accepts worsening moves with probability
/// `exp(-delta / temperature)`.
///
/// The delta is collapsed to one number with a hard weight. The
/// temperature decays geometrically every `steps_per_temperature` steps and
/// the acceptor is exhausted once it falls below `min_temperature`.
///
/// # Example
///
/// ```
/// use allocforge_solver::phase::localsearch::SimulatedAnnealingAcceptor;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(10.0, 0.9);
/// assert_eq!(acceptor.current_temperature(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    cooling_rate: f64,
    steps_per_temperature: u64,
    min_temperature: f64,
    steps_at_temperature: u64,
    hard_weight: i64,
}

impl SimulatedAnnealingAcceptor {
    /// Cools after every step, never exhausts.
    pub fn new(starting_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            cooling_rate,
            steps_per_temperature: 1,
            min_temperature: 0.0,
            steps_at_temperature: 0,
            hard_weight: HardSoftCost::DEFAULT_HARD_WEIGHT,
        }
    }

    pub fn from_config(config: &SimulatedAnnealingConfig) -> Self {
        Self::new(config.starting_temperature, config.cooling_rate)
            .with_steps_per_temperature(config.steps_per_temperature)
            .with_min_temperature(config.min_temperature)
    }

    pub fn with_steps_per_temperature(mut self, steps: u64) -> Self {
        self.steps_per_temperature = steps.max(1);
        self
    }

    pub fn with_min_temperature(mut self, temperature: f64) -> Self {
        self.min_temperature = temperature;
        self
    }

    /// Weight of one hard unit when collapsing a delta.
    pub fn with_hard_weight(mut self, weight: i64) -> Self {
        self.hard_weight = weight;
        self
    }

    pub fn current_temperature(&self) -> f64 {
        self.current_temperature
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::from_config(&SimulatedAnnealingConfig::default())
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, delta: HardSoftCost, rng: &mut StdRng) -> bool {
        if delta <= HardSoftCost::ZERO {
            return true;
        }
        if self.current_temperature <= 0.0 {
            return false;
        }
        let worsening = delta.to_scalar(self.hard_weight) as f64;
        let probability = (-worsening / self.current_temperature).exp();
        rng.random::<f64>() < probability
    }

    fn phase_started(&mut self) {
        self.current_temperature = self.starting_temperature;
        self.steps_at_temperature = 0;
    }

    fn step_ended(&mut self) {
        self.steps_at_temperature += 1;
        if self.steps_at_temperature >= self.steps_per_temperature {
            self.current_temperature *= self.cooling_rate;
            self.steps_at_temperature = 0;
        }
    }

    fn is_exhausted(&self) -> bool {
        self.current_temperature < self.min_temperature
    }
}
