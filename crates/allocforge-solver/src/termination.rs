//! Termination conditions for local search phases.

use std::time::Duration;

use allocforge_config::TerminationConfig;

use crate::stats::PhaseStats;

/// Unimproved step limit applied when no limit is configured at all.
pub const DEFAULT_UNIMPROVED_STEP_COUNT_LIMIT: u64 = 10_000;

/// Stops a phase when any configured limit is reached.
///
/// # Example
///
/// ```
/// use allocforge_solver::stats::PhaseStats;
/// use allocforge_solver::termination::Termination;
///
/// let term = Termination::new().with_step_count_limit(2);
/// let mut stats = PhaseStats::new(1, "Hill Climbing");
/// assert!(!term.is_terminated(&stats));
/// stats.record_step();
/// stats.record_step();
/// assert!(term.is_terminated(&stats));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Termination {
    step_count_limit: Option<u64>,
    unimproved_step_count_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl Termination {
    /// A termination with no limit; the phase ends on its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configured limits, falling back to
    /// [`DEFAULT_UNIMPROVED_STEP_COUNT_LIMIT`] when none is set.
    pub fn from_config(config: &TerminationConfig) -> Self {
        let termination = Self {
            step_count_limit: config.step_count_limit,
            unimproved_step_count_limit: config.unimproved_step_count_limit,
            time_limit: config.seconds_spent_limit.map(Duration::from_secs),
        };
        if termination.is_unbounded() {
            termination.with_unimproved_step_count_limit(DEFAULT_UNIMPROVED_STEP_COUNT_LIMIT)
        } else {
            termination
        }
    }

    pub fn with_step_count_limit(mut self, limit: u64) -> Self {
        self.step_count_limit = Some(limit);
        self
    }

    pub fn with_unimproved_step_count_limit(mut self, limit: u64) -> Self {
        self.unimproved_step_count_limit = Some(limit);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// True when no limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.step_count_limit.is_none()
            && self.unimproved_step_count_limit.is_none()
            && self.time_limit.is_none()
    }

    /// Returns true if the phase should stop.
    pub fn is_terminated(&self, stats: &PhaseStats) -> bool {
        if self
            .step_count_limit
            .is_some_and(|limit| stats.step_count >= limit)
        {
            return true;
        }
        if self
            .unimproved_step_count_limit
            .is_some_and(|limit| stats.unimproved_step_count >= limit)
        {
            return true;
        }
        self.time_limit
            .is_some_and(|limit| stats.elapsed() >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_config_gets_default_limit() {
        let term = Termination::from_config(&TerminationConfig::default());
        let mut stats = PhaseStats::new(1, "Hill Climbing");
        stats.unimproved_step_count = DEFAULT_UNIMPROVED_STEP_COUNT_LIMIT - 1;
        assert!(!term.is_terminated(&stats));
        stats.record_unimproved();
        assert!(term.is_terminated(&stats));
    }

    #[test]
    fn test_configured_limits_replace_default() {
        let config = TerminationConfig {
            step_count_limit: Some(5),
            ..TerminationConfig::default()
        };
        let term = Termination::from_config(&config);
        let mut stats = PhaseStats::new(1, "Hill Climbing");
        stats.unimproved_step_count = 1_000_000;
        stats.step_count = 4;
        assert!(!term.is_terminated(&stats));
        stats.record_step();
        assert!(term.is_terminated(&stats));
    }

    #[test]
    fn test_zero_time_limit_terminates() {
        let term = Termination::new().with_time_limit(Duration::ZERO);
        assert!(term.is_terminated(&PhaseStats::new(1, "Simulated Annealing")));
    }

    #[test]
    fn test_new_is_unbounded() {
        let term = Termination::new();
        assert!(term.is_unbounded());
        assert!(!term.is_terminated(&PhaseStats::new(1, "Steepest Descent")));
    }
}
