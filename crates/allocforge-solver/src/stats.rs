//! Solver statistics.
//!
//! Plain counters for solver and phase performance tracking.

use std::time::{Duration, Instant};

/// Solver-level statistics.
///
/// Tracks aggregate metrics across the construction and local search
/// phases of one run.
///
/// # Example
///
/// ```
/// use allocforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.start();
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    /// Total steps taken across all phases.
    pub step_count: u64,
    /// Total moves evaluated across all phases.
    pub moves_evaluated: u64,
    /// Total moves accepted across all phases.
    pub moves_accepted: u64,
    /// Steps that improved the best cost.
    pub improvements: u64,
    /// Clients placed by the construction heuristic.
    pub constructed: usize,
    /// Clients sent to the fallback resource.
    pub fallback: usize,
}

impl SolverStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.end_time = None;
    }

    /// Freezes the elapsed time.
    pub fn stop(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Adds the counters of a finished phase.
    pub fn absorb(&mut self, phase: &PhaseStats) {
        self.step_count += phase.step_count;
        self.moves_evaluated += phase.moves_evaluated;
        self.moves_accepted += phase.moves_accepted;
        self.improvements += phase.improvements;
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Phase-level statistics.
///
/// # Example
///
/// ```
/// use allocforge_solver::stats::PhaseStats;
///
/// let mut stats = PhaseStats::new(1, "Hill Climbing");
/// stats.record_move(true);
/// stats.record_step();
/// stats.record_unimproved();
///
/// assert_eq!(stats.phase_type, "Hill Climbing");
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.unimproved_step_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseStats {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase.
    pub phase_type: &'static str,
    start_time: Instant,
    pub step_count: u64,
    pub moves_evaluated: u64,
    pub moves_accepted: u64,
    /// Steps that improved the best cost.
    pub improvements: u64,
    /// Steps since the best cost last improved.
    pub unimproved_step_count: u64,
}

impl PhaseStats {
    /// Creates new phase statistics.
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            start_time: Instant::now(),
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
            improvements: 0,
            unimproved_step_count: 0,
        }
    }

    /// Returns the elapsed time for this phase.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Records moves evaluated without a decision, as in a neighborhood scan.
    pub fn record_evaluations(&mut self, count: u64) {
        self.moves_evaluated += count;
    }

    /// Records an accepted move whose evaluation was already counted.
    pub fn record_accepted(&mut self) {
        self.moves_accepted += 1;
    }

    /// Records a new best cost.
    pub fn record_improvement(&mut self) {
        self.improvements += 1;
        self.unimproved_step_count = 0;
    }

    /// Records a step that left the best cost unchanged.
    pub fn record_unimproved(&mut self) {
        self.unimproved_step_count += 1;
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}
