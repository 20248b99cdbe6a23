//! Hill climbing acceptors.

use allocforge_core::HardSoftCost;
use rand::rngs::StdRng;

use super::Acceptor;

/// Hill climbing acceptor - accepts every move that does not worsen the cost.
///
/// Accepting sideways moves lets the search drift across plateaus.
///
/// # Example
///
/// ```
/// use allocforge_solver::phase::localsearch::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for HillClimbingAcceptor {
    fn is_accepted(&mut self, delta: HardSoftCost, _rng: &mut StdRng) -> bool {
        delta <= HardSoftCost::ZERO
    }
}

/// Accepts strictly improving moves only; used by steepest descent, which
/// stops at the first step with nothing to accept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImprovingAcceptor;

impl ImprovingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Acceptor for ImprovingAcceptor {
    fn is_accepted(&mut self, delta: HardSoftCost, _rng: &mut StdRng) -> bool {
        delta.is_improving()
    }
}
