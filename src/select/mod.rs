//! Pool selection strategies.

pub mod proportional;
pub mod record;
pub mod rng;

use crate::core::errors::Result;
use crate::cost::PoolCandidate;

/// A pluggable pool selection strategy.
///
/// Strategies consume an ordered, non-empty candidate list and return one
/// chosen candidate. Greedy or round-robin variants would implement the same
/// contract.
pub trait PoolSelectionStrategy {
    /// Choose one candidate from a non-empty ordered list.
    ///
    /// Fails with [`SelectionError::EmptyCandidates`] when the list is
    /// empty.
    ///
    /// [`SelectionError::EmptyCandidates`]: crate::core::errors::SelectionError::EmptyCandidates
    fn select<'a>(&self, pools: &'a [PoolCandidate]) -> Result<&'a PoolCandidate>;
}
