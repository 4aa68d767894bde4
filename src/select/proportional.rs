//! Fitness-proportionate ("roulette-wheel") pool selection.
//!
//! Each candidate is chosen with probability proportional to its weighted
//! available space relative to the total. Pools with more usable room absorb
//! proportionally more placements, which spreads load instead of stampeding
//! the single most-free pool.

use std::sync::Arc;

use crate::core::config::SelectionConfig;
use crate::core::errors::{Result, SelectionError};
use crate::cost::PoolCandidate;
use crate::cost::weight::weighted_available;
use crate::select::PoolSelectionStrategy;
use crate::select::record::{CandidateWeight, SelectionRecord, format_utc_now};
use crate::select::rng::SharedRandomSource;

const STRATEGY_NAME: &str = "proportional";

struct Draw {
    weights: Vec<f64>,
    total: f64,
    threshold: f64,
    index: usize,
    tail_fallback: bool,
}

/// Roulette-wheel selection over weighted available space.
#[derive(Debug)]
pub struct ProportionalSelection {
    random: Arc<SharedRandomSource>,
}

impl ProportionalSelection {
    /// Strategy backed by an OS-entropy random source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            random: Arc::new(SharedRandomSource::new()),
        }
    }

    /// Strategy sharing an existing random source.
    #[must_use]
    pub fn with_random_source(random: Arc<SharedRandomSource>) -> Self {
        Self { random }
    }

    /// Strategy honoring the configured seed, if any.
    #[must_use]
    pub fn from_config(selection: &SelectionConfig) -> Self {
        Self {
            random: Arc::new(SharedRandomSource::from_config(selection)),
        }
    }

    /// Choose one candidate and return the evidence record alongside it.
    pub fn select_recorded<'a>(
        &self,
        pools: &'a [PoolCandidate],
    ) -> Result<(&'a PoolCandidate, SelectionRecord)> {
        let draw = self.draw(pools)?;
        let record = SelectionRecord {
            ts: format_utc_now(),
            strategy: STRATEGY_NAME.to_string(),
            candidates: pools
                .iter()
                .zip(&draw.weights)
                .map(|(pool, &weight)| CandidateWeight {
                    pool: pool.name.clone(),
                    weight,
                    excluded: pool.cost.is_none(),
                })
                .collect(),
            total_weight: draw.total,
            threshold: draw.threshold,
            chosen: pools[draw.index].name.clone(),
            chosen_index: draw.index,
            tail_fallback: draw.tail_fallback,
        };
        Ok((&pools[draw.index], record))
    }

    /// Weight every candidate, draw one threshold, walk the cumulative sum.
    ///
    /// With an all-zero weight vector the threshold is zero and the first
    /// candidate's running sum satisfies `0 >= 0` immediately. The tail
    /// fallback to the last candidate is reachable only through
    /// floating-point rounding at the end of the accumulation.
    fn draw(&self, pools: &[PoolCandidate]) -> Result<Draw> {
        if pools.is_empty() {
            return Err(SelectionError::EmptyCandidates);
        }

        let weights: Vec<f64> = pools
            .iter()
            .map(|pool| pool.cost.as_ref().map_or(0.0, weighted_available))
            .collect();
        let total: f64 = weights.iter().sum();
        let threshold = self.random.next_unit() * total;

        let mut running = 0.0;
        for (index, weight) in weights.iter().enumerate() {
            running += weight;
            if running >= threshold {
                return Ok(Draw {
                    weights,
                    total,
                    threshold,
                    index,
                    tail_fallback: false,
                });
            }
        }

        let index = pools.len() - 1;
        Ok(Draw {
            weights,
            total,
            threshold,
            index,
            tail_fallback: true,
        })
    }
}

impl PoolSelectionStrategy for ProportionalSelection {
    fn select<'a>(&self, pools: &'a [PoolCandidate]) -> Result<&'a PoolCandidate> {
        let draw = self.draw(pools)?;
        Ok(&pools[draw.index])
    }
}

impl Default for ProportionalSelection {
    fn default() -> Self {
        Self::new()
    }
}
