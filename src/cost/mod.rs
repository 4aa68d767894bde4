//! Pool cost snapshots: the immutable per-candidate figures consumed by the
//! availability model and the selection strategies.
//!
//! Snapshots are assembled fresh by the caller for every selection decision,
//! typically from a cost-info query over the monitoring channel plus the
//! configured policy knobs. Nothing here is retained across calls.

#![allow(missing_docs)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SelectionError};

pub mod decay;
pub mod weight;

/// Space figures for one pool at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    /// Bytes unambiguously unused.
    pub free_bytes: u64,
    /// Bytes occupied by evictable content that could be freed.
    pub removable_bytes: f64,
    /// Decay reference point; see [`PolicyConfig`](crate::core::config::PolicyConfig).
    pub breakeven: f64,
    /// Age of the least-recently-used removable byte. Zero means no age
    /// spread is known.
    pub lru_age: Duration,
    /// Minimum spare capacity the pool must retain.
    pub gap_bytes: u64,
}

/// Write-load figures for one pool at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadSnapshot {
    /// Sensitivity of the pool's weight to concurrent writers.
    pub mover_cost_factor: f64,
    /// Concurrent write operations active on the pool.
    pub writer_count: u32,
}

/// One candidate's full cost pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolCost {
    pub capacity: CapacitySnapshot,
    pub load: LoadSnapshot,
}

/// A pool under consideration as a placement target.
///
/// A candidate without a cost pair keeps its slot in the candidate list but
/// is excluded from weighting (weight forced to zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolCandidate {
    pub name: String,
    pub cost: Option<PoolCost>,
}

impl CapacitySnapshot {
    /// Reject non-finite or negative real-valued figures.
    ///
    /// Byte counts are unsigned by construction; only the float fields can
    /// violate the snapshot contract.
    pub fn validate(&self, pool: &str) -> Result<()> {
        if !self.removable_bytes.is_finite() || self.removable_bytes < 0.0 {
            return Err(SelectionError::invalid_snapshot(
                pool,
                format!(
                    "removable_bytes must be finite and >= 0, got {}",
                    self.removable_bytes
                ),
            ));
        }
        if !self.breakeven.is_finite() || self.breakeven < 0.0 {
            return Err(SelectionError::invalid_snapshot(
                pool,
                format!("breakeven must be finite and >= 0, got {}", self.breakeven),
            ));
        }
        Ok(())
    }
}

impl LoadSnapshot {
    pub fn validate(&self, pool: &str) -> Result<()> {
        if !self.mover_cost_factor.is_finite() || self.mover_cost_factor < 0.0 {
            return Err(SelectionError::invalid_snapshot(
                pool,
                format!(
                    "mover_cost_factor must be finite and >= 0, got {}",
                    self.mover_cost_factor
                ),
            ));
        }
        Ok(())
    }
}

impl PoolCost {
    pub fn validate(&self, pool: &str) -> Result<()> {
        self.capacity.validate(pool)?;
        self.load.validate(pool)
    }
}

impl PoolCandidate {
    /// Candidate with a full cost pair.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: PoolCost) -> Self {
        Self {
            name: name.into(),
            cost: Some(cost),
        }
    }

    /// Candidate whose cost query failed or was unavailable.
    #[must_use]
    pub fn without_cost(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cost: None,
        }
    }

    /// Validate the cost pair, if present.
    pub fn validate(&self) -> Result<()> {
        match &self.cost {
            Some(cost) => cost.validate(&self.name),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(removable: f64, breakeven: f64) -> CapacitySnapshot {
        CapacitySnapshot {
            free_bytes: 100,
            removable_bytes: removable,
            breakeven,
            lru_age: Duration::from_secs(60),
            gap_bytes: 0,
        }
    }

    #[test]
    fn valid_snapshot_passes() {
        assert!(capacity(50.0, 0.5).validate("p").is_ok());
    }

    #[test]
    fn nan_removable_is_rejected() {
        let err = capacity(f64::NAN, 0.5).validate("p").unwrap_err();
        assert_eq!(err.code(), "POOL-2002");
    }

    #[test]
    fn negative_breakeven_is_rejected() {
        assert!(capacity(50.0, -0.1).validate("p").is_err());
    }

    #[test]
    fn infinite_mover_cost_factor_is_rejected() {
        let load = LoadSnapshot {
            mover_cost_factor: f64::INFINITY,
            writer_count: 1,
        };
        assert!(load.validate("p").is_err());
    }

    #[test]
    fn candidate_without_cost_validates_trivially() {
        assert!(PoolCandidate::without_cost("p").validate().is_ok());
    }

    #[test]
    fn candidate_validation_names_the_pool() {
        let candidate = PoolCandidate::new(
            "archive-1",
            PoolCost {
                capacity: capacity(f64::NAN, 0.5),
                load: LoadSnapshot {
                    mover_cost_factor: 0.5,
                    writer_count: 0,
                },
            },
        );
        let err = candidate.validate().unwrap_err();
        assert!(err.to_string().contains("archive-1"));
    }

    #[test]
    fn snapshot_serde_round_trip() {
        let candidate = PoolCandidate::new(
            "pool-a",
            PoolCost {
                capacity: capacity(50.0, 0.5),
                load: LoadSnapshot {
                    mover_cost_factor: 0.5,
                    writer_count: 3,
                },
            },
        );
        let json = serde_json::to_string(&candidate).unwrap();
        let parsed: PoolCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, candidate);
    }
}
