//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use pool_roulette::prelude::*;
//! ```

// Core
pub use crate::core::config::{Config, PolicyConfig, PoolPolicyOverride, SelectionConfig};
pub use crate::core::errors::{Result, SelectionError};

// Cost model
pub use crate::cost::decay::available_bytes;
pub use crate::cost::weight::weighted_available;
pub use crate::cost::{CapacitySnapshot, LoadSnapshot, PoolCandidate, PoolCost};

// Selection
pub use crate::select::PoolSelectionStrategy;
pub use crate::select::proportional::ProportionalSelection;
pub use crate::select::record::{CandidateWeight, SelectionRecord};
pub use crate::select::rng::SharedRandomSource;

// Utilities
pub use crate::util::glob::Glob;
