#![forbid(unsafe_code)]

//! Pool Roulette — fitness-proportionate selection of storage pools for
//! placement and migration decisions.
//!
//! A pool's attractiveness is its *weighted available space*: free bytes plus
//! removable bytes discounted by an exponential-decay model (older evictable
//! content counts less against capacity), divided down exponentially by the
//! number of concurrent writers. Selection over those weights is
//! roulette-wheel: each candidate is chosen with probability proportional to
//! its weight, which spreads placements instead of stampeding the single
//! most-free pool.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use pool_roulette::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use pool_roulette::cost::{CapacitySnapshot, PoolCandidate};
//! use pool_roulette::select::proportional::ProportionalSelection;
//! ```

pub mod prelude;

pub mod core;
pub mod cost;
pub mod select;
pub mod util;
