//! Self-contained evidence record for one selection decision.
//!
//! Each record is a single JSONL line capturing the full weight vector, the
//! threshold draw, and the chosen candidate, so any selection can be audited
//! or replayed from the record alone. Recording is observational; it never
//! alters the selection.

use serde::{Deserialize, Serialize};

use crate::core::errors::Result;

/// One candidate's computed weight within a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWeight {
    /// Pool name.
    pub pool: String,
    /// Weighted available space used as the selection weight.
    pub weight: f64,
    /// True when the candidate had no cost pair and was forced to zero.
    pub excluded: bool,
}

/// Evidence record for a single selection decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// ISO 8601 UTC timestamp.
    pub ts: String,
    /// Strategy identifier.
    pub strategy: String,
    /// Weight vector in candidate order.
    pub candidates: Vec<CandidateWeight>,
    /// Sum of all weights.
    pub total_weight: f64,
    /// The drawn threshold in `[0, total_weight)`.
    pub threshold: f64,
    /// Name of the chosen pool.
    pub chosen: String,
    /// Position of the chosen pool in the candidate list.
    pub chosen_index: usize,
    /// True when the cumulative walk exhausted without crossing the
    /// threshold and the last candidate was returned. Reachable only through
    /// floating-point rounding at the tail of the accumulation.
    pub tail_fallback: bool,
}

impl SelectionRecord {
    /// Serialize as one atomic JSONL line, trailing newline included.
    pub fn to_jsonl(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{json}\n"))
    }
}

pub(crate) fn format_utc_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
