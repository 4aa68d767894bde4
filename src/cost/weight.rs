//! Write-load feedback: exponential discount of available space by writer
//! count.

use crate::cost::PoolCost;
use crate::cost::decay::available_bytes;

/// Weighted available space for one pool, in bytes.
///
/// ```text
///              available
///     ------------------------------
///      2^(mover_cost_factor * writers)
/// ```
///
/// The reciprocal of `mover_cost_factor` is the number of writers it takes
/// to halve the weighted available space. A factor of zero leaves the
/// availability unweighted.
#[must_use]
pub fn weighted_available(cost: &PoolCost) -> f64 {
    let available = available_bytes(&cost.capacity);
    let load = cost.load.mover_cost_factor * f64::from(cost.load.writer_count);
    available / 2.0_f64.powf(load)
}
