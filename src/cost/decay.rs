//! Exponential-decay availability model for removable pool space.
//!
//! Removable space decays like a radioactive sample: the longer a removable
//! byte has gone unaccessed, the less it counts as occupied, since it is
//! increasingly likely to be evicted soon regardless of this decision.

#![allow(clippy::cast_precision_loss)]

use std::f64::consts::LN_2;

use crate::cost::CapacitySnapshot;

const WEEK_SECONDS: f64 = 7.0 * 24.0 * 3600.0;

/// Half-life applied when breakeven is 1.0 or larger. Such values are a
/// legacy corrective constant, not translatable to a decay rate; a fixed
/// long half-life keeps removable space partially counted.
const LEGACY_HALFLIFE: f64 = 2.0 * WEEK_SECONDS;

/// Estimated available space on a pool, in bytes.
///
/// Free space plus the decayed portion of removable space, or zero when the
/// total does not exceed the configured gap. Never negative.
#[must_use]
pub fn available_bytes(snapshot: &CapacitySnapshot) -> f64 {
    let free = snapshot.free_bytes as f64;
    let removable = snapshot.removable_bytes;
    let gap = snapshot.gap_bytes as f64;

    let Some(halflife) = half_life(snapshot.breakeven) else {
        // Decay disabled: removable space counts as fully available.
        return clamp_to_gap(free + removable, gap);
    };

    /* Each removable byte decays as N(t) = 0.5^(t / halflife). Only the
     * total removable size r and the age l of the least recently used
     * removable byte are known, so byte ages are interpolated linearly:
     * age(x) = (l / r) * x for byte index x in [0, r]. Integrating
     * 0.5^(age(x) / T) over [0, r] gives the still-occupied portion:
     *
     *     undecayed = r * T * (1 - 2^(-l/T)) / (l * ln 2)
     */
    let lru = snapshot.lru_age.as_secs_f64();
    let undecayed = if lru > 0.0 {
        removable * halflife * (1.0 - 2.0_f64.powf(-lru / halflife)) / (lru * LN_2)
    } else {
        // No age information: treat all removable space as still occupied.
        removable
    };

    let decayed = removable - undecayed;
    clamp_to_gap(free + decayed, gap)
}

/// Derive the decay half-life in seconds from the breakeven policy knob.
///
/// Breakeven is traditionally the undecayed fraction of the least recently
/// accessed removable byte after one week; solving for the half-life gives
/// `T = week * (-ln 2 / ln breakeven)` on the open interval (0, 1). Returns
/// `None` when breakeven is zero, which disables decay modeling entirely.
fn half_life(breakeven: f64) -> Option<f64> {
    if breakeven >= 1.0 {
        Some(LEGACY_HALFLIFE)
    } else if breakeven > 0.0 {
        Some(WEEK_SECONDS * -LN_2 / breakeven.ln())
    } else {
        None
    }
}

/// A pool at or below its gap is considered full.
fn clamp_to_gap(available: f64, gap: f64) -> f64 {
    if available > gap { available } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::{LEGACY_HALFLIFE, WEEK_SECONDS, available_bytes, half_life};
    use crate::cost::CapacitySnapshot;
    use std::f64::consts::LN_2;
    use std::time::Duration;

    fn snapshot(
        free: u64,
        removable: f64,
        breakeven: f64,
        lru_secs: u64,
        gap: u64,
    ) -> CapacitySnapshot {
        CapacitySnapshot {
            free_bytes: free,
            removable_bytes: removable,
            breakeven,
            lru_age: Duration::from_secs(lru_secs),
            gap_bytes: gap,
        }
    }

    #[test]
    fn breakeven_half_selects_one_week_halflife() {
        let t = half_life(0.5).unwrap();
        assert!((t - WEEK_SECONDS).abs() < 1e-6);
    }

    #[test]
    fn legacy_breakeven_selects_fixed_halflife() {
        assert!((half_life(1.0).unwrap() - LEGACY_HALFLIFE).abs() < f64::EPSILON);
        assert!((half_life(2.5).unwrap() - LEGACY_HALFLIFE).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_breakeven_disables_decay() {
        assert!(half_life(0.0).is_none());
    }

    #[test]
    fn week_old_lru_at_half_breakeven_matches_closed_form() {
        // T equals one week, so undecayed = removable * (1 - 0.5) / ln 2.
        let available = available_bytes(&snapshot(100, 100.0, 0.5, 604_800, 0));
        let undecayed = 100.0 * (1.0 - 0.5) / LN_2;
        let expected = 100.0 + (100.0 - undecayed);
        assert!((available - expected).abs() < 1e-9);
        assert!((available - 127.87).abs() < 0.01);
    }

    #[test]
    fn decay_disabled_counts_removable_fully() {
        let with_age = available_bytes(&snapshot(100, 50.0, 0.0, 604_800, 0));
        let without_age = available_bytes(&snapshot(100, 50.0, 0.0, 0, 0));
        assert!((with_age - 150.0).abs() < f64::EPSILON);
        assert!((without_age - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn decay_disabled_still_clamps_to_gap() {
        assert!(available_bytes(&snapshot(100, 50.0, 0.0, 0, 150)).abs() < f64::EPSILON);
        assert!(available_bytes(&snapshot(100, 50.0, 0.0, 0, 149)) > 149.0);
    }

    #[test]
    fn unknown_age_counts_removable_fully_occupied() {
        // lru_age of zero means no age spread is known; nothing decays.
        let available = available_bytes(&snapshot(100, 50.0, 0.5, 0, 0));
        assert!((available - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn available_at_or_below_gap_is_zero() {
        assert!(available_bytes(&snapshot(10, 0.0, 0.5, 0, 10)).abs() < f64::EPSILON);
        assert!(available_bytes(&snapshot(10, 0.0, 0.5, 0, 11)).abs() < f64::EPSILON);
        assert!(available_bytes(&snapshot(12, 0.0, 0.5, 0, 10)) > 0.0);
    }

    #[test]
    fn older_lru_never_decreases_availability() {
        let ages = [0u64, 3_600, 86_400, 604_800, 4 * 604_800, 52 * 604_800];
        let mut previous = f64::NEG_INFINITY;
        for lru in ages {
            let available = available_bytes(&snapshot(100, 100.0, 0.5, lru, 0));
            assert!(
                available >= previous - 1e-9,
                "availability must be non-decreasing in lru age: {previous} -> {available} at lru {lru}"
            );
            previous = available;
        }
    }

    #[test]
    fn very_old_lru_approaches_full_removable_credit() {
        // With lru far beyond the half-life almost everything has decayed.
        let available = available_bytes(&snapshot(0, 100.0, 0.5, 1_000 * 604_800, 0));
        assert!(available > 99.0);
        assert!(available <= 100.0);
    }

    #[test]
    fn result_is_never_negative() {
        let cases = [
            snapshot(0, 0.0, 0.5, 0, 0),
            snapshot(0, 0.0, 0.0, 0, 1_000),
            snapshot(1, 1.0, 0.99, 1, u64::MAX),
        ];
        for case in cases {
            assert!(available_bytes(&case) >= 0.0);
        }
    }
}
