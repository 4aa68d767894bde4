//! Configuration system: TOML file + env var overrides + smart defaults.
//!
//! `breakeven`, `gap_bytes`, and `mover_cost_factor` are externally
//! configured policy knobs consumed per pool. Defaults apply fleet-wide;
//! per-pool overrides are keyed by pool name.

#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SelectionError};
use crate::cost::{CapacitySnapshot, LoadSnapshot};

/// Full configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    pub policy: PolicyConfig,
    pub selection: SelectionConfig,
}

/// Fleet-wide pool cost policy with per-pool overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    /// Decay reference point: fraction of a removable byte still counted as
    /// occupied after one week. Zero disables decay modeling; values >= 1
    /// select a fixed long half-life.
    pub breakeven: f64,
    /// Minimum spare capacity a pool must retain before it counts as full.
    pub gap_bytes: u64,
    /// Sensitivity of a pool's weight to concurrent writers.
    pub mover_cost_factor: f64,
    /// Per-pool overrides keyed by pool name.
    #[serde(default)]
    pub overrides: HashMap<String, PoolPolicyOverride>,
}

/// Per-pool override for cost policy knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolPolicyOverride {
    pub breakeven: Option<f64>,
    pub gap_bytes: Option<u64>,
    pub mover_cost_factor: Option<f64>,
}

/// Selection strategy tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Fixed seed for the shared random source. Unset means OS entropy;
    /// set only for reproducible selection in tests and replay.
    pub rng_seed: Option<u64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            breakeven: 0.7,
            gap_bytes: 4 * 1_073_741_824,
            mover_cost_factor: 0.5,
            overrides: HashMap::new(),
        }
    }
}

impl PolicyConfig {
    /// Resolve effective breakeven for a pool, applying overrides.
    #[must_use]
    pub fn effective_breakeven(&self, pool: &str) -> f64 {
        self.overrides
            .get(pool)
            .and_then(|o| o.breakeven)
            .unwrap_or(self.breakeven)
    }

    /// Resolve effective gap for a pool, applying overrides.
    #[must_use]
    pub fn effective_gap_bytes(&self, pool: &str) -> u64 {
        self.overrides
            .get(pool)
            .and_then(|o| o.gap_bytes)
            .unwrap_or(self.gap_bytes)
    }

    /// Resolve effective mover cost factor for a pool, applying overrides.
    #[must_use]
    pub fn effective_mover_cost_factor(&self, pool: &str) -> f64 {
        self.overrides
            .get(pool)
            .and_then(|o| o.mover_cost_factor)
            .unwrap_or(self.mover_cost_factor)
    }

    /// Assemble a validated capacity snapshot from live figures plus policy.
    ///
    /// Live figures come from the pool's cost reporting; policy knobs are
    /// resolved here and accepted as provided, never overridden downstream.
    pub fn capacity_snapshot(
        &self,
        pool: &str,
        free_bytes: u64,
        removable_bytes: f64,
        lru_age: Duration,
    ) -> Result<CapacitySnapshot> {
        let snapshot = CapacitySnapshot {
            free_bytes,
            removable_bytes,
            breakeven: self.effective_breakeven(pool),
            lru_age,
            gap_bytes: self.effective_gap_bytes(pool),
        };
        snapshot.validate(pool)?;
        Ok(snapshot)
    }

    /// Assemble a validated load snapshot from live figures plus policy.
    pub fn load_snapshot(&self, pool: &str, writer_count: u32) -> Result<LoadSnapshot> {
        let snapshot = LoadSnapshot {
            mover_cost_factor: self.effective_mover_cost_factor(pool),
            writer_count,
        };
        snapshot.validate(pool)?;
        Ok(snapshot)
    }
}

impl Config {
    /// Default configuration path.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let home_dir = env::var_os("HOME").map_or_else(|| PathBuf::from("/tmp"), PathBuf::from);
        home_dir
            .join(".config")
            .join("pool_roulette")
            .join("config.toml")
    }

    /// Load config from default or explicit path, then apply env overrides.
    ///
    /// Missing config file is not an error when loading from default path;
    /// defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path_buf = path.map_or_else(Self::default_path, Path::to_path_buf);
        let is_explicit_path = path.is_some();

        let mut cfg = if path_buf.exists() {
            let raw = fs::read_to_string(&path_buf).map_err(|source| SelectionError::ConfigParse {
                context: "read",
                details: format!("{}: {source}", path_buf.display()),
            })?;
            let parsed: Self = toml::from_str(&raw)?;
            parsed
        } else if is_explicit_path {
            return Err(SelectionError::MissingConfig { path: path_buf });
        } else {
            Self::default()
        };

        cfg.apply_env_overrides_from(|key| env::var(key).ok())?;
        cfg.normalize_override_keys();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `POOLR_*` env overrides via an injectable lookup.
    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("POOLR_POLICY_BREAKEVEN") {
            self.policy.breakeven = parse_env_f64("POOLR_POLICY_BREAKEVEN", &raw)?;
        }
        if let Some(raw) = lookup("POOLR_POLICY_GAP_BYTES") {
            self.policy.gap_bytes = parse_env_u64("POOLR_POLICY_GAP_BYTES", &raw)?;
        }
        if let Some(raw) = lookup("POOLR_POLICY_MOVER_COST_FACTOR") {
            self.policy.mover_cost_factor = parse_env_f64("POOLR_POLICY_MOVER_COST_FACTOR", &raw)?;
        }
        if let Some(raw) = lookup("POOLR_SELECTION_RNG_SEED") {
            self.selection.rng_seed = Some(parse_env_u64("POOLR_SELECTION_RNG_SEED", &raw)?);
        }
        Ok(())
    }

    /// Strip surrounding whitespace from override keys for consistent lookup.
    fn normalize_override_keys(&mut self) {
        let normalized: HashMap<String, PoolPolicyOverride> = self
            .policy
            .overrides
            .drain()
            .map(|(k, v)| (k.trim().to_string(), v))
            .collect();
        self.policy.overrides = normalized;
    }

    fn validate(&self) -> Result<()> {
        validate_knobs(
            "policy",
            self.policy.breakeven,
            self.policy.mover_cost_factor,
        )?;
        for (pool, o) in &self.policy.overrides {
            validate_knobs(
                pool,
                o.breakeven.unwrap_or(self.policy.breakeven),
                o.mover_cost_factor.unwrap_or(self.policy.mover_cost_factor),
            )?;
        }
        Ok(())
    }
}

fn validate_knobs(scope: &str, breakeven: f64, mover_cost_factor: f64) -> Result<()> {
    if !breakeven.is_finite() || breakeven < 0.0 {
        return Err(SelectionError::InvalidConfig {
            details: format!("{scope}: breakeven must be finite and >= 0, got {breakeven}"),
        });
    }
    if !mover_cost_factor.is_finite() || mover_cost_factor < 0.0 {
        return Err(SelectionError::InvalidConfig {
            details: format!(
                "{scope}: mover_cost_factor must be finite and >= 0, got {mover_cost_factor}"
            ),
        });
    }
    Ok(())
}

fn parse_env_f64(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| SelectionError::InvalidConfig {
            details: format!("{key} must be a float, got {raw:?}"),
        })
}

fn parse_env_u64(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SelectionError::InvalidConfig {
            details: format!("{key} must be a non-negative integer, got {raw:?}"),
        })
}
