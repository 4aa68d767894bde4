//! POOL-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Top-level error type for Pool Roulette.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("[POOL-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[POOL-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[POOL-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[POOL-2001] empty candidate list supplied to selection strategy")]
    EmptyCandidates,

    #[error("[POOL-2002] invalid cost snapshot for pool {pool}: {details}")]
    InvalidSnapshot { pool: String, details: String },

    #[error("[POOL-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[POOL-2201] glob compile failure for pattern {pattern:?}: {details}")]
    PatternCompile { pattern: String, details: String },
}

impl SelectionError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "POOL-1001",
            Self::MissingConfig { .. } => "POOL-1002",
            Self::ConfigParse { .. } => "POOL-1003",
            Self::EmptyCandidates => "POOL-2001",
            Self::InvalidSnapshot { .. } => "POOL-2002",
            Self::Serialization { .. } => "POOL-2101",
            Self::PatternCompile { .. } => "POOL-2201",
        }
    }

    /// Convenience constructor for snapshot contract violations.
    #[must_use]
    pub fn invalid_snapshot(pool: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            pool: pool.into(),
            details: details.into(),
        }
    }
}

impl From<serde_json::Error> for SelectionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for SelectionError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
