//! Configuration errors
//!
//! The simulation itself never fails; numeric guards are clamps. Errors only
//! surface when a tuning file or run initialization payload is inconsistent.

use thiserror::Error;

/// Errors raised when validating tuning or run initialization data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    #[error("coin table must contain at least one coin kind")]
    EmptyCoinTable,
    #[error("coin kind {name:?} has special chance 0 (must be at least 1)")]
    ZeroSpecialChance { name: String },
    #[error("coin kind {name:?} is listed more than once")]
    DuplicateCoinKind { name: String },
    #[error("spawn band [{min}, {max}] is empty for viewport height {height}")]
    EmptySpawnBand { min: f32, max: f32, height: f32 },
    #[error("compounding rate {0} must be finite and non-negative")]
    InvalidCompounding(f64),
    #[error("carried wealth {0} must be finite and non-negative")]
    InvalidWealth(f64),
    #[error("carried multiplier {0} must be finite and at least 1")]
    InvalidMultiplier(f64),
    #[error("highest multiplier {highest} is below current multiplier {current}")]
    HighestBelowCurrent { highest: f64, current: f64 },
    #[error("carried lives {lives} must be between 1 and {max}")]
    InvalidLives { lives: u32, max: u32 },
}
