// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Colony Simulation Suite ("The Petri Dish") - Errors

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be within [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("max_colonies must be at least 1")]
    NoColonies,
}

/// Rejected stimulus calls. The simulation itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("buy intensity must be a positive finite number (got {0})")]
    InvalidIntensity(f64),
    #[error("colony #{0} does not exist")]
    UnknownColony(u32),
}
