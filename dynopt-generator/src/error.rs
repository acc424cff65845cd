//! Error types for the trajectory generator.
//!
//! Structured error handling via `thiserror`, with helper methods for
//! error categorization. Every argument-validation failure is fail-fast
//! and produces no partial output.

use thiserror::Error;

/// Errors that can occur while generating a benchmark trajectory.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Dimensionality must be at least 1.
    #[error("invalid dimensionality: {dim} (must be >= 1)")]
    InvalidDimension {
        /// The invalid dimensionality
        dim: usize,
    },

    /// The per-dimension basis term cap must be at least 1.
    #[error("invalid basis term cap: {max_terms} (must be >= 1)")]
    InvalidTermCount {
        /// The invalid term cap
        max_terms: usize,
    },

    /// The lower bound must be strictly below the upper bound.
    #[error("invalid bounds: lower ({lower}) >= upper ({upper})")]
    InvalidBounds {
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The median velocity target must be finite and strictly positive.
    #[error("invalid median velocity target: {velocity} (must be finite and > 0)")]
    InvalidVelocityTarget {
        /// The invalid velocity target
        velocity: f64,
    },

    /// Too few probe points to estimate a second difference.
    #[error("invalid probe resolution: {n_base_points} points (must be >= 3)")]
    InvalidBasePoints {
        /// The invalid probe point count
        n_base_points: usize,
    },

    /// A trajectory must contain at least one change period.
    #[error("invalid change period count: {n_chg_periods} (must be >= 1)")]
    InvalidPeriodCount {
        /// The invalid period count
        n_chg_periods: usize,
    },

    /// Two inputs disagree on dimensionality.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimensionality
        expected: usize,
        /// Actual dimensionality provided
        got: usize,
    },

    /// A change-period index points past the end of the trajectory.
    #[error("change period {period} out of range (trajectory has {n_periods} periods)")]
    PeriodOutOfRange {
        /// The requested change period
        period: usize,
        /// Number of periods in the trajectory
        n_periods: usize,
    },

    /// The step-size search exhausted its iteration budget without
    /// matching the velocity target. Carries the best candidate seen so
    /// the failure can be diagnosed instead of silently substituted.
    #[error(
        "calibration failed after {iterations} iterations: best step size {step_size} \
         realized median velocity {realized_velocity} (curvature {realized_curvature})"
    )]
    CalibrationFailed {
        /// Best candidate step size found before giving up
        step_size: f64,
        /// Median velocity realized by the best candidate
        realized_velocity: f64,
        /// Curvature realized by the best candidate
        realized_curvature: f64,
        /// Iterations spent before giving up
        iterations: usize,
    },

    /// Dataset persistence I/O failure.
    #[error("dataset i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset (de)serialization failure.
    #[error("dataset serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

impl GeneratorError {
    /// Returns `true` if this is an argument-validation error.
    ///
    /// These correspond to inputs rejected before any computation starts.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GeneratorError::InvalidDimension { .. }
                | GeneratorError::InvalidTermCount { .. }
                | GeneratorError::InvalidBounds { .. }
                | GeneratorError::InvalidVelocityTarget { .. }
                | GeneratorError::InvalidBasePoints { .. }
                | GeneratorError::InvalidPeriodCount { .. }
                | GeneratorError::DimensionMismatch { .. }
                | GeneratorError::PeriodOutOfRange { .. }
        )
    }

    /// Returns `true` if the numeric step-size search failed to converge.
    pub fn is_calibration_failure(&self) -> bool {
        matches!(self, GeneratorError::CalibrationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeneratorError::InvalidBounds {
            lower: 10.0,
            upper: 5.0,
        };
        assert_eq!(err.to_string(), "invalid bounds: lower (10) >= upper (5)");
    }

    #[test]
    fn test_is_invalid_argument() {
        let arg_err = GeneratorError::InvalidDimension { dim: 0 };
        let calib_err = GeneratorError::CalibrationFailed {
            step_size: 0.5,
            realized_velocity: 1.2,
            realized_curvature: 3.4,
            iterations: 80,
        };

        assert!(arg_err.is_invalid_argument());
        assert!(!calib_err.is_invalid_argument());
    }

    #[test]
    fn test_is_calibration_failure() {
        let calib_err = GeneratorError::CalibrationFailed {
            step_size: 0.5,
            realized_velocity: 1.2,
            realized_curvature: 3.4,
            iterations: 80,
        };
        let arg_err = GeneratorError::InvalidVelocityTarget { velocity: -1.0 };

        assert!(calib_err.is_calibration_failure());
        assert!(!arg_err.is_calibration_failure());
    }
}
