//! Dynamic benchmark trajectory generator.
//!
//! This crate synthesizes reproducible optimum-movement trajectories for
//! dynamic optimization research. For a chosen base landscape and
//! dimensionality it produces, per change period, the position of the
//! moving global optimum: each dimension follows a random composition of
//! sine terms, sampled at a step size calibrated so the median per-period
//! displacement matches a requested target, and clipped into a configured
//! bound range.
//!
//! # Features
//!
//! - Seeded, bit-reproducible waveform composition per dimension
//! - Median-velocity calibration with a curvature tiebreaker
//! - Bounded trajectories (clipping, not wrapping)
//! - Closed landscape catalogue (sphere, rosenbrock, rastrigin, griewank)
//! - Fitness evaluation against the moved optimum at any change period
//! - JSON dataset persistence for re-running experiments
//!
//! # Example
//!
//! ```rust
//! use dynopt_generator::{GeneratorConfigBuilder, Landscape, generate};
//!
//! let config = GeneratorConfigBuilder::new()
//!     .seed(42)
//!     .bounds(0.0, 900.0)
//!     .desired_median_velocity(2.0)
//!     .build()
//!     .expect("valid config");
//!
//! let (orig_optimum, _fit) = Landscape::Sphere.original_optimum(5).expect("dim >= 1");
//! let benchmark = generate(&config, 100, &orig_optimum).expect("generation should succeed");
//!
//! assert_eq!(benchmark.trajectory.nrows(), 100);
//! assert_eq!(benchmark.trajectory.ncols(), 5);
//! ```
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Error types and the crate-wide `Result` alias.
pub mod error;
pub use error::{GeneratorError, Result};

use ndarray::{Array1, Array2};

/// Step-size calibration and bounded trajectory sampling.
pub mod calibrate;
/// Serializable dataset container and JSON persistence.
pub mod dataset;
/// Fitness evaluation against the moved optimum.
pub mod fitness;
/// The closed catalogue of supported base landscapes.
pub mod landscape;
/// Random sine-mixture composition per dimension.
pub mod waveform;


pub use calibrate::{Calibration, calibrate_and_sample};
pub use dataset::{DynamicDataset, dataset_file_name};
pub use fitness::{fitness_at_period, fitness_at_period_named};
pub use landscape::Landscape;
pub use waveform::{BasisTerm, WaveformSpec, compose_waveforms};

/// Configuration for one trajectory generation run.
///
/// Holds the random seed, the waveform composition cap, the probe
/// resolution, the bound range, and the movement statistics targets. Use
/// [`GeneratorConfigBuilder`] to construct a validated instance.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed of the per-call random stream.
    pub seed: u64,
    /// Maximum number of sine terms composed per dimension.
    pub max_terms: usize,
    /// Number of probe points used to estimate achievable movement.
    pub n_base_points: usize,
    /// Lower bound of every trajectory coordinate.
    pub lbound: f64,
    /// Upper bound of every trajectory coordinate.
    pub ubound: f64,
    /// Target mean absolute second difference (secondary, best-effort).
    pub desired_curvature: f64,
    /// Target median absolute per-period displacement (primary).
    pub desired_median_velocity: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_terms: 4,
            n_base_points: 100,
            lbound: 0.0,
            ubound: 900.0,
            desired_curvature: 10.0,
            desired_median_velocity: 2.0,
        }
    }
}

/// Fluent builder for [`GeneratorConfig`].
///
/// # Example
///
/// ```rust
/// use dynopt_generator::GeneratorConfigBuilder;
///
/// let config = GeneratorConfigBuilder::new()
///     .seed(234012)
///     .max_terms(4)
///     .n_base_points(100)
///     .bounds(0.0, 900.0)
///     .desired_curvature(10.0)
///     .desired_median_velocity(2.0)
///     .build()
///     .expect("valid config");
/// ```
pub struct GeneratorConfigBuilder {
    cfg: GeneratorConfig,
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: GeneratorConfig::default(),
        }
    }
    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = v;
        self
    }
    /// Sets the per-dimension sine term cap.
    pub fn max_terms(mut self, v: usize) -> Self {
        self.cfg.max_terms = v;
        self
    }
    /// Sets the probe resolution.
    pub fn n_base_points(mut self, v: usize) -> Self {
        self.cfg.n_base_points = v;
        self
    }
    /// Sets the coordinate bound range.
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.cfg.lbound = lower;
        self.cfg.ubound = upper;
        self
    }
    /// Sets the curvature target.
    pub fn desired_curvature(mut self, v: f64) -> Self {
        self.cfg.desired_curvature = v;
        self
    }
    /// Sets the median velocity target.
    pub fn desired_median_velocity(mut self, v: f64) -> Self {
        self.cfg.desired_median_velocity = v;
        self
    }
    /// Builds and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns the corresponding `InvalidArgument`-kind
    /// [`GeneratorError`] when the bounds are not ordered, the velocity
    /// target is not positive and finite, the term cap is zero, or the
    /// probe resolution is below three points.
    pub fn build(self) -> Result<GeneratorConfig> {
        let cfg = self.cfg;
        if cfg.lbound >= cfg.ubound {
            return Err(GeneratorError::InvalidBounds {
                lower: cfg.lbound,
                upper: cfg.ubound,
            });
        }
        if !(cfg.desired_median_velocity.is_finite() && cfg.desired_median_velocity > 0.0) {
            return Err(GeneratorError::InvalidVelocityTarget {
                velocity: cfg.desired_median_velocity,
            });
        }
        if cfg.max_terms < 1 {
            return Err(GeneratorError::InvalidTermCount {
                max_terms: cfg.max_terms,
            });
        }
        if cfg.n_base_points < 3 {
            return Err(GeneratorError::InvalidBasePoints {
                n_base_points: cfg.n_base_points,
            });
        }
        Ok(cfg)
    }
}

/// Result of one trajectory generation run.
///
/// All entities are created fresh per invocation and never mutated after
/// construction; the struct is handed to persistence and then discarded.
#[derive(Debug, Clone)]
pub struct DynamicBenchmark {
    /// Optimum position per change period, shape `(n_chg_periods, dim)`
    pub trajectory: Array2<f64>,
    /// The per-dimension waveform parameterization that produced it
    pub waveforms: Vec<WaveformSpec>,
    /// The shared step size and the realized movement statistics
    pub calibration: Calibration,
}

/// Compose the per-dimension waveforms and calibrate the bounded
/// trajectory in one call.
///
/// `orig_optimum` is the global optimum position of the unmoved landscape;
/// its length fixes the dimensionality of the run.
///
/// # Errors
///
/// Propagates argument-validation errors from the composer and the
/// calibrator, and [`GeneratorError::CalibrationFailed`] when the
/// step-size search does not converge.
pub fn generate(
    config: &GeneratorConfig,
    n_chg_periods: usize,
    orig_optimum: &Array1<f64>,
) -> Result<DynamicBenchmark> {
    let dim = orig_optimum.len();
    let waveforms = compose_waveforms(dim, config.seed, config.max_terms)?;
    let (trajectory, calibration) = calibrate_and_sample(
        &waveforms,
        orig_optimum,
        n_chg_periods,
        config.n_base_points,
        config.lbound,
        config.ubound,
        config.desired_curvature,
        config.desired_median_velocity,
    )?;
    Ok(DynamicBenchmark {
        trajectory,
        waveforms,
        calibration,
    })
}
