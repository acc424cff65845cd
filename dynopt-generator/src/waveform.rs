//! Waveform composer: per-dimension random compositions of sine terms.
//!
//! Each dimension of the optimum movement is driven by a sum of between 1
//! and `max_terms` sine terms with randomized amplitude, frequency, and
//! phase. All randomness comes from one seeded `StdRng` per call, so the
//! composition is a pure function of `(seed, dim, max_terms)` and two calls
//! with the same arguments produce bit-identical specs.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// Amplitude sampling range, strictly positive: a zero-amplitude term is
/// constant and would not move the optimum. The floor guarantees every
/// dimension can realize per-period displacements above typical velocity
/// targets even when clipping pins half the waveform at a bound.
pub const AMPLITUDE_RANGE: (f64, f64) = (3.0, 8.0);
/// Frequency sampling range, strictly positive: a zero-frequency term is
/// constant regardless of amplitude.
pub const FREQUENCY_RANGE: (f64, f64) = (0.5, 2.0);

/// One periodic basis term of a dimension's movement function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisTerm {
    /// Peak displacement contributed by this term
    pub amplitude: f64,
    /// Angular frequency (radians per time unit)
    pub frequency: f64,
    /// Phase offset in [0, 2*pi)
    pub phase: f64,
}

impl BasisTerm {
    /// Evaluate this term at time `t`.
    pub fn eval(&self, t: f64) -> f64 {
        self.amplitude * (self.frequency * t + self.phase).sin()
    }
}

/// The composed movement function of one dimension: an additive mixture of
/// [`BasisTerm`]s. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformSpec {
    /// Basis terms, composed additively
    pub terms: Vec<BasisTerm>,
}

impl WaveformSpec {
    /// Evaluate the composed waveform at time `t`.
    pub fn eval(&self, t: f64) -> f64 {
        self.terms.iter().map(|term| term.eval(t)).sum()
    }
}

/// Build one random waveform spec per dimension.
///
/// A single random stream, seeded with `seed`, is consumed across all
/// dimensions in order. Generating the movement for several landscapes
/// with the same seed therefore yields identical movement, which lets
/// experiments compare algorithms on identically moving optima.
///
/// # Errors
///
/// Returns [`GeneratorError::InvalidDimension`] when `dim < 1` and
/// [`GeneratorError::InvalidTermCount`] when `max_terms < 1`.
pub fn compose_waveforms(dim: usize, seed: u64, max_terms: usize) -> Result<Vec<WaveformSpec>> {
    if dim < 1 {
        return Err(GeneratorError::InvalidDimension { dim });
    }
    if max_terms < 1 {
        return Err(GeneratorError::InvalidTermCount { max_terms });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::with_capacity(dim);
    for _ in 0..dim {
        let n_terms = rng.random_range(1..=max_terms);
        let mut terms = Vec::with_capacity(n_terms);
        for _ in 0..n_terms {
            let amplitude = rng.random_range(AMPLITUDE_RANGE.0..AMPLITUDE_RANGE.1);
            let frequency = rng.random_range(FREQUENCY_RANGE.0..FREQUENCY_RANGE.1);
            let phase = rng.random_range(0.0..2.0 * std::f64::consts::PI);
            terms.push(BasisTerm {
                amplitude,
                frequency,
                phase,
            });
        }
        specs.push(WaveformSpec { terms });
    }
    Ok(specs)
}
