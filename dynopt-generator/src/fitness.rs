//! Fitness of an individual against the moved optimum.
//!
//! The trajectory stores, per change period, the position of the moved
//! global optimum. Since every trajectory point was built by adding a
//! movement offset to the original optimum, the offset can be recovered by
//! subtraction and an individual can be evaluated with the unmoved
//! landscape after shifting it back.

use ndarray::{Array1, Array2};

use crate::error::{GeneratorError, Result};
use crate::landscape::Landscape;

/// Evaluate `x` at change period `period` of a moving landscape.
///
/// The optimum movement at that period is
/// `trajectory.row(period) - orig_optimum`; the individual is shifted back
/// by that amount and evaluated with the unmoved landscape. When `x` sits
/// exactly on the moved optimum the movement cancels and the result equals
/// the landscape's value at the original optimum.
///
/// # Errors
///
/// Returns [`GeneratorError::PeriodOutOfRange`] when `period` points past
/// the trajectory and [`GeneratorError::DimensionMismatch`] when `x`,
/// the trajectory, and the baseline disagree on dimensionality.
pub fn fitness_at_period(
    x: &Array1<f64>,
    period: usize,
    landscape: Landscape,
    trajectory: &Array2<f64>,
    orig_optimum: &Array1<f64>,
) -> Result<f64> {
    if period >= trajectory.nrows() {
        return Err(GeneratorError::PeriodOutOfRange {
            period,
            n_periods: trajectory.nrows(),
        });
    }
    if x.len() != trajectory.ncols() || orig_optimum.len() != trajectory.ncols() {
        return Err(GeneratorError::DimensionMismatch {
            expected: trajectory.ncols(),
            got: if x.len() != trajectory.ncols() {
                x.len()
            } else {
                orig_optimum.len()
            },
        });
    }

    let movement = &trajectory.row(period).to_owned() - orig_optimum;
    let moved_back = x - &movement;
    Ok(landscape.evaluate(&moved_back))
}

/// Like [`fitness_at_period`], resolving the landscape from its name.
///
/// An unrecognized name is not fatal: it logs a warning and yields `None`,
/// which callers must treat as "not computed". Errors from the underlying
/// evaluation are propagated unchanged.
pub fn fitness_at_period_named(
    x: &Array1<f64>,
    period: usize,
    landscape_name: &str,
    trajectory: &Array2<f64>,
    orig_optimum: &Array1<f64>,
) -> Result<Option<f64>> {
    match landscape_name.parse::<Landscape>() {
        Ok(landscape) => fitness_at_period(x, period, landscape, trajectory, orig_optimum).map(Some),
        Err(_) => {
            log::warn!("fitness_at_period_named: unknown landscape {}", landscape_name);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn fixture() -> (Array2<f64>, Array1<f64>) {
        // Original optimum at (1, 2); period 3 offset is (0.5, -0.25).
        let orig = Array1::from_vec(vec![1.0, 2.0]);
        let trajectory = arr2(&[
            [1.0, 2.0],
            [1.1, 2.1],
            [1.2, 1.9],
            [1.5, 1.75],
        ]);
        (trajectory, orig)
    }

    #[test]
    fn test_movement_cancels_on_the_moved_optimum() {
        let (trajectory, orig) = fixture();
        // Individual sitting exactly on the moved optimum of period 3.
        let x = trajectory.row(3).to_owned();
        let fitness =
            fitness_at_period(&x, 3, Landscape::Sphere, &trajectory, &orig).unwrap();
        let at_orig = Landscape::Sphere.evaluate(&orig);
        assert!((fitness - at_orig).abs() < 1e-12);
    }

    #[test]
    fn test_unmoved_period_is_plain_evaluation() {
        let (trajectory, orig) = fixture();
        let x = Array1::from_vec(vec![3.0, 4.0]);
        let fitness =
            fitness_at_period(&x, 0, Landscape::Sphere, &trajectory, &orig).unwrap();
        assert_eq!(fitness, Landscape::Sphere.evaluate(&x));
    }

    #[test]
    fn test_period_out_of_range() {
        let (trajectory, orig) = fixture();
        let x = Array1::zeros(2);
        let result = fitness_at_period(&x, 4, Landscape::Sphere, &trajectory, &orig);
        assert!(matches!(
            result,
            Err(GeneratorError::PeriodOutOfRange {
                period: 4,
                n_periods: 4
            })
        ));
    }

    #[test]
    fn test_unknown_landscape_name_yields_none() {
        let (trajectory, orig) = fixture();
        let x = Array1::zeros(2);
        let result = fitness_at_period_named(&x, 0, "ackley", &trajectory, &orig).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_known_landscape_name_yields_fitness() {
        let (trajectory, orig) = fixture();
        let x = Array1::zeros(2);
        let by_name = fitness_at_period_named(&x, 1, "sphere", &trajectory, &orig)
            .unwrap()
            .unwrap();
        let direct =
            fitness_at_period(&x, 1, Landscape::Sphere, &trajectory, &orig).unwrap();
        assert_eq!(by_name, direct);
    }
}
