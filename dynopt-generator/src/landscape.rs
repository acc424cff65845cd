//! The closed catalogue of supported base landscapes.
//!
//! Landscape selection is a tagged enum with an explicit mapping to the
//! evaluator functions, so the supported set is checkable at compile time
//! instead of a string-keyed lookup with a runtime fallback.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;

use crate::error::{GeneratorError, Result};
use dynopt_test_functions::{
    FunctionMetadata, GRIEWANK_METADATA, RASTRIGIN_METADATA, ROSENBROCK_METADATA, SPHERE_METADATA,
    griewank, rastrigin, rosenbrock, sphere,
};

/// A base objective landscape whose optimum the generator moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landscape {
    /// Unimodal quadratic bowl
    Sphere,
    /// Banana-shaped valley, minimum at all-ones
    Rosenbrock,
    /// Highly multimodal grid of local minima
    Rastrigin,
    /// Multimodal with a slowly varying envelope
    Griewank,
}

impl Landscape {
    /// Every supported landscape, in catalogue order.
    pub const ALL: [Landscape; 4] = [
        Landscape::Sphere,
        Landscape::Rosenbrock,
        Landscape::Rastrigin,
        Landscape::Griewank,
    ];

    /// Evaluate the unmoved landscape at a point.
    pub fn evaluate(&self, x: &Array1<f64>) -> f64 {
        match self {
            Landscape::Sphere => sphere(x),
            Landscape::Rosenbrock => rosenbrock(x),
            Landscape::Rastrigin => rastrigin(x),
            Landscape::Griewank => griewank(x),
        }
    }

    /// Metadata of the underlying test function.
    pub fn metadata(&self) -> &'static FunctionMetadata {
        match self {
            Landscape::Sphere => &SPHERE_METADATA,
            Landscape::Rosenbrock => &ROSENBROCK_METADATA,
            Landscape::Rastrigin => &RASTRIGIN_METADATA,
            Landscape::Griewank => &GRIEWANK_METADATA,
        }
    }

    /// Global optimum position and fitness of the unmoved landscape.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidDimension`] when `dim < 1`.
    pub fn original_optimum(&self, dim: usize) -> Result<(Array1<f64>, f64)> {
        if dim < 1 {
            return Err(GeneratorError::InvalidDimension { dim });
        }
        let meta = self.metadata();
        Ok((meta.minimum.position(dim), meta.minimum_fitness))
    }

    /// The catalogue name of this landscape.
    pub fn name(&self) -> &'static str {
        self.metadata().name
    }
}

impl fmt::Display for Landscape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Landscape {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sphere" => Ok(Landscape::Sphere),
            "rosenbrock" => Ok(Landscape::Rosenbrock),
            "rastrigin" => Ok(Landscape::Rastrigin),
            "griewank" => Ok(Landscape::Griewank),
            _ => Err(format!("unknown landscape: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_optima_evaluate_to_their_fitness() {
        for landscape in Landscape::ALL {
            for dim in [2usize, 5, 10] {
                let (position, fitness) = landscape.original_optimum(dim).unwrap();
                assert_eq!(position.len(), dim);
                let value = landscape.evaluate(&position);
                assert!(
                    (value - fitness).abs() < 1e-12,
                    "{} optimum evaluates to {}, expected {}",
                    landscape,
                    value,
                    fitness
                );
            }
        }
    }

    #[test]
    fn test_rosenbrock_optimum_is_all_ones() {
        let (position, _) = Landscape::Rosenbrock.original_optimum(3).unwrap();
        assert_eq!(position, Array1::<f64>::ones(3));
    }

    #[test]
    fn test_round_trip_names() {
        for landscape in Landscape::ALL {
            let parsed: Landscape = landscape.name().parse().unwrap();
            assert_eq!(parsed, landscape);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Sphere".parse::<Landscape>().unwrap(), Landscape::Sphere);
        assert_eq!(
            "RASTRIGIN".parse::<Landscape>().unwrap(),
            Landscape::Rastrigin
        );
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!("ackley".parse::<Landscape>().is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Landscape::Sphere.original_optimum(0),
            Err(GeneratorError::InvalidDimension { dim: 0 })
        ));
    }
}
