#![doc = include_str!("../README.md")]

use ndarray::Array1;

pub mod functions;
pub use functions::*;

/// Where an N-dimensional objective function attains its global minimum.
///
/// The four supported functions all have minima that scale trivially with
/// dimensionality, so the position is stored as a pattern rather than a
/// fixed-length vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimumPosition {
    /// Minimum at the origin (0, 0, ..., 0).
    Origin,
    /// Minimum at (1, 1, ..., 1).
    AllOnes,
}

impl MinimumPosition {
    /// Materialize the minimum position for the given dimensionality.
    pub fn position(&self, dim: usize) -> Array1<f64> {
        match self {
            MinimumPosition::Origin => Array1::zeros(dim),
            MinimumPosition::AllOnes => Array1::ones(dim),
        }
    }
}

/// Metadata for a test function: reference bounds, global minimum, and shape.
#[derive(Debug, Clone, Copy)]
pub struct FunctionMetadata {
    /// Function name
    pub name: &'static str,
    /// Reference search bounds (min, max), identical in every dimension
    pub default_bounds: (f64, f64),
    /// Global minimum position pattern
    pub minimum: MinimumPosition,
    /// Function value at the global minimum
    pub minimum_fitness: f64,
    /// Whether the function is multimodal
    pub multimodal: bool,
}

/// Metadata for the sphere function.
pub const SPHERE_METADATA: FunctionMetadata = FunctionMetadata {
    name: "sphere",
    default_bounds: (-5.0, 5.0),
    minimum: MinimumPosition::Origin,
    minimum_fitness: 0.0,
    multimodal: false,
};

/// Metadata for the rosenbrock function.
pub const ROSENBROCK_METADATA: FunctionMetadata = FunctionMetadata {
    name: "rosenbrock",
    default_bounds: (-2.048, 2.048),
    minimum: MinimumPosition::AllOnes,
    minimum_fitness: 0.0,
    multimodal: false,
};

/// Metadata for the rastrigin function.
pub const RASTRIGIN_METADATA: FunctionMetadata = FunctionMetadata {
    name: "rastrigin",
    default_bounds: (-5.12, 5.12),
    minimum: MinimumPosition::Origin,
    minimum_fitness: 0.0,
    multimodal: true,
};

/// Metadata for the griewank function.
pub const GRIEWANK_METADATA: FunctionMetadata = FunctionMetadata {
    name: "griewank",
    default_bounds: (-600.0, 600.0),
    minimum: MinimumPosition::Origin,
    minimum_fitness: 0.0,
    multimodal: true,
};

/// Metadata for all available test functions.
pub fn metadata() -> [FunctionMetadata; 4] {
    [
        SPHERE_METADATA,
        ROSENBROCK_METADATA,
        RASTRIGIN_METADATA,
        GRIEWANK_METADATA,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn call_function(name: &str, x: &Array1<f64>) -> f64 {
        match name {
            "sphere" => sphere(x),
            "rosenbrock" => rosenbrock(x),
            "rastrigin" => rastrigin(x),
            "griewank" => griewank(x),
            other => panic!("no such function: {}", other),
        }
    }

    #[test]
    fn test_all_minima_evaluate_to_minimum_fitness() {
        let tolerance = 1e-12;

        for meta in metadata() {
            for dim in [2usize, 5, 10] {
                let x = meta.minimum.position(dim);
                let value = call_function(meta.name, &x);
                assert!(
                    (value - meta.minimum_fitness).abs() < tolerance,
                    "{} at its {}D minimum: expected {}, got {}",
                    meta.name,
                    dim,
                    meta.minimum_fitness,
                    value
                );
            }
        }
    }

    #[test]
    fn test_metadata_bounds_are_ordered() {
        for meta in metadata() {
            let (lower, upper) = meta.default_bounds;
            assert!(
                lower < upper,
                "{} has invalid bounds: {} >= {}",
                meta.name,
                lower,
                upper
            );
        }
    }

    #[test]
    fn test_minimum_positions_have_requested_length() {
        assert_eq!(MinimumPosition::Origin.position(7).len(), 7);
        assert_eq!(MinimumPosition::AllOnes.position(3).len(), 3);
        assert_eq!(
            MinimumPosition::AllOnes.position(3),
            Array1::from_vec(vec![1.0, 1.0, 1.0])
        );
    }
}
