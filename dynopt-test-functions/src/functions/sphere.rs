//! Sphere test function

use ndarray::Array1;

/// Sphere function - the simplest unimodal quadratic bowl
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5, 5]
pub fn sphere(x: &Array1<f64>) -> f64 {
    x.iter().map(|&xi| xi.powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_at_origin_is_zero() {
        let x = Array1::from_vec(vec![0.0; 4]);
        assert_eq!(sphere(&x), 0.0);
    }

    #[test]
    fn test_sphere_is_sum_of_squares() {
        let x = Array1::from_vec(vec![1.0, -2.0, 3.0]);
        assert_eq!(sphere(&x), 14.0);
    }
}
