//! Griewank test function

use ndarray::Array1;

/// Griewank function - multimodal, challenging for large dimensions
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-600, 600]
pub fn griewank(x: &Array1<f64>) -> f64 {
    let sum_squares: f64 = x.iter().map(|&xi| xi.powi(2)).sum();
    let product_cos: f64 = x
        .iter()
        .enumerate()
        .map(|(i, &xi)| (xi / ((i + 1) as f64).sqrt()).cos())
        .product();
    1.0 + sum_squares / 4000.0 - product_cos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_griewank_at_origin_is_zero() {
        for dim in [2usize, 5, 20] {
            let x = Array1::zeros(dim);
            assert!(griewank(&x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_griewank_far_from_origin_is_positive() {
        let x = Array1::from_vec(vec![100.0, -200.0]);
        assert!(griewank(&x) > 1.0);
    }
}
