//! Rastrigin test function

use ndarray::Array1;

/// Rastrigin function - highly multimodal with a regular grid of local minima
/// Global minimum: f(x) = 0 at x = (0, 0, ..., 0)
/// Bounds: x_i in [-5.12, 5.12]
pub fn rastrigin(x: &Array1<f64>) -> f64 {
    let a = 10.0;
    let two_pi = 2.0 * std::f64::consts::PI;
    a * x.len() as f64
        + x.iter()
            .map(|&xi| xi.powi(2) - a * (two_pi * xi).cos())
            .sum::<f64>()
}
