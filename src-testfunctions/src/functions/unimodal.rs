//! Unimodal benchmark functions

use ndarray::Array1;

/// Rosenbrock function - N-dimensional
/// Global minimum: f(x) = 0 at x = (1, 1, ..., 1)
/// Bounds: x_i in [-5, 10] or [-2.048, 2.048]
///
/// A one-dimensional input has no consecutive pair and evaluates to 0.
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
    x.iter()
        .zip(x.iter().skip(1))
        .map(|(&xi, &xi_plus_1)| 100.0 * (xi_plus_1 - xi.powi(2)).powi(2) + (1.0 - xi).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rosenbrock_global_minimum() {
        for n in [2, 5, 10] {
            let x = Array1::from_elem(n, 1.0);
            assert_eq!(rosenbrock(&x), 0.0);
        }
    }

    #[test]
    fn test_rosenbrock_known_values() {
        // (0,0): 100*(0-0)^2 + (1-0)^2 = 1
        assert_eq!(rosenbrock(&array![0.0, 0.0]), 1.0);
        // (-1,1): 100*(1-1)^2 + (1+1)^2 = 4
        assert_eq!(rosenbrock(&array![-1.0, 1.0]), 4.0);
        // 3D sums both consecutive pairs
        let x = array![0.0, 0.0, 0.0];
        assert_eq!(rosenbrock(&x), 2.0);
    }

    #[test]
    fn test_rosenbrock_single_dimension_is_zero() {
        assert_eq!(rosenbrock(&array![3.0]), 0.0);
    }
}
