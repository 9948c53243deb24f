//! Benchmark functions for continuous optimizers
//!
//! This library provides the classic non-convex test functions used to compare
//! Differential Evolution against simpler baselines:
//!
//! - **Unimodal**: rosenbrock
//! - **Multimodal**: ackley, rastrigin, griewank, easom
//!
//! Every function maps a real vector to a scalar fitness (lower is better) and
//! keeps no internal state.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use evobench_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! assert!(ackley(&x).abs() < 1e-12);
//!
//! // Get function metadata
//! let bounds = get_function_bounds("ackley", 2);
//! assert_eq!(bounds, Some(vec![(-32.768, 32.768); 2]));
//! ```

use std::collections::HashMap;

// Import all function modules
pub mod functions;
pub use functions::*;

/// Metadata for a test function including its domain and known optima
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// Search domain applied to every dimension (min, max)
    pub domain: (f64, f64),
    /// Global minima locations and values, given for the smallest supported dimension
    pub global_minima: Vec<(Vec<f64>, f64)>,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
    /// Typical dimension(s) for the function
    pub dimensions: Vec<usize>,
    /// Fixed dimensionality, if the function is only defined for one
    pub fixed_dimension: Option<usize>,
}

impl FunctionMetadata {
    /// Whether the function is defined for `dim`-dimensional inputs
    pub fn supports_dimension(&self, dim: usize) -> bool {
        dim > 0 && self.fixed_dimension.is_none_or(|d| d == dim)
    }

    /// Location of the global minimum lifted to `dim` dimensions.
    ///
    /// Separable optima (all coordinates equal) are repeated; fixed-dimension
    /// functions only answer for their own dimension.
    pub fn global_minimum_at(&self, dim: usize) -> Option<(Vec<f64>, f64)> {
        if !self.supports_dimension(dim) {
            return None;
        }
        let (coords, value) = self.global_minima.first()?;
        if coords.len() == dim {
            return Some((coords.clone(), *value));
        }
        let first = *coords.first()?;
        if coords.iter().all(|&c| c == first) {
            Some((vec![first; dim], *value))
        } else {
            None
        }
    }
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let mut metadata = HashMap::new();

    metadata.insert(
        "ackley".to_string(),
        FunctionMetadata {
            name: "ackley".to_string(),
            domain: (-32.768, 32.768),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "N-dimensional multimodal function with a nearly flat outer region".to_string(),
            multimodal: true,
            dimensions: vec![2, 5, 15],
            fixed_dimension: None,
        },
    );

    metadata.insert(
        "rastrigin".to_string(),
        FunctionMetadata {
            name: "rastrigin".to_string(),
            domain: (-5.12, 5.12),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "N-dimensional multimodal function with a regular grid of local minima".to_string(),
            multimodal: true,
            dimensions: vec![2, 5, 10],
            fixed_dimension: None,
        },
    );

    metadata.insert(
        "griewank".to_string(),
        FunctionMetadata {
            name: "griewank".to_string(),
            domain: (-600.0, 600.0),
            global_minima: vec![(vec![0.0, 0.0], 0.0)],
            description: "N-dimensional multimodal function, product of cosines over a parabola".to_string(),
            multimodal: true,
            dimensions: vec![2, 5, 10],
            fixed_dimension: None,
        },
    );

    metadata.insert(
        "rosenbrock".to_string(),
        FunctionMetadata {
            name: "rosenbrock".to_string(),
            domain: (-2.048, 2.048),
            global_minima: vec![(vec![1.0, 1.0], 0.0)],
            description: "N-dimensional unimodal function with a narrow curved valley".to_string(),
            multimodal: false,
            dimensions: vec![2, 5, 10],
            fixed_dimension: None,
        },
    );

    metadata.insert(
        "easom".to_string(),
        FunctionMetadata {
            name: "easom".to_string(),
            domain: (-100.0, 100.0),
            global_minima: vec![(vec![std::f64::consts::PI, std::f64::consts::PI], -1.0)],
            description: "2D function, flat everywhere except a narrow basin around (pi, pi)".to_string(),
            multimodal: true,
            dimensions: vec![2],
            fixed_dimension: Some(2),
        },
    );

    metadata
}

/// Per-dimension domain of a function by name
pub fn get_function_domain(name: &str) -> Option<(f64, f64)> {
    get_function_metadata().get(name).map(|m| m.domain)
}

/// Get bounds for a specific function, repeated for `dim` dimensions.
///
/// Returns `None` for unknown names and for dimensions the function does not support.
pub fn get_function_bounds(name: &str, dim: usize) -> Option<Vec<(f64, f64)>> {
    let metadata = get_function_metadata();
    let meta = metadata.get(name)?;
    if !meta.supports_dimension(dim) {
        return None;
    }
    Some(vec![meta.domain; dim])
}

/// Names of all available test functions, sorted
pub fn list_functions() -> Vec<String> {
    let mut names: Vec<String> = get_function_metadata().into_keys().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn lookup(name: &str) -> fn(&Array1<f64>) -> f64 {
        match name {
            "ackley" => ackley,
            "rastrigin" => rastrigin,
            "griewank" => griewank,
            "rosenbrock" => rosenbrock,
            "easom" => easom,
            other => panic!("no function {}", other),
        }
    }

    #[test]
    fn test_global_minima_match_function_values() {
        let tolerance = 1e-9;
        for (name, meta) in get_function_metadata() {
            let f = lookup(&name);
            for &dim in &meta.dimensions {
                let (coords, expected) = meta
                    .global_minimum_at(dim)
                    .unwrap_or_else(|| panic!("{} should have a minimum in {}d", name, dim));
                let (lo, hi) = meta.domain;
                assert!(coords.iter().all(|&c| c >= lo && c <= hi), "{} minimum out of domain", name);
                let actual = f(&Array1::from_vec(coords));
                assert!(
                    (actual - expected).abs() <= tolerance,
                    "{} in {}d: expected {}, got {}",
                    name,
                    dim,
                    expected,
                    actual
                );
            }
        }
    }

    #[test]
    fn test_bounds_lookup() {
        assert_eq!(get_function_bounds("griewank", 3), Some(vec![(-600.0, 600.0); 3]));
        assert_eq!(get_function_bounds("easom", 2), Some(vec![(-100.0, 100.0); 2]));
        assert_eq!(get_function_bounds("easom", 3), None);
        assert_eq!(get_function_bounds("ackley", 0), None);
        assert_eq!(get_function_bounds("sphere", 2), None);
        assert_eq!(get_function_domain("rastrigin"), Some((-5.12, 5.12)));
    }

    #[test]
    fn test_list_functions_sorted() {
        assert_eq!(
            list_functions(),
            vec!["ackley", "easom", "griewank", "rastrigin", "rosenbrock"]
        );
    }
}
