/// Shared function registry for the CLI and the benchmark tests
use evobench_testfunctions::*;
use ndarray::Array1;
use std::collections::HashMap;

use crate::error::{OptimizerError, Result};

/// Test function type definition
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Function registry mapping names to actual function pointers.
pub struct FunctionRegistry {
    functions: HashMap<String, TestFunction>,
}

impl FunctionRegistry {
    /// Creates a new registry with all benchmark functions.
    pub fn new() -> Self {
        let mut functions = HashMap::new();

        // Unimodal functions
        functions.insert("rosenbrock".to_string(), rosenbrock as TestFunction);

        // Multimodal functions
        functions.insert("ackley".to_string(), ackley as TestFunction);
        functions.insert("rastrigin".to_string(), rastrigin as TestFunction);
        functions.insert("griewank".to_string(), griewank as TestFunction);
        functions.insert("easom".to_string(), easom as TestFunction);

        Self { functions }
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<TestFunction> {
        self.functions.get(name).copied()
    }

    /// Like `get`, but unknown names become `OptimizerError::UnknownFunction`.
    pub fn lookup(&self, name: &str) -> Result<TestFunction> {
        self.get(name).ok_or_else(|| OptimizerError::UnknownFunction { name: name.to_string() })
    }

    /// List all available function names, sorted.
    pub fn list_functions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over all registered functions.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TestFunction)> {
        self.functions.iter()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
