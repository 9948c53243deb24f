//! Benchmark function implementations organized by category
//!
//! - `unimodal`: single-basin functions (Rosenbrock's curved valley)
//! - `multimodal`: functions with many local minima (Ackley, Rastrigin, Griewank, Easom)

pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use multimodal::*;
pub use unimodal::*;
