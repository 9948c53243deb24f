use crate::{DEConfig, DifferentialEvolution, Report, Result};
use ndarray::Array1;

/// Convenience function with the usual call shape:
/// - `func`: objective function mapping x -> f(x)
/// - `config`: NP, F, CR, generation budget, dimension, bounds, seed
///
/// Returns the best member of the final generation together with run statistics.
pub fn differential_evolution<F>(func: &F, config: DEConfig) -> Result<Report>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let mut de = DifferentialEvolution::new(func, config)?;
	Ok(de.solve())
}
