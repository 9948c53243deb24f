use ndarray::Array2;
use rand::Rng;

/// Uniform random population of `npop` vectors of dimension `n`.
///
/// Every component is drawn independently from `[lower, upper)`. Inputs are
/// not validated here; optimizers check `npop`, `n` and the bounds up front.
pub fn init_population<R: Rng + ?Sized>(
	npop: usize,
	n: usize,
	lower: f64,
	upper: f64,
	rng: &mut R,
) -> Array2<f64> {
	let span = upper - lower;
	Array2::from_shape_simple_fn((npop, n), || lower + rng.random::<f64>() * span)
}
