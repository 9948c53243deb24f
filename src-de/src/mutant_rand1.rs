use ndarray::{Array1, Array2, Zip};
use rand::Rng;

use crate::distinct_indices::pick_distinct_indices;

/// `x[r1][k] + f * (x[r2][k] - x[r3][k])` for an already chosen donor triple
#[inline]
pub(crate) fn donor_component(pop: &Array2<f64>, donors: (usize, usize, usize), f: f64, k: usize) -> f64 {
	let (r1, r2, r3) = donors;
	pop[(r1, k)] + f * (pop[(r2, k)] - pop[(r3, k)])
}

/// Mutated value of dimension `k` for target `i`, with donors drawn for this
/// dimension alone. No clamping to the bounds.
pub fn mutate_component<R: Rng + ?Sized>(pop: &Array2<f64>, f: f64, i: usize, k: usize, rng: &mut R) -> f64 {
	let donors = pick_distinct_indices(i, pop.nrows(), rng);
	donor_component(pop, donors, f, k)
}

/// Whole rand/1 mutant vector with one donor triple shared by all dimensions
pub fn mutant_rand1<R: Rng + ?Sized>(i: usize, pop: &Array2<f64>, f: f64, rng: &mut R) -> Array1<f64> {
	let (r1, r2, r3) = pick_distinct_indices(i, pop.nrows(), rng);

	Zip::from(pop.row(r1))
		.and(pop.row(r2))
		.and(pop.row(r3))
		.map_collect(|&x1, &x2, &x3| x1 + f * (x2 - x3))
}
