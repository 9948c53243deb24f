use ndarray::{Array1, Array2};
use rand::Rng;

use crate::DonorSampling;
use crate::mutant_rand1::{mutant_rand1, mutate_component};

/// Build the DE/rand/1/bin trial vector for target `i`.
///
/// Random draws happen in a fixed order: the guaranteed dimension `j_rand`,
/// then one uniform per dimension, then the donors. Dimension `j_rand` always
/// takes the mutated value, so the trial never copies its target verbatim.
pub fn binomial_trial<R: Rng + ?Sized>(
	pop: &Array2<f64>,
	i: usize,
	f: f64,
	cr: f64,
	donors: DonorSampling,
	rng: &mut R,
) -> Array1<f64> {
	let n = pop.ncols();
	let jrand = rng.random_range(0..n);
	let draws: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
	let mutant = match donors {
		DonorSampling::PerComponent => None,
		DonorSampling::PerVector => Some(mutant_rand1(i, pop, f, rng)),
	};

	let mut trial = pop.row(i).to_owned();
	for (k, &u) in draws.iter().enumerate() {
		if k == jrand || u < cr {
			trial[k] = match &mutant {
				Some(m) => m[k],
				None => mutate_component(pop, f, i, k, rng),
			};
		}
	}
	trial
}

/// Trial vectors for every member, built from `pop` only
pub(crate) fn build_trials<R: Rng + ?Sized>(
	pop: &Array2<f64>,
	f: f64,
	cr: f64,
	donors: DonorSampling,
	rng: &mut R,
) -> Array2<f64> {
	let mut trials = Array2::<f64>::zeros(pop.raw_dim());
	for i in 0..pop.nrows() {
		let trial = binomial_trial(pop, i, f, cr, donors, rng);
		trials.row_mut(i).assign(&trial);
	}
	trials
}
