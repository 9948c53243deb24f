use ndarray::{Array1, Array2};

/// Next generation produced by greedy per-index selection
#[derive(Debug, Clone)]
pub struct Selection {
	/// Winners, one per index
	pub population: Array2<f64>,
	/// Fitness of each winner
	pub energies: Array1<f64>,
	/// Number of indices where the trial replaced its target
	pub accepted: usize,
}

/// Compare `trials[i]` against `targets[i]` for every index.
///
/// Both vectors are evaluated (two objective calls per member). The trial
/// wins only when strictly better; otherwise the target is kept unchanged.
pub fn select<F>(func: &F, targets: &Array2<f64>, trials: &Array2<f64>) -> Selection
where
	F: Fn(&Array1<f64>) -> f64,
{
	debug_assert_eq!(targets.dim(), trials.dim());
	let mut population = targets.clone();
	let mut energies = Array1::<f64>::zeros(targets.nrows());
	let mut accepted = 0usize;

	for (i, (target, trial)) in targets.rows().into_iter().zip(trials.rows()).enumerate() {
		let trial = trial.to_owned();
		let f_trial = func(&trial);
		let f_target = func(&target.to_owned());
		if f_trial < f_target {
			population.row_mut(i).assign(&trial);
			energies[i] = f_trial;
			accepted += 1;
		} else {
			energies[i] = f_target;
		}
	}

	Selection { population, energies, accepted }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::DonorSampling;
	use crate::crossover_binomial::build_trials;
	use crate::impl_helpers::evaluate_population;
	use crate::init_random::init_population;
	use ndarray::array;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::cell::Cell;

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|&v| v * v).sum()
	}

	#[test]
	fn test_strictly_better_trial_wins() {
		let targets = array![[1.0, 1.0], [0.5, 0.0], [2.0, 0.0]];
		let trials = array![[0.0, 0.0], [0.0, 0.5], [3.0, 0.0]];
		let sel = select(&sphere, &targets, &trials);
		assert_eq!(sel.population, array![[0.0, 0.0], [0.5, 0.0], [2.0, 0.0]]);
		assert_eq!(sel.energies, array![0.0, 0.25, 4.0]);
		// the tie at index 1 keeps the target
		assert_eq!(sel.accepted, 1);
	}

	#[test]
	fn test_two_evaluations_per_member() {
		let calls = Cell::new(0usize);
		let counted = |x: &Array1<f64>| {
			calls.set(calls.get() + 1);
			sphere(x)
		};
		let targets = Array2::<f64>::zeros((7, 3));
		let trials = Array2::<f64>::ones((7, 3));
		select(&counted, &targets, &trials);
		assert_eq!(calls.get(), 14);
	}

	#[test]
	fn test_selection_never_degrades() {
		let mut rng = StdRng::seed_from_u64(17);
		let mut pop = init_population(20, 4, -5.0, 5.0, &mut rng);
		for _ in 0..30 {
			let before = evaluate_population(&sphere, &pop);
			let trials = build_trials(&pop, 0.8, 0.9, DonorSampling::PerComponent, &mut rng);
			let sel = select(&sphere, &pop, &trials);
			for i in 0..pop.nrows() {
				assert!(sel.energies[i] <= before[i]);
				assert_eq!(sel.energies[i], sphere(&sel.population.row(i).to_owned()));
			}
			pop = sel.population;
		}
	}
}
