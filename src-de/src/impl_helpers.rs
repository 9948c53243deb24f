use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Index and value of the smallest entry; ties resolve to the first index and
/// NaN entries lose against any number.
pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
	let mut best_i = 0usize;
	let mut best_v = v[0];
	for (i, &val) in v.iter().enumerate() {
		if val < best_v || (best_v.is_nan() && !val.is_nan()) {
			best_v = val;
			best_i = i;
		}
	}
	(best_i, best_v)
}

/// Evaluate `func` on every row of `pop`
pub(crate) fn evaluate_population<F>(func: &F, pop: &Array2<f64>) -> Array1<f64>
where
	F: Fn(&Array1<f64>) -> f64,
{
	pop.rows().into_iter().map(|row| func(&row.to_owned())).collect()
}

/// Seeded generator when a seed is given, fresh entropy otherwise
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
	match seed {
		Some(s) => StdRng::seed_from_u64(s),
		None => {
			let mut thread_rng = rand::rng();
			StdRng::from_rng(&mut thread_rng)
		}
	}
}
