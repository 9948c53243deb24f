use rand::Rng;

/// Three donor indices in `[0, npop)`, pairwise distinct and distinct from `i`.
///
/// Each index is resampled until it avoids the ones already taken. Terminates
/// with probability one for `npop >= 4`; callers validate the population size.
pub fn pick_distinct_indices<R: Rng + ?Sized>(
	i: usize,
	npop: usize,
	rng: &mut R,
) -> (usize, usize, usize) {
	debug_assert!(npop >= 4, "need at least 4 members to pick 3 donors, got {}", npop);
	let r1 = loop {
		let r = rng.random_range(0..npop);
		if r != i {
			break r;
		}
	};
	let r2 = loop {
		let r = rng.random_range(0..npop);
		if r != i && r != r1 {
			break r;
		}
	};
	let r3 = loop {
		let r = rng.random_range(0..npop);
		if r != i && r != r1 && r != r2 {
			break r;
		}
	};
	(r1, r2, r3)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn test_indices_are_distinct() {
		let mut rng = StdRng::seed_from_u64(42);
		for npop in [4, 5, 10, 50] {
			for i in 0..npop {
				for _ in 0..200 {
					let (r1, r2, r3) = pick_distinct_indices(i, npop, &mut rng);
					assert!(r1 < npop && r2 < npop && r3 < npop);
					assert!(r1 != i && r2 != i && r3 != i);
					assert!(r1 != r2 && r1 != r3 && r2 != r3);
				}
			}
		}
	}

	#[test]
	fn test_minimal_population_uses_all_others() {
		// With NP = 4 the three donors are exactly the other members
		let mut rng = StdRng::seed_from_u64(3);
		for i in 0..4 {
			let (r1, r2, r3) = pick_distinct_indices(i, 4, &mut rng);
			let mut got = vec![r1, r2, r3, i];
			got.sort();
			assert_eq!(got, vec![0, 1, 2, 3]);
		}
	}

	#[test]
	fn test_every_other_index_is_reachable() {
		let mut rng = StdRng::seed_from_u64(9);
		let npop = 8;
		let mut seen = vec![0usize; npop];
		for _ in 0..2000 {
			let (r1, r2, r3) = pick_distinct_indices(0, npop, &mut rng);
			seen[r1] += 1;
			seen[r2] += 1;
			seen[r3] += 1;
		}
		assert_eq!(seen[0], 0);
		assert!(seen[1..].iter().all(|&c| c > 0), "counts {:?}", seen);
	}
}
