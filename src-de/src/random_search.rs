//! Random search baseline: pure exploration, no refinement of earlier samples.

use std::fmt;

use log::{debug, info, warn};
use ndarray::{Array1, Array2};
use rand::Rng;

use crate::impl_helpers::{argmin, evaluate_population, make_rng};
use crate::init_random::init_population;
use crate::{Report, Result, validate};

/// Configuration for random search
#[derive(Clone)]
pub struct RandomSearchConfig {
	/// Samples drawn per generation
	pub popsize: usize,
	pub maxiter: usize,
	pub dim: usize,
	pub bounds: (f64, f64),
	pub seed: Option<u64>,
	pub validate: bool,
}

impl Default for RandomSearchConfig {
	fn default() -> Self {
		Self { popsize: 20, maxiter: 100, dim: 2, bounds: (-1.0, 1.0), seed: None, validate: true }
	}
}

impl fmt::Debug for RandomSearchConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"RandomSearchConfig(NP={}, max_gen={}, d={}, bounds=({}, {}), seed={:?})",
			self.popsize, self.maxiter, self.dim, self.bounds.0, self.bounds.1, self.seed
		)
	}
}

impl RandomSearchConfig {
	pub fn check(&self) -> Result<()> {
		validate::check_popsize(self.popsize)?;
		validate::check_dim(self.dim)?;
		if self.validate {
			validate::check_bounds(self.bounds)?;
		}
		Ok(())
	}
}

/// Fluent builder for `RandomSearchConfig`
#[derive(Default)]
pub struct RandomSearchConfigBuilder {
	cfg: RandomSearchConfig,
}

impl RandomSearchConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.maxiter = v;
		self
	}
	pub fn dim(mut self, v: usize) -> Self {
		self.cfg.dim = v;
		self
	}
	pub fn bounds(mut self, v: (f64, f64)) -> Self {
		self.cfg.bounds = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn validate(mut self, v: bool) -> Self {
		self.cfg.validate = v;
		self
	}
	pub fn build(self) -> Result<RandomSearchConfig> {
		self.cfg.check()?;
		Ok(self.cfg)
	}
}

/// Random search optimizer
pub struct RandomSearch<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	func: &'a F,
	config: RandomSearchConfig,
	setup_nfev: usize,
}

impl<'a, F> RandomSearch<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	pub fn new(func: &'a F, config: RandomSearchConfig) -> Result<Self> {
		config.check()?;
		let setup_nfev = if config.validate {
			validate::smoke_test(func, config.dim, config.bounds)?;
			1
		} else {
			warn!("random search validation disabled");
			0
		};
		Ok(Self { func, config, setup_nfev })
	}

	pub fn solve(&self) -> Report {
		let mut rng = make_rng(self.config.seed);
		self.solve_with_rng(&mut rng)
	}

	/// Draw a fresh population every generation and keep the best sample seen
	pub fn solve_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Report {
		let RandomSearchConfig { popsize: npop, maxiter, dim: n, bounds: (lower, upper), .. } =
			self.config;
		info!(
			"random search start: NP={}, d={}, max_gen={}, bounds=({}, {})",
			npop, n, maxiter, lower, upper
		);

		let mut nfev = self.setup_nfev;
		let mut best: Option<(Array1<f64>, f64)> = None;
		let mut population = Array2::<f64>::zeros((0, n));
		let mut energies = Array1::<f64>::zeros(0);

		for iter in 1..=maxiter {
			population = init_population(npop, n, lower, upper, rng);
			energies = evaluate_population(self.func, &population);
			nfev += npop;

			let (i, f) = argmin(&energies);
			let improved = match &best {
				Some((_, best_f)) => f < *best_f || (best_f.is_nan() && !f.is_nan()),
				None => true,
			};
			if improved {
				best = Some((population.row(i).to_owned(), f));
			}
			debug!("random search gen {:4}  gen_best={:.6e}  improved={}", iter, f, improved);
		}

		let (x, fun) = match best {
			Some(found) => found,
			None => {
				// Zero budget: a single sample so the caller still gets a candidate
				population = init_population(npop, n, lower, upper, rng);
				energies = evaluate_population(self.func, &population);
				nfev += npop;
				let (i, f) = argmin(&energies);
				(population.row(i).to_owned(), f)
			}
		};

		info!("random search finished: best_f={:.6e} nfev={}", fun, nfev);
		Report {
			x,
			fun,
			nit: maxiter,
			nfev,
			message: format!("Maximum generations reached: {}", maxiter),
			population,
			population_energies: energies,
		}
	}
}

/// Convenience wrapper: validate, then run random search
pub fn random_search<F>(func: &F, config: RandomSearchConfig) -> Result<Report>
where
	F: Fn(&Array1<f64>) -> f64,
{
	Ok(RandomSearch::new(func, config)?.solve())
}
