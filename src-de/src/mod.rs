//! Differential Evolution (DE/rand/1/bin) global optimizer in pure Rust using ndarray
//!
//! Alongside the DE engine the crate ships two baselines that share its
//! configuration shape and report type:
//! - random search: a brand-new uniform population every generation
//! - gradient descent: forward-difference gradients from `NP` starting points
//!
//! Supported features:
//! - Uniform box bounds, enforced at initialization only
//! - Binomial crossover with a guaranteed mutated dimension
//! - Donors redrawn per dimension (default) or shared by the whole vector
//! - Greedy per-index selection over synchronous generations
//! - Up-front parameter validation and objective smoke test
//! - Seedable or injected random source, no global state
//! - Optional per-generation callback (may stop between generations)
//!
//! # Example
//!
//! ```rust
//! use evobench_de::{differential_evolution, DEConfigBuilder};
//!
//! let config = DEConfigBuilder::new()
//!     .popsize(20)
//!     .maxiter(200)
//!     .dim(3)
//!     .bounds((-5.0, 5.0))
//!     .seed(42)
//!     .build()
//!     .expect("valid configuration");
//!
//! let sphere = |x: &ndarray::Array1<f64>| x.iter().map(|&v| v * v).sum::<f64>();
//! let report = differential_evolution(&sphere, config).expect("compatible objective");
//! assert!(report.fun < 1e-6);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info, trace, warn};
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{OptimizerError, Result};

pub mod distinct_indices;
pub mod init_random;
pub mod mutant_rand1;

pub mod crossover_binomial;
pub mod selection;

pub mod differential_evolution;
pub mod function_registry;
pub mod gradient_descent;
pub(crate) mod impl_helpers;
pub mod params;
pub mod random_search;
pub mod recorder;
pub mod validate;

pub use differential_evolution::differential_evolution;
pub use distinct_indices::pick_distinct_indices;
pub use function_registry::{FunctionRegistry, TestFunction};
pub use gradient_descent::{
	GradientDescent, GradientDescentConfig, GradientDescentConfigBuilder, gradient_descent,
};
pub use init_random::init_population;
pub use mutant_rand1::mutate_component;
pub use params::{Algorithm, OptimizerParams};
pub use random_search::{RandomSearch, RandomSearchConfig, RandomSearchConfigBuilder, random_search};
pub use recorder::{GenerationRecord, OptimizationRecorder};

use crossover_binomial::build_trials;
use impl_helpers::{argmin, evaluate_population, make_rng};

/// Per-generation callback type
pub type CallbackFn = Box<dyn FnMut(&DEIntermediate) -> CallbackAction>;

/// How donor indices are drawn for the mutated dimensions of one trial vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DonorSampling {
	/// Fresh donors `r1, r2, r3` for every mutated dimension
	#[default]
	PerComponent,
	/// One donor triple per trial vector (textbook rand/1)
	PerVector,
}

impl FromStr for DonorSampling {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"per-component" | "per_component" | "component" => Ok(DonorSampling::PerComponent),
			"per-vector" | "per_vector" | "vector" => Ok(DonorSampling::PerVector),
			_ => Err(format!("unknown donor sampling: {}", s)),
		}
	}
}

/// Configuration for the Differential Evolution optimizer
pub struct DEConfig {
	/// Population size NP (>= 4)
	pub popsize: usize,
	/// Generation budget; the loop always runs exactly this many generations
	/// unless the callback stops it
	pub maxiter: usize,
	/// Differential weight F in (0, 2]
	pub mutation: f64,
	/// Crossover rate CR in [0, 1]
	pub recombination: f64,
	/// Problem dimensionality d
	pub dim: usize,
	/// Initialization box applied to every dimension
	pub bounds: (f64, f64),
	pub seed: Option<u64>,
	pub donors: DonorSampling,
	/// Range checks and objective smoke test; NP and d are always checked
	pub validate: bool,
	/// Optional per-generation callback (may stop early)
	pub callback: Option<CallbackFn>,
}

impl Default for DEConfig {
	fn default() -> Self {
		Self {
			popsize: 20,
			maxiter: 100,
			mutation: 0.8,
			recombination: 0.9,
			dim: 2,
			bounds: (-1.0, 1.0),
			seed: None,
			donors: DonorSampling::default(),
			validate: true,
			callback: None,
		}
	}
}

impl fmt::Debug for DEConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEConfig")
			.field("popsize", &self.popsize)
			.field("maxiter", &self.maxiter)
			.field("mutation", &self.mutation)
			.field("recombination", &self.recombination)
			.field("dim", &self.dim)
			.field("bounds", &self.bounds)
			.field("seed", &self.seed)
			.field("donors", &self.donors)
			.field("validate", &self.validate)
			.field("callback", &self.callback.as_ref().map(|_| "<fn>"))
			.finish()
	}
}

impl DEConfig {
	/// Check the parameters against their constraints.
	///
	/// `NP >= 4` and `d >= 1` are always enforced since donor selection and
	/// crossover depend on them; the rest only when `validate` is set.
	pub fn check(&self) -> Result<()> {
		validate::check_popsize(self.popsize)?;
		validate::check_dim(self.dim)?;
		if self.validate {
			validate::check_crossover_rate(self.recombination)?;
			validate::check_mutation_factor(self.mutation)?;
			validate::check_bounds(self.bounds)?;
		}
		Ok(())
	}
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
pub struct DEConfigBuilder {
	cfg: DEConfig,
}

impl Default for DEConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl DEConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: DEConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.maxiter = v;
		self
	}
	pub fn mutation(mut self, v: f64) -> Self {
		self.cfg.mutation = v;
		self
	}
	pub fn recombination(mut self, v: f64) -> Self {
		self.cfg.recombination = v;
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
	pub fn donors(mut self, v: DonorSampling) -> Self {
		self.cfg.donors = v;
		self
	}
	pub fn validate(mut self, v: bool) -> Self {
		self.cfg.validate = v;
		self
	}
	pub fn callback(mut self, cb: CallbackFn) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	/// Build the configuration, rejecting invalid parameters.
	///
	/// # Errors
	///
	/// Returns `OptimizerError::InvalidParameter` naming the offending parameter.
	pub fn build(self) -> Result<DEConfig> {
		self.cfg.check()?;
		Ok(self.cfg)
	}
}

/// Result of an optimization run, shared by DE and the baselines
#[derive(Clone, Serialize)]
pub struct Report {
	/// Best vector
	pub x: Array1<f64>,
	/// Its fitness
	pub fun: f64,
	/// Generations executed
	pub nit: usize,
	/// Objective evaluations, smoke test included
	pub nfev: usize,
	pub message: String,
	/// Final population (last sample for random search)
	pub population: Array2<f64>,
	pub population_energies: Array1<f64>,
}

impl fmt::Debug for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Report")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("message", &self.message)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_energies", &format!("len={}", self.population_energies.len()))
			.finish()
	}
}

/// Information passed to callback after each generation
pub struct DEIntermediate {
	/// Best member of the generation just completed
	pub x: Array1<f64>,
	pub fun: f64,
	/// std of the population fitness
	pub convergence: f64,
	pub iter: usize,
}

/// Action returned by callback
pub enum CallbackAction {
	Continue,
	/// Stop before the next generation starts
	Stop,
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	func: &'a F,
	config: DEConfig,
	/// Evaluations spent on validation
	setup_nfev: usize,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	/// Create a new DE optimizer for objective `func`.
	///
	/// # Errors
	///
	/// `InvalidParameter` if the configuration is out of range and
	/// `IncompatibleObjectiveFunction` if `func` fails its smoke evaluation.
	pub fn new(func: &'a F, config: DEConfig) -> Result<Self> {
		config.check()?;
		let setup_nfev = if config.validate {
			validate::smoke_test(func, config.dim, config.bounds)?;
			1
		} else {
			warn!("DE validation disabled: range checks and objective smoke test skipped");
			0
		};
		Ok(Self { func, config, setup_nfev })
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut DEConfig {
		&mut self.config
	}

	/// Run the optimization with the configured seed (fresh entropy if none)
	pub fn solve(&mut self) -> Report {
		let mut rng = make_rng(self.config.seed);
		self.solve_with_rng(&mut rng)
	}

	/// Run the optimization drawing every random number from `rng`
	pub fn solve_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Report {
		let npop = self.config.popsize;
		let n = self.config.dim;
		let (lower, upper) = self.config.bounds;
		let f = self.config.mutation;
		let cr = self.config.recombination;
		let donors = self.config.donors;
		let maxiter = self.config.maxiter;
		let mut callback = self.config.callback.take();

		info!(
			"DE start: NP={}, d={}, F={}, CR={}, max_gen={}, bounds=({}, {}), donors={:?}",
			npop, n, f, cr, maxiter, lower, upper, donors
		);
		let t_start = Instant::now();

		let mut pop = init_population(npop, n, lower, upper, rng);
		let mut nfev = self.setup_nfev;
		let mut nit = 0;
		let mut message = format!("Maximum generations reached: {}", maxiter);

		for iter in 1..=maxiter {
			let t_gen = Instant::now();

			// Trials read only the previous generation; selection returns a fresh buffer
			let trials = build_trials(&pop, f, cr, donors, rng);
			let t_build = t_gen.elapsed();
			let sel = selection::select(self.func, &pop, &trials);
			nfev += 2 * npop;
			pop = sel.population;
			nit = iter;

			let (best_i, best_f) = argmin(&sel.energies);
			let pop_std = sel.energies.std(0.0);
			debug!(
				"DE gen {:4}  best_f={:.6e}  std={:.3e}  accepted={}/{}",
				iter, best_f, pop_std, sel.accepted, npop
			);
			trace!(
				"DE gen {:4} timing: build={:.3} ms, total={:.3} ms",
				iter,
				t_build.as_secs_f64() * 1e3,
				t_gen.elapsed().as_secs_f64() * 1e3
			);

			if let Some(cb) = callback.as_mut() {
				let intermediate = DEIntermediate {
					x: pop.row(best_i).to_owned(),
					fun: best_f,
					convergence: pop_std,
					iter,
				};
				if let CallbackAction::Stop = cb(&intermediate) {
					message = format!("Optimization stopped by callback after generation {}", iter);
					break;
				}
			}
		}
		self.config.callback = callback;

		let energies = evaluate_population(self.func, &pop);
		nfev += npop;
		let (best_i, best_f) = argmin(&energies);

		info!(
			"DE finished: {} best_f={:.6e} nfev={} in {:.3} s",
			message,
			best_f,
			nfev,
			t_start.elapsed().as_secs_f64()
		);

		Report {
			x: pop.row(best_i).to_owned(),
			fun: best_f,
			nit,
			nfev,
			message,
			population: pop,
			population_energies: energies,
		}
	}
}
