//! Gradient descent baseline with forward-difference gradients.
//!
//! Known limitation: the finite-difference estimate is fragile on flat or
//! discontinuous landscapes, and a step size that is too large for the local
//! curvature makes points diverge (their fitness becomes infinite or NaN).
//! Such points simply lose the final comparison.

use std::fmt;

use log::{debug, info, warn};
use ndarray::Array1;
use rand::Rng;

use crate::impl_helpers::{argmin, evaluate_population, make_rng};
use crate::init_random::init_population;
use crate::{Report, Result, validate};

/// Configuration for gradient descent
#[derive(Clone)]
pub struct GradientDescentConfig {
	/// Number of independent starting points
	pub popsize: usize,
	pub learning_rate: f64,
	pub maxiter: usize,
	pub dim: usize,
	pub bounds: (f64, f64),
	/// Forward-difference step
	pub epsilon: f64,
	pub seed: Option<u64>,
	pub validate: bool,
}

impl Default for GradientDescentConfig {
	fn default() -> Self {
		Self {
			popsize: 20,
			learning_rate: 1e-3,
			maxiter: 100,
			dim: 2,
			bounds: (-1.0, 1.0),
			epsilon: 1e-7,
			seed: None,
			validate: true,
		}
	}
}

impl fmt::Debug for GradientDescentConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"GradientDescentConfig(NP={}, lr={}, max_gen={}, d={}, bounds=({}, {}), eps={}, seed={:?})",
			self.popsize,
			self.learning_rate,
			self.maxiter,
			self.dim,
			self.bounds.0,
			self.bounds.1,
			self.epsilon,
			self.seed
		)
	}
}

impl GradientDescentConfig {
	pub fn check(&self) -> Result<()> {
		validate::check_popsize(self.popsize)?;
		validate::check_dim(self.dim)?;
		if self.validate {
			validate::check_positive("learning_rate", self.learning_rate)?;
			validate::check_positive("epsilon", self.epsilon)?;
			validate::check_bounds(self.bounds)?;
		}
		Ok(())
	}
}

/// Fluent builder for `GradientDescentConfig`
#[derive(Default)]
pub struct GradientDescentConfigBuilder {
	cfg: GradientDescentConfig,
}

impl GradientDescentConfigBuilder {
	pub fn new() -> Self {
		Self::default()
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn learning_rate(mut self, v: f64) -> Self {
		self.cfg.learning_rate = v;
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
	pub fn epsilon(mut self, v: f64) -> Self {
		self.cfg.epsilon = v;
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
	pub fn build(self) -> Result<GradientDescentConfig> {
		self.cfg.check()?;
		Ok(self.cfg)
	}
}

/// Forward-difference gradient: `(f(x + eps * e_k) - f(x)) / eps` per dimension.
///
/// `fx` is `f(x)`, passed in so it is evaluated once per point.
pub fn forward_difference_gradient<F>(func: &F, x: &Array1<f64>, fx: f64, eps: f64) -> Array1<f64>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let mut probe = x.clone();
	let mut grad = Array1::<f64>::zeros(x.len());
	for k in 0..x.len() {
		let xk = probe[k];
		probe[k] = xk + eps;
		grad[k] = (func(&probe) - fx) / eps;
		probe[k] = xk;
	}
	grad
}

/// Gradient descent optimizer over `NP` independent points
pub struct GradientDescent<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	func: &'a F,
	config: GradientDescentConfig,
	setup_nfev: usize,
}

impl<'a, F> GradientDescent<'a, F>
where
	F: Fn(&Array1<f64>) -> f64,
{
	pub fn new(func: &'a F, config: GradientDescentConfig) -> Result<Self> {
		config.check()?;
		let setup_nfev = if config.validate {
			validate::smoke_test(func, config.dim, config.bounds)?;
			1
		} else {
			warn!("gradient descent validation disabled");
			0
		};
		Ok(Self { func, config, setup_nfev })
	}

	pub fn solve(&self) -> Report {
		let mut rng = make_rng(self.config.seed);
		self.solve_with_rng(&mut rng)
	}

	/// Only the starting points are random; the descent itself is deterministic
	pub fn solve_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Report {
		let cfg = &self.config;
		let npop = cfg.popsize;
		let n = cfg.dim;
		info!(
			"gradient descent start: NP={}, d={}, lr={}, max_gen={}, bounds=({}, {})",
			npop, n, cfg.learning_rate, cfg.maxiter, cfg.bounds.0, cfg.bounds.1
		);

		let mut points = init_population(npop, n, cfg.bounds.0, cfg.bounds.1, rng);
		let mut nfev = self.setup_nfev;

		for iter in 1..=cfg.maxiter {
			for mut row in points.rows_mut() {
				let x = row.to_owned();
				let fx = (self.func)(&x);
				let grad = forward_difference_gradient(self.func, &x, fx, cfg.epsilon);
				row.scaled_add(-cfg.learning_rate, &grad);
			}
			nfev += npop * (n + 1);
			debug!("gradient descent step {:4} done", iter);
		}

		let energies = evaluate_population(self.func, &points);
		nfev += npop;
		let diverged = energies.iter().filter(|v| !v.is_finite()).count();
		if diverged > 0 {
			warn!(
				"gradient descent: {}/{} points ended with non-finite fitness (learning rate {} too large?)",
				diverged, npop, cfg.learning_rate
			);
		}
		let (best_i, best_f) = argmin(&energies);
		info!("gradient descent finished: best_f={:.6e} nfev={}", best_f, nfev);

		Report {
			x: points.row(best_i).to_owned(),
			fun: best_f,
			nit: cfg.maxiter,
			nfev,
			message: format!("Maximum generations reached: {}", cfg.maxiter),
			population: points,
			population_energies: energies,
		}
	}
}

/// Convenience wrapper: validate, then run gradient descent
pub fn gradient_descent<F>(func: &F, config: GradientDescentConfig) -> Result<Report>
where
	F: Fn(&Array1<f64>) -> f64,
{
	Ok(GradientDescent::new(func, config)?.solve())
}
