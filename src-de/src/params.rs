//! Serializable run description.
//!
//! `OptimizerParams` is what a JSON file or the command line provides. Its
//! integer fields are signed so that out-of-range values such as
//! `"maxiter": -1` reach validation and come back as `InvalidParameter`
//! instead of a deserialization failure.

use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, Result};
use crate::function_registry::FunctionRegistry;
use crate::gradient_descent::{GradientDescentConfig, GradientDescentConfigBuilder, gradient_descent};
use crate::random_search::{RandomSearchConfig, RandomSearchConfigBuilder, random_search};
use crate::{DEConfig, DEConfigBuilder, DonorSampling, Report, differential_evolution};

/// Which optimizer to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
	/// Differential Evolution, rand/1/bin
	#[default]
	De,
	RandomSearch,
	GradientDescent,
}

impl FromStr for Algorithm {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"de" | "differential-evolution" | "differential_evolution" => Ok(Algorithm::De),
			"random-search" | "random_search" | "random" => Ok(Algorithm::RandomSearch),
			"gradient-descent" | "gradient_descent" | "gd" => Ok(Algorithm::GradientDescent),
			_ => Err(format!("unknown algorithm: {}", s)),
		}
	}
}

/// Parameters of one optimization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerParams {
	pub algorithm: Algorithm,
	/// Benchmark function name, see `FunctionRegistry`
	pub function: String,
	/// NP
	pub popsize: i64,
	/// F (DE only)
	pub mutation: f64,
	/// CR (DE only)
	pub recombination: f64,
	/// Gradient descent step size
	pub learning_rate: f64,
	/// max_gen
	pub maxiter: i64,
	/// d
	pub dim: i64,
	/// Defaults to the function's documented domain
	pub bounds: Option<(f64, f64)>,
	pub seed: Option<u64>,
	pub donors: DonorSampling,
	pub validate: bool,
}

impl Default for OptimizerParams {
	fn default() -> Self {
		Self {
			algorithm: Algorithm::De,
			function: "ackley".to_string(),
			popsize: 20,
			mutation: 0.8,
			recombination: 0.9,
			learning_rate: 0.005,
			maxiter: 100,
			dim: 2,
			bounds: None,
			seed: None,
			donors: DonorSampling::PerComponent,
			validate: true,
		}
	}
}

fn to_count(name: &'static str, constraint: &'static str, v: i64) -> Result<usize> {
	usize::try_from(v).map_err(|_| OptimizerError::invalid(name, constraint, v))
}

impl OptimizerParams {
	/// Parse parameters from JSON; missing fields keep their defaults
	pub fn from_json(s: &str) -> serde_json::Result<Self> {
		serde_json::from_str(s)
	}

	fn popsize(&self) -> Result<usize> {
		to_count("NP", "must be an integer >= 4", self.popsize)
	}

	fn maxiter(&self) -> Result<usize> {
		to_count("max_gen", "must be a non-negative integer", self.maxiter)
	}

	fn dim(&self) -> Result<usize> {
		to_count("d", "must be a positive integer", self.dim)
	}

	/// Explicit bounds, or the benchmark function's domain
	pub fn resolved_bounds(&self) -> Result<(f64, f64)> {
		match self.bounds {
			Some(b) => Ok(b),
			None => evobench_testfunctions::get_function_domain(&self.function)
				.ok_or_else(|| OptimizerError::UnknownFunction { name: self.function.clone() }),
		}
	}

	/// Run the configured algorithm on `func`
	pub fn run_with<F>(&self, func: &F) -> Result<Report>
	where
		F: Fn(&Array1<f64>) -> f64,
	{
		match self.algorithm {
			Algorithm::De => differential_evolution(func, DEConfig::try_from(self)?),
			Algorithm::RandomSearch => random_search(func, RandomSearchConfig::try_from(self)?),
			Algorithm::GradientDescent => {
				gradient_descent(func, GradientDescentConfig::try_from(self)?)
			}
		}
	}

	/// Look the benchmark function up by name and run the configured algorithm on it
	pub fn run(&self) -> Result<Report> {
		let func = FunctionRegistry::new().lookup(&self.function)?;
		self.run_with(&func)
	}
}

impl TryFrom<&OptimizerParams> for DEConfig {
	type Error = OptimizerError;

	fn try_from(p: &OptimizerParams) -> Result<Self> {
		let mut builder = DEConfigBuilder::new()
			.popsize(p.popsize()?)
			.maxiter(p.maxiter()?)
			.dim(p.dim()?)
			.mutation(p.mutation)
			.recombination(p.recombination)
			.bounds(p.resolved_bounds()?)
			.donors(p.donors)
			.validate(p.validate);
		if let Some(seed) = p.seed {
			builder = builder.seed(seed);
		}
		builder.build()
	}
}

impl TryFrom<&OptimizerParams> for RandomSearchConfig {
	type Error = OptimizerError;

	fn try_from(p: &OptimizerParams) -> Result<Self> {
		let mut builder = RandomSearchConfigBuilder::new()
			.popsize(p.popsize()?)
			.maxiter(p.maxiter()?)
			.dim(p.dim()?)
			.bounds(p.resolved_bounds()?)
			.validate(p.validate);
		if let Some(seed) = p.seed {
			builder = builder.seed(seed);
		}
		builder.build()
	}
}

impl TryFrom<&OptimizerParams> for GradientDescentConfig {
	type Error = OptimizerError;

	fn try_from(p: &OptimizerParams) -> Result<Self> {
		let mut builder = GradientDescentConfigBuilder::new()
			.popsize(p.popsize()?)
			.learning_rate(p.learning_rate)
			.maxiter(p.maxiter()?)
			.dim(p.dim()?)
			.bounds(p.resolved_bounds()?)
			.validate(p.validate);
		if let Some(seed) = p.seed {
			builder = builder.seed(seed);
		}
		builder.build()
	}
}
