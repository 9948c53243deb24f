use clap::Parser;
use log::{info, warn};
use std::fs;
use std::panic;
use std::path::PathBuf;

use evobench_de::{
	Algorithm, DEConfig, DonorSampling, FunctionRegistry, OptimizationRecorder, OptimizerParams,
	Report, differential_evolution,
};

/// CLI arguments for a single optimization run
#[derive(Parser, Debug)]
#[command(name = "run_optimizer")]
#[command(about = "Run DE, random search or gradient descent on a benchmark function")]
struct Args {
	/// Optimizer to run
	#[arg(short, long, value_enum)]
	algorithm: Option<Algorithm>,

	/// Benchmark function name (see --list)
	#[arg(short, long)]
	function: Option<String>,

	/// Problem dimension d
	#[arg(short, long, allow_negative_numbers = true)]
	dim: Option<i64>,

	/// Population size NP
	#[arg(short = 'n', long, allow_negative_numbers = true)]
	popsize: Option<i64>,

	/// Number of generations max_gen
	#[arg(short = 'g', long, allow_negative_numbers = true)]
	maxiter: Option<i64>,

	/// Mutation factor F (DE only)
	#[arg(long)]
	mutation: Option<f64>,

	/// Crossover rate CR (DE only)
	#[arg(long)]
	recombination: Option<f64>,

	/// Step size (gradient descent only)
	#[arg(long)]
	learning_rate: Option<f64>,

	/// Lower bound of the initialization box, defaults to the function's domain
	#[arg(long, allow_negative_numbers = true, requires = "upper")]
	lower: Option<f64>,

	/// Upper bound of the initialization box
	#[arg(long, allow_negative_numbers = true, requires = "lower")]
	upper: Option<f64>,

	/// Seed for the random generator
	#[arg(short, long)]
	seed: Option<u64>,

	/// How DE draws donor vectors
	#[arg(long, value_enum)]
	donors: Option<DonorSampling>,

	/// Skip the range checks and the objective smoke test
	#[arg(long)]
	no_validate: bool,

	/// JSON file with run parameters; command line flags override it
	#[arg(short, long)]
	params: Option<PathBuf>,

	/// Write the per-generation trace to this CSV file (DE only)
	#[arg(short, long)]
	record: Option<PathBuf>,

	/// Print the report as JSON
	#[arg(long)]
	json: bool,

	/// List the available benchmark functions and exit
	#[arg(long)]
	list: bool,
}

impl Args {
	fn to_params(&self) -> Result<OptimizerParams, Box<dyn std::error::Error>> {
		let mut params = match &self.params {
			Some(path) => OptimizerParams::from_json(&fs::read_to_string(path)?)?,
			None => OptimizerParams::default(),
		};
		if let Some(v) = self.algorithm {
			params.algorithm = v;
		}
		if let Some(v) = &self.function {
			params.function = v.clone();
		}
		if let Some(v) = self.dim {
			params.dim = v;
		}
		if let Some(v) = self.popsize {
			params.popsize = v;
		}
		if let Some(v) = self.maxiter {
			params.maxiter = v;
		}
		if let Some(v) = self.mutation {
			params.mutation = v;
		}
		if let Some(v) = self.recombination {
			params.recombination = v;
		}
		if let Some(v) = self.learning_rate {
			params.learning_rate = v;
		}
		if let (Some(lo), Some(hi)) = (self.lower, self.upper) {
			params.bounds = Some((lo, hi));
		}
		if self.seed.is_some() {
			params.seed = self.seed;
		}
		if let Some(v) = self.donors {
			params.donors = v;
		}
		if self.no_validate {
			params.validate = false;
		}
		Ok(params)
	}
}

fn run_recorded(params: &OptimizerParams, path: &PathBuf) -> evobench_de::Result<Report> {
	let func = FunctionRegistry::new().lookup(&params.function)?;
	let recorder = OptimizationRecorder::new(params.function.clone());
	let mut config = DEConfig::try_from(params)?;
	config.callback = Some(recorder.create_callback());
	let report = differential_evolution(&func, config)?;
	recorder.save_to_csv(path)?;
	Ok(report)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();
	if args.list {
		for name in FunctionRegistry::new().list_functions() {
			println!("{}", name);
		}
		return Ok(());
	}

	let params = args.to_params()?;
	info!("running {:?} on {} (d = {})", params.algorithm, params.function, params.dim);

	if args.record.is_some() && params.algorithm != Algorithm::De {
		return Err(format!("--record is only supported for DE, not {:?}", params.algorithm).into());
	}

	// A panicking objective comes back as IncompatibleObjectiveFunction; log it
	// in one line instead of the default panic dump
	panic::set_hook(Box::new(|info| warn!("objective panicked: {}", info)));
	let result = match &args.record {
		Some(path) => run_recorded(&params, path),
		None => params.run(),
	};
	let _ = panic::take_hook();
	let report = result?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&report)?);
	} else {
		println!("{}", report.message);
		println!("  best f   = {:.6e}", report.fun);
		println!("  best x   = {}", report.x);
		println!("  nit      = {}", report.nit);
		println!("  nfev     = {}", report.nfev);
	}
	Ok(())
}
