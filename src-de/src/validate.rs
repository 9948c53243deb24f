//! Parameter checks shared by all optimizers.
//!
//! Constraint strings follow the usual DE notation so that error messages can
//! be matched against the literature.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use ndarray::Array1;

use crate::error::{OptimizerError, Result};

pub(crate) fn check_popsize(npop: usize) -> Result<()> {
	if npop < 4 {
		return Err(OptimizerError::invalid("NP", "must be an integer >= 4", npop));
	}
	Ok(())
}

pub(crate) fn check_dim(dim: usize) -> Result<()> {
	if dim == 0 {
		return Err(OptimizerError::invalid("d", "must be a positive integer", dim));
	}
	Ok(())
}

pub(crate) fn check_bounds(bounds: (f64, f64)) -> Result<()> {
	let (lower, upper) = bounds;
	if !(lower.is_finite() && upper.is_finite() && lower < upper) {
		return Err(OptimizerError::invalid(
			"bounds",
			"lower and upper must be finite with lower < upper",
			format!("({}, {})", lower, upper),
		));
	}
	Ok(())
}

pub(crate) fn check_mutation_factor(f: f64) -> Result<()> {
	if !(f > 0.0 && f <= 2.0) {
		return Err(OptimizerError::invalid("F", "must be in (0, 2]", f));
	}
	Ok(())
}

pub(crate) fn check_crossover_rate(cr: f64) -> Result<()> {
	if !(0.0..=1.0).contains(&cr) {
		return Err(OptimizerError::invalid("CR", "must be in [0, 1]", cr));
	}
	Ok(())
}

pub(crate) fn check_positive(name: &'static str, v: f64) -> Result<()> {
	if !(v.is_finite() && v > 0.0) {
		return Err(OptimizerError::invalid(name, "must be finite and > 0", v));
	}
	Ok(())
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"objective panicked".to_string()
	}
}

/// Evaluate `func` once at the centre of the box.
///
/// A panic or a NaN result is reported as `IncompatibleObjectiveFunction`; the
/// panic payload only survives as the error's reason string.
///
/// `catch_unwind` does not silence the panic hook: the default hook still
/// prints the panic message (and a backtrace if enabled) to stderr before the
/// error is returned. Callers that want clean output install their own hook,
/// as `run_optimizer` does.
pub fn smoke_test<F>(func: &F, dim: usize, bounds: (f64, f64)) -> Result<f64>
where
	F: Fn(&Array1<f64>) -> f64,
{
	let probe = Array1::from_elem(dim, 0.5 * (bounds.0 + bounds.1));
	match panic::catch_unwind(AssertUnwindSafe(|| func(&probe))) {
		Ok(v) if v.is_nan() => Err(OptimizerError::IncompatibleObjectiveFunction {
			dim,
			reason: "objective returned NaN".to_string(),
		}),
		Ok(v) => Ok(v),
		Err(payload) => Err(OptimizerError::IncompatibleObjectiveFunction {
			dim,
			reason: panic_reason(payload.as_ref()),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_popsize_and_dim() {
		assert!(check_popsize(4).is_ok());
		assert_eq!(check_popsize(3).unwrap_err().parameter_name(), Some("NP"));
		assert!(check_dim(1).is_ok());
		assert_eq!(check_dim(0).unwrap_err().parameter_name(), Some("d"));
	}

	#[test]
	fn test_factor_ranges() {
		assert!(check_mutation_factor(2.0).is_ok());
		assert!(check_mutation_factor(0.01).is_ok());
		for bad in [0.0, -0.5, 2.01, f64::NAN] {
			assert_eq!(check_mutation_factor(bad).unwrap_err().parameter_name(), Some("F"));
		}
		assert!(check_crossover_rate(0.0).is_ok());
		assert!(check_crossover_rate(1.0).is_ok());
		for bad in [1.5, -0.1, f64::NAN] {
			assert_eq!(check_crossover_rate(bad).unwrap_err().parameter_name(), Some("CR"));
		}
	}

	#[test]
	fn test_bounds() {
		assert!(check_bounds((-1.0, 1.0)).is_ok());
		for bad in [(1.0, 1.0), (2.0, -2.0), (f64::NEG_INFINITY, 0.0), (0.0, f64::NAN)] {
			assert_eq!(check_bounds(bad).unwrap_err().parameter_name(), Some("bounds"));
		}
	}

	#[test]
	fn test_smoke_test_converts_panics() {
		let two_d_only = |x: &Array1<f64>| x[0] + x[1];
		assert_eq!(smoke_test(&two_d_only, 2, (-1.0, 3.0)).unwrap(), 2.0);

		let err = smoke_test(&two_d_only, 1, (-1.0, 1.0)).unwrap_err();
		match err {
			OptimizerError::IncompatibleObjectiveFunction { dim, reason } => {
				assert_eq!(dim, 1);
				assert!(!reason.is_empty());
			}
			other => panic!("unexpected error {:?}", other),
		}
	}

	#[test]
	fn test_smoke_test_rejects_nan() {
		let nan = |_: &Array1<f64>| f64::NAN;
		assert!(smoke_test(&nan, 3, (0.0, 1.0)).unwrap_err().is_objective_error());
		let inf = |_: &Array1<f64>| f64::INFINITY;
		assert_eq!(smoke_test(&inf, 3, (0.0, 1.0)).unwrap(), f64::INFINITY);
	}
}
