//! Error types for the optimizers.
//!
//! Every error is raised before any optimization work starts and is fatal to
//! the single call that produced it. Nothing is retried.

use thiserror::Error;

/// Errors that can occur while configuring or starting an optimization run.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// A control parameter violates its documented constraint.
    #[error("invalid parameter {name}: {constraint} (got {value})")]
    InvalidParameter {
        /// Parameter name as used in the literature (`NP`, `F`, `CR`, `max_gen`, `d`, ...)
        name: &'static str,
        /// The violated constraint
        constraint: &'static str,
        /// The rejected value, formatted
        value: String,
    },

    /// The objective could not be evaluated on a vector of the declared dimension.
    #[error("objective function cannot be evaluated on a {dim}-dimensional vector: {reason}")]
    IncompatibleObjectiveFunction {
        /// Declared dimensionality
        dim: usize,
        /// Panic message or description of the bad return value
        reason: String,
    },

    /// No benchmark function is registered under this name.
    #[error("unknown test function: {name}")]
    UnknownFunction {
        /// The requested name
        name: String,
    },

    /// Writing a generation record failed.
    #[error("failed to write optimization record: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure while handling records.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for optimizer operations.
pub type Result<T> = std::result::Result<T, OptimizerError>;

impl OptimizerError {
    pub(crate) fn invalid(
        name: &'static str,
        constraint: &'static str,
        value: impl std::fmt::Display,
    ) -> Self {
        OptimizerError::InvalidParameter { name, constraint, value: value.to_string() }
    }

    /// Returns `true` for `InvalidParameter`.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, OptimizerError::InvalidParameter { .. })
    }

    /// Returns `true` when the objective itself is at fault.
    pub fn is_objective_error(&self) -> bool {
        matches!(
            self,
            OptimizerError::IncompatibleObjectiveFunction { .. }
                | OptimizerError::UnknownFunction { .. }
        )
    }

    /// Name of the offending parameter, if this is a parameter error.
    pub fn parameter_name(&self) -> Option<&'static str> {
        match self {
            OptimizerError::InvalidParameter { name, .. } => Some(name),
            _ => None,
        }
    }
}
