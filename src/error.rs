//! Errors reported while building models, graphs and partitionings.
//!
//! All of them are construction-time errors: once an `OdeGraph` exists, exploring it
//! cannot fail.

use crate::{ParameterId, VariableId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OdeError {
    #[error("The model has no variables.")]
    NoVariables,

    #[error("Cannot add variable '{name}'. At most {limit} variables are supported.")]
    TooManyVariables { name: String, limit: usize },

    #[error("Cannot encode {count} dimensions. At most {limit} are supported.")]
    TooManyDimensions { count: usize, limit: usize },

    /// The mixed-radix product of the grid does not fit into the integer encoding.
    #[error("The model is too big for integer encoding: {count} {what} exceed the limit {limit}.")]
    EncodingOverflow {
        what: &'static str,
        count: u128,
        limit: u128,
    },

    #[error("Name '{0}' is already used by a variable or a parameter.")]
    DuplicateName(String),

    #[error("Invalid thresholds of variable '{variable}': {reason}")]
    InvalidThresholds { variable: String, reason: String },

    #[error("Invalid range [{low}, {high}] of parameter '{parameter}'.")]
    InvalidParameterRange {
        parameter: String,
        low: f64,
        high: f64,
    },

    #[error("Unknown variable '{0}'.")]
    UnknownVariable(String),

    #[error("Unknown parameter '{0}'.")]
    UnknownParameter(String),

    #[error("Equation of '{variable}' references an undeclared variable {index}.")]
    UndeclaredVariable { variable: String, index: VariableId },

    #[error("Equation of '{variable}' references an undeclared parameter {index}.")]
    UndeclaredParameter {
        variable: String,
        index: ParameterId,
    },

    /// Rectangle parameter sets only support one free parameter per derivative.
    #[error("Equation of '{variable}' uses parameters '{first}' and '{second}'. At most one parameter per equation is supported.")]
    MultipleParameters {
        variable: String,
        first: String,
        second: String,
    },

    #[error("Cannot multiply summands with parameters {first} and {second}.")]
    ParameterProduct {
        first: ParameterId,
        second: ParameterId,
    },

    #[error("Equation of '{variable}' uses an invalid function of '{function_variable}': {reason}")]
    InvalidFunction {
        variable: String,
        function_variable: String,
        reason: String,
    },

    #[error("Boolean colors cannot represent a model with {0} parameter(s).")]
    ParametersNotSupported(usize),

    #[error("Invalid partitioning: worker {worker} out of {worker_count} workers (block size {block_size}).")]
    InvalidPartitioning {
        worker: usize,
        worker_count: usize,
        block_size: usize,
    },

    #[error("Malformed parameter set buffer: {0}")]
    MalformedParams(String),
}
