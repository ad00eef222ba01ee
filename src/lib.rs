//! A library for constructing the parametrised rectangular abstraction of piecewise
//! multi-affine ODE models.
//!
//! The continuous state space of an `OdeModel` is split by variable thresholds into a grid of
//! hyper-rectangular states. For every pair of adjacent states, the library computes the exact
//! set of parameter valuations for which the flow crosses the shared facet, as well as the
//! valuations for which a state has to be considered as a self-loop.
//!
//! The main entry point is the `OdeGraph` (see `ode_graph`), which is generic over the
//! representation of parameter sets (see `rect_params` and `bool_params`).

use fxhash::FxHashMap;
use std::iter::Map;
use std::ops::Range;

pub mod biodivine_std;
pub mod bool_params;
pub mod error;
pub mod grid;
pub mod ode_graph;
pub mod partitioning;
pub mod rect_params;

/// **(internal)** `OdeModel` to `.bio` string.
mod _impl_display_for_ode_model;
/// **(internal)** Piecewise-linear functions that can appear in a `Summand`.
mod _impl_evaluable;
/// **(internal)** Building and validation of `OdeModel` instances.
mod _impl_ode_model;
/// **(internal)** Utility methods for `Parameter`.
mod _impl_parameter;
/// **(internal)** Utility methods for `ParameterId`.
mod _impl_parameter_id;
/// **(internal)** Construction and evaluation of `Summand`s.
mod _impl_summand;
/// **(internal)** Utility methods for `Variable`.
mod _impl_variable;
/// **(internal)** Utility methods for `VariableId`.
mod _impl_variable_id;

pub use error::OdeError;

/// The largest number of variables (dimensions) supported by an `OdeModel`.
///
/// Vertex masks of a state are stored in a machine word, so the dimension count has to stay
/// well below the word size.
pub const MAX_DIMENSIONS: usize = 30;

/// A type-safe index of a `Variable` inside an `OdeModel`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// A type-safe index of a `Parameter` inside an `OdeModel`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ParameterId(usize);

/// A variable (dimension) of an `OdeModel`.
///
/// Each variable has a sorted list of thresholds that split its range into discrete
/// intervals. A variable with `k` thresholds induces `k - 1` states along its axis. The
/// `equation` is the right-hand side of the variable's derivative, given as a sum of
/// `Summand`s.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    name: String,
    range: (f64, f64),
    thresholds: Vec<f64>,
    var_points: Option<(usize, usize)>,
    equation: Vec<Summand>,
}

/// A parameter of an `OdeModel` with a declared `[low, high]` range.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    name: String,
    range: (f64, f64),
}

/// One term of a derivative equation:
/// `constant * parameter? * product(variables) * product(functions)`.
///
/// At most one parameter can appear in a summand.
#[derive(Clone, Debug, PartialEq)]
pub struct Summand {
    constant: f64,
    parameter: Option<ParameterId>,
    variables: Vec<VariableId>,
    functions: Vec<Evaluable>,
}

/// A piecewise-linear function of a single variable.
///
/// Continuous functions (Hill, sigmoid, ...) are turned into these by an external
/// approximation step before the model reaches this library.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluable {
    Ramp(Ramp),
    Step(Step),
    Approximation(RampApproximation),
}

/// A linear ramp between `low` and `high`, constant `a` below `low` and `b` above `high`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    variable: VariableId,
    low: f64,
    high: f64,
    a: f64,
    b: f64,
}

/// A step function: `a` below `theta`, `b` from `theta` upwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    variable: VariableId,
    theta: f64,
    a: f64,
    b: f64,
}

/// Piecewise-linear interpolation of `values` over sorted `thresholds`.
#[derive(Clone, Debug, PartialEq)]
pub struct RampApproximation {
    variable: VariableId,
    thresholds: Vec<f64>,
    values: Vec<f64>,
}

/// A parametrised piecewise multi-affine ODE model.
///
/// The model is built incrementally: first add parameters and variables, then set the
/// equations. Every step is validated, so a successfully built model is always consistent.
/// Once given to an `OdeGraph`, the model is never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct OdeModel {
    variables: Vec<Variable>,
    parameters: Vec<Parameter>,
    variable_to_index: FxHashMap<String, VariableId>,
    parameter_to_index: FxHashMap<String, ParameterId>,
}

/// An iterator over all `VariableId`s of an `OdeModel`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;

/// An iterator over all `ParameterId`s of an `OdeModel`.
pub type ParameterIdIterator = Map<Range<usize>, fn(usize) -> ParameterId>;
