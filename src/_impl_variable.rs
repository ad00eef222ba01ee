use crate::{Summand, Variable};
use std::fmt::{Display, Error, Formatter};

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

impl Variable {
    pub(crate) fn new(
        name: &str,
        range: (f64, f64),
        thresholds: Vec<f64>,
        var_points: Option<(usize, usize)>,
    ) -> Variable {
        Variable {
            name: name.to_string(),
            range,
            thresholds,
            var_points,
            equation: Vec::new(),
        }
    }

    /// Human-readable name of this variable.
    pub fn get_name(&self) -> &String {
        &self.name
    }

    pub fn get_range(&self) -> (f64, f64) {
        self.range
    }

    /// Sorted thresholds of this variable. There are always at least two.
    pub fn get_thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Discretization hint `(points, segments)` used by the external approximation step.
    pub fn get_var_points(&self) -> Option<(usize, usize)> {
        self.var_points
    }

    pub fn get_equation(&self) -> &[Summand] {
        &self.equation
    }

    /// Number of discrete states along the axis of this variable.
    pub fn num_states(&self) -> usize {
        self.thresholds.len() - 1
    }
}
