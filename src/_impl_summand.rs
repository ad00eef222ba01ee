use crate::{Evaluable, OdeError, ParameterId, Summand, VariableId};
use std::fmt::{Display, Error, Formatter};

/// Constructors and builder methods for `Summand`.
impl Summand {
    /// A summand consisting only of the given constant.
    pub fn constant(value: f64) -> Summand {
        Summand {
            constant: value,
            parameter: None,
            variables: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// A summand `1 * parameter`.
    pub fn parameter(parameter: ParameterId) -> Summand {
        Summand::constant(1.0).with_parameter(parameter)
    }

    /// A summand `1 * variable`.
    pub fn variable(variable: VariableId) -> Summand {
        Summand::constant(1.0).with_variable(variable)
    }

    /// A summand `1 * function(variable)`.
    pub fn function(function: Evaluable) -> Summand {
        Summand::constant(1.0).with_function(function)
    }

    /// Replace the parameter of this summand.
    pub fn with_parameter(mut self, parameter: ParameterId) -> Summand {
        self.parameter = Some(parameter);
        self
    }

    /// Multiply this summand by another variable.
    pub fn with_variable(mut self, variable: VariableId) -> Summand {
        self.variables.push(variable);
        self
    }

    /// Multiply this summand by another function.
    pub fn with_function(mut self, function: Evaluable) -> Summand {
        self.functions.push(function);
        self
    }
}

impl Summand {
    pub fn get_constant(&self) -> f64 {
        self.constant
    }

    pub fn get_parameter(&self) -> Option<ParameterId> {
        self.parameter
    }

    pub fn get_variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn get_functions(&self) -> &[Evaluable] {
        &self.functions
    }

    pub fn has_parameter(&self) -> bool {
        self.parameter.is_some()
    }

    /// Product of two summands.
    ///
    /// Fails if both summands contain a parameter, because the result would no longer be
    /// affine in the parameters.
    pub fn times(&self, other: &Summand) -> Result<Summand, OdeError> {
        let parameter = match (self.parameter, other.parameter) {
            (Some(first), Some(second)) => {
                return Err(OdeError::ParameterProduct { first, second });
            }
            (p, None) | (None, p) => p,
        };
        let mut variables = self.variables.clone();
        variables.extend_from_slice(&other.variables);
        let mut functions = self.functions.clone();
        functions.extend_from_slice(&other.functions);
        Ok(Summand {
            constant: self.constant * other.constant,
            parameter,
            variables,
            functions,
        })
    }

    /// Sum of two summands, if they only differ in their constants.
    pub fn try_merge(&self, other: &Summand) -> Option<Summand> {
        if self.parameter == other.parameter
            && self.variables == other.variables
            && self.functions == other.functions
        {
            Some(Summand {
                constant: self.constant + other.constant,
                ..self.clone()
            })
        } else {
            None
        }
    }

    /// Evaluate the parameter-free part of this summand, reading variable values using
    /// the given `value_of` function.
    ///
    /// Functions are not evaluated once the partial product is already zero.
    pub fn evaluate<F>(&self, value_of: F) -> f64
    where
        F: Fn(VariableId) -> f64,
    {
        let mut result = self.constant;
        for v in &self.variables {
            result *= value_of(*v);
        }
        if result != 0.0 {
            for function in &self.functions {
                result *= function.eval(value_of(function.variable()));
            }
        }
        result
    }
}

impl Default for Summand {
    fn default() -> Self {
        Summand::constant(1.0)
    }
}

impl Display for Summand {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.constant)?;
        if let Some(p) = self.parameter {
            write!(f, "*{}", p)?;
        }
        for v in &self.variables {
            write!(f, "*{}", v)?;
        }
        for function in &self.functions {
            write!(f, "*{}", function)?;
        }
        Ok(())
    }
}
