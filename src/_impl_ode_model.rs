use crate::{
    Evaluable, OdeError, OdeModel, Parameter, ParameterId, ParameterIdIterator, Summand,
    Variable, VariableId, VariableIdIterator, MAX_DIMENSIONS,
};
use fxhash::FxHashMap;
use std::ops::Index;

/// Basic methods for safely building `OdeModel`s.
impl OdeModel {
    /// Create a new empty `OdeModel`.
    pub fn new() -> OdeModel {
        OdeModel {
            variables: Vec::new(),
            parameters: Vec::new(),
            variable_to_index: FxHashMap::default(),
            parameter_to_index: FxHashMap::default(),
        }
    }

    /// Add a new `Parameter` with the given `(low, high)` range to the `OdeModel`.
    ///
    /// The name must be different from other parameters and variables and the range
    /// must be non-empty.
    pub fn add_parameter(
        &mut self,
        name: &str,
        range: (f64, f64),
    ) -> Result<ParameterId, OdeError> {
        self.assert_fresh_name(name)?;
        if !(range.0 < range.1) {
            return Err(OdeError::InvalidParameterRange {
                parameter: name.to_string(),
                low: range.0,
                high: range.1,
            });
        }
        let id = ParameterId(self.parameters.len());
        self.parameter_to_index.insert(name.to_string(), id);
        self.parameters.push(Parameter::new(name, range));
        Ok(id)
    }

    /// Add a new `Variable` with the given range and thresholds. The equation of the variable
    /// is empty until set using `set_equation`.
    pub fn add_variable(
        &mut self,
        name: &str,
        range: (f64, f64),
        thresholds: Vec<f64>,
    ) -> Result<VariableId, OdeError> {
        self.add_variable_with_points(name, range, thresholds, None)
    }

    /// Same as `add_variable`, but also records the `(points, segments)` discretization hint.
    pub fn add_variable_with_points(
        &mut self,
        name: &str,
        range: (f64, f64),
        thresholds: Vec<f64>,
        var_points: Option<(usize, usize)>,
    ) -> Result<VariableId, OdeError> {
        self.assert_fresh_name(name)?;
        if self.variables.len() >= MAX_DIMENSIONS {
            return Err(OdeError::TooManyVariables {
                name: name.to_string(),
                limit: MAX_DIMENSIONS,
            });
        }
        Self::assert_valid_thresholds(name, &thresholds)?;
        let id = VariableId(self.variables.len());
        self.variable_to_index.insert(name.to_string(), id);
        self.variables
            .push(Variable::new(name, range, thresholds, var_points));
        Ok(id)
    }

    /// Set the derivative equation of the given `variable`.
    ///
    /// The equation can only reference declared variables and parameters, all its
    /// summands together can reference at most one distinct parameter, and every
    /// function must be well formed (see `Evaluable::validate`).
    pub fn set_equation(
        &mut self,
        variable: VariableId,
        equation: Vec<Summand>,
    ) -> Result<(), OdeError> {
        if variable.0 >= self.variables.len() {
            return Err(OdeError::UnknownVariable(variable.to_string()));
        }
        let mut parameter: Option<ParameterId> = None;
        for summand in &equation {
            self.assert_references_are_valid(variable, summand)?;
            match (parameter, summand.get_parameter()) {
                (Some(first), Some(second)) if first != second => {
                    return Err(OdeError::MultipleParameters {
                        variable: self.variables[variable.0].name.clone(),
                        first: self.parameters[first.0].name.clone(),
                        second: self.parameters[second.0].name.clone(),
                    });
                }
                (None, Some(p)) => parameter = Some(p),
                _ => {}
            }
        }
        self.variables[variable.0].equation = equation;
        Ok(())
    }

    /// **(internal)** Utility method to ensure that a name is used neither by a variable
    /// nor by a parameter.
    fn assert_fresh_name(&self, name: &str) -> Result<(), OdeError> {
        if self.find_variable(name).is_some() || self.find_parameter(name).is_some() {
            Err(OdeError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }

    /// **(internal)** Thresholds must be finite, strictly increasing, and there must be
    /// at least two of them.
    fn assert_valid_thresholds(name: &str, thresholds: &[f64]) -> Result<(), OdeError> {
        let invalid = |reason: &str| OdeError::InvalidThresholds {
            variable: name.to_string(),
            reason: reason.to_string(),
        };
        if thresholds.len() < 2 {
            return Err(invalid("at least two thresholds are required"));
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            return Err(invalid("thresholds must be finite"));
        }
        if thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("thresholds must be strictly increasing"));
        }
        Ok(())
    }

    /// **(internal)** Check that a summand of the equation of `variable` only uses declared
    /// variables and parameters, and that its functions are well formed.
    fn assert_references_are_valid(
        &self,
        variable: VariableId,
        summand: &Summand,
    ) -> Result<(), OdeError> {
        let owner = || self.variables[variable.0].name.clone();
        if let Some(p) = summand.get_parameter() {
            if p.0 >= self.parameters.len() {
                return Err(OdeError::UndeclaredParameter {
                    variable: owner(),
                    index: p,
                });
            }
        }
        let function_variables = summand.get_functions().iter().map(Evaluable::variable);
        for v in summand.get_variables().iter().cloned().chain(function_variables) {
            if v.0 >= self.variables.len() {
                return Err(OdeError::UndeclaredVariable {
                    variable: owner(),
                    index: v,
                });
            }
        }
        for function in summand.get_functions() {
            if let Err(reason) = function.validate() {
                return Err(OdeError::InvalidFunction {
                    variable: owner(),
                    function_variable: self.variables[function.variable().0].name.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

/// Some utility methods for accessing the structure of an `OdeModel`.
impl OdeModel {
    /// The number of variables (dimensions) of this model.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn num_parameters(&self) -> usize {
        self.parameters.len()
    }

    /// Return an iterator over all variable ids of this model.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    /// Return an iterator over all parameter ids of this model.
    pub fn parameters(&self) -> ParameterIdIterator {
        (0..self.parameters.len()).map(ParameterId)
    }

    pub fn get_variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn get_parameter(&self, id: ParameterId) -> &Parameter {
        &self.parameters[id.0]
    }

    /// Find a `VariableId` corresponding to the given name, if it exists.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Find a `ParameterId` corresponding to the given name, if it exists.
    pub fn find_parameter(&self, name: &str) -> Option<ParameterId> {
        self.parameter_to_index.get(name).cloned()
    }

    /// Same as `find_variable`, but an unknown name is reported as an error.
    pub fn dimension_from_name(&self, name: &str) -> Result<VariableId, OdeError> {
        self.find_variable(name)
            .ok_or_else(|| OdeError::UnknownVariable(name.to_string()))
    }

    /// Same as `find_parameter`, but an unknown name is reported as an error.
    pub fn parameter_from_name(&self, name: &str) -> Result<ParameterId, OdeError> {
        self.find_parameter(name)
            .ok_or_else(|| OdeError::UnknownParameter(name.to_string()))
    }

    pub fn thresholds(&self, variable: VariableId) -> &[f64] {
        &self.variables[variable.0].thresholds
    }

    pub fn equation(&self, variable: VariableId) -> &[Summand] {
        &self.variables[variable.0].equation
    }

    /// The single parameter used by the equation of `variable`, if any.
    pub fn equation_parameter(&self, variable: VariableId) -> Option<ParameterId> {
        self.equation(variable)
            .iter()
            .find_map(|summand| summand.get_parameter())
    }

    /// Parameter ranges of this model as `(low, high)` pairs ordered by `ParameterId`.
    pub fn parameter_bounds(&self) -> Vec<(f64, f64)> {
        self.parameters.iter().map(|p| p.range).collect()
    }
}

impl Default for OdeModel {
    fn default() -> Self {
        OdeModel::new()
    }
}

/// Allow indexing `OdeModel` using `VariableId` objects.
impl Index<VariableId> for OdeModel {
    type Output = Variable;

    fn index(&self, index: VariableId) -> &Self::Output {
        &self.variables[index.0]
    }
}

/// Allow indexing `OdeModel` using `ParameterId` objects.
impl Index<ParameterId> for OdeModel {
    type Output = Parameter;

    fn index(&self, index: ParameterId) -> &Self::Output {
        &self.parameters[index.0]
    }
}
