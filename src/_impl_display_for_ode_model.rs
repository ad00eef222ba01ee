use crate::{Evaluable, OdeModel, Summand};
use std::fmt::{Display, Error, Formatter};

/// Writes the model in the line-based `.bio` format.
impl Display for OdeModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.num_parameters() > 0 {
            let params = self
                .parameters()
                .map(|p| {
                    let (low, high) = self[p].get_range();
                    format!("{}, {}, {}", self[p], low, high)
                })
                .collect::<Vec<_>>();
            writeln!(f, "PARAMS: {}", params.join("; "))?;
        }
        let names = self.variables().map(|v| self[v].to_string()).collect::<Vec<_>>();
        writeln!(f, "VARS: {}", names.join(", "))?;
        let points = self
            .variables()
            .filter_map(|v| {
                self[v]
                    .get_var_points()
                    .map(|(points, segments)| format!("{}: {}, {}", self[v], points, segments))
            })
            .collect::<Vec<_>>();
        if !points.is_empty() {
            writeln!(f, "VAR_POINTS: {}", points.join("; "))?;
        }
        for var in self.variables() {
            writeln!(f, "THRES: {}: {}", self[var], join(self.thresholds(var)))?;
        }
        for var in self.variables() {
            write!(f, "EQ: {} = ", self[var])?;
            let equation = self.equation(var);
            if equation.is_empty() {
                writeln!(f, "0")?;
                continue;
            }
            for (i, summand) in equation.iter().enumerate() {
                if i > 0 {
                    write!(f, " + ")?;
                }
                write!(f, "{}", Term(self, summand))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

struct Term<'a>(&'a OdeModel, &'a Summand);

impl Display for Term<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let Term(model, summand) = self;
        write!(f, "{}", summand.get_constant())?;
        if let Some(p) = summand.get_parameter() {
            write!(f, " * {}", model[p])?;
        }
        for v in summand.get_variables() {
            write!(f, " * {}", model[*v])?;
        }
        for function in summand.get_functions() {
            write!(f, " * ")?;
            let name = &model[function.variable()];
            match function {
                Evaluable::Approximation(approximation) => {
                    let points = approximation
                        .get_thresholds()
                        .iter()
                        .zip(approximation.get_values())
                        .map(|(t, v)| format!("[{}, {}]", t, v))
                        .collect::<Vec<_>>();
                    write!(f, "Approx({})({})", name, points.join(", "))?;
                }
                Evaluable::Ramp(ramp) => {
                    let sign = if ramp.is_increasing() { '+' } else { '-' };
                    let (low, high, a, b) = ramp.get_shape();
                    write!(f, "R({})({}, {}, {}, {}, {})", sign, name, low, high, a, b)?;
                }
                Evaluable::Step(step) => {
                    let sign = if step.is_increasing() { '+' } else { '-' };
                    let (theta, a, b) = step.get_shape();
                    write!(f, "H({})({}, {}, {}, {})", sign, name, theta, a, b)?;
                }
            }
        }
        Ok(())
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
