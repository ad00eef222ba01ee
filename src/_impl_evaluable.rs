use crate::{Evaluable, Ramp, RampApproximation, Step, VariableId};
use std::fmt::{Display, Error, Formatter};

impl Evaluable {
    /// The variable this function reads.
    pub fn variable(&self) -> VariableId {
        match self {
            Evaluable::Ramp(ramp) => ramp.variable,
            Evaluable::Step(step) => step.variable,
            Evaluable::Approximation(approximation) => approximation.variable,
        }
    }

    /// Value of this function for the given value of its variable.
    pub fn eval(&self, value: f64) -> f64 {
        match self {
            Evaluable::Ramp(ramp) => ramp.eval(value),
            Evaluable::Step(step) => step.eval(value),
            Evaluable::Approximation(approximation) => approximation.eval(value),
        }
    }

    /// Check the shape of this function, returning the reason why it is malformed.
    ///
    /// Functions are built without a model, so the check runs once the function becomes
    /// part of an equation, where the offending variable can be named.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Evaluable::Ramp(ramp) if !(ramp.low < ramp.high) => {
                Err(format!("ramp thresholds {} >= {}", ramp.low, ramp.high))
            }
            Evaluable::Approximation(approximation) => {
                let thresholds = &approximation.thresholds;
                if thresholds.is_empty() || thresholds.len() != approximation.values.len() {
                    Err("approximation needs one value per threshold".to_string())
                } else if !thresholds.windows(2).all(|w| w[0] < w[1]) {
                    Err("approximation thresholds must be strictly increasing".to_string())
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

impl Ramp {
    /// An increasing ramp from `min(a, b)` to `max(a, b)`.
    pub fn positive(variable: VariableId, low: f64, high: f64, a: f64, b: f64) -> Ramp {
        Ramp::from_shape(variable, low, high, a.min(b), a.max(b))
    }

    /// A decreasing ramp from `max(a, b)` to `min(a, b)`.
    pub fn negative(variable: VariableId, low: f64, high: f64, a: f64, b: f64) -> Ramp {
        Ramp::from_shape(variable, low, high, a.max(b), a.min(b))
    }

    /// An increasing ramp that follows the line `a * x + b` between the thresholds.
    pub fn positive_coordinate(variable: VariableId, low: f64, high: f64, a: f64, b: f64) -> Ramp {
        Ramp::positive(variable, low, high, low * a + b, high * a + b)
    }

    /// A decreasing ramp that follows the line `a * x + b` between the thresholds.
    pub fn negative_coordinate(variable: VariableId, low: f64, high: f64, a: f64, b: f64) -> Ramp {
        Ramp::negative(variable, low, high, low * a + b, high * a + b)
    }

    fn from_shape(variable: VariableId, low: f64, high: f64, a: f64, b: f64) -> Ramp {
        Ramp {
            variable,
            low,
            high,
            a,
            b,
        }
    }

    pub fn eval(&self, value: f64) -> f64 {
        if value <= self.low {
            self.a
        } else if value >= self.high {
            self.b
        } else {
            self.a + (value - self.low) / (self.high - self.low) * (self.b - self.a)
        }
    }

    pub fn is_increasing(&self) -> bool {
        self.a <= self.b
    }

    pub fn get_variable(&self) -> VariableId {
        self.variable
    }

    /// The `(low, high, a, b)` description of this ramp.
    pub fn get_shape(&self) -> (f64, f64, f64, f64) {
        (self.low, self.high, self.a, self.b)
    }
}

impl Step {
    /// A step going up from `min(a, b)` to `max(a, b)` at `theta`.
    pub fn positive(variable: VariableId, theta: f64, a: f64, b: f64) -> Step {
        Step {
            variable,
            theta,
            a: a.min(b),
            b: a.max(b),
        }
    }

    /// A step going down from `max(a, b)` to `min(a, b)` at `theta`.
    pub fn negative(variable: VariableId, theta: f64, a: f64, b: f64) -> Step {
        Step {
            variable,
            theta,
            a: a.max(b),
            b: a.min(b),
        }
    }

    pub fn eval(&self, value: f64) -> f64 {
        if value < self.theta {
            self.a
        } else {
            self.b
        }
    }

    pub fn is_increasing(&self) -> bool {
        self.a <= self.b
    }

    pub fn get_variable(&self) -> VariableId {
        self.variable
    }

    /// The `(theta, a, b)` description of this step.
    pub fn get_shape(&self) -> (f64, f64, f64) {
        (self.theta, self.a, self.b)
    }
}

impl RampApproximation {
    /// Create a new approximation. `thresholds` must be strictly increasing and there must
    /// be one value for each threshold, which `OdeModel::set_equation` checks.
    pub fn new(variable: VariableId, thresholds: Vec<f64>, values: Vec<f64>) -> RampApproximation {
        RampApproximation {
            variable,
            thresholds,
            values,
        }
    }

    /// Linear interpolation between the two closest thresholds, clamped to the first/last
    /// value outside of the threshold range. Exact at a threshold.
    pub fn eval(&self, value: f64) -> f64 {
        let count = self.thresholds.len().min(self.values.len());
        let Some(last) = count.checked_sub(1) else {
            return 0.0;
        };
        if value <= self.thresholds[0] {
            return self.values[0];
        }
        if value >= self.thresholds[last] {
            return self.values[last];
        }
        // First threshold that is not below `value`; in 1..=last for sorted thresholds.
        let high = self.thresholds[..count].partition_point(|t| *t < value).clamp(1, last);
        if self.thresholds[high] == value {
            return self.values[high];
        }
        let low = high - 1;
        let (t_low, t_high) = (self.thresholds[low], self.thresholds[high]);
        let (v_low, v_high) = (self.values[low], self.values[high]);
        v_low + (value - t_low) / (t_high - t_low) * (v_high - v_low)
    }

    pub fn get_variable(&self) -> VariableId {
        self.variable
    }

    pub fn get_thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn get_values(&self) -> &[f64] {
        &self.values
    }
}

impl Display for Evaluable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Evaluable::Ramp(ramp) => write!(f, "{}", ramp),
            Evaluable::Step(step) => write!(f, "{}", step),
            Evaluable::Approximation(approximation) => write!(f, "{}", approximation),
        }
    }
}

impl Display for Ramp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let sign = if self.is_increasing() { '+' } else { '-' };
        write!(
            f,
            "R({})({}, {}, {}, {}, {})",
            sign,
            usize::from(self.variable),
            self.low,
            self.high,
            self.a,
            self.b
        )
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let sign = if self.is_increasing() { '+' } else { '-' };
        write!(
            f,
            "H({})({}, {}, {}, {})",
            sign,
            usize::from(self.variable),
            self.theta,
            self.a,
            self.b
        )
    }
}

impl Display for RampApproximation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let join = |values: &[f64]| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "Approx({})[{}]{{{}}}",
            usize::from(self.variable),
            join(&self.thresholds),
            join(&self.values)
        )
    }
}
