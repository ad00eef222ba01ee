use crate::Parameter;
use std::fmt::{Display, Error, Formatter};

impl Parameter {
    pub(crate) fn new(name: &str, range: (f64, f64)) -> Parameter {
        Parameter {
            name: name.to_string(),
            range,
        }
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// The declared `(low, high)` range of this parameter.
    pub fn get_range(&self) -> (f64, f64) {
        self.range
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}
