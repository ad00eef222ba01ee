use crate::{OdeModel, ParameterId};
use std::fmt::{Display, Error, Formatter};

impl From<ParameterId> for usize {
    fn from(x: ParameterId) -> Self {
        x.0
    }
}

impl Display for ParameterId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "OdeParameter({})", self.0)
    }
}

impl ParameterId {
    /// Try to construct a `ParameterId` from the given `usize` value. The id must be valid
    /// inside the context of the specified `OdeModel`, otherwise `None` is returned.
    pub fn try_from_usize(context: &OdeModel, value: usize) -> Option<ParameterId> {
        if value < context.num_parameters() {
            Some(ParameterId(value))
        } else {
            None
        }
    }
}
