use crate::{OdeModel, VariableId};
use std::fmt::{Display, Error, Formatter};

impl From<usize> for VariableId {
    fn from(val: usize) -> Self {
        VariableId(val)
    }
}

impl From<VariableId> for usize {
    fn from(value: VariableId) -> Self {
        value.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "OdeVariable({})", self.0)
    }
}

impl VariableId {
    /// Try to construct a `VariableId` from the given `usize` value. The id must be valid
    /// inside the context of the specified `OdeModel`, otherwise `None` is returned.
    pub fn try_from_usize(context: &OdeModel, value: usize) -> Option<VariableId> {
        if value < context.num_vars() {
            Some(VariableId(value))
        } else {
            None
        }
    }
}
