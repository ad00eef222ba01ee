use super::BoolParams;
use crate::biodivine_std::traits::Set;
use std::fmt::{Display, Error, Formatter};

impl BoolParams {
    /// True if the set contains the only valuation.
    pub fn is_sat(&self) -> bool {
        self.0
    }
}

impl Set for BoolParams {
    fn union(&self, other: &Self) -> Self {
        BoolParams(self.0 || other.0)
    }

    fn intersect(&self, other: &Self) -> Self {
        BoolParams(self.0 && other.0)
    }

    fn minus(&self, other: &Self) -> Self {
        BoolParams(self.0 && !other.0)
    }

    fn is_empty(&self) -> bool {
        !self.0
    }

    fn is_subset(&self, other: &Self) -> bool {
        !self.0 || other.0
    }
}

impl From<bool> for BoolParams {
    fn from(value: bool) -> Self {
        BoolParams(value)
    }
}

impl Display for BoolParams {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", if self.0 { "{[]}" } else { "{}" })
    }
}
