//! Parameter sets of models without parameters.
//!
//! Such a model has exactly one valuation, so a set of valuations is either empty or full.
//! `BoolParams` stores this as a single `bool`, which is much cheaper than a set of
//! zero-dimensional rectangles.

mod _impl_bool_param_encoder;
mod _impl_bool_params;

/// A set of valuations of a parameter-free model: `true` is the unit set.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct BoolParams(bool);

/// Creates `BoolParams` for a parameter-free `OdeModel`.
#[derive(Clone, Debug)]
pub struct BoolParamEncoder {
    empty: BoolParams,
    unit: BoolParams,
}
