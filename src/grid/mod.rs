//! Mixed-radix encoding of the rectangular state/vertex grid of an `OdeModel`.
//!
//! A *state* is a vector of interval indices (one per variable, `thresholds.len() - 1`
//! possible values each), a *vertex* is a vector of threshold indices (`thresholds.len()`
//! possible values each). Both are encoded as a single integer, dimension `0` being the
//! least significant digit.

mod _impl_grid_encoder;

/// The largest number of states or vertices that the grid encoding can address.
pub const MAX_ENCODED_COUNT: usize = i32::MAX as usize;

/// Maps grid coordinates to integer state/vertex ids and back.
///
/// The encoder is derived once from a model and is immutable afterwards. All size checks
/// happen in the constructor, so the encoding operations themselves cannot overflow.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GridEncoder {
    state_counts: Vec<usize>,
    state_multipliers: Vec<usize>,
    threshold_counts: Vec<usize>,
    vertex_multipliers: Vec<usize>,
    state_count: usize,
    vertex_count: usize,
}
