//! Parameter valuations of an `OdeModel` represented as unions of axis-aligned rectangles.
//!
//! A `Rectangle` stores a `[low, high]` interval for every parameter of the model. A
//! `RectangleSet` is a finite union of rectangles which is kept *minimized*: after every
//! union, rectangles that can be merged into one box are merged until a fixed point is
//! reached. The `RectangleParamEncoder` creates the sets that describe the sign of a
//! derivative at a single vertex.
//!
//! A model without parameters is represented using zero-dimensional rectangles: the set
//! `{[]}` is the unit set and `{}` the empty set.

mod _impl_rectangle;
mod _impl_rectangle_param_encoder;
mod _impl_rectangle_set;
mod _impl_rectangle_set_bytes;

/// Two intervals closer than this are considered touching when merging rectangles.
pub const MERGE_EPSILON: f64 = 1e-9;

/// An axis-aligned box in parameter space, stored as `[low_0, high_0, low_1, high_1, ...]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle(Vec<f64>);

/// A minimized union of rectangles of the same dimension.
///
/// Equality compares the stored rectangles as a set, independent of their order.
#[derive(Clone, Debug, Default)]
pub struct RectangleSet(Vec<Rectangle>);

/// Creates `RectangleSet`s for the parameter space of one `OdeModel`.
#[derive(Clone, Debug)]
pub struct RectangleParamEncoder {
    bounds: Rectangle,
    empty: RectangleSet,
    unit: RectangleSet,
}
