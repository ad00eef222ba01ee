//! Generic graph and set abstractions shared by the whole crate.
//!
//! Algorithms built on top of the `OdeGraph` (reachability, model checking, ...) should only
//! depend on these traits, so that they work with any color representation.

pub mod structs;
pub mod traits;
