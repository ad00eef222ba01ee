//! Assignment of graph states to workers.
//!
//! When a graph is explored by several workers, every state is owned by exactly one of
//! them. A worker only expands the states it owns and forwards the targets of transitions
//! that are not local to their owners. The forwarding itself is not part of this crate.

use crate::biodivine_std::structs::IdState;
use crate::grid::GridEncoder;
use std::sync::OnceLock;

mod _impl_partitionings;

/// Assigns every state an owning worker.
pub trait PartitionFunction {
    /// The worker using this partitioning.
    fn my_id(&self) -> usize;
    /// The worker owning `state`.
    fn owner(&self, state: IdState) -> usize;
    fn is_local(&self, state: IdState) -> bool {
        self.owner(state) == self.my_id()
    }
}

/// Everything is owned by a single worker.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformPartitioning;

/// Spreads neighbouring states between workers using a hash of the state coordinates.
///
/// The workload is well balanced, but most transitions cross between workers.
#[derive(Debug)]
pub struct HashPartitioning {
    my_id: usize,
    worker_count: usize,
    grid: GridEncoder,
    owners: Vec<OnceLock<usize>>,
}

/// Splits the state ids into `worker_count` contiguous ranges of equal size.
#[derive(Clone, Debug)]
pub struct SlicePartitioning {
    my_id: usize,
    slice_size: usize,
}

/// Splits the grid into cubes with side `block_size` and assigns the cubes to workers in
/// a checkerboard pattern.
///
/// With large blocks, this behaves like slicing; with blocks of size one, like hashing.
#[derive(Debug)]
pub struct BlockPartitioning {
    my_id: usize,
    worker_count: usize,
    block_size: usize,
    grid: GridEncoder,
    owners: Vec<OnceLock<usize>>,
}
