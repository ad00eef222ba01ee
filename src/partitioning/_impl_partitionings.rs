use crate::biodivine_std::structs::IdState;
use crate::grid::GridEncoder;
use crate::ode_graph::{OdeGraph, OdeParamEncoder};
use crate::partitioning::{
    BlockPartitioning, HashPartitioning, PartitionFunction, SlicePartitioning,
    UniformPartitioning,
};
use crate::OdeError;
use log::debug;
use std::sync::OnceLock;

impl PartitionFunction for UniformPartitioning {
    fn my_id(&self) -> usize {
        0
    }

    fn owner(&self, _state: IdState) -> usize {
        0
    }

    fn is_local(&self, _state: IdState) -> bool {
        true
    }
}

impl HashPartitioning {
    pub fn new(
        grid: &GridEncoder,
        my_id: usize,
        worker_count: usize,
    ) -> Result<HashPartitioning, OdeError> {
        check_worker(my_id, worker_count, 1)?;
        Ok(HashPartitioning {
            my_id,
            worker_count,
            grid: grid.clone(),
            owners: owner_cache(grid),
        })
    }
}

impl PartitionFunction for HashPartitioning {
    fn my_id(&self) -> usize {
        self.my_id
    }

    fn owner(&self, state: IdState) -> usize {
        *self.owners[usize::from(state)].get_or_init(|| {
            let hash: usize = (0..self.grid.dimensions())
                .map(|dim| 31 * self.grid.coordinate(state, dim))
                .sum();
            hash % self.worker_count
        })
    }
}

impl SlicePartitioning {
    pub fn new(
        grid: &GridEncoder,
        my_id: usize,
        worker_count: usize,
    ) -> Result<SlicePartitioning, OdeError> {
        check_worker(my_id, worker_count, 1)?;
        let slice_size = grid.state_count().div_ceil(worker_count).max(1);
        Ok(SlicePartitioning { my_id, slice_size })
    }
}

impl PartitionFunction for SlicePartitioning {
    fn my_id(&self) -> usize {
        self.my_id
    }

    fn owner(&self, state: IdState) -> usize {
        usize::from(state) / self.slice_size
    }
}

impl BlockPartitioning {
    pub fn new(
        grid: &GridEncoder,
        my_id: usize,
        worker_count: usize,
        block_size: usize,
    ) -> Result<BlockPartitioning, OdeError> {
        check_worker(my_id, worker_count, block_size)?;
        Ok(BlockPartitioning {
            my_id,
            worker_count,
            block_size,
            grid: grid.clone(),
            owners: owner_cache(grid),
        })
    }
}

impl PartitionFunction for BlockPartitioning {
    fn my_id(&self) -> usize {
        self.my_id
    }

    fn owner(&self, state: IdState) -> usize {
        *self.owners[usize::from(state)].get_or_init(|| {
            let blocks: usize = (0..self.grid.dimensions())
                .map(|dim| self.grid.coordinate(state, dim) / self.block_size)
                .sum();
            blocks % self.worker_count
        })
    }
}

impl<E: OdeParamEncoder> OdeGraph<E> {
    /// States of this graph owned by the worker of the given `partition`.
    pub fn owned_states<'a, P: PartitionFunction>(
        &'a self,
        partition: &'a P,
    ) -> impl Iterator<Item = IdState> + 'a {
        self.states().filter(move |s| partition.is_local(*s))
    }
}

fn check_worker(my_id: usize, worker_count: usize, block_size: usize) -> Result<(), OdeError> {
    if my_id >= worker_count || block_size == 0 {
        return Err(OdeError::InvalidPartitioning {
            worker: my_id,
            worker_count,
            block_size,
        });
    }
    debug!("Partitioning for worker {} of {}.", my_id, worker_count);
    Ok(())
}

fn owner_cache(grid: &GridEncoder) -> Vec<OnceLock<usize>> {
    (0..grid.state_count()).map(|_| OnceLock::new()).collect()
}
