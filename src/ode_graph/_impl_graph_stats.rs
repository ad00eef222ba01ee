use crate::ode_graph::{GraphStats, OdeGraph, OdeParamEncoder};
use std::fmt::{Display, Error, Formatter};
use std::sync::atomic::Ordering;

impl<E: OdeParamEncoder> OdeGraph<E> {
    /// Work performed by this graph so far.
    ///
    /// The counters are read one by one, so a snapshot taken while other threads explore
    /// the graph does not have to be consistent.
    pub fn stats(&self) -> GraphStats {
        let c = &self.counters;
        GraphStats {
            vertex_evaluations: c.vertex_evaluations.load(Ordering::Relaxed),
            facet_computations: c.facet_computations.load(Ordering::Relaxed),
            dual_writes: c.dual_writes.load(Ordering::Relaxed),
            facet_cache_hits: c.facet_cache_hits.load(Ordering::Relaxed),
            step_computations: c.step_computations.load(Ordering::Relaxed),
        }
    }
}

impl Display for GraphStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "vertex evaluations: {}, facet computations: {} (+{} shared, {} cache hits), steps: {}",
            self.vertex_evaluations,
            self.facet_computations,
            self.dual_writes,
            self.facet_cache_hits,
            self.step_computations
        )
    }
}
