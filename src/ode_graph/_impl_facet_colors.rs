use crate::biodivine_std::structs::IdState;
use crate::biodivine_std::traits::Set;
use crate::ode_graph::{FacetOrientation, OdeGraph, OdeParamEncoder};
use log::trace;
use std::sync::atomic::Ordering;

impl FacetOrientation {
    pub const ALL: [FacetOrientation; 4] = [
        FacetOrientation::PositiveIn,
        FacetOrientation::PositiveOut,
        FacetOrientation::NegativeIn,
        FacetOrientation::NegativeOut,
    ];

    /// Position of this orientation in `FacetOrientation::ALL`.
    pub fn index(self) -> usize {
        match self {
            FacetOrientation::PositiveIn => 0,
            FacetOrientation::PositiveOut => 1,
            FacetOrientation::NegativeIn => 2,
            FacetOrientation::NegativeOut => 3,
        }
    }

    /// True for the upper facet of a state.
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            FacetOrientation::PositiveIn | FacetOrientation::PositiveOut
        )
    }

    pub fn is_incoming(self) -> bool {
        matches!(
            self,
            FacetOrientation::PositiveIn | FacetOrientation::NegativeIn
        )
    }

    /// Flow leaves through the upper facet or enters through the lower one only if the
    /// derivative is positive.
    pub fn requires_positive_flow(self) -> bool {
        matches!(
            self,
            FacetOrientation::PositiveOut | FacetOrientation::NegativeIn
        )
    }

    /// The same facet, seen from the neighbouring state.
    pub fn dual(self) -> FacetOrientation {
        match self {
            FacetOrientation::PositiveIn => FacetOrientation::NegativeOut,
            FacetOrientation::PositiveOut => FacetOrientation::NegativeIn,
            FacetOrientation::NegativeIn => FacetOrientation::PositiveOut,
            FacetOrientation::NegativeOut => FacetOrientation::PositiveIn,
        }
    }

    /// The same facet in a system with reversed time.
    pub fn reversed(self) -> FacetOrientation {
        match self {
            FacetOrientation::PositiveIn => FacetOrientation::PositiveOut,
            FacetOrientation::PositiveOut => FacetOrientation::PositiveIn,
            FacetOrientation::NegativeIn => FacetOrientation::NegativeOut,
            FacetOrientation::NegativeOut => FacetOrientation::NegativeIn,
        }
    }
}

impl<E: OdeParamEncoder> OdeGraph<E> {
    /// Valuations for which the flow crosses the given facet of `state` in the direction
    /// given by `orientation`.
    ///
    /// A facet is crossed if the flow at *any* of its vertices has the required sign. Once
    /// computed, the result is also stored for the neighbouring state that shares the facet.
    pub fn facet_params(
        &self,
        state: IdState,
        dim: usize,
        orientation: FacetOrientation,
    ) -> &E::ParamSet {
        let index = self.facet_index(state, dim, orientation);
        if let Some(cached) = self.facet_colors[index].get() {
            self.counters
                .facet_cache_hits
                .fetch_add(1, Ordering::Relaxed);
            return cached;
        }
        let colors = self.compute_facet_params(state, dim, orientation);
        let neighbour = if orientation.is_positive() {
            self.grid.higher_state(state, dim)
        } else {
            self.grid.lower_state(state, dim)
        };
        if let Some(neighbour) = neighbour {
            let dual = self.facet_index(neighbour, dim, orientation.dual());
            if self.facet_colors[dual].set(colors.clone()).is_ok() {
                self.counters.dual_writes.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.facet_colors[index].get_or_init(|| colors)
    }

    fn facet_index(&self, state: IdState, dim: usize, orientation: FacetOrientation) -> usize {
        (usize::from(state) * self.grid.dimensions() + dim) * 4 + orientation.index()
    }

    fn compute_facet_params(
        &self,
        state: IdState,
        dim: usize,
        orientation: FacetOrientation,
    ) -> E::ParamSet {
        self.counters
            .facet_computations
            .fetch_add(1, Ordering::Relaxed);
        let positive = orientation.requires_positive_flow();
        let mut colors = self.encoder.empty_params().clone();
        for vertex in self.grid.facet_vertices(state, dim, orientation.is_positive()) {
            let flow = self.vertex_flow(dim, vertex);
            colors = colors.union(&self.encoder.vertex_params(&flow, positive));
        }
        trace!(
            "Facet {:?} of {} in dimension {} computed.",
            orientation,
            state,
            dim
        );
        colors
    }
}
