//! The parametrised rectangular abstraction of an `OdeModel`.
//!
//! States of the `OdeGraph` are the hyper-rectangles of the threshold grid (see `grid`).
//! A transition between two adjacent states is enabled for the parameter valuations for
//! which the flow crosses their shared facet in the right direction. A state has a
//! self-loop for the valuations where the flow does not provably leave it.
//!
//! All the intermediate results (vertex flows, facet colors, transition lists) are
//! computed lazily and memoized in dense tables indexed by vertex/state id. The tables
//! are write-once, so a single graph can be explored from multiple threads.

use crate::biodivine_std::structs::{IdState, IdStateRange};
use crate::biodivine_std::traits::{Graph, InvertibleGraph, Set};
use crate::grid::GridEncoder;
use crate::{OdeModel, ParameterId, VariableId};
use std::sync::atomic::AtomicUsize;
use std::sync::OnceLock;

mod _impl_evolution_operators;
mod _impl_facet_colors;
mod _impl_graph_stats;
mod _impl_ode_graph;
mod _impl_vertex_flow;

/// Turns vertex flows into sets of parameter valuations.
///
/// This is the seam between the graph and the representation of parameter sets: the graph
/// only ever combines the sets returned by `vertex_params` using the `Set` operations.
/// See `RectangleParamEncoder` and `BoolParamEncoder`.
pub trait OdeParamEncoder {
    type ParamSet: Set;
    /// The empty set of valuations.
    fn empty_params(&self) -> &Self::ParamSet;
    /// All valuations allowed by the parameter ranges of the model.
    fn unit_params(&self) -> &Self::ParamSet;
    /// Valuations for which the derivative described by `flow` is strictly positive
    /// (or strictly negative when `positive` is false).
    fn vertex_params(&self, flow: &VertexFlow, positive: bool) -> Self::ParamSet;
    /// Complement of `params` relative to the unit set.
    fn not_params(&self, params: &Self::ParamSet) -> Self::ParamSet {
        self.unit_params().minus(params)
    }
}

/// Value of one derivative at one vertex of the grid, as an affine function of at most
/// one parameter: `constant + coefficient * parameter`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexFlow {
    constant: f64,
    parameter: Option<(ParameterId, f64)>,
}

/// Identifies one of the four views of a facet of a state.
///
/// *Positive* facets are the upper facets of a state, *negative* facets the lower ones.
/// *In* and *out* give the direction of the flow relative to the state.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FacetOrientation {
    PositiveIn,
    PositiveOut,
    NegativeIn,
    NegativeOut,
}

/// Kind of a transition: movement along one variable, or staying in the state.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Increase(VariableId),
    Decrease(VariableId),
    Loop,
}

/// A transition to (or from) `target`, enabled for the valuations in `bound`.
///
/// The bound of an emitted transition is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<P> {
    pub target: IdState,
    pub direction: Direction,
    pub bound: P,
}

/// An iterator over the memoized transitions of one state.
pub type TransitionIterator<'a, P> = std::slice::Iter<'a, Transition<P>>;

/// A snapshot of the work performed by an `OdeGraph` so far.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GraphStats {
    /// Derivatives evaluated at a vertex.
    pub vertex_evaluations: usize,
    /// Facet colors computed from vertex flows.
    pub facet_computations: usize,
    /// Facet colors stored on behalf of a neighbouring state.
    pub dual_writes: usize,
    /// Facet queries answered from the cache.
    pub facet_cache_hits: usize,
    /// Transition lists computed.
    pub step_computations: usize,
}

/// **(internal)** Atomic counters behind `GraphStats`.
#[derive(Debug, Default)]
struct Counters {
    vertex_evaluations: AtomicUsize,
    facet_computations: AtomicUsize,
    dual_writes: AtomicUsize,
    facet_cache_hits: AtomicUsize,
    step_computations: AtomicUsize,
}

/// The rectangular abstraction of an `OdeModel`, with parameter sets given by `E`.
pub struct OdeGraph<E: OdeParamEncoder> {
    model: OdeModel,
    encoder: E,
    grid: GridEncoder,
    create_self_loops: bool,
    /// Indexed by `dim * vertex_count + vertex`.
    vertex_flows: Vec<OnceLock<VertexFlow>>,
    /// Indexed by `(state * dimensions + dim) * 4 + orientation`.
    facet_colors: Vec<OnceLock<E::ParamSet>>,
    /// One table per combination of time direction and successors/predecessors.
    steps: [Vec<OnceLock<Vec<Transition<E::ParamSet>>>>; 4],
    counters: Counters,
}

/// A forward `EvolutionOperator` of the `OdeGraph` (successors in forward time).
pub struct Fwd<'a, E: OdeParamEncoder> {
    graph: &'a OdeGraph<E>,
}

/// A backward `EvolutionOperator` of the `OdeGraph` (predecessors in forward time).
pub struct Bwd<'a, E: OdeParamEncoder> {
    graph: &'a OdeGraph<E>,
}

/// Iterates over `(state, params)` pairs of the memoized transitions of one state.
pub struct StepIterator<'a, P> {
    transitions: TransitionIterator<'a, P>,
}

impl<'a, E: OdeParamEncoder> Graph for &'a OdeGraph<E> {
    type State = IdState;
    type Params = E::ParamSet;
    type States = IdStateRange;
    type FwdEdges = Fwd<'a, E>;
    type BwdEdges = Bwd<'a, E>;

    fn states(&self) -> Self::States {
        IdStateRange::new(self.grid.state_count())
    }

    fn fwd(&self) -> Self::FwdEdges {
        Fwd { graph: *self }
    }

    fn bwd(&self) -> Self::BwdEdges {
        Bwd { graph: *self }
    }
}

impl<'a, E: OdeParamEncoder> InvertibleGraph for &'a OdeGraph<E> {
    type FwdEdges = Fwd<'a, E>;
    type BwdEdges = Bwd<'a, E>;
}
