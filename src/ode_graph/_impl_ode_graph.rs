use crate::biodivine_std::structs::{IdState, IdStateRange};
use crate::biodivine_std::traits::Set;
use crate::grid::GridEncoder;
use crate::ode_graph::{
    Counters, Direction, FacetOrientation, OdeGraph, OdeParamEncoder, Transition,
    TransitionIterator,
};
use crate::{OdeError, OdeModel, VariableId};
use log::{debug, info, trace};
use std::sync::atomic::Ordering;
use std::sync::OnceLock;

impl<E: OdeParamEncoder> OdeGraph<E> {
    /// Create a new graph of the given `model` with parameter sets created by `encoder`.
    ///
    /// The `encoder` must be created for the same model.
    pub fn new(model: OdeModel, encoder: E) -> Result<OdeGraph<E>, OdeError> {
        OdeGraph::new_with_options(model, encoder, true)
    }

    /// Same as `new`, but self-loops can be disabled. Without self-loops, the graph only
    /// contains transitions between different states.
    pub fn new_with_options(
        model: OdeModel,
        encoder: E,
        create_self_loops: bool,
    ) -> Result<OdeGraph<E>, OdeError> {
        let grid = GridEncoder::new(&model)?;
        let dimensions = grid.dimensions();
        let state_count = grid.state_count();
        debug!(
            "Creating graph: {} dimensions, {} states, {} parameters, self-loops: {}.",
            dimensions,
            state_count,
            model.num_parameters(),
            create_self_loops
        );
        Ok(OdeGraph {
            vertex_flows: empty_table(dimensions * grid.vertex_count()),
            facet_colors: empty_table(state_count * dimensions * 4),
            steps: std::array::from_fn(|_| empty_table(state_count)),
            counters: Counters::default(),
            model,
            encoder,
            grid,
            create_self_loops,
        })
    }

    pub fn model(&self) -> &OdeModel {
        &self.model
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn grid(&self) -> &GridEncoder {
        &self.grid
    }

    pub fn creates_self_loops(&self) -> bool {
        self.create_self_loops
    }

    pub fn num_states(&self) -> usize {
        self.grid.state_count()
    }

    /// All states of this graph.
    pub fn states(&self) -> IdStateRange {
        IdStateRange::new(self.grid.state_count())
    }

    pub fn empty_params(&self) -> &E::ParamSet {
        self.encoder.empty_params()
    }

    pub fn unit_params(&self) -> &E::ParamSet {
        self.encoder.unit_params()
    }

    /// Transitions leaving `state`. With `time_flow` set to `false`, the transitions of the
    /// system with reversed time are returned instead.
    pub fn successors(&self, state: IdState, time_flow: bool) -> TransitionIterator<E::ParamSet> {
        self.step(state, true, time_flow).iter()
    }

    /// Transitions entering `state`, each with `target` set to the source of the transition.
    pub fn predecessors(&self, state: IdState, time_flow: bool) -> TransitionIterator<E::ParamSet> {
        self.step(state, false, time_flow).iter()
    }

    /// The memoized transitions of `state`.
    pub fn step(
        &self,
        state: IdState,
        successors: bool,
        time_flow: bool,
    ) -> &[Transition<E::ParamSet>] {
        let table = usize::from(!time_flow) * 2 + usize::from(!successors);
        self.steps[table][usize::from(state)]
            .get_or_init(|| self.compute_step(state, successors, time_flow))
    }

    /// Valuations enabling the forward-time transition from `from` to `to`. Empty if the
    /// states are not connected.
    pub fn transition_params(&self, from: IdState, to: IdState) -> E::ParamSet {
        self.successors(from, true)
            .find(|t| t.target == to)
            .map(|t| t.bound.clone())
            .unwrap_or_else(|| self.encoder.empty_params().clone())
    }

    fn compute_step(
        &self,
        state: IdState,
        successors: bool,
        time_flow: bool,
    ) -> Vec<Transition<E::ParamSet>> {
        let computed = self
            .counters
            .step_computations
            .fetch_add(1, Ordering::Relaxed)
            + 1;
        if cfg!(feature = "print-progress") && computed % 10_000 == 0 {
            info!("Computed {} transition lists.", computed);
        }

        let facet = |dim: usize, orientation: FacetOrientation| {
            let orientation = if time_flow {
                orientation
            } else {
                orientation.reversed()
            };
            self.facet_params(state, dim, orientation)
        };

        let mut result = Vec::new();
        // Valuations for which the flow provably leaves the state.
        let mut outflow = self.encoder.empty_params().clone();
        for dim in 0..self.grid.dimensions() {
            let variable = VariableId::from(dim);
            let higher = self.grid.higher_state(state, dim);
            let lower = self.grid.lower_state(state, dim);
            if higher.is_none() && lower.is_none() {
                continue;
            }
            let positive_in = facet(dim, FacetOrientation::PositiveIn);
            let positive_out = facet(dim, FacetOrientation::PositiveOut);
            let negative_in = facet(dim, FacetOrientation::NegativeIn);
            let negative_out = facet(dim, FacetOrientation::NegativeOut);

            if let Some(higher) = higher {
                let (bound, direction) = if successors {
                    (positive_out, Direction::Increase(variable))
                } else {
                    (positive_in, Direction::Decrease(variable))
                };
                if !bound.is_empty() {
                    result.push(Transition {
                        target: higher,
                        direction,
                        bound: bound.clone(),
                    });
                }
                if self.create_self_loops {
                    let upward = negative_in
                        .intersect(positive_out)
                        .minus(negative_out)
                        .minus(positive_in);
                    outflow = outflow.union(&upward);
                }
            }

            if let Some(lower) = lower {
                let (bound, direction) = if successors {
                    (negative_out, Direction::Decrease(variable))
                } else {
                    (negative_in, Direction::Increase(variable))
                };
                if !bound.is_empty() {
                    result.push(Transition {
                        target: lower,
                        direction,
                        bound: bound.clone(),
                    });
                }
                if self.create_self_loops {
                    let downward = negative_out
                        .intersect(positive_in)
                        .minus(negative_in)
                        .minus(positive_out);
                    outflow = outflow.union(&downward);
                }
            }
        }

        if self.create_self_loops {
            let self_loop = self.encoder.not_params(&outflow);
            if !self_loop.is_empty() {
                result.push(Transition {
                    target: state,
                    direction: Direction::Loop,
                    bound: self_loop,
                });
            }
        }
        trace!(
            "{} of {} (time flow: {}): {} transitions.",
            if successors { "Successors" } else { "Predecessors" },
            state,
            time_flow,
            result.len()
        );
        result
    }
}

fn empty_table<T>(size: usize) -> Vec<OnceLock<T>> {
    (0..size).map(|_| OnceLock::new()).collect()
}
