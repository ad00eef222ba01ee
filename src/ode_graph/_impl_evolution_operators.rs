use crate::biodivine_std::structs::IdState;
use crate::biodivine_std::traits::{EvolutionOperator, InvertibleEvolutionOperator};
use crate::ode_graph::{Bwd, Fwd, OdeParamEncoder, StepIterator};

impl<'a, E: OdeParamEncoder> EvolutionOperator for Fwd<'a, E> {
    type State = IdState;
    type Params = E::ParamSet;
    type Iterator = StepIterator<'a, E::ParamSet>;

    fn step(&self, current: IdState) -> Self::Iterator {
        StepIterator {
            transitions: self.graph.successors(current, true),
        }
    }
}

impl<'a, E: OdeParamEncoder> EvolutionOperator for Bwd<'a, E> {
    type State = IdState;
    type Params = E::ParamSet;
    type Iterator = StepIterator<'a, E::ParamSet>;

    fn step(&self, current: IdState) -> Self::Iterator {
        StepIterator {
            transitions: self.graph.predecessors(current, true),
        }
    }
}

impl<'a, E: OdeParamEncoder> InvertibleEvolutionOperator for Fwd<'a, E> {
    type InvertedOperator = Bwd<'a, E>;

    fn invert(&self) -> Self::InvertedOperator {
        Bwd { graph: self.graph }
    }
}

impl<'a, E: OdeParamEncoder> InvertibleEvolutionOperator for Bwd<'a, E> {
    type InvertedOperator = Fwd<'a, E>;

    fn invert(&self) -> Self::InvertedOperator {
        Fwd { graph: self.graph }
    }
}

impl<P: Clone> Iterator for StepIterator<'_, P> {
    type Item = (IdState, P);

    fn next(&mut self) -> Option<Self::Item> {
        self.transitions
            .next()
            .map(|t| (t.target, t.bound.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.transitions.size_hint()
    }
}

impl<P: Clone> ExactSizeIterator for StepIterator<'_, P> {}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::structs::IdState;
    use crate::biodivine_std::traits::{
        EvolutionOperator, Graph, InvertibleEvolutionOperator, Set,
    };
    use crate::ode_graph::OdeGraph;
    use crate::rect_params::RectangleParamEncoder;
    use crate::{OdeModel, Summand};

    /// `dx = p - x`, `dy = x - y` with `p` in `[0, 3]`.
    fn cascade() -> OdeModel {
        let mut model = OdeModel::new();
        let p = model.add_parameter("p", (0.0, 3.0)).unwrap();
        let x = model.add_variable("x", (0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        let y = model.add_variable("y", (0.0, 3.0), vec![0.0, 1.5, 3.0]).unwrap();
        model
            .set_equation(x, vec![Summand::parameter(p), Summand::constant(-1.0).with_variable(x)])
            .unwrap();
        model
            .set_equation(y, vec![Summand::variable(x), Summand::constant(-1.0).with_variable(y)])
            .unwrap();
        model
    }

    #[test]
    fn operators_follow_transitions() {
        let model = cascade();
        let encoder = RectangleParamEncoder::new(&model);
        let graph = OdeGraph::new(model, encoder).unwrap();
        let graph = &graph;
        assert_eq!(6, graph.states().count());

        let fwd = graph.fwd();
        let bwd = graph.bwd();
        for state in Graph::states(&graph) {
            let successors = fwd.step(state).collect::<Vec<_>>();
            let transitions = graph.successors(state, true).collect::<Vec<_>>();
            assert_eq!(transitions.len(), successors.len());
            for ((target, params), t) in successors.iter().zip(transitions) {
                assert_eq!(t.target, *target);
                assert_eq!(&t.bound, params);
            }
            // Every forward edge is visible from the other end.
            for (target, params) in successors {
                let back = bwd.step(target).find(|(source, _)| *source == state);
                let (_, back_params) = back.unwrap();
                assert!(params.minus(&back_params).is_empty());
                assert!(back_params.minus(&params).is_empty());
            }
        }
    }

    #[test]
    fn inverted_operators() {
        let model = cascade();
        let encoder = RectangleParamEncoder::new(&model);
        let graph = OdeGraph::new(model, encoder).unwrap();
        let graph = &graph;
        let state = IdState::from(1);
        let inverted = graph.fwd().invert().step(state).collect::<Vec<_>>();
        let bwd = graph.bwd().step(state).collect::<Vec<_>>();
        assert_eq!(bwd, inverted);
        let twice = graph.bwd().invert().step(state).collect::<Vec<_>>();
        let fwd = graph.fwd().step(state).collect::<Vec<_>>();
        assert_eq!(fwd, twice);
        assert_eq!(fwd.len(), graph.fwd().step(state).len());
    }
}
