use crate::ode_graph::{OdeGraph, OdeParamEncoder, VertexFlow};
use crate::{ParameterId, VariableId};
use log::trace;
use std::sync::atomic::Ordering;

impl VertexFlow {
    /// A flow that does not depend on any parameter.
    pub fn constant(value: f64) -> VertexFlow {
        VertexFlow {
            constant: value,
            parameter: None,
        }
    }

    /// A flow `constant + coefficient * parameter`.
    pub fn affine(constant: f64, parameter: ParameterId, coefficient: f64) -> VertexFlow {
        VertexFlow {
            constant,
            parameter: Some((parameter, coefficient)),
        }
    }

    pub fn get_constant(&self) -> f64 {
        self.constant
    }

    /// The parameter of this flow together with its coefficient.
    pub fn get_parameter(&self) -> Option<(ParameterId, f64)> {
        self.parameter
    }

    /// The parameter and coefficient, unless the coefficient is zero and the flow is
    /// therefore constant.
    pub fn effective_parameter(&self) -> Option<(ParameterId, f64)> {
        self.parameter.filter(|(_, coefficient)| *coefficient != 0.0)
    }

    /// True if the constant part of the flow is strictly positive (or strictly negative).
    pub fn constant_has_sign(&self, positive: bool) -> bool {
        if positive {
            self.constant > 0.0
        } else {
            self.constant < 0.0
        }
    }

    /// The parameter value at which the flow changes its sign, clamped to `bounds`.
    ///
    /// Returns `None` for flows that do not effectively depend on a parameter.
    pub fn sign_split(&self, bounds: (f64, f64)) -> Option<f64> {
        self.effective_parameter()
            .map(|(_, coefficient)| (-self.constant / coefficient).max(bounds.0).min(bounds.1))
    }
}

impl<E: OdeParamEncoder> OdeGraph<E> {
    /// Flow of the derivative of `dim` at the given `vertex`.
    pub fn vertex_flow(&self, dim: usize, vertex: usize) -> VertexFlow {
        let index = dim * self.grid.vertex_count() + vertex;
        *self.vertex_flows[index].get_or_init(|| self.compute_vertex_flow(dim, vertex))
    }

    /// **(internal)** Evaluate the equation of `dim` with every variable substituted by the
    /// threshold selected by the vertex. Summands with a parameter contribute to its
    /// coefficient, the rest to the constant.
    fn compute_vertex_flow(&self, dim: usize, vertex: usize) -> VertexFlow {
        self.counters
            .vertex_evaluations
            .fetch_add(1, Ordering::Relaxed);
        let variable = VariableId::from(dim);
        let value_of = |v: VariableId| {
            let dim = usize::from(v);
            self.model.thresholds(v)[self.grid.vertex_coordinate(vertex, dim)]
        };
        let mut constant = 0.0;
        let mut coefficient = 0.0;
        for summand in self.model.equation(variable) {
            let value = summand.evaluate(value_of);
            if summand.has_parameter() {
                coefficient += value;
            } else {
                constant += value;
            }
        }
        let flow = match self.model.equation_parameter(variable) {
            Some(parameter) => VertexFlow::affine(constant, parameter, coefficient),
            None => VertexFlow::constant(constant),
        };
        trace!("Flow of {} at vertex {}: {:?}", variable, vertex, flow);
        flow
    }
}

#[cfg(test)]
mod tests {
    use crate::ode_graph::VertexFlow;
    use crate::ParameterId;

    #[test]
    fn vertex_flow_signs() {
        let positive = VertexFlow::constant(1.5);
        assert!(positive.constant_has_sign(true));
        assert!(!positive.constant_has_sign(false));
        let zero = VertexFlow::constant(0.0);
        assert!(!zero.constant_has_sign(true));
        assert!(!zero.constant_has_sign(false));
        assert_eq!(None, zero.sign_split((0.0, 1.0)));
    }

    #[test]
    fn vertex_flow_split() {
        let p = ParameterId(0);
        // -1 + 2p changes sign at 0.5
        assert_eq!(Some(0.5), VertexFlow::affine(-1.0, p, 2.0).sign_split((0.0, 2.0)));
        // Clamped to the parameter range.
        assert_eq!(Some(2.0), VertexFlow::affine(-10.0, p, 1.0).sign_split((0.0, 2.0)));
        assert_eq!(Some(0.0), VertexFlow::affine(10.0, p, 1.0).sign_split((0.0, 2.0)));
        let flat = VertexFlow::affine(-1.0, p, 0.0);
        assert_eq!(None, flat.effective_parameter());
        assert_eq!(Some((p, 0.0)), flat.get_parameter());
        assert_eq!(None, flat.sign_split((0.0, 2.0)));
    }
}
