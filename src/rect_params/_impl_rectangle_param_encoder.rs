use crate::ode_graph::{OdeGraph, OdeParamEncoder, VertexFlow};
use crate::rect_params::{Rectangle, RectangleParamEncoder, RectangleSet};
use crate::{OdeError, OdeModel, ParameterId};
use log::debug;

impl RectangleParamEncoder {
    /// Create an encoder for the parameter space of the given `model`.
    ///
    /// The unit set is the box given by the parameter ranges. A model without parameters
    /// gets the zero-dimensional unit set `{[]}`.
    pub fn new(model: &OdeModel) -> RectangleParamEncoder {
        let bounds = model.parameter_bounds();
        let low = bounds.iter().map(|(l, _)| *l).collect::<Vec<_>>();
        let high = bounds.iter().map(|(_, h)| *h).collect::<Vec<_>>();
        let bounds = Rectangle::from_points(&low, &high);
        debug!("Rectangle parameter space: {}", bounds);
        RectangleParamEncoder {
            unit: RectangleSet::from_rectangle(bounds.clone()),
            empty: RectangleSet::empty(),
            bounds,
        }
    }

    /// The rectangle of all valid parameter valuations.
    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    pub fn dimensions(&self) -> usize {
        self.bounds.dimensions()
    }

    /// Valuations where `parameter` lies in `[low, high]` and the remaining parameters
    /// are unrestricted.
    pub fn interval_params(&self, parameter: ParameterId, low: f64, high: f64) -> RectangleSet {
        let dim = usize::from(parameter);
        let low = low.max(self.bounds.low(dim));
        let high = high.min(self.bounds.high(dim));
        self.with_interval(dim, low, high)
    }

    fn with_interval(&self, dim: usize, low: f64, high: f64) -> RectangleSet {
        let mut coordinates = self.bounds.coordinates().to_vec();
        coordinates[2 * dim] = low;
        coordinates[2 * dim + 1] = high;
        RectangleSet::from_rectangle(Rectangle::new(coordinates))
    }
}

impl OdeParamEncoder for RectangleParamEncoder {
    type ParamSet = RectangleSet;

    fn empty_params(&self) -> &RectangleSet {
        &self.empty
    }

    fn unit_params(&self) -> &RectangleSet {
        &self.unit
    }

    /// For `c + k * p`, the valuations with the requested sign form one half of the range
    /// of `p`, split at `-c / k`. The split is closed, so the boundary valuation is part of
    /// both halves.
    fn vertex_params(&self, flow: &VertexFlow, positive: bool) -> RectangleSet {
        let Some((parameter, coefficient)) = flow.effective_parameter() else {
            return if flow.constant_has_sign(positive) {
                self.unit.clone()
            } else {
                self.empty.clone()
            };
        };
        let dim = usize::from(parameter);
        let (low, high) = (self.bounds.low(dim), self.bounds.high(dim));
        let split = (-flow.get_constant() / coefficient).max(low).min(high);
        if (coefficient > 0.0) == positive {
            self.with_interval(dim, split, high)
        } else {
            self.with_interval(dim, low, split)
        }
    }
}

impl OdeGraph<RectangleParamEncoder> {
    /// Create a graph with parameter sets represented as unions of rectangles.
    pub fn with_rectangle_params(model: OdeModel) -> Result<Self, OdeError> {
        let encoder = RectangleParamEncoder::new(&model);
        OdeGraph::new(model, encoder)
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::traits::Set;
    use crate::ode_graph::{OdeGraph, OdeParamEncoder, VertexFlow};
    use crate::rect_params::{Rectangle, RectangleParamEncoder, RectangleSet};
    use crate::{OdeModel, ParameterId};
    use pretty_assertions::assert_eq;

    fn two_parameters() -> RectangleParamEncoder {
        let mut model = OdeModel::new();
        model.add_parameter("a", (0.0, 2.0)).unwrap();
        model.add_parameter("b", (-1.0, 1.0)).unwrap();
        RectangleParamEncoder::new(&model)
    }

    fn set(coordinates: &[f64]) -> RectangleSet {
        RectangleSet::from_rectangle(Rectangle::new(coordinates.to_vec()))
    }

    #[test]
    fn encoder_bounds() {
        let encoder = two_parameters();
        assert_eq!(2, encoder.dimensions());
        assert_eq!(&Rectangle::new(vec![0.0, 2.0, -1.0, 1.0]), encoder.bounds());
        assert_eq!(&set(&[0.0, 2.0, -1.0, 1.0]), encoder.unit_params());
        assert!(encoder.empty_params().is_empty());

        let no_params = RectangleParamEncoder::new(&OdeModel::new());
        assert_eq!(0, no_params.dimensions());
        assert_eq!(&RectangleSet::from_rectangle(Rectangle::point()), no_params.unit_params());
    }

    #[test]
    fn constant_vertex_params() {
        let encoder = two_parameters();
        let unit = encoder.unit_params().clone();
        assert_eq!(unit, encoder.vertex_params(&VertexFlow::constant(1.0), true));
        assert!(encoder.vertex_params(&VertexFlow::constant(1.0), false).is_empty());
        assert_eq!(unit, encoder.vertex_params(&VertexFlow::constant(-0.5), false));
        // Zero flow has neither sign.
        assert!(encoder.vertex_params(&VertexFlow::constant(0.0), true).is_empty());
        assert!(encoder.vertex_params(&VertexFlow::constant(0.0), false).is_empty());
        // A zero coefficient makes the flow constant.
        let flat = VertexFlow::affine(2.0, ParameterId(1), 0.0);
        assert_eq!(unit, encoder.vertex_params(&flat, true));
    }

    #[test]
    fn affine_vertex_params() {
        let encoder = two_parameters();
        // -1 + 2a > 0 for a in [0.5, 2]
        let flow = VertexFlow::affine(-1.0, ParameterId(0), 2.0);
        assert_eq!(set(&[0.5, 2.0, -1.0, 1.0]), encoder.vertex_params(&flow, true));
        assert_eq!(set(&[0.0, 0.5, -1.0, 1.0]), encoder.vertex_params(&flow, false));
        // 0.5 - b > 0 for b in [-1, 0.5]
        let flow = VertexFlow::affine(0.5, ParameterId(1), -1.0);
        assert_eq!(set(&[0.0, 2.0, -1.0, 0.5]), encoder.vertex_params(&flow, true));
        assert_eq!(set(&[0.0, 2.0, 0.5, 1.0]), encoder.vertex_params(&flow, false));
        // The split lies outside of the range of `a`.
        let flow = VertexFlow::affine(10.0, ParameterId(0), 1.0);
        assert_eq!(encoder.unit_params(), &encoder.vertex_params(&flow, true));
        assert!(encoder.vertex_params(&flow, false).is_empty());
    }

    #[test]
    fn interval_params_are_clamped() {
        let encoder = two_parameters();
        assert_eq!(
            set(&[0.0, 2.0, 0.0, 1.0]),
            encoder.interval_params(ParameterId(1), 0.0, 5.0)
        );
        assert!(encoder.interval_params(ParameterId(0), 3.0, 4.0).is_empty());
    }

    #[test]
    fn graph_with_rectangle_params() {
        let mut model = OdeModel::new();
        model.add_parameter("p", (0.0, 1.0)).unwrap();
        model.add_variable("x", (0.0, 1.0), vec![0.0, 1.0]).unwrap();
        let graph = OdeGraph::with_rectangle_params(model).unwrap();
        assert_eq!(1, graph.num_states());
        assert_eq!(&set(&[0.0, 1.0]), graph.unit_params());
    }
}
