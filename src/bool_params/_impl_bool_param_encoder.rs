use super::{BoolParamEncoder, BoolParams};
use crate::ode_graph::{OdeGraph, OdeParamEncoder, VertexFlow};
use crate::{OdeError, OdeModel};

impl BoolParamEncoder {
    /// Create an encoder for `model`, which must not declare any parameters.
    pub fn new(model: &OdeModel) -> Result<BoolParamEncoder, OdeError> {
        if model.num_parameters() > 0 {
            return Err(OdeError::ParametersNotSupported(model.num_parameters()));
        }
        Ok(BoolParamEncoder {
            empty: BoolParams(false),
            unit: BoolParams(true),
        })
    }
}

impl OdeParamEncoder for BoolParamEncoder {
    type ParamSet = BoolParams;

    fn empty_params(&self) -> &BoolParams {
        &self.empty
    }

    fn unit_params(&self) -> &BoolParams {
        &self.unit
    }

    fn vertex_params(&self, flow: &VertexFlow, positive: bool) -> BoolParams {
        BoolParams(flow.constant_has_sign(positive))
    }
}

impl OdeGraph<BoolParamEncoder> {
    /// Create a graph of a parameter-free model where every transition is either enabled
    /// or not.
    pub fn with_bool_params(model: OdeModel) -> Result<Self, OdeError> {
        let encoder = BoolParamEncoder::new(&model)?;
        OdeGraph::new(model, encoder)
    }
}
