use crate::biodivine_std::structs::IdState;
use crate::grid::{GridEncoder, MAX_ENCODED_COUNT};
use crate::{OdeError, OdeModel, VariableId, MAX_DIMENSIONS};
use log::debug;

impl GridEncoder {
    /// Create a grid encoder for the thresholds of the given `OdeModel`.
    pub fn new(model: &OdeModel) -> Result<GridEncoder, OdeError> {
        let counts = model
            .variables()
            .map(|v| model.thresholds(v).len())
            .collect::<Vec<_>>();
        GridEncoder::build(&counts, |dim| {
            model.get_variable(VariableId::from(dim)).get_name().to_string()
        })
    }

    /// Create a grid encoder directly from the number of thresholds in each dimension.
    ///
    /// This is the model-free entry point, so errors refer to dimensions by their index.
    /// Every dimension needs at least two thresholds (one interval).
    pub fn from_threshold_counts(threshold_counts: &[usize]) -> Result<GridEncoder, OdeError> {
        GridEncoder::build(threshold_counts, |dim| format!("dimension {}", dim))
    }

    /// **(internal)** Validate the threshold counts and compute the encoding. `name_of`
    /// labels a dimension in error messages.
    fn build<F>(threshold_counts: &[usize], name_of: F) -> Result<GridEncoder, OdeError>
    where
        F: Fn(usize) -> String,
    {
        if threshold_counts.is_empty() {
            return Err(OdeError::NoVariables);
        }
        if threshold_counts.len() > MAX_DIMENSIONS {
            return Err(OdeError::TooManyDimensions {
                count: threshold_counts.len(),
                limit: MAX_DIMENSIONS,
            });
        }
        if let Some(dim) = threshold_counts.iter().position(|c| *c < 2) {
            return Err(OdeError::InvalidThresholds {
                variable: name_of(dim),
                reason: "at least two thresholds are required".to_string(),
            });
        }

        let state_counts = threshold_counts.iter().map(|c| c - 1).collect::<Vec<_>>();
        let (state_multipliers, state_count) = Self::multipliers(&state_counts, "states")?;
        let (vertex_multipliers, vertex_count) = Self::multipliers(threshold_counts, "vertices")?;

        debug!(
            "Grid with {} dimensions: {} states, {} vertices.",
            threshold_counts.len(),
            state_count,
            vertex_count
        );

        Ok(GridEncoder {
            state_counts,
            state_multipliers,
            threshold_counts: threshold_counts.to_vec(),
            vertex_multipliers,
            state_count,
            vertex_count,
        })
    }

    /// **(internal)** Positional multipliers of a mixed-radix encoding together with the
    /// total number of encoded values.
    fn multipliers(radix: &[usize], what: &'static str) -> Result<(Vec<usize>, usize), OdeError> {
        let mut multipliers = Vec::with_capacity(radix.len());
        let mut total: u128 = 1;
        for r in radix {
            multipliers.push(total as usize);
            total *= *r as u128;
            if total > MAX_ENCODED_COUNT as u128 {
                let count = radix.iter().map(|r| *r as u128).product();
                return Err(OdeError::EncodingOverflow {
                    what,
                    count,
                    limit: MAX_ENCODED_COUNT as u128,
                });
            }
        }
        Ok((multipliers, total as usize))
    }
}

/// Basic properties of the grid.
impl GridEncoder {
    pub fn dimensions(&self) -> usize {
        self.state_counts.len()
    }

    /// Total number of states.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Total number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of states along the axis of `dim`.
    pub fn states_in_dimension(&self, dim: usize) -> usize {
        self.state_counts[dim]
    }

    /// Number of thresholds along the axis of `dim`.
    pub fn thresholds_in_dimension(&self, dim: usize) -> usize {
        self.threshold_counts[dim]
    }
}

/// State and vertex encoding.
impl GridEncoder {
    /// Encode a vector of interval indices into a state.
    pub fn encode_state(&self, coordinates: &[usize]) -> IdState {
        debug_assert_eq!(coordinates.len(), self.dimensions());
        let id = coordinates
            .iter()
            .zip(&self.state_multipliers)
            .map(|(c, m)| c * m)
            .sum::<usize>();
        IdState::from(id)
    }

    pub fn decode_state(&self, state: IdState) -> Vec<usize> {
        (0..self.dimensions())
            .map(|dim| self.coordinate(state, dim))
            .collect()
    }

    /// Interval index of `state` in dimension `dim`.
    pub fn coordinate(&self, state: IdState, dim: usize) -> usize {
        (usize::from(state) / self.state_multipliers[dim]) % self.state_counts[dim]
    }

    /// Encode a vector of threshold indices into a vertex id.
    pub fn encode_vertex(&self, coordinates: &[usize]) -> usize {
        debug_assert_eq!(coordinates.len(), self.dimensions());
        coordinates
            .iter()
            .zip(&self.vertex_multipliers)
            .map(|(c, m)| c * m)
            .sum()
    }

    pub fn decode_vertex(&self, vertex: usize) -> Vec<usize> {
        (0..self.dimensions())
            .map(|dim| self.vertex_coordinate(vertex, dim))
            .collect()
    }

    /// Threshold index of `vertex` in dimension `dim`.
    pub fn vertex_coordinate(&self, vertex: usize, dim: usize) -> usize {
        (vertex / self.vertex_multipliers[dim]) % self.threshold_counts[dim]
    }

    /// The corner of `state` selected by `mask`: bit `d` of the mask picks the lower (`0`)
    /// or the upper (`1`) threshold of the state in dimension `d`.
    pub fn state_vertex(&self, state: IdState, mask: usize) -> usize {
        (0..self.dimensions())
            .map(|dim| {
                let upper = (mask >> dim) & 1;
                (self.coordinate(state, dim) + upper) * self.vertex_multipliers[dim]
            })
            .sum()
    }

    /// Index into the thresholds of `dim` of the lower or upper bound of `state`.
    pub fn threshold_index(&self, state: IdState, dim: usize, upper: bool) -> usize {
        self.coordinate(state, dim) + usize::from(upper)
    }
}

/// Adjacency.
impl GridEncoder {
    /// The neighbour of `state` with a higher interval in `dim`, unless `state` is at the
    /// upper boundary of the grid.
    pub fn higher_state(&self, state: IdState, dim: usize) -> Option<IdState> {
        if self.coordinate(state, dim) + 1 < self.state_counts[dim] {
            Some(IdState::from(usize::from(state) + self.state_multipliers[dim]))
        } else {
            None
        }
    }

    /// The neighbour of `state` with a lower interval in `dim`, unless `state` is at the
    /// lower boundary of the grid.
    pub fn lower_state(&self, state: IdState, dim: usize) -> Option<IdState> {
        if self.coordinate(state, dim) > 0 {
            Some(IdState::from(usize::from(state) - self.state_multipliers[dim]))
        } else {
            None
        }
    }

    /// All corner masks of a state, i.e. `0..2^dimensions`.
    pub fn vertex_masks(&self) -> std::ops::Range<usize> {
        0..(1 << self.dimensions())
    }

    /// Vertices of the upper or lower facet of `state` in dimension `dim`.
    pub fn facet_vertices(&self, state: IdState, dim: usize, upper: bool) -> Vec<usize> {
        self.vertex_masks()
            .filter(|mask| ((mask >> dim) & 1 == 1) == upper)
            .map(|mask| self.state_vertex(state, mask))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::structs::{IdState, IdStateRange};
    use crate::grid::GridEncoder;
    use crate::{OdeError, OdeModel, MAX_DIMENSIONS};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn grid_2x3() -> GridEncoder {
        // Thresholds: 3 in x (2 states), 4 in y (3 states).
        GridEncoder::from_threshold_counts(&[3, 4]).unwrap()
    }

    #[test]
    fn grid_sizes() {
        let grid = grid_2x3();
        assert_eq!(2, grid.dimensions());
        assert_eq!(6, grid.state_count());
        assert_eq!(12, grid.vertex_count());
        assert_eq!(2, grid.states_in_dimension(0));
        assert_eq!(4, grid.thresholds_in_dimension(1));
    }

    #[test]
    fn grid_from_model() {
        let mut model = OdeModel::new();
        model.add_variable("x", (0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        model.add_variable("y", (0.0, 1.0), vec![0.0, 1.0]).unwrap();
        let grid = GridEncoder::new(&model).unwrap();
        assert_eq!(3, grid.state_count());
        assert_eq!(8, grid.vertex_count());
        assert_eq!(Err(OdeError::NoVariables), GridEncoder::new(&OdeModel::new()));
    }

    #[test]
    fn state_encoding() {
        let grid = grid_2x3();
        assert_eq!(IdState::from(0), grid.encode_state(&[0, 0]));
        assert_eq!(IdState::from(1), grid.encode_state(&[1, 0]));
        assert_eq!(IdState::from(5), grid.encode_state(&[1, 2]));
        assert_eq!(vec![0, 1], grid.decode_state(IdState::from(2)));
        assert_eq!(1, grid.coordinate(IdState::from(3), 0));
        assert_eq!(1, grid.coordinate(IdState::from(3), 1));
    }

    #[test]
    fn vertex_encoding() {
        let grid = grid_2x3();
        assert_eq!(7, grid.encode_vertex(&[1, 2]));
        assert_eq!(vec![2, 3], grid.decode_vertex(11));
        // State [1, 2] has corners [1..=2] x [2..=3].
        let state = grid.encode_state(&[1, 2]);
        assert_eq!(grid.encode_vertex(&[1, 2]), grid.state_vertex(state, 0b00));
        assert_eq!(grid.encode_vertex(&[2, 2]), grid.state_vertex(state, 0b01));
        assert_eq!(grid.encode_vertex(&[1, 3]), grid.state_vertex(state, 0b10));
        assert_eq!(grid.encode_vertex(&[2, 3]), grid.state_vertex(state, 0b11));
        assert_eq!(2, grid.threshold_index(state, 0, true));
        assert_eq!(2, grid.threshold_index(state, 1, false));
    }

    #[test]
    fn neighbours_and_facets() {
        let grid = grid_2x3();
        let state = grid.encode_state(&[0, 1]);
        assert_eq!(Some(grid.encode_state(&[1, 1])), grid.higher_state(state, 0));
        assert_eq!(None, grid.lower_state(state, 0));
        assert_eq!(Some(grid.encode_state(&[0, 2])), grid.higher_state(state, 1));
        assert_eq!(Some(grid.encode_state(&[0, 0])), grid.lower_state(state, 1));
        assert_eq!(None, grid.higher_state(grid.encode_state(&[1, 2]), 1));

        assert_eq!(4, grid.vertex_masks().count());
        let upper_x = grid.facet_vertices(state, 0, true);
        assert_eq!(
            vec![grid.encode_vertex(&[1, 1]), grid.encode_vertex(&[1, 2])],
            upper_x
        );
        let lower_y = grid.facet_vertices(state, 1, false);
        assert_eq!(
            vec![grid.encode_vertex(&[0, 1]), grid.encode_vertex(&[1, 1])],
            lower_y
        );
    }

    #[test]
    fn encoding_limits() {
        assert!(matches!(
            GridEncoder::from_threshold_counts(&[2000, 2000, 2000]),
            Err(OdeError::EncodingOverflow { what: "states", .. })
        ));
        // 2^31 - 1 states fit, but the vertices do not.
        assert!(matches!(
            GridEncoder::from_threshold_counts(&[(i32::MAX as usize) + 1]),
            Err(OdeError::EncodingOverflow { what: "vertices", .. })
        ));
        assert_eq!(
            Err(OdeError::TooManyDimensions {
                count: MAX_DIMENSIONS + 1,
                limit: MAX_DIMENSIONS
            }),
            GridEncoder::from_threshold_counts(&[2; MAX_DIMENSIONS + 1])
        );
        assert_eq!(
            Err(OdeError::InvalidThresholds {
                variable: "dimension 1".to_string(),
                reason: "at least two thresholds are required".to_string(),
            }),
            GridEncoder::from_threshold_counts(&[3, 1])
        );
        let widest = GridEncoder::from_threshold_counts(&[2; MAX_DIMENSIONS]).unwrap();
        assert_eq!(1, widest.state_count());
        assert_eq!(1usize << MAX_DIMENSIONS, widest.vertex_count());
    }

    proptest! {
        #[test]
        fn state_round_trip(counts in prop::collection::vec(2usize..6, 1..5)) {
            let grid = GridEncoder::from_threshold_counts(&counts).unwrap();
            for state in IdStateRange::new(grid.state_count()) {
                let coordinates = grid.decode_state(state);
                prop_assert_eq!(state, grid.encode_state(&coordinates));
                for (dim, c) in coordinates.iter().enumerate() {
                    prop_assert!(*c < counts[dim] - 1);
                }
            }
        }

        #[test]
        fn vertex_round_trip(counts in prop::collection::vec(2usize..6, 1..5)) {
            let grid = GridEncoder::from_threshold_counts(&counts).unwrap();
            for vertex in 0..grid.vertex_count() {
                let coordinates = grid.decode_vertex(vertex);
                prop_assert_eq!(vertex, grid.encode_vertex(&coordinates));
            }
        }

        #[test]
        fn adjacency_is_symmetric(counts in prop::collection::vec(2usize..6, 1..5)) {
            let grid = GridEncoder::from_threshold_counts(&counts).unwrap();
            for state in IdStateRange::new(grid.state_count()) {
                for dim in 0..grid.dimensions() {
                    if let Some(higher) = grid.higher_state(state, dim) {
                        prop_assert_eq!(Some(state), grid.lower_state(higher, dim));
                        // Shared facet has the same vertices from both sides.
                        prop_assert_eq!(
                            grid.facet_vertices(state, dim, true),
                            grid.facet_vertices(higher, dim, false)
                        );
                    }
                    if let Some(lower) = grid.lower_state(state, dim) {
                        prop_assert_eq!(Some(state), grid.higher_state(lower, dim));
                    }
                }
            }
        }
    }
}
