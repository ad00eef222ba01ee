use std::hash::Hash;

/// Marker trait for anything that can be a state of a graph.
///
/// States are small `Copy` values; the grid encoding turns every discrete state into a
/// single integer.
pub trait State: Hash + Eq + Clone + Copy {}

/// A set of parameter valuations ("colors").
///
/// Nothing is assumed about the members of the set: they are typically uncountable, so
/// the set cannot be iterated. There is also no complement, because the complement depends
/// on the `unit` set. Use `unit.minus(x)` instead.
pub trait Set: Clone {
    fn union(&self, other: &Self) -> Self;
    fn intersect(&self, other: &Self) -> Self;
    fn minus(&self, other: &Self) -> Self;

    fn is_empty(&self) -> bool;
    fn is_subset(&self, other: &Self) -> bool;
}

/// Evolution of a parametrised system with discrete time: for a state, the operator
/// returns the possible next states, each with the colors for which the step is enabled.
pub trait EvolutionOperator {
    type State: State;
    type Params: Set;
    type Iterator: Iterator<Item = (Self::State, Self::Params)>;
    fn step(&self, current: Self::State) -> Self::Iterator;
}

/// An `EvolutionOperator` that can also follow its edges in the opposite direction.
///
/// Algorithms mixing past and future (such as CTL with past operators) can switch the
/// sense of time with `invert` instead of juggling `fwd` and `bwd`.
pub trait InvertibleEvolutionOperator: EvolutionOperator {
    type InvertedOperator: EvolutionOperator<State = Self::State, Params = Self::Params>;
    fn invert(&self) -> Self::InvertedOperator;
}

/// A parametrised graph with a finite state space, explorable in both directions.
pub trait Graph {
    type State: State;
    type Params: Set;
    type States: Iterator<Item = Self::State>;
    type FwdEdges: EvolutionOperator;
    type BwdEdges: EvolutionOperator;

    fn states(&self) -> Self::States;
    fn fwd(&self) -> Self::FwdEdges;
    fn bwd(&self) -> Self::BwdEdges;
}

pub trait InvertibleGraph: Graph {
    type FwdEdges: InvertibleEvolutionOperator;
    type BwdEdges: InvertibleEvolutionOperator;
}
