use crate::biodivine_std::traits::State;
use std::fmt::{Display, Error, Formatter};

/// A state identified by its `usize` index in the mixed-radix grid encoding.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IdState(usize);

/// Iterator over a contiguous range of `IdState`s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IdStateRange {
    next: usize,
    remaining: usize,
}

impl State for IdState {}

impl From<usize> for IdState {
    fn from(val: usize) -> Self {
        IdState(val)
    }
}

impl From<IdState> for usize {
    fn from(state: IdState) -> Self {
        state.0
    }
}

impl Display for IdState {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "State({})", self.0)
    }
}

impl IdStateRange {
    /// All states `0..state_count`.
    pub fn new(state_count: usize) -> IdStateRange {
        IdStateRange::between(0, state_count)
    }

    /// States `first..end`. Empty when `end <= first`.
    pub fn between(first: usize, end: usize) -> IdStateRange {
        IdStateRange {
            next: first,
            remaining: end.saturating_sub(first),
        }
    }
}

impl Iterator for IdStateRange {
    type Item = IdState;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let result = self.next;
            self.remaining -= 1;
            self.next += 1;
            Some(IdState::from(result))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IdStateRange {}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::structs::{IdState, IdStateRange};

    #[test]
    fn id_state_conversion() {
        let state = IdState::from(12);
        assert_eq!(12usize, state.into());
        assert_eq!("State(12)", state.to_string());
    }

    #[test]
    fn state_range_iterator() {
        let mut iter = IdStateRange::new(3);
        assert_eq!(3, iter.len());
        assert_eq!(Some(IdState::from(0)), iter.next());
        assert_eq!(Some(IdState::from(1)), iter.next());
        assert_eq!(Some(IdState::from(2)), iter.next());
        assert_eq!(None, iter.next());
        assert_eq!(None, iter.next());

        let slice: Vec<IdState> = IdStateRange::between(4, 6).collect();
        assert_eq!(vec![IdState::from(4), IdState::from(5)], slice);
        assert_eq!(0, IdStateRange::between(6, 4).count());
    }
}
