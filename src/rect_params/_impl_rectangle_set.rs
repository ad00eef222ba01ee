use crate::biodivine_std::traits::Set;
use crate::rect_params::{Rectangle, RectangleSet};
use std::fmt::{Display, Error, Formatter};

impl RectangleSet {
    pub fn empty() -> RectangleSet {
        RectangleSet(Vec::new())
    }

    /// A set consisting of a single rectangle (empty if the rectangle is empty).
    pub fn from_rectangle(rectangle: Rectangle) -> RectangleSet {
        RectangleSet::from(vec![rectangle])
    }

    /// True if the set contains at least one valuation.
    pub fn is_sat(&self) -> bool {
        !self.0.is_empty()
    }

    /// Number of stored rectangles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rectangle> {
        self.0.iter()
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.0
    }

    /// True if some rectangle of the set contains the given point.
    pub fn contains(&self, point: &[f64]) -> bool {
        self.0.iter().any(|r| r.contains(point))
    }

    /// Merge rectangles of this set until no pair can be merged.
    ///
    /// The operation is idempotent. Every merge removes one rectangle, so the loop ends
    /// after at most `len` successful merges.
    pub fn minimize(&mut self) {
        'search: loop {
            for i in 0..self.0.len() {
                for j in (i + 1)..self.0.len() {
                    if let Some(merged) = self.0[i].merge(&self.0[j]) {
                        self.0[i] = merged;
                        self.0.swap_remove(j);
                        continue 'search;
                    }
                }
            }
            return;
        }
    }

    /// Complement of this set relative to the given `unit` rectangle.
    pub fn complement(&self, unit: &Rectangle) -> RectangleSet {
        RectangleSet::from_rectangle(unit.clone()).minus(self)
    }
}

impl From<Vec<Rectangle>> for RectangleSet {
    /// Empty rectangles are dropped and the result is minimized.
    fn from(rectangles: Vec<Rectangle>) -> Self {
        let mut set = RectangleSet(rectangles.into_iter().filter(|r| !r.is_empty()).collect());
        set.minimize();
        set
    }
}

impl Set for RectangleSet {
    fn union(&self, other: &Self) -> Self {
        if self.0.is_empty() {
            return other.clone();
        }
        if other.0.is_empty() {
            return self.clone();
        }
        let mut result = self.0.clone();
        result.extend_from_slice(&other.0);
        let mut result = RectangleSet(result);
        result.minimize();
        result
    }

    fn intersect(&self, other: &Self) -> Self {
        let mut result = Vec::new();
        for a in &self.0 {
            for b in &other.0 {
                if let Some(r) = a.intersect(b) {
                    result.push(r);
                }
            }
        }
        let mut result = RectangleSet(result);
        result.minimize();
        result
    }

    fn minus(&self, other: &Self) -> Self {
        let mut result = self.0.clone();
        for cut in &other.0 {
            if result.is_empty() {
                break;
            }
            result = result.iter().flat_map(|r| r.subtract(cut)).collect();
        }
        let mut result = RectangleSet(result);
        result.minimize();
        result
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_subset(&self, other: &Self) -> bool {
        self.minus(other).is_empty()
    }
}

impl PartialEq for RectangleSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().all(|r| other.0.contains(r))
            && other.0.iter().all(|r| self.0.contains(r))
    }
}

impl Display for RectangleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{{")?;
        for (i, rectangle) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", rectangle)?;
        }
        write!(f, "}}")
    }
}

impl<'a> IntoIterator for &'a RectangleSet {
    type Item = &'a Rectangle;
    type IntoIter = std::slice::Iter<'a, Rectangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::biodivine_std::traits::Set;
    use crate::rect_params::{Rectangle, RectangleSet};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn r(low: f64, high: f64) -> Rectangle {
        Rectangle::new(vec![low, high])
    }

    fn set(rectangles: &[(f64, f64)]) -> RectangleSet {
        RectangleSet::from(rectangles.iter().map(|(l, h)| r(*l, *h)).collect::<Vec<_>>())
    }

    #[test]
    fn emptiness() {
        assert!(!RectangleSet::empty().is_sat());
        assert!(RectangleSet::from_rectangle(r(0.0, 1.0)).is_sat());
        assert!(RectangleSet::from_rectangle(r(1.0, 1.0)).is_empty());
        assert!(RectangleSet::from_rectangle(Rectangle::point()).is_sat());
    }

    #[test]
    fn and_of_sets() {
        let c1 = set(&[(0.0, 1.0)]);
        let c2 = set(&[(1.0, 2.5)]);
        let c3 = set(&[(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(c1, c1.intersect(&c1));
        assert!(c1.intersect(&c2).is_empty());
        assert!(c2.intersect(&c1).is_empty());
        assert_eq!(c1, c1.intersect(&c3));
        assert_eq!(c1, c3.intersect(&c1));
        assert_eq!(set(&[(2.0, 2.5)]), c2.intersect(&c3));
        assert_eq!(set(&[(2.0, 2.5)]), c3.intersect(&c2));
    }

    #[test]
    fn or_of_sets() {
        let c1 = set(&[(0.0, 1.0)]);
        let c2 = set(&[(1.0, 2.5)]);
        let c3 = set(&[(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(c1, c1.union(&c1));
        assert_eq!(set(&[(0.0, 2.5)]), c1.union(&c2));
        assert_eq!(set(&[(0.0, 3.0)]), c2.union(&c3));
        assert_eq!(c3, c1.union(&c3));
        assert_eq!(c3, RectangleSet::empty().union(&c3));
    }

    #[test]
    fn not_of_sets() {
        let unit = r(0.0, 3.0);
        let c1 = set(&[(0.0, 1.0)]);
        let c3 = set(&[(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(set(&[(1.0, 3.0)]), c1.complement(&unit));
        assert_eq!(set(&[(1.0, 2.0)]), c3.complement(&unit));
        assert_eq!(set(&[(0.0, 3.0)]), RectangleSet::empty().complement(&unit));
        assert!(set(&[(0.0, 3.0)]).complement(&unit).is_empty());
        assert!(c1.is_subset(&c3));
        assert!(!c3.is_subset(&c1));
    }

    #[test]
    fn minimize_merges_to_fixed_point() {
        // Pieces of [0,2]x[0,2] that only merge in a specific order.
        let mut pieces = RectangleSet(vec![
            Rectangle::from_points(&[0.0, 0.0], &[1.0, 1.0]),
            Rectangle::from_points(&[1.0, 1.0], &[2.0, 2.0]),
            Rectangle::from_points(&[1.0, 0.0], &[2.0, 1.0]),
            Rectangle::from_points(&[0.0, 1.0], &[1.0, 2.0]),
        ]);
        pieces.minimize();
        assert_eq!(
            RectangleSet(vec![Rectangle::from_points(&[0.0, 0.0], &[2.0, 2.0])]),
            pieces
        );
        pieces.minimize();
        assert_eq!(1, pieces.len());
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = RectangleSet(vec![r(0.0, 1.0), r(2.0, 3.0)]);
        let b = RectangleSet(vec![r(2.0, 3.0), r(0.0, 1.0)]);
        assert_eq!(a, b);
        assert_ne!(a, set(&[(0.0, 1.0)]));
        assert_eq!("{[0, 1], [2, 3]}", a.to_string());
    }

    const SIDE: u8 = 6;

    fn rectangle() -> impl Strategy<Value = Rectangle> {
        prop::collection::vec((0u8..SIDE - 1, 1u8..4), 2).prop_map(|axes| {
            let coordinates = axes
                .iter()
                .flat_map(|(low, len)| [f64::from(*low), f64::from((low + len).min(SIDE))])
                .collect();
            Rectangle::new(coordinates)
        })
    }

    fn rectangle_set() -> impl Strategy<Value = RectangleSet> {
        prop::collection::vec(rectangle(), 0..4).prop_map(RectangleSet::from)
    }

    fn unit() -> Rectangle {
        let side = f64::from(SIDE);
        Rectangle::from_points(&[0.0, 0.0], &[side, side])
    }

    /// The two sets describe the same valuations, regardless of their decomposition.
    fn same_valuations(a: &RectangleSet, b: &RectangleSet) -> bool {
        a.minus(b).is_empty() && b.minus(a).is_empty()
    }

    proptest! {
        #[test]
        fn intersect_laws(a in rectangle_set(), b in rectangle_set()) {
            prop_assert!(same_valuations(&a.intersect(&b), &b.intersect(&a)));
            prop_assert!(same_valuations(&a.intersect(&a), &a));
            prop_assert!(a.intersect(&b).is_subset(&a));
        }

        #[test]
        fn union_laws(a in rectangle_set(), b in rectangle_set()) {
            prop_assert!(same_valuations(&a.union(&b), &b.union(&a)));
            prop_assert!(same_valuations(&a.union(&a), &a));
            prop_assert!(a.is_subset(&a.union(&b)));
        }

        #[test]
        fn distributivity(a in rectangle_set(), b in rectangle_set(), c in rectangle_set()) {
            let left = a.intersect(&b.union(&c));
            let right = a.intersect(&b).union(&a.intersect(&c));
            prop_assert!(same_valuations(&left, &right));
        }

        #[test]
        fn double_complement(a in rectangle_set()) {
            let unit = unit();
            prop_assert!(same_valuations(&a.complement(&unit).complement(&unit), &a));
            prop_assert!(a.intersect(&a.complement(&unit)).is_empty());
        }

        #[test]
        fn subtract_self_is_empty(a in rectangle()) {
            prop_assert!(a.subtract(&a).is_empty());
        }

        #[test]
        fn subtract_pieces_are_disjoint(a in rectangle(), b in rectangle()) {
            let pieces = a.subtract(&b);
            for (i, x) in pieces.iter().enumerate() {
                prop_assert!(x.intersect(&b).is_none());
                prop_assert!(a.encloses(x));
                for y in &pieces[(i + 1)..] {
                    prop_assert!(x.intersect(y).is_none());
                }
            }
        }

        #[test]
        fn minimize_is_idempotent(a in rectangle_set()) {
            let mut again = a.clone();
            again.minimize();
            prop_assert_eq!(a, again);
        }
    }
}
