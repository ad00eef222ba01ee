use crate::rect_params::{Rectangle, MERGE_EPSILON};
use std::fmt::{Display, Error, Formatter};

impl Rectangle {
    /// Create a rectangle from interleaved interval bounds `[low_0, high_0, low_1, ...]`.
    pub fn new(coordinates: Vec<f64>) -> Rectangle {
        debug_assert!(coordinates.len() % 2 == 0);
        Rectangle(coordinates)
    }

    /// Create a rectangle from its lowest and highest corner.
    pub fn from_points(low: &[f64], high: &[f64]) -> Rectangle {
        debug_assert_eq!(low.len(), high.len());
        Rectangle(low.iter().zip(high).flat_map(|(l, h)| [*l, *h]).collect())
    }

    /// The zero-dimensional rectangle, i.e. the only valuation of a model without parameters.
    pub fn point() -> Rectangle {
        Rectangle(Vec::new())
    }

    pub fn dimensions(&self) -> usize {
        self.0.len() / 2
    }

    pub fn low(&self, dim: usize) -> f64 {
        self.0[2 * dim]
    }

    pub fn high(&self, dim: usize) -> f64 {
        self.0[2 * dim + 1]
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.0
    }

    pub fn as_intervals(&self) -> Vec<(f64, f64)> {
        self.0.chunks_exact(2).map(|c| (c[0], c[1])).collect()
    }

    /// A rectangle is empty when it is degenerate in at least one dimension.
    pub fn is_empty(&self) -> bool {
        self.0.chunks_exact(2).any(|c| c[0] >= c[1])
    }

    /// True if the (closed) rectangle contains the given point.
    pub fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .zip(self.0.chunks_exact(2))
            .all(|(x, c)| c[0] <= *x && *x <= c[1])
    }

    /// True if `other` lies completely inside this rectangle.
    pub fn encloses(&self, other: &Rectangle) -> bool {
        self.0
            .chunks_exact(2)
            .zip(other.0.chunks_exact(2))
            .all(|(a, b)| a[0] <= b[0] && a[1] >= b[1])
    }

    /// Intersection of two rectangles, or `None` if it is empty.
    pub fn intersect(&self, other: &Rectangle) -> Option<Rectangle> {
        let mut result = Vec::with_capacity(self.0.len());
        for (a, b) in self.0.chunks_exact(2).zip(other.0.chunks_exact(2)) {
            let low = a[0].max(b[0]);
            let high = a[1].min(b[1]);
            if low >= high {
                return None;
            }
            result.push(low);
            result.push(high);
        }
        Some(Rectangle(result))
    }

    /// Merge two rectangles into their bounding box, provided that the bounding box covers
    /// exactly their union.
    ///
    /// That is the case when one rectangle encloses the other, or when they are equal in all
    /// dimensions but one, where they overlap or touch.
    pub fn merge(&self, other: &Rectangle) -> Option<Rectangle> {
        if self.encloses(other) {
            return Some(self.clone());
        }
        if other.encloses(self) {
            return Some(other.clone());
        }
        let mut merge_dimension = None;
        for dim in 0..self.dimensions() {
            let (l1, h1) = (self.low(dim), self.high(dim));
            let (l2, h2) = (other.low(dim), other.high(dim));
            if l1 == l2 && h1 == h2 {
                continue;
            }
            if h2 + MERGE_EPSILON < l1 || h1 + MERGE_EPSILON < l2 {
                return None;
            }
            if merge_dimension.is_some() {
                return None;
            }
            merge_dimension = Some(dim);
        }
        // Equal rectangles enclose each other, so a merge dimension always exists here.
        let dim = merge_dimension?;
        let mut result = self.0.clone();
        result[2 * dim] = self.low(dim).min(other.low(dim));
        result[2 * dim + 1] = self.high(dim).max(other.high(dim));
        Some(Rectangle(result))
    }

    /// Rectangles that together cover `self` without `other`.
    ///
    /// The difference is computed dimension by dimension: the parts of `self` below and
    /// above `other` are cut off as slabs and the remaining core shrinks accordingly. The
    /// slabs do not overlap, but the result is not minimized.
    pub fn subtract(&self, other: &Rectangle) -> Vec<Rectangle> {
        let mut working = self.0.clone();
        let mut result = Vec::new();
        for dim in 0..self.dimensions() {
            let (l1, h1) = (self.low(dim), self.high(dim));
            let (l2, h2) = (other.low(dim), other.high(dim));
            if l1 >= l2 && h1 <= h2 {
                // Fully covered in this dimension.
                continue;
            }
            if h2 <= l1 || h1 <= l2 {
                return vec![self.clone()];
            }
            if l1 < l2 {
                let mut slab = working.clone();
                slab[2 * dim] = l1;
                slab[2 * dim + 1] = l2;
                result.push(Rectangle(slab));
                working[2 * dim] = l2;
            }
            if h1 > h2 {
                let mut slab = working.clone();
                slab[2 * dim] = h2;
                slab[2 * dim + 1] = h1;
                result.push(Rectangle(slab));
                working[2 * dim + 1] = h2;
            }
        }
        result
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.0.is_empty() {
            return write!(f, "[]");
        }
        for (i, (low, high)) in self.as_intervals().into_iter().enumerate() {
            if i > 0 {
                write!(f, "x")?;
            }
            write!(f, "[{}, {}]", low, high)?;
        }
        Ok(())
    }
}
