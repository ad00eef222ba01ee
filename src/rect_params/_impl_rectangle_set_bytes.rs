use crate::rect_params::{Rectangle, RectangleSet};
use crate::OdeError;

/// Binary form of a `RectangleSet`: a big-endian `i32` rectangle count followed by
/// `2 * dimensions` big-endian `f64` values per rectangle. The dimension is not stored.
impl RectangleSet {
    /// Number of bytes written by `write_bytes`.
    pub fn byte_size(&self, dimensions: usize) -> usize {
        4 + self.0.len() * 16 * dimensions
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let dimensions = self.0.first().map(|r| r.dimensions()).unwrap_or(0);
        let mut buffer = Vec::with_capacity(self.byte_size(dimensions));
        self.write_bytes(&mut buffer);
        buffer
    }

    /// Append the binary form of this set to `buffer`.
    pub fn write_bytes(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&(self.0.len() as i32).to_be_bytes());
        for rectangle in &self.0 {
            for value in rectangle.coordinates() {
                buffer.extend_from_slice(&value.to_be_bytes());
            }
        }
    }

    /// Read one set from the start of `buffer` and advance it past the read bytes.
    ///
    /// Empty rectangles are dropped and the result is minimized. `NaN` coordinates are
    /// rejected.
    pub fn read_bytes(buffer: &mut &[u8], dimensions: usize) -> Result<RectangleSet, OdeError> {
        let count = i32::from_be_bytes(take::<4>(buffer)?);
        let count = usize::try_from(count)
            .map_err(|_| OdeError::MalformedParams(format!("negative count {}", count)))?;
        let expected = count * 16 * dimensions;
        if buffer.len() < expected {
            return Err(OdeError::MalformedParams(format!(
                "{} rectangles need {} bytes, only {} available",
                count,
                expected,
                buffer.len()
            )));
        }
        let mut rectangles = Vec::with_capacity(count);
        for _ in 0..count {
            let mut coordinates = Vec::with_capacity(2 * dimensions);
            for _ in 0..(2 * dimensions) {
                let value = f64::from_be_bytes(take::<8>(buffer)?);
                if value.is_nan() {
                    return Err(OdeError::MalformedParams("NaN coordinate".to_string()));
                }
                coordinates.push(value);
            }
            rectangles.push(Rectangle::new(coordinates));
        }
        Ok(RectangleSet::from(rectangles))
    }

    /// Read a set that spans the whole `buffer`.
    pub fn from_bytes(buffer: &[u8], dimensions: usize) -> Result<RectangleSet, OdeError> {
        let mut rest = buffer;
        let set = RectangleSet::read_bytes(&mut rest, dimensions)?;
        if rest.is_empty() {
            Ok(set)
        } else {
            Err(OdeError::MalformedParams(format!(
                "{} trailing bytes",
                rest.len()
            )))
        }
    }
}

fn take<const N: usize>(buffer: &mut &[u8]) -> Result<[u8; N], OdeError> {
    if buffer.len() < N {
        return Err(OdeError::MalformedParams(format!(
            "expected {} bytes, found {}",
            N,
            buffer.len()
        )));
    }
    let (head, tail) = buffer.split_at(N);
    let mut result = [0u8; N];
    result.copy_from_slice(head);
    *buffer = tail;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::rect_params::{Rectangle, RectangleSet};
    use crate::OdeError;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_and_read_bytes() {
        let set = RectangleSet::from(vec![
            Rectangle::from_points(&[0.0, 0.0], &[1.0, 0.5]),
            Rectangle::from_points(&[2.0, 1.0], &[3.0, 1.5]),
        ]);
        let bytes = set.to_bytes();
        assert_eq!(set.byte_size(2), bytes.len());
        assert_eq!(&[0, 0, 0, 2], &bytes[..4]);
        assert_eq!(&1.0f64.to_be_bytes(), &bytes[12..20]);
        assert_eq!(set, RectangleSet::from_bytes(&bytes, 2).unwrap());

        let empty = RectangleSet::empty().to_bytes();
        assert_eq!(vec![0, 0, 0, 0], empty);
        assert_eq!(RectangleSet::empty(), RectangleSet::from_bytes(&empty, 3).unwrap());

        let point = RectangleSet::from_rectangle(Rectangle::point());
        assert_eq!(point, RectangleSet::from_bytes(&point.to_bytes(), 0).unwrap());
    }

    #[test]
    fn read_consecutive_sets() {
        let a = RectangleSet::from_rectangle(Rectangle::new(vec![0.0, 1.0]));
        let b = RectangleSet::from(vec![
            Rectangle::new(vec![2.0, 3.0]),
            Rectangle::new(vec![4.0, 5.0]),
        ]);
        let mut buffer = Vec::new();
        a.write_bytes(&mut buffer);
        b.write_bytes(&mut buffer);
        let mut rest = buffer.as_slice();
        assert_eq!(a, RectangleSet::read_bytes(&mut rest, 1).unwrap());
        assert_eq!(b, RectangleSet::read_bytes(&mut rest, 1).unwrap());
        assert!(rest.is_empty());
    }

    fn raw_bytes(count: i32, values: &[f64]) -> Vec<u8> {
        let mut buffer = count.to_be_bytes().to_vec();
        for value in values {
            buffer.extend_from_slice(&value.to_be_bytes());
        }
        buffer
    }

    #[test]
    fn read_sets_are_minimized() {
        let degenerate = RectangleSet::from_bytes(&raw_bytes(1, &[1.0, 1.0]), 1).unwrap();
        assert!(!degenerate.is_sat());
        assert_eq!(RectangleSet::empty(), degenerate);

        let adjacent = RectangleSet::from_bytes(&raw_bytes(2, &[0.0, 1.0, 1.0, 2.0]), 1).unwrap();
        assert_eq!(1, adjacent.len());
        assert_eq!(RectangleSet::from_rectangle(Rectangle::new(vec![0.0, 2.0])), adjacent);

        let points = RectangleSet::from_bytes(&raw_bytes(3, &[]), 0).unwrap();
        assert_eq!(RectangleSet::from_rectangle(Rectangle::point()), points);
        assert_eq!(1, points.len());
    }

    #[test]
    fn malformed_bytes() {
        let bytes = RectangleSet::from_rectangle(Rectangle::new(vec![0.0, 1.0])).to_bytes();
        assert!(matches!(
            RectangleSet::from_bytes(&bytes[..10], 1),
            Err(OdeError::MalformedParams(_))
        ));
        assert!(matches!(
            RectangleSet::from_bytes(&bytes, 0),
            Err(OdeError::MalformedParams(_))
        ));
        assert!(RectangleSet::from_bytes(&(-1i32).to_be_bytes(), 1).is_err());
        assert!(RectangleSet::from_bytes(&[0, 0], 1).is_err());
        assert!(matches!(
            RectangleSet::from_bytes(&raw_bytes(1, &[f64::NAN, 1.0]), 1),
            Err(OdeError::MalformedParams(_))
        ));
    }
}
