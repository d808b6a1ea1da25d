//! Per-face landmark set

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{LandmarkError, Point, LANDMARK_COUNT};

/// The 68 landmarks of one detected face in one frame.
///
/// Always holds exactly [`LANDMARK_COUNT`] finite points. A frame without a
/// face has no `LandmarkSet` at all rather than a zero-filled one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    /// Build a set, rejecting the wrong point count or non-finite coordinates
    pub fn new(points: Vec<Point>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongPointCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(LandmarkError::NonFinite { index, x: p.x, y: p.y });
        }
        Ok(Self { points })
    }

    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, LandmarkError> {
        Self::new(pairs.iter().copied().map(Point::from).collect())
    }

    /// Point at `index`, `None` when out of range
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Contiguous range of points, `None` when any index is out of range
    pub fn slice(&self, range: Range<usize>) -> Option<&[Point]> {
        self.points.get(range)
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace a single point, keeping the set well-formed
    pub fn with_point(mut self, index: usize, point: Point) -> Result<Self, LandmarkError> {
        if !point.is_finite() {
            return Err(LandmarkError::NonFinite { index, x: point.x, y: point.y });
        }
        match self.points.get_mut(index) {
            Some(slot) => *slot = point,
            None => return Err(LandmarkError::IndexOutOfRange { index }),
        }
        Ok(self)
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl TryFrom<Vec<[f64; 2]>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(pairs: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(pairs.into_iter().map(Point::from).collect())
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

impl AsRef<[Point]> for LandmarkSet {
    fn as_ref(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index;

    fn grid() -> Vec<Point> {
        (0..LANDMARK_COUNT)
            .map(|i| Point::new(i as f64, (i * 2) as f64))
            .collect()
    }

    #[test]
    fn test_accepts_68_points() {
        let set = LandmarkSet::new(grid()).unwrap();
        assert_eq!(set.len(), LANDMARK_COUNT);
        assert_eq!(set.point(index::CHIN), Some(Point::new(8.0, 16.0)));
        assert_eq!(set.slice(index::MOUTH).map(|s| s.len()), Some(20));
    }

    #[test]
    fn test_from_pairs() {
        let pairs: Vec<(f64, f64)> = grid().iter().map(|p| (p.x, p.y)).collect();
        let set = LandmarkSet::from_pairs(&pairs).unwrap();
        assert_eq!(set.as_slice(), grid().as_slice());
        assert_eq!(
            LandmarkSet::from_pairs(&pairs[..10]),
            Err(LandmarkError::WrongPointCount { expected: 68, actual: 10 })
        );
    }

    #[test]
    fn test_rejects_wrong_count() {
        let mut points = grid();
        points.pop();
        assert_eq!(
            LandmarkSet::new(points),
            Err(LandmarkError::WrongPointCount { expected: 68, actual: 67 })
        );
        assert!(LandmarkSet::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut points = grid();
        points[40] = Point::new(f64::NAN, 1.0);
        assert!(matches!(
            LandmarkSet::new(points),
            Err(LandmarkError::NonFinite { index: 40, .. })
        ));
    }

    #[test]
    fn test_out_of_range_access() {
        let set = LandmarkSet::new(grid()).unwrap();
        assert_eq!(set.point(68), None);
        assert!(set.slice(60..70).is_none());
    }

    #[test]
    fn test_with_point() {
        let set = LandmarkSet::new(grid()).unwrap();
        let set = set.with_point(0, Point::new(-1.0, -1.0)).unwrap();
        assert_eq!(set.point(0), Some(Point::new(-1.0, -1.0)));
        assert_eq!(
            set.clone().with_point(99, Point::default()),
            Err(LandmarkError::IndexOutOfRange { index: 99 })
        );
        assert!(set.with_point(1, Point::new(f64::INFINITY, 0.0)).is_err());
    }

    #[test]
    fn test_deserialize_validates_length() {
        let json = serde_json::to_string(&grid()).unwrap();
        let set: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.as_slice(), grid().as_slice());

        let short: Result<LandmarkSet, _> = serde_json::from_str("[[0.0, 0.0], [1.0, 1.0]]");
        assert!(short.is_err());
    }
}
