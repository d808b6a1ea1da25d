//! Ratio Geometry
//!
//! Pure distance and angle computations over landmark slices. Each function
//! validates its input length and every denominator it divides by.

use std::ops::Range;

use landmarks::Point;

use crate::{RatioError, SymptomKind, MIN_DENOMINATOR};

/// Upper lip, outer row then inner row, as offsets into the 20-point mouth
pub const UPPER_LIP: [usize; 6] = [2, 3, 4, 13, 14, 15];
/// Lower lip, outer row then inner row, as offsets into the 20-point mouth
pub const LOWER_LIP: [usize; 6] = [8, 9, 10, 17, 18, 19];

const EYE_POINTS: usize = 6;
const MOUTH_POINTS: usize = 20;

pub(crate) fn at(points: &[Point], index: usize) -> Result<Point, RatioError> {
    points
        .get(index)
        .copied()
        .ok_or(RatioError::MalformedLandmarks { index, len: points.len() })
}

/// Contiguous run of points; reports the last index when it is missing
pub(crate) fn span(points: &[Point], range: Range<usize>) -> Result<&[Point], RatioError> {
    let last = range.end.saturating_sub(1);
    points
        .get(range)
        .ok_or(RatioError::MalformedLandmarks { index: last, len: points.len() })
}

fn require_len(points: &[Point], len: usize) -> Result<(), RatioError> {
    if points.len() < len {
        return Err(RatioError::MalformedLandmarks { index: len - 1, len: points.len() });
    }
    Ok(())
}

fn checked_div(numerator: f64, denominator: f64, kind: SymptomKind) -> Result<f64, RatioError> {
    if !denominator.is_finite() || denominator.abs() < MIN_DENOMINATOR {
        return Err(RatioError::DegenerateGeometry { kind });
    }
    finite(numerator / denominator, kind)
}

fn finite(value: f64, kind: SymptomKind) -> Result<f64, RatioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatioError::DegenerateGeometry { kind })
    }
}

/// Eye aspect ratio of one eye.
///
/// Points in order: outer corner, two upper lid points, inner corner, two
/// lower lid points. `(|p1 p5| + |p2 p4|) / (2 |p0 p3|)`
pub fn eye_aspect_ratio(eye: &[Point]) -> Result<f64, RatioError> {
    require_len(eye, EYE_POINTS)?;
    let a = at(eye, 1)?.distance(&at(eye, 5)?);
    let b = at(eye, 2)?.distance(&at(eye, 4)?);
    let c = at(eye, 0)?.distance(&at(eye, 3)?);
    checked_div(a + b, 2.0 * c, SymptomKind::Blink)
}

/// Mean eye aspect ratio of both eyes
pub fn mean_eye_aspect_ratio(
    left_eye: &[Point],
    right_eye: &[Point],
) -> Result<f64, RatioError> {
    let left = eye_aspect_ratio(left_eye)?;
    let right = eye_aspect_ratio(right_eye)?;
    finite((left + right) / 2.0, SymptomKind::Blink)
}

fn pick(mouth: &[Point], offsets: [usize; 6]) -> Result<[Point; 6], RatioError> {
    let mut lip = [Point::default(); 6];
    for (slot, offset) in lip.iter_mut().zip(offsets) {
        *slot = at(mouth, offset)?;
    }
    Ok(lip)
}

/// Mean distance between the outer and inner row of one lip
pub fn lip_thickness(lip: &[Point; 6]) -> f64 {
    (0..3).map(|i| lip[i].distance(&lip[i + 3])).sum::<f64>() / 3.0
}

/// Mean gap between the inner rows of both lips.
///
/// The lower inner row runs right to left, so offsets are mirrored.
pub fn mouth_opening(upper: &[Point; 6], lower: &[Point; 6]) -> f64 {
    [(3, 5), (4, 4), (5, 3)]
        .iter()
        .map(|&(u, l)| upper[u].distance(&lower[l]))
        .sum::<f64>()
        / 3.0
}

/// Mouth opening over the thinner lip's thickness
pub fn mouth_ratio(mouth: &[Point]) -> Result<f64, RatioError> {
    require_len(mouth, MOUTH_POINTS)?;
    let upper = pick(mouth, UPPER_LIP)?;
    let lower = pick(mouth, LOWER_LIP)?;
    let thinnest = lip_thickness(&upper).min(lip_thickness(&lower));
    checked_div(mouth_opening(&upper, &lower), thinnest, SymptomKind::OpenMouth)
}

/// Combined lip thickness at the centre over the corner-to-corner width
pub fn chewing_ratio(mouth: &[Point]) -> Result<f64, RatioError> {
    require_len(mouth, MOUTH_POINTS)?;
    let width = at(mouth, 0)?.distance(&at(mouth, 6)?);
    let upper = at(mouth, 3)?.distance(&at(mouth, 14)?);
    let lower = at(mouth, 9)?.distance(&at(mouth, 18)?);
    checked_div(upper + lower, width, SymptomKind::Chewing)
}

/// Angle in degrees between `chin - face_center` and straight down (0, 1)
pub fn jaw_angle(face_center: Point, chin: Point) -> Result<f64, RatioError> {
    let chin_vector = chin.sub(&face_center);
    let vertical = chin_vector.dot(&Point::new(0.0, 1.0));
    let cos = checked_div(vertical, chin_vector.norm(), SymptomKind::HeadTilt)?;
    // Rounding can push |cos| past 1
    finite(cos.clamp(-1.0, 1.0).acos().to_degrees(), SymptomKind::HeadTilt)
}

/// Shorter over longer jaw-edge distance to the face centre, in (0, 1]
pub fn nodding_ratio(
    left_jaw: Point,
    right_jaw: Point,
    face_center: Point,
) -> Result<f64, RatioError> {
    let left = left_jaw.distance(&face_center);
    let right = right_jaw.distance(&face_center);
    let shorter = left.min(right);
    if shorter < MIN_DENOMINATOR {
        return Err(RatioError::DegenerateGeometry { kind: SymptomKind::Nodding });
    }
    checked_div(shorter, left.max(right), SymptomKind::Nodding)
}
