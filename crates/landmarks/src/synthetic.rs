//! Parametric synthetic faces
//!
//! Places all 68 landmarks so that each symptom ratio is controlled by one
//! parameter. With the defaults: eye aspect ratio 0.3, mouth closed, lips
//! 6 units thick on a 50 unit wide mouth, chin straight below the nose tip and
//! a symmetric jaw.

use crate::{LandmarkError, LandmarkSet, Point, LANDMARK_COUNT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticFace {
    /// Eye aspect ratio of both eyes
    pub eye_aspect: f64,
    /// Gap between the inner lip contours
    pub mouth_gap: f64,
    /// Distance between outer and inner contour of each lip
    pub lip_thickness: f64,
    /// Distance between the mouth corners
    pub mouth_width: f64,
    /// Angle of the chin away from straight below the nose tip
    pub tilt_degrees: f64,
    /// Horizontal offset of the nose bridge
    pub bridge_shift: f64,
}

impl Default for SyntheticFace {
    fn default() -> Self {
        Self {
            eye_aspect: 0.3,
            mouth_gap: 0.0,
            lip_thickness: 6.0,
            mouth_width: 50.0,
            tilt_degrees: 0.0,
            bridge_shift: 0.0,
        }
    }
}

const EYE_HALF_WIDTH: f64 = 15.0;
const EYE_Y: f64 = -10.0;
const MOUTH_Y: f64 = 50.0;
const NOSE_TIP: Point = Point::new(0.0, 20.0);
const CHIN_DISTANCE: f64 = 60.0;

impl SyntheticFace {
    pub fn with_eye_aspect(mut self, eye_aspect: f64) -> Self {
        self.eye_aspect = eye_aspect;
        self
    }

    pub fn with_mouth_gap(mut self, mouth_gap: f64) -> Self {
        self.mouth_gap = mouth_gap;
        self
    }

    pub fn with_lip_thickness(mut self, lip_thickness: f64) -> Self {
        self.lip_thickness = lip_thickness;
        self
    }

    pub fn with_mouth_width(mut self, mouth_width: f64) -> Self {
        self.mouth_width = mouth_width;
        self
    }

    pub fn with_tilt(mut self, tilt_degrees: f64) -> Self {
        self.tilt_degrees = tilt_degrees;
        self
    }

    pub fn with_bridge_shift(mut self, bridge_shift: f64) -> Self {
        self.bridge_shift = bridge_shift;
        self
    }

    pub fn build(&self) -> Result<LandmarkSet, LandmarkError> {
        let mut points = vec![Point::default(); LANDMARK_COUNT];

        // Jaw arc 0..17, chin overridden below
        for (i, slot) in points.iter_mut().enumerate().take(17) {
            let x = -60.0 + 7.5 * i as f64;
            *slot = Point::new(x, 80.0 * (1.0 - (x / 60.0).powi(2)));
        }
        let tilt = self.tilt_degrees.to_radians();
        points[8] = Point::new(
            NOSE_TIP.x + CHIN_DISTANCE * tilt.sin(),
            NOSE_TIP.y + CHIN_DISTANCE * tilt.cos(),
        );

        // Brows 17..27
        for (i, slot) in points.iter_mut().enumerate().take(27).skip(17) {
            *slot = Point::new(-45.0 + 10.0 * (i - 17) as f64, -40.0);
        }

        // Nose bridge 27..31, nostrils 31..36
        points[27] = Point::new(self.bridge_shift, -20.0);
        points[28] = Point::new(0.0, -7.0);
        points[29] = Point::new(0.0, 6.0);
        points[30] = NOSE_TIP;
        for (i, slot) in points.iter_mut().enumerate().take(36).skip(31) {
            *slot = Point::new(-10.0 + 5.0 * (i - 31) as f64, 28.0);
        }

        self.place_eye(&mut points[36..42], -30.0);
        self.place_eye(&mut points[42..48], 30.0);
        self.place_mouth(&mut points[48..68]);

        LandmarkSet::new(points)
    }

    // EAR = (2h + 2h) / (2 * 2 * half_width) = h / half_width
    fn place_eye(&self, eye: &mut [Point], center_x: f64) {
        let h = self.eye_aspect * EYE_HALF_WIDTH;
        eye[0] = Point::new(center_x - EYE_HALF_WIDTH, EYE_Y);
        eye[1] = Point::new(center_x - 5.0, EYE_Y - h);
        eye[2] = Point::new(center_x + 5.0, EYE_Y - h);
        eye[3] = Point::new(center_x + EYE_HALF_WIDTH, EYE_Y);
        eye[4] = Point::new(center_x + 5.0, EYE_Y + h);
        eye[5] = Point::new(center_x - 5.0, EYE_Y + h);
    }

    fn place_mouth(&self, mouth: &mut [Point]) {
        let half_gap = self.mouth_gap / 2.0;
        let outer = half_gap + self.lip_thickness;
        let half_width = self.mouth_width / 2.0;

        mouth[0] = Point::new(-half_width, MOUTH_Y);
        mouth[6] = Point::new(half_width, MOUTH_Y);
        // Outer upper, left to right
        for (k, x) in [-16.0, -8.0, 0.0, 8.0, 16.0].into_iter().enumerate() {
            mouth[1 + k] = Point::new(x, MOUTH_Y - outer);
        }
        // Outer lower, right to left
        for (k, x) in [16.0, 8.0, 0.0, -8.0, -16.0].into_iter().enumerate() {
            mouth[7 + k] = Point::new(x, MOUTH_Y + outer);
        }
        mouth[12] = Point::new(-half_width + 5.0, MOUTH_Y);
        mouth[16] = Point::new(half_width - 5.0, MOUTH_Y);
        for (k, x) in [-8.0, 0.0, 8.0].into_iter().enumerate() {
            mouth[13 + k] = Point::new(x, MOUTH_Y - half_gap);
        }
        for (k, x) in [8.0, 0.0, -8.0].into_iter().enumerate() {
            mouth[17 + k] = Point::new(x, MOUTH_Y + half_gap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index;

    #[test]
    fn test_default_face_is_well_formed() {
        let face = SyntheticFace::default().build().unwrap();
        assert_eq!(face.len(), LANDMARK_COUNT);
        assert_eq!(face.point(index::CHIN), Some(Point::new(0.0, 80.0)));
    }

    #[test]
    fn test_non_finite_parameter_is_rejected() {
        assert!(SyntheticFace::default().with_eye_aspect(f64::NAN).build().is_err());
    }
}
