//! Indices into the 68-point model

use std::ops::Range;

/// Left jaw edge
pub const JAW_LEFT: usize = 0;
/// Chin
pub const CHIN: usize = 8;
/// Right jaw edge
pub const JAW_RIGHT: usize = 16;
/// Top of the nose bridge (face-centre reference for jaw symmetry)
pub const NOSE_BRIDGE: usize = 27;
/// Nose tip (face centre for tilt)
pub const NOSE_TIP: usize = 30;

/// Left eye contour, 6 points
pub const LEFT_EYE: Range<usize> = 36..42;
/// Right eye contour, 6 points
pub const RIGHT_EYE: Range<usize> = 42..48;
/// Outer and inner lip contours, 20 points
pub const MOUTH: Range<usize> = 48..68;
