use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Aircraft attitude
// ---------------------------------------------------------------------------

/// Aircraft attitude in degrees (right-handed, yaw-pitch-roll sequence).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f64,   // deg, about z
    pub pitch: f64, // deg, about y
    pub roll: f64,  // deg, about x
}

impl Orientation {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Composite rotation `Y · P · R` (aircraft → inertial).
    pub fn aircraft_to_inertial(&self) -> Matrix3<f64> {
        yaw_matrix(self.yaw) * pitch_matrix(self.pitch) * roll_matrix(self.roll)
    }

    /// Composite rotation `Rᵗ · Pᵗ · Yᵗ` (inertial → aircraft).
    pub fn inertial_to_aircraft(&self) -> Matrix3<f64> {
        roll_matrix(self.roll).transpose()
            * pitch_matrix(self.pitch).transpose()
            * yaw_matrix(self.yaw).transpose()
    }
}

/// Which frame the input vector is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameDirection {
    #[default]
    InertialToAircraft,
    AircraftToInertial,
}

impl FrameDirection {
    /// Map the "input is in aircraft frame" flag onto a direction.
    pub fn from_aircraft_input(aircraft_frame_input: bool) -> Self {
        if aircraft_frame_input {
            FrameDirection::AircraftToInertial
        } else {
            FrameDirection::InertialToAircraft
        }
    }
}

// ---------------------------------------------------------------------------
// Elementary rotations
// ---------------------------------------------------------------------------

/// Rotation about x by `deg` degrees.
pub fn roll_matrix(deg: f64) -> Matrix3<f64> {
    let (s, c) = deg.to_radians().sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, c, -s,
        0.0, s, c,
    )
}

/// Rotation about y by `deg` degrees.
pub fn pitch_matrix(deg: f64) -> Matrix3<f64> {
    let (s, c) = deg.to_radians().sin_cos();
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Rotation about z by `deg` degrees.
pub fn yaw_matrix(deg: f64) -> Matrix3<f64> {
    let (s, c) = deg.to_radians().sin_cos();
    Matrix3::new(
        c, -s, 0.0,
        s, c, 0.0,
        0.0, 0.0, 1.0,
    )
}

// ---------------------------------------------------------------------------
// Vector transforms
// ---------------------------------------------------------------------------

/// Express `x` in the other frame.
///
/// No sign flips are applied; callers working with a mirrored axis
/// convention (e.g. solver frame vs. wind tunnel frame) negate components
/// themselves.
pub fn transform_vector_frame(
    x: &Vector3<f64>,
    orientation: &Orientation,
    direction: FrameDirection,
) -> Vector3<f64> {
    match direction {
        FrameDirection::AircraftToInertial => orientation.aircraft_to_inertial() * x,
        FrameDirection::InertialToAircraft => orientation.inertial_to_aircraft() * x,
    }
}

/// Slice-based variant of [`transform_vector_frame`] for loosely typed input.
pub fn transform_components(
    x: &[f64],
    orientation: &Orientation,
    direction: FrameDirection,
) -> Result<[f64; 3]> {
    if x.len() != 3 {
        return Err(Error::InvalidVectorLength { got: x.len() });
    }
    let v = transform_vector_frame(&Vector3::from_column_slice(x), orientation, direction);
    Ok([v.x, v.y, v.z])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
