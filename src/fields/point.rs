use std::fmt;

use crate::math::{Scalar, R2};

/// Position of a mesh point relative to the conductor it was generated from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshLabel {
    /// Conductor centre.
    Center,
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl MeshLabel {
    /// Lower-case name used in field maps.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for MeshLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point in the winding-window cross-section, optionally carrying a current.
///
/// Coordinates are (x, y) for planar models and (r, z) for axisymmetric ones.
/// Inducing points carry the filament current in `value`; induced points carry zero.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPoint {
    /// Position in meters.
    pub point: R2,
    /// Current (A) for inducing points, zero otherwise.
    pub value: Scalar,
    /// Index of the turn this point belongs to.
    pub turn_index: Option<usize>,
    /// Mean length of that turn (m).
    pub turn_length: Option<Scalar>,
    /// Mesh label assigned by the generating mesher.
    pub label: Option<MeshLabel>,
    /// Rotation of the owning conductor in degrees.
    pub rotation: Option<Scalar>,
}

impl FieldPoint {
    /// Creates an unlabelled point carrying no current.
    #[must_use]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self {
            point: R2::new(x, y),
            value: 0.0,
            turn_index: None,
            turn_length: None,
            label: None,
            rotation: None,
        }
    }

    /// Sets the carried current.
    #[must_use]
    pub fn with_value(mut self, value: Scalar) -> Self {
        self.value = value;
        self
    }

    /// Sets the owning turn.
    #[must_use]
    pub fn with_turn_index(mut self, turn_index: usize) -> Self {
        self.turn_index = Some(turn_index);
        self
    }

    /// Sets the turn length.
    #[must_use]
    pub fn with_turn_length(mut self, turn_length: Option<Scalar>) -> Self {
        self.turn_length = turn_length;
        self
    }

    /// Sets the mesh label.
    #[must_use]
    pub fn with_label(mut self, label: MeshLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the conductor rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Option<Scalar>) -> Self {
        self.rotation = rotation;
        self
    }

    /// x (or r) coordinate.
    #[inline]
    #[must_use]
    pub fn x(&self) -> Scalar {
        self.point.x
    }

    /// y (or z) coordinate.
    #[inline]
    #[must_use]
    pub fn y(&self) -> Scalar {
        self.point.y
    }
}

/// Magnetic field strength of one harmonic at a point.
///
/// `real` holds the x (radial) component and `imaginary` the y (axial) component,
/// both in A/m, following the winding-window field-map layout.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexFieldPoint {
    /// Position in meters.
    pub point: R2,
    /// x (radial) component of H.
    pub real: Scalar,
    /// y (axial) component of H.
    pub imaginary: Scalar,
    /// Turn the induced point belongs to.
    pub turn_index: Option<usize>,
    /// Length of that turn.
    pub turn_length: Option<Scalar>,
    /// Mesh label of the induced point.
    pub label: Option<MeshLabel>,
}

impl ComplexFieldPoint {
    /// Creates a field value at `induced`, copying its turn metadata.
    #[must_use]
    pub fn at(induced: &FieldPoint, real: Scalar, imaginary: Scalar) -> Self {
        Self {
            point: induced.point,
            real,
            imaginary,
            turn_index: induced.turn_index,
            turn_length: induced.turn_length,
            label: induced.label,
        }
    }

    /// Zero field at `induced`.
    #[must_use]
    pub fn zero(induced: &FieldPoint) -> Self {
        Self::at(induced, 0.0, 0.0)
    }

    /// Field as a vector `(Hx, Hy)`.
    #[must_use]
    pub fn h(&self) -> R2 {
        R2::new(self.real, self.imaginary)
    }

    /// Euclidean magnitude of the field vector.
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.real.hypot(self.imaginary)
    }

    /// Returns `true` if either component is NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.real.is_nan() || self.imaginary.is_nan()
    }

    /// Adds the components of `other` to this value.
    pub fn accumulate(&mut self, other: &Self) {
        self.real += other.real;
        self.imaginary += other.imaginary;
    }
}
