use std::f64::consts::PI;

use crate::errors::{MagneticFieldError, Result};
use crate::math::{Scalar, R2};

/// Core shape family; only the distinction between concentric and toroidal
/// shapes affects the field models.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreShapeFamily {
    /// E core.
    E,
    /// ETD core.
    Etd,
    /// PQ core.
    Pq,
    /// RM core.
    Rm,
    /// Pot core.
    Pot,
    /// Toroid.
    T,
}

/// How a gap was produced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapType {
    /// Ground into the column.
    Subtractive,
    /// Spacer between core halves.
    Additive,
    /// Unavoidable mating gap.
    Residual,
}

/// One air gap of the core.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoreGap {
    /// Production type.
    pub gap_type: GapType,
    /// Gap length along the magnetic path (m).
    pub length: Scalar,
    /// Centre of the gap in the cross-section (x = 0 for the central column).
    pub coordinates: Option<R2>,
    /// Width and depth of the column the gap cuts through (m).
    pub section_dimensions: Option<R2>,
}

impl CoreGap {
    /// Gap with known position and column section.
    #[must_use]
    pub fn new(gap_type: GapType, length: Scalar, x: Scalar, y: Scalar, section_width: Scalar) -> Self {
        Self {
            gap_type,
            length,
            coordinates: Some(R2::new(x, y)),
            section_dimensions: Some(R2::new(section_width, section_width)),
        }
    }

    /// Gap position, or an error if the gap was never placed.
    pub fn position(&self) -> Result<R2> {
        self.coordinates
            .ok_or_else(|| MagneticFieldError::GapGeometry("gap is missing coordinates".into()))
    }

    /// Width of the gapped column, or an error if unknown.
    pub fn section_width(&self) -> Result<Scalar> {
        self.section_dimensions
            .map(|section| section.x)
            .ok_or_else(|| MagneticFieldError::GapGeometry("gap is missing section dimensions".into()))
    }

    /// Returns `true` if the gap cuts the central column.
    #[must_use]
    pub fn is_central(&self) -> bool {
        self.coordinates.map_or(true, |c| c.x.abs() < 1.0e-9)
    }
}

/// Winding window dimensions (m).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindingWindow {
    /// Radial extent, from the central column to the outer leg.
    pub width: Scalar,
    /// Axial extent.
    pub height: Scalar,
}

/// Processed core geometry and magnetic parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Core {
    /// Shape family.
    pub shape_family: CoreShapeFamily,
    /// Width of the central column; radial thickness of the ring for toroids.
    pub column_width: Scalar,
    /// Overall core width; outer diameter for toroids.
    pub width: Scalar,
    /// First winding window.
    pub winding_window: WindingWindow,
    /// All gaps, including mirrored lateral ones.
    pub gapping: Vec<CoreGap>,
    /// Initial relative permeability of the material.
    pub initial_permeability: Scalar,
    /// Effective magnetic path length (m).
    pub effective_length: Scalar,
    /// Effective cross-section (m²).
    pub effective_area: Scalar,
}

impl Core {
    /// Concentric (E, ETD, PQ, ...) core. Effective parameters are estimated
    /// from the window and column until set explicitly.
    #[must_use]
    pub fn concentric(
        shape_family: CoreShapeFamily,
        column_width: Scalar,
        width: Scalar,
        winding_window: WindingWindow,
    ) -> Self {
        Self {
            shape_family,
            column_width,
            width,
            winding_window,
            gapping: Vec::new(),
            initial_permeability: 2000.0,
            effective_length: 2.0 * (winding_window.height + winding_window.width) + PI * column_width / 2.0,
            effective_area: PI * (column_width / 2.0).powi(2),
        }
    }

    /// Toroid with rectangular ring section.
    #[must_use]
    pub fn toroidal(outer_diameter: Scalar, inner_diameter: Scalar, height: Scalar) -> Self {
        let ring = (outer_diameter - inner_diameter) / 2.0;
        Self {
            shape_family: CoreShapeFamily::T,
            column_width: ring,
            width: outer_diameter,
            winding_window: WindingWindow {
                width: inner_diameter / 2.0,
                height: inner_diameter,
            },
            gapping: Vec::new(),
            initial_permeability: 2000.0,
            effective_length: PI * (outer_diameter + inner_diameter) / 2.0,
            effective_area: ring * height,
        }
    }

    /// Replaces the gapping.
    #[must_use]
    pub fn with_gapping(mut self, gapping: Vec<CoreGap>) -> Self {
        self.gapping = gapping;
        self
    }

    /// Sets the initial relative permeability.
    #[must_use]
    pub fn with_initial_permeability(mut self, permeability: Scalar) -> Self {
        self.initial_permeability = permeability;
        self
    }

    /// Sets the effective length and area.
    #[must_use]
    pub fn with_effective_parameters(mut self, length: Scalar, area: Scalar) -> Self {
        self.effective_length = length;
        self.effective_area = area;
        self
    }

    /// Returns `true` for toroids.
    #[must_use]
    pub fn is_toroidal(&self) -> bool {
        self.shape_family == CoreShapeFamily::T
    }

    /// Gaps cut into the central column.
    pub fn central_gaps(&self) -> impl Iterator<Item = &CoreGap> {
        self.gapping.iter().filter(|gap| gap.is_central())
    }

    /// Sum of gap lengths along one magnetic path; mirrored lateral gaps
    /// (negative x) are not counted twice.
    #[must_use]
    pub fn total_gap_length(&self) -> Scalar {
        self.gapping
            .iter()
            .filter(|gap| gap.coordinates.map_or(true, |c| c.x >= 0.0))
            .map(|gap| gap.length)
            .sum()
    }

    /// Returns `true` if `point` lies inside the magnetic material of a toroid.
    /// Always `false` for concentric cores, whose cross-section is the window.
    #[must_use]
    pub fn contains_point(&self, point: &R2) -> bool {
        if !self.is_toroidal() {
            return false;
        }
        let radius = point.norm();
        if radius * 1.05 > self.width / 2.0 {
            return false;
        }
        if radius * 0.95 < self.width / 2.0 - self.column_width {
            return false;
        }
        true
    }
}
