//! Sullivan's image-method fringing field.
//!
//! The gap is split into `gap_divisions` line currents along its length. Each
//! current at the gap face is paired with an opposite current mirrored about
//! the core axis, and the pair is tiled over a lattice of image cells to model
//! the surrounding core walls.

use std::f64::consts::PI;

use tracing::trace;

use crate::component::CoreGap;
use crate::constants::VACUUM_PERMEABILITY;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::fringing::{FringingEffectModel, FringingQueryMode};
use crate::math::{Scalar, R2};

const FRINGING_FRACTION: Scalar = 0.9;

/// Image-method gap model (direct contribution only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SullivanModel {
    /// Line currents the gap length is split into.
    pub gap_divisions: usize,
    /// Image cells on each side of the fundamental cell along x.
    pub image_units_x: i32,
    /// Image cells on each side of the fundamental cell along y.
    pub image_units_y: i32,
}

impl Default for SullivanModel {
    fn default() -> Self {
        Self {
            gap_divisions: 10,
            image_units_x: 2,
            image_units_y: 2,
        }
    }
}

impl SullivanModel {
    /// Model with explicit discretisation.
    #[must_use]
    pub const fn new(gap_divisions: usize, image_units_x: i32, image_units_y: i32) -> Self {
        Self {
            gap_divisions,
            image_units_x,
            image_units_y,
        }
    }

    /// Flux density `(Bx, By)` at `target` of an infinite line current at `source`.
    fn line_flux_density(current: Scalar, source: &R2, target: &R2) -> (Scalar, Scalar) {
        let dx = target.x - source.x;
        let dy = target.y - source.y;
        let mut r2 = dx * dx + dy * dy;
        if r2 < 1.0e-30 {
            r2 = 1.0;
        }
        let coefficient = VACUUM_PERMEABILITY * current / (2.0 * PI * r2);
        (coefficient * dy, -coefficient * dx)
    }
}

impl FringingEffectModel for SullivanModel {
    fn name(&self) -> &'static str {
        "Sullivan"
    }

    fn mode(&self) -> FringingQueryMode {
        FringingQueryMode::DirectContribution
    }

    fn equivalent_inducing_point_for_gap(&self, _gap: &CoreGap, _h_gap: Scalar) -> Result<FieldPoint> {
        Err(MagneticFieldError::fringing_not_implemented(
            "Sullivan",
            "equivalent_inducing_point_for_gap",
        ))
    }

    fn magnetic_field_strength_between_gap_and_point(
        &self,
        gap: &CoreGap,
        magnetic_field_strength_gap: Scalar,
        induced: &FieldPoint,
    ) -> Result<ComplexFieldPoint> {
        let column_width = gap.section_width()?;
        let position = gap.position()?;
        if self.gap_divisions == 0 {
            return Err(MagneticFieldError::InvalidInput(
                "Sullivan fringing needs at least one gap division".into(),
            ));
        }

        let central = position.x.abs() < 1.0e-10;
        let cell_height = column_width;
        let cell_width = if central { column_width } else { 2.0 * position.x.abs() };

        let divisions = self.gap_divisions as Scalar;
        let current_per_division = magnetic_field_strength_gap * gap.length / divisions;
        let grid = gap.length / divisions;
        // Central gaps radiate from the column face, not from the axis.
        let face_x = if central { column_width / 2.0 } else { position.x };

        let mut bx = 0.0;
        let mut by = 0.0;
        for division in 0..self.gap_divisions {
            let offset = if self.gap_divisions == 1 {
                0.0
            } else {
                -(gap.length - grid) / 2.0 + division as Scalar * grid
            };
            let cross = R2::new(face_x, position.y + offset);
            let dot = R2::new(-face_x, cross.y);

            for nx in -self.image_units_x..=self.image_units_x {
                for ny in -self.image_units_y..=self.image_units_y {
                    let shift = R2::new(Scalar::from(nx) * 2.0 * cell_width, Scalar::from(ny) * cell_height);
                    let (cross_bx, cross_by) =
                        Self::line_flux_density(current_per_division, &(cross + shift), &induced.point);
                    let (dot_bx, dot_by) =
                        Self::line_flux_density(-current_per_division, &(dot + shift), &induced.point);
                    bx += cross_bx + dot_bx;
                    by += cross_by + dot_by;
                }
            }
        }

        let hx = FRINGING_FRACTION * bx / VACUUM_PERMEABILITY;
        let hy = FRINGING_FRACTION * by / VACUUM_PERMEABILITY;
        trace!(hx, hy, x = induced.x(), y = induced.y(), "sullivan fringing");
        if hx.is_nan() || hy.is_nan() {
            return Err(MagneticFieldError::NaNResult("Sullivan's fringing field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, hx, hy))
    }
}
