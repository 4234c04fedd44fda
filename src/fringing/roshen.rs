//! Roshen's fringing field of a gap edge.

use std::f64::consts::PI;

use crate::component::CoreGap;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::fringing::{FringingEffectModel, FringingQueryMode};
use crate::math::Scalar;

/// Fraction of the gap MMF that appears as external fringing field.
const FRINGING_FRACTION: Scalar = 0.9;

/// Roshen's closed-form field of a gap edge (direct contribution only).
#[derive(Debug, Clone, Copy, Default)]
pub struct RoshenModel;

impl FringingEffectModel for RoshenModel {
    fn name(&self) -> &'static str {
        "Roshen"
    }

    fn mode(&self) -> FringingQueryMode {
        FringingQueryMode::DirectContribution
    }

    fn equivalent_inducing_point_for_gap(&self, _gap: &CoreGap, _h_gap: Scalar) -> Result<FieldPoint> {
        Err(MagneticFieldError::fringing_not_implemented(
            "Roshen",
            "equivalent_inducing_point_for_gap",
        ))
    }

    fn magnetic_field_strength_between_gap_and_point(
        &self,
        gap: &CoreGap,
        magnetic_field_strength_gap: Scalar,
        induced: &FieldPoint,
    ) -> Result<ComplexFieldPoint> {
        let position = gap.position()?;
        let half_section = gap.section_width()? / 2.0;
        // Edge of the column facing the winding window.
        let edge_x = if position.x == 0.0 {
            position.x + half_section
        } else {
            position.x - half_section
        };
        let dx = induced.x() - edge_x;
        let dy = induced.y() - position.y;
        let half_gap = gap.length / 2.0;

        let hx = -FRINGING_FRACTION * magnetic_field_strength_gap / (2.0 * PI)
            * ((dx * dx + (dy - half_gap).powi(2)) / (dx * dx + (dy + half_gap).powi(2))).ln();

        let radius_squared = dx * dx + dy * dy;
        let inside_gap_circle = if radius_squared > half_gap * half_gap { 0.0 } else { 1.0 };
        let hy = -FRINGING_FRACTION * magnetic_field_strength_gap / PI
            * ((dx * half_gap / (radius_squared - half_gap * half_gap)).atan() + inside_gap_circle * PI);

        if hx.is_nan() || hy.is_nan() {
            return Err(MagneticFieldError::NaNResult("Roshen's fringing field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, hx, hy))
    }
}
