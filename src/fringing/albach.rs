//! Albach's equivalent-current model of gap fringing.

use crate::component::CoreGap;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::fringing::{FringingEffectModel, FringingQueryMode};
use crate::math::Scalar;

/// Replaces a gap by a single current filament placed inside the column.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbachFringingModel;

impl AlbachFringingModel {
    /// Normalised radial position of the filament, `x(ξ)` with `ξ = l / (2 r_c)`.
    #[inline]
    #[must_use]
    pub fn filament_position_factor(xi: Scalar) -> Scalar {
        1.0 - 1.05 * xi - 2.88 * xi.powi(2) - 8.8 * xi.powi(3)
    }

    /// Denominator of the filament current fit.
    #[inline]
    #[must_use]
    pub fn current_factor(xi: Scalar) -> Scalar {
        0.25 - 1.569 * xi + 4.34 * xi.powi(2) - 7.042 * xi.powi(3)
    }
}

impl FringingEffectModel for AlbachFringingModel {
    fn name(&self) -> &'static str {
        "Albach"
    }

    fn mode(&self) -> FringingQueryMode {
        FringingQueryMode::EquivalentCurrent
    }

    fn equivalent_inducing_point_for_gap(
        &self,
        gap: &CoreGap,
        magnetic_field_strength_gap: Scalar,
    ) -> Result<FieldPoint> {
        let section_width = gap.section_width()?;
        let position = gap.position()?;

        let column_radius = section_width / 2.0;
        let xi = gap.length / (2.0 * column_radius);
        let x = Self::filament_position_factor(xi);
        if x < 0.0 {
            return Err(MagneticFieldError::GapGeometry(format!(
                "gap of {} m is too long for Albach's fit on a {} m column",
                gap.length, section_width
            )));
        }
        let current = magnetic_field_strength_gap * gap.length / Self::current_factor(xi);
        let eta = x * column_radius;
        if eta > column_radius {
            return Err(MagneticFieldError::GapGeometry(format!(
                "equivalent filament at {eta} m falls outside the column"
            )));
        }

        // The filament sits inside the gapped column, towards the winding.
        let x = if position.x > 0.0 {
            position.x - eta
        } else if position.x < 0.0 {
            position.x + eta
        } else {
            eta
        };
        Ok(FieldPoint::new(x, position.y).with_value(current))
    }

    fn magnetic_field_strength_between_gap_and_point(
        &self,
        _gap: &CoreGap,
        _h_gap: Scalar,
        _induced: &FieldPoint,
    ) -> Result<ComplexFieldPoint> {
        Err(MagneticFieldError::fringing_not_implemented(
            "Albach",
            "magnetic_field_strength_between_gap_and_point",
        ))
    }
}
