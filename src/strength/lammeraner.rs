//! Lammeraner's finite-length line current.

use crate::component::Wire;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::strength::{line_current_field, BinnsLawrensonModel, MagneticFieldStrengthModel};

/// Line current of finite length `L` (the turn length, 1 m when unknown),
/// attenuated by `L / √(L² + d²)`. Non-round conductors fall back to
/// [`BinnsLawrensonModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LammeranerModel;

impl MagneticFieldStrengthModel for LammeranerModel {
    fn name(&self) -> &'static str {
        "Lammeraner"
    }

    fn magnetic_field_strength_between_two_points(
        &self,
        inducing: &FieldPoint,
        induced: &FieldPoint,
        wire: Option<&Wire>,
    ) -> Result<ComplexFieldPoint> {
        if let Some(wire) = wire.filter(|wire| !wire.is_round()) {
            return BinnsLawrensonModel.magnetic_field_strength_between_two_points(inducing, induced, Some(wire));
        }
        let distance = (induced.point - inducing.point).norm();
        let inside = wire.map_or(distance <= 1.0e-15, |wire| distance < wire.outer_width / 2.0);
        if inside {
            return Ok(ComplexFieldPoint::zero(induced));
        }
        let turn_length = inducing.turn_length.unwrap_or(1.0);
        let attenuation = turn_length / turn_length.hypot(distance);
        let (hx, hy) = line_current_field(inducing.value * attenuation, inducing, induced);
        if hx.is_nan() || hy.is_nan() {
            return Err(MagneticFieldError::NaNResult("Lammeraner's model for magnetic field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, hx, hy))
    }
}
