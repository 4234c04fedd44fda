//! Near-field conductor models.
//!
//! Each model returns the H contribution of one inducing point (a conductor
//! or a conductor image) at one induced point. Models are stateless; the wire
//! of the inducing winding is passed per call.

mod binns_lawrenson;
mod lammeraner;
mod wang;

pub use binns_lawrenson::{rectangular_conductor_field, BinnsLawrensonModel};
pub use lammeraner::LammeranerModel;
pub use wang::{wang_dimensions, wang_lambda, WangModel};

use std::f64::consts::PI;

use crate::albach2d::Albach2DModel;
use crate::component::Wire;
use crate::config::MagneticFieldStrengthModels;
use crate::errors::Result;
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::math::Scalar;

/// Capability shared by every near-field conductor model.
pub trait MagneticFieldStrengthModel {
    /// Model name used in field-map metadata.
    fn name(&self) -> &'static str;

    /// H at `induced` produced by the current carried by `inducing`.
    ///
    /// `wire` is the conductor of the inducing winding; `None` marks a bare
    /// filament such as a gap's equivalent current.
    fn magnetic_field_strength_between_two_points(
        &self,
        inducing: &FieldPoint,
        induced: &FieldPoint,
        wire: Option<&Wire>,
    ) -> Result<ComplexFieldPoint>;
}

/// Maps a model variant to its implementation.
#[must_use]
pub fn factory(model: MagneticFieldStrengthModels) -> Box<dyn MagneticFieldStrengthModel> {
    match model {
        MagneticFieldStrengthModels::Wang => Box::new(WangModel),
        MagneticFieldStrengthModels::BinnsLawrenson => Box::new(BinnsLawrensonModel),
        MagneticFieldStrengthModels::Lammeraner => Box::new(LammeranerModel),
        MagneticFieldStrengthModels::Albach2D => Box::new(Albach2DModel::default()),
    }
}

/// Field `(Hx, Hy)` of an infinite line current at `induced`.
#[inline]
#[must_use]
pub fn line_current_field(current: Scalar, inducing: &FieldPoint, induced: &FieldPoint) -> (Scalar, Scalar) {
    let dx = inducing.x() - induced.x();
    let dy = inducing.y() - induced.y();
    let divisor = 2.0 * PI * (dx * dx + dy * dy);
    (-current * dy / divisor, current * dx / divisor)
}
