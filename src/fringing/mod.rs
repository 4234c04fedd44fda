//! Gap fringing models.
//!
//! A fringing model answers exactly one of two queries: the equivalent
//! current filament that replaces a gap ([`FringingQueryMode::EquivalentCurrent`]),
//! or the gap's direct field at an induced point
//! ([`FringingQueryMode::DirectContribution`]). The other query returns
//! [`MagneticFieldError::UnsupportedOperation`](crate::errors::MagneticFieldError::UnsupportedOperation).

mod albach;
mod roshen;
mod sullivan;

pub use albach::AlbachFringingModel;
pub use roshen::RoshenModel;
pub use sullivan::SullivanModel;

use crate::component::CoreGap;
use crate::config::FringingEffectModels;
use crate::errors::Result;
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::math::Scalar;

/// Query a fringing model implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FringingQueryMode {
    /// The gap is replaced by a current filament superposed with the turns.
    EquivalentCurrent,
    /// The gap field is added directly at every induced point.
    DirectContribution,
}

/// Capability shared by the fringing models.
pub trait FringingEffectModel {
    /// Model name.
    fn name(&self) -> &'static str;

    /// Query mode this model implements.
    fn mode(&self) -> FringingQueryMode;

    /// Current filament equivalent to `gap` carrying field `magnetic_field_strength_gap` (A/m).
    fn equivalent_inducing_point_for_gap(
        &self,
        gap: &CoreGap,
        magnetic_field_strength_gap: Scalar,
    ) -> Result<FieldPoint>;

    /// Fringing field of `gap` at `induced`.
    fn magnetic_field_strength_between_gap_and_point(
        &self,
        gap: &CoreGap,
        magnetic_field_strength_gap: Scalar,
        induced: &FieldPoint,
    ) -> Result<ComplexFieldPoint>;
}

/// Maps a fringing variant to its implementation.
#[must_use]
pub fn factory(model: FringingEffectModels) -> Box<dyn FringingEffectModel> {
    match model {
        FringingEffectModels::Roshen => Box::new(RoshenModel),
        FringingEffectModels::Albach => Box::new(AlbachFringingModel),
        FringingEffectModels::Sullivan => Box::new(SullivanModel::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::GapType;

    fn central_gap() -> CoreGap {
        CoreGap::new(GapType::Subtractive, 1.0e-3, 0.0, 0.0, 10.0e-3)
    }

    #[test]
    fn each_model_rejects_the_other_query() {
        let gap = central_gap();
        let induced = FieldPoint::new(6.0e-3, 0.0);
        for variant in [FringingEffectModels::Roshen, FringingEffectModels::Albach, FringingEffectModels::Sullivan] {
            let model = factory(variant);
            let equivalent = model.equivalent_inducing_point_for_gap(&gap, 1.0e5);
            let direct = model.magnetic_field_strength_between_gap_and_point(&gap, 1.0e5, &induced);
            match model.mode() {
                FringingQueryMode::EquivalentCurrent => {
                    assert!(equivalent.is_ok());
                    assert!(direct.unwrap_err().is_unsupported());
                }
                FringingQueryMode::DirectContribution => {
                    assert!(direct.is_ok());
                    assert!(equivalent.unwrap_err().is_unsupported());
                }
            }
        }
    }

    #[test]
    fn roshen_equivalent_point_is_not_implemented() {
        let error = RoshenModel.equivalent_inducing_point_for_gap(&central_gap(), 1.0e5).unwrap_err();
        assert!(error.to_string().contains("Fringing field not implemented for this model"));
    }

    #[test]
    fn albach_direct_contribution_is_not_implemented() {
        let error = AlbachFringingModel
            .magnetic_field_strength_between_gap_and_point(&central_gap(), 1.0e5, &FieldPoint::new(6.0e-3, 0.0))
            .unwrap_err();
        assert!(error.to_string().contains("Fringing field not implemented for this model"));
    }
}
