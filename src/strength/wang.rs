//! Wang's edge-current model for rectangular, foil and planar conductors.
//!
//! The conductor current is concentrated on two edge filaments placed a
//! distance `λ·h` inside the conductor (see [`crate::mesher::CoilMesher`]).
//! The field at the four edge midpoints of a neighbouring conductor follows
//! from the relative position of the two labels.

use std::f64::consts::PI;

use crate::component::{Wire, WireType};
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint, MeshLabel};
use crate::math::Scalar;
use crate::strength::{LammeranerModel, MagneticFieldStrengthModel};

/// Wang model. Bare filaments and round conductors fall back to [`LammeranerModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WangModel;

/// Returns `(c, h)`: the conductor extent between the two edge filaments and
/// the extent along them. Foils carry their filaments at the top and bottom
/// edges, every other shape at the left and right edges.
#[must_use]
pub fn wang_dimensions(wire: &Wire) -> (Scalar, Scalar) {
    if wire.wire_type == WireType::Foil {
        (wire.conducting_height, wire.conducting_width)
    } else {
        (wire.conducting_width, wire.conducting_height)
    }
}

/// Edge-filament position factor `λ = min(0.99, 0.01·c/h + 0.66)`.
#[must_use]
pub fn wang_lambda(c: Scalar, h: Scalar) -> Scalar {
    (0.01 * c / h + 0.66).min(0.99)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeRelation {
    Same,
    Opposite,
    Leading,
    Trailing,
}

fn edge_relation(inducing: MeshLabel, induced: MeshLabel) -> Result<EdgeRelation> {
    use MeshLabel::{Bottom, Left, Right, Top};
    Ok(match (inducing, induced) {
        (Left, Left) | (Right, Right) | (Top, Top) | (Bottom, Bottom) => EdgeRelation::Same,
        (Left, Right) | (Right, Left) | (Top, Bottom) | (Bottom, Top) => EdgeRelation::Opposite,
        (Left, Top) | (Right, Bottom) | (Bottom, Right) | (Top, Left) => EdgeRelation::Leading,
        (Left, Bottom) | (Right, Top) | (Bottom, Left) | (Top, Right) => EdgeRelation::Trailing,
        (MeshLabel::Center, _) => {
            return Err(MagneticFieldError::InvalidInput(format!("Wrong inducing label: {inducing}")))
        }
        (_, MeshLabel::Center) => {
            return Err(MagneticFieldError::InvalidInput(format!("Wrong induced label: {induced}")))
        }
    })
}

impl MagneticFieldStrengthModel for WangModel {
    fn name(&self) -> &'static str {
        "Wang"
    }

    fn magnetic_field_strength_between_two_points(
        &self,
        inducing: &FieldPoint,
        induced: &FieldPoint,
        wire: Option<&Wire>,
    ) -> Result<ComplexFieldPoint> {
        let Some(wire) = wire.filter(|wire| !wire.is_round()) else {
            return LammeranerModel.magnetic_field_strength_between_two_points(inducing, induced, None);
        };
        let (Some(inducing_label), Some(induced_label)) = (inducing.label, induced.label) else {
            return Err(MagneticFieldError::InvalidInput(
                "Wang magnetic field model must be used with labelled Wang mesh points".into(),
            ));
        };

        let (c, h) = wang_dimensions(wire);
        let lambda = wang_lambda(c, h);
        let current = inducing.value;
        let dx = inducing.x() - induced.x();
        let dy = inducing.y() - induced.y();
        let distance = dx.hypot(dy);
        let cos_theta = if distance > 0.0 { (dy.abs() / distance).asin().cos() } else { 1.0 };

        let (hx, hy) = match edge_relation(inducing_label, induced_label)? {
            EdgeRelation::Same => {
                let near = lambda * h;
                let hy = 0.5 * current / (2.0 * PI * near)
                    + 0.5 * current * cos_theta / (2.0 * PI * near.hypot(dy));
                (0.0, hy)
            }
            EdgeRelation::Opposite => {
                let far = c - lambda * h;
                let hy = -0.5 * current / (2.0 * PI * far) - 0.5 * current * cos_theta / (2.0 * PI * far.hypot(dy));
                (0.0, hy)
            }
            EdgeRelation::Leading => (if dy > 0.0 { 0.0 } else { current / (2.0 * c) }, 0.0),
            EdgeRelation::Trailing => (if dy > 0.0 { current / (2.0 * c) } else { 0.0 }, 0.0),
        };
        if hx.is_nan() || hy.is_nan() {
            return Err(MagneticFieldError::NaNResult("Wang's model for magnetic field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, hx, hy))
    }
}
