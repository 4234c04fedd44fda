//! Binns & Lawrenson conductor fields.
//!
//! Round conductors are infinite line currents with zero field inside the
//! insulation. Rectangular conductors use the closed-form field of a uniform
//! current density over a `2a × 2b` rectangle.

use std::f64::consts::PI;

use crate::component::Wire;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::math::{rotate_degrees, Scalar, R2};
use crate::strength::{line_current_field, MagneticFieldStrengthModel};

/// Binns & Lawrenson model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinnsLawrensonModel;

/// Field `(Hx, Hy)` at offset `(x, y)` from the centre of a rectangular
/// conductor of half-width `a` and half-height `b` carrying `current`.
///
/// Points inside the copper, and the corner singularities, return zero.
#[must_use]
pub fn rectangular_conductor_field(current: Scalar, a: Scalar, b: Scalar, x: Scalar, y: Scalar) -> (Scalar, Scalar) {
    if x.abs() < a && y.abs() < b {
        return (0.0, 0.0);
    }
    let r1 = (y + b).hypot(x - a);
    let r2 = (y + b).hypot(x + a);
    let r3 = (y - b).hypot(x + a);
    let r4 = (y - b).hypot(x - a);

    let mut theta1 = ((y + b) / (x - a)).atan();
    let mut theta2 = ((y + b) / (x + a)).atan();
    let mut theta3 = ((y - b) / (x + a)).atan();
    let mut theta4 = ((y - b) / (x - a)).atan();
    if theta1.is_nan() || theta2.is_nan() || theta3.is_nan() || theta4.is_nan() {
        return (0.0, 0.0);
    }

    if x == a {
        theta1 = if y + b > 0.0 { PI / 2.0 } else { -PI / 2.0 };
        theta4 = if y - b > 0.0 { PI / 2.0 } else { -PI / 2.0 };
    }

    // Unwrap the arctangents onto a continuous branch outside the right-hand strip.
    if !(x > a && -b < y && y < b) {
        if x > a && y < -b {
            theta1 += 2.0 * PI;
        } else if x < a || y < -b {
            theta1 += PI;
        }
        if x > -a && y < -b {
            theta2 += 2.0 * PI;
        } else if x < -a || y < -b {
            theta2 += PI;
        }
        if x > -a && y < b {
            theta3 += 2.0 * PI;
        } else if x < -a || y < b {
            theta3 += PI;
        }
        if x > a && y < b {
            theta4 += 2.0 * PI;
        } else if x < a || y < b {
            theta4 += PI;
        }
    }

    let common = current / (8.0 * PI * a * b);
    let ln_ratio = |num: Scalar, den: Scalar| (num / den).ln();
    let hx = common
        * ((y + b) * (theta1 - theta2) - (y - b) * (theta4 - theta3) + (x + a) * ln_ratio(r2, r3)
            - (x - a) * ln_ratio(r1, r4));
    let hy = -common
        * ((x + a) * (theta2 - theta3) - (x - a) * (theta1 - theta4) + (y + b) * ln_ratio(r2, r1)
            - (y - b) * ln_ratio(r3, r4));
    (hx, hy)
}

impl BinnsLawrensonModel {
    fn rectangular(inducing: &FieldPoint, induced: &FieldPoint, wire: &Wire) -> (Scalar, Scalar) {
        let a = wire.conducting_width / 2.0;
        let b = wire.conducting_height / 2.0;
        let mut offset = induced.point - inducing.point;
        if let Some(rotation) = inducing.rotation {
            offset = rotate_degrees(&offset, -rotation);
        }
        let (hx, hy) = rectangular_conductor_field(inducing.value, a, b, offset.x, offset.y);
        match inducing.rotation {
            Some(rotation) => {
                let h = rotate_degrees(&R2::new(hx, hy), rotation);
                (h.x, h.y)
            }
            None => (hx, hy),
        }
    }
}

impl MagneticFieldStrengthModel for BinnsLawrensonModel {
    fn name(&self) -> &'static str {
        "BinnsLawrenson"
    }

    fn magnetic_field_strength_between_two_points(
        &self,
        inducing: &FieldPoint,
        induced: &FieldPoint,
        wire: Option<&Wire>,
    ) -> Result<ComplexFieldPoint> {
        let (hx, hy) = match wire {
            Some(wire) if !wire.is_round() => Self::rectangular(inducing, induced, wire),
            Some(wire) => {
                let offset = inducing.point - induced.point;
                if offset.norm() < wire.outer_width / 2.0 {
                    (0.0, 0.0)
                } else {
                    line_current_field(inducing.value, inducing, induced)
                }
            }
            None => line_current_field(inducing.value, inducing, induced),
        };
        if hx.is_nan() || hy.is_nan() {
            return Err(MagneticFieldError::NaNResult(
                "Binns Lawrenson's model for magnetic field".into(),
            ));
        }
        Ok(ComplexFieldPoint::at(induced, hx, hy))
    }
}
