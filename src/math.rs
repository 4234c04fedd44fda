//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{DVector, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (x, y) or (r, z).
pub type R2 = Vector2<Scalar>;
/// Primary complex scalar type used for harmonic phasors.
pub type CScalar = num_complex::Complex<Scalar>;
/// Dense real coefficient vector.
pub type Coefficients = DVector<Scalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    CScalar::from_polar(1.0, theta)
}

/// Rotates `vector` counter-clockwise by `degrees`.
#[must_use]
pub fn rotate_degrees(vector: &R2, degrees: Scalar) -> R2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    R2::new(cos * vector.x - sin * vector.y, sin * vector.x + cos * vector.y)
}

/// Returns `cosh(p·z) / cosh(p·c)` without overflowing for large `p`.
#[must_use]
pub fn cosh_ratio(p: Scalar, z: Scalar, c: Scalar) -> Scalar {
    let z = z.abs();
    let c = c.abs();
    (p * (z - c)).exp() * (1.0 + (-2.0 * p * z).exp()) / (1.0 + (-2.0 * p * c).exp())
}

/// Returns `sinh(p·z) / sinh(p·c)` without overflowing for large `p`.
///
/// Returns zero when `sinh(p·c)` vanishes.
#[must_use]
pub fn sinh_ratio(p: Scalar, z: Scalar, c: Scalar) -> Scalar {
    if (p * c).abs() < 1.0e-300 {
        return 0.0;
    }
    let sign = z.signum() * c.signum();
    let z = z.abs();
    let c = c.abs();
    sign * (p * (z - c)).exp() * (1.0 - (-2.0 * p * z).exp()) / (1.0 - (-2.0 * p * c).exp())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn hyperbolic_ratios_match_direct_evaluation() {
        let (p, z, c) = (3.0, 0.4, 0.9);
        assert_relative_eq!(cosh_ratio(p, z, c), (p * z).cosh() / (p * c).cosh(), max_relative = 1.0e-12);
        assert_relative_eq!(sinh_ratio(p, -z, c), (-p * z).sinh() / (p * c).sinh(), max_relative = 1.0e-12);
    }

    #[test]
    fn hyperbolic_ratios_stay_finite_for_large_arguments() {
        let ratio = cosh_ratio(1.0e4, 0.99, 1.0);
        assert!(ratio.is_finite());
        assert!(ratio < 1.0e-40);
    }

    #[test]
    fn rotation_by_quarter_turn() {
        let rotated = rotate_degrees(&R2::new(1.0, 0.0), 90.0);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1.0e-12);
    }
}
