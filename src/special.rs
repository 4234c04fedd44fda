//! Special functions needed by the loop-potential and eigenfunction models.
//!
//! Complete elliptic integrals use the arithmetic-geometric mean and take the
//! parameter `m = k²`. Bessel functions use the rational and asymptotic
//! approximations of Abramowitz & Stegun §9.4/§9.8 in the Numerical Recipes
//! arrangement (relative accuracy around 1e-8). The exponentially scaled
//! variants keep `I` and `K` usable for arguments where the plain functions
//! overflow or underflow.

use std::f64::consts::FRAC_PI_2;

use crate::math::Scalar;

const TWO_OVER_PI: Scalar = 0.636_619_772;

#[inline]
fn poly(y: Scalar, coefficients: &[Scalar]) -> Scalar {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * y + c)
}

/// Returns the complete elliptic integrals `(K(m), E(m))` for parameter `m = k²`.
///
/// `m >= 1` returns `(∞, 1)`.
#[must_use]
pub fn ellipke(m: Scalar) -> (Scalar, Scalar) {
    if m >= 1.0 {
        return (Scalar::INFINITY, 1.0);
    }
    let mut a = 1.0;
    let mut b = (1.0 - m).sqrt();
    let mut weight = 0.5;
    let mut sum = weight * m;
    for _ in 0..64 {
        let c = 0.5 * (a - b);
        if c.abs() <= Scalar::EPSILON * a {
            break;
        }
        let next_a = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next_a;
        weight *= 2.0;
        sum += weight * c * c;
    }
    let k = FRAC_PI_2 / a;
    (k, k * (1.0 - sum))
}

/// Complete elliptic integral of the first kind, parameter `m = k²`.
#[must_use]
pub fn ellipk(m: Scalar) -> Scalar {
    ellipke(m).0
}

/// Complete elliptic integral of the second kind, parameter `m = k²`.
#[must_use]
pub fn ellipe(m: Scalar) -> Scalar {
    ellipke(m).1
}

const J0_ASYMPTOTIC_P: [Scalar; 5] = [
    1.0,
    -0.109_862_862_7e-2,
    0.273_451_040_7e-4,
    -0.207_337_063_9e-5,
    0.209_388_721_1e-6,
];
const J0_ASYMPTOTIC_Q: [Scalar; 5] = [
    -0.156_249_999_5e-1,
    0.143_048_876_5e-3,
    -0.691_114_765_1e-5,
    0.762_109_516_1e-6,
    -0.934_935_152e-7,
];
const J1_ASYMPTOTIC_P: [Scalar; 5] = [
    1.0,
    0.183_105e-2,
    -0.351_639_649_6e-4,
    0.245_752_017_4e-5,
    -0.240_337_019e-6,
];
const J1_ASYMPTOTIC_Q: [Scalar; 5] = [
    0.046_874_999_95,
    -0.200_269_087_3e-3,
    0.844_919_909_6e-5,
    -0.882_289_87e-6,
    0.105_787_412e-6,
];

/// Returns `(P, Q, phase)` of the large-argument expansion of order 0 or 1.
fn hankel_asymptotic(order: u8, x: Scalar) -> (Scalar, Scalar, Scalar) {
    let z = 8.0 / x;
    let y = z * z;
    if order == 0 {
        (poly(y, &J0_ASYMPTOTIC_P), z * poly(y, &J0_ASYMPTOTIC_Q), x - 0.785_398_164)
    } else {
        (poly(y, &J1_ASYMPTOTIC_P), z * poly(y, &J1_ASYMPTOTIC_Q), x - 2.356_194_491)
    }
}

/// Bessel function of the first kind, order 0.
#[must_use]
pub fn bessel_j0(x: Scalar) -> Scalar {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        poly(
            y,
            &[57_568_490_574.0, -13_362_590_354.0, 651_619_640.7, -11_214_424.18, 77_392.330_17, -184.905_245_6],
        ) / poly(
            y,
            &[57_568_490_411.0, 1_029_532_985.0, 9_494_680.718, 59_272.648_53, 267.853_271_2, 1.0],
        )
    } else {
        let (p, q, phase) = hankel_asymptotic(0, ax);
        (TWO_OVER_PI / ax).sqrt() * (phase.cos() * p - phase.sin() * q)
    }
}

/// Bessel function of the first kind, order 1.
#[must_use]
pub fn bessel_j1(x: Scalar) -> Scalar {
    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        x * poly(
            y,
            &[72_362_614_232.0, -7_895_059_235.0, 242_396_853.1, -2_972_611.439, 15_704.482_60, -30.160_366_06],
        ) / poly(
            y,
            &[144_725_228_442.0, 2_300_535_178.0, 18_583_304.74, 99_447.433_94, 376.999_139_7, 1.0],
        )
    } else {
        let (p, q, phase) = hankel_asymptotic(1, ax);
        let value = (TWO_OVER_PI / ax).sqrt() * (phase.cos() * p - phase.sin() * q);
        if x < 0.0 {
            -value
        } else {
            value
        }
    }
}

/// Bessel function of the second kind, order 0. Returns `-∞` for `x <= 0`.
#[must_use]
pub fn bessel_y0(x: Scalar) -> Scalar {
    if x <= 0.0 {
        return Scalar::NEG_INFINITY;
    }
    if x < 8.0 {
        let y = x * x;
        poly(
            y,
            &[-2_957_821_389.0, 7_062_834_065.0, -512_359_803.6, 10_879_881.29, -86_327.927_57, 228.462_273_3],
        ) / poly(
            y,
            &[40_076_544_269.0, 745_249_964.8, 7_189_466.438, 47_447.264_70, 226.103_024_4, 1.0],
        ) + TWO_OVER_PI * bessel_j0(x) * x.ln()
    } else {
        let (p, q, phase) = hankel_asymptotic(0, x);
        (TWO_OVER_PI / x).sqrt() * (phase.sin() * p + phase.cos() * q)
    }
}

/// Bessel function of the second kind, order 1. Returns `-∞` for `x <= 0`.
#[must_use]
pub fn bessel_y1(x: Scalar) -> Scalar {
    if x <= 0.0 {
        return Scalar::NEG_INFINITY;
    }
    if x < 8.0 {
        let y = x * x;
        x * poly(
            y,
            &[
                -0.490_060_494_3e13,
                0.127_527_439_0e13,
                -0.515_343_813_9e11,
                0.734_926_455_1e9,
                -0.423_792_272_6e7,
                0.851_193_793_5e4,
            ],
        ) / poly(
            y,
            &[
                0.249_958_057_0e14,
                0.424_441_966_4e12,
                0.373_365_036_7e10,
                0.224_590_400_2e8,
                0.102_042_605_0e6,
                0.354_963_288_5e3,
                1.0,
            ],
        ) + TWO_OVER_PI * (bessel_j1(x) * x.ln() - 1.0 / x)
    } else {
        let (p, q, phase) = hankel_asymptotic(1, x);
        (TWO_OVER_PI / x).sqrt() * (phase.sin() * p + phase.cos() * q)
    }
}

const I0_SMALL: [Scalar; 7] = [1.0, 3.515_622_9, 3.089_942_4, 1.206_749_2, 0.265_973_2, 0.360_768e-1, 0.458_13e-2];
const I0_LARGE: [Scalar; 9] = [
    0.398_942_28,
    0.132_859_2e-1,
    0.225_319e-2,
    -0.157_565e-2,
    0.916_281e-2,
    -0.205_770_6e-1,
    0.263_553_7e-1,
    -0.164_763_3e-1,
    0.392_377e-2,
];
const I1_SMALL: [Scalar; 7] = [0.5, 0.878_905_94, 0.514_988_69, 0.150_849_34, 0.265_873_3e-1, 0.301_532e-2, 0.324_11e-3];
const I1_LARGE: [Scalar; 9] = [
    0.398_942_28,
    -0.398_802_4e-1,
    -0.362_018e-2,
    0.163_801e-2,
    -0.103_155_5e-1,
    0.228_296_7e-1,
    -0.289_531_2e-1,
    0.178_765_4e-1,
    -0.420_059e-2,
];

/// Exponentially scaled modified Bessel function `I0(x)·e^(-|x|)`.
#[must_use]
pub fn bessel_i0e(x: Scalar) -> Scalar {
    let ax = x.abs();
    if ax < 3.75 {
        let t = x / 3.75;
        poly(t * t, &I0_SMALL) * (-ax).exp()
    } else {
        poly(3.75 / ax, &I0_LARGE) / ax.sqrt()
    }
}

/// Exponentially scaled modified Bessel function `I1(x)·e^(-|x|)`.
#[must_use]
pub fn bessel_i1e(x: Scalar) -> Scalar {
    let ax = x.abs();
    let value = if ax < 3.75 {
        let t = x / 3.75;
        ax * poly(t * t, &I1_SMALL) * (-ax).exp()
    } else {
        poly(3.75 / ax, &I1_LARGE) / ax.sqrt()
    };
    if x < 0.0 {
        -value
    } else {
        value
    }
}

/// Modified Bessel function of the first kind, order 0.
#[must_use]
pub fn bessel_i0(x: Scalar) -> Scalar {
    bessel_i0e(x) * x.abs().exp()
}

/// Modified Bessel function of the first kind, order 1.
#[must_use]
pub fn bessel_i1(x: Scalar) -> Scalar {
    bessel_i1e(x) * x.abs().exp()
}

const K0_LARGE: [Scalar; 7] = [
    1.253_314_14,
    -0.783_235_8e-1,
    0.218_956_8e-1,
    -0.106_244_6e-1,
    0.587_872e-2,
    -0.251_540e-2,
    0.532_08e-3,
];
const K1_LARGE: [Scalar; 7] = [
    1.253_314_14,
    0.234_986_19,
    -0.365_562_0e-1,
    0.150_426_8e-1,
    -0.780_353e-2,
    0.325_614e-2,
    -0.682_45e-3,
];

/// Exponentially scaled modified Bessel function `K0(x)·e^x`. Returns `∞` for `x <= 0`.
#[must_use]
pub fn bessel_k0e(x: Scalar) -> Scalar {
    if x <= 0.0 {
        return Scalar::INFINITY;
    }
    if x <= 2.0 {
        let y = x * x / 4.0;
        let value = -(x / 2.0).ln() * bessel_i0(x)
            + poly(
                y,
                &[-0.577_215_66, 0.422_784_20, 0.230_697_56, 0.348_859_0e-1, 0.262_698e-2, 0.107_50e-3, 0.74e-5],
            );
        value * x.exp()
    } else {
        poly(2.0 / x, &K0_LARGE) / x.sqrt()
    }
}

/// Modified Bessel function of the second kind, order 0. Returns `∞` for `x <= 0`.
#[must_use]
pub fn bessel_k0(x: Scalar) -> Scalar {
    bessel_k0e(x) * (-x).exp()
}

/// Modified Bessel function of the second kind, order 1. Returns `∞` for `x <= 0`.
#[must_use]
pub fn bessel_k1(x: Scalar) -> Scalar {
    if x <= 0.0 {
        return Scalar::INFINITY;
    }
    if x <= 2.0 {
        let y = x * x / 4.0;
        (x / 2.0).ln() * bessel_i1(x)
            + poly(
                y,
                &[1.0, 0.154_431_44, -0.672_785_79, -0.181_568_97, -0.191_940_2e-1, -0.110_404e-2, -0.468_6e-4],
            ) / x
    } else {
        poly(2.0 / x, &K1_LARGE) * (-x).exp() / x.sqrt()
    }
}

/// Returns `I0(x)/I0(y)` for `0 <= x`, `0 <= y` without overflow.
#[must_use]
pub fn bessel_i0_ratio(x: Scalar, y: Scalar) -> Scalar {
    let denominator = bessel_i0e(y);
    if denominator <= 0.0 {
        return 0.0;
    }
    bessel_i0e(x) / denominator * (x.abs() - y.abs()).exp()
}

/// Returns `I1(x)/I0(x)`, which tends to 1 for large `x`.
#[must_use]
pub fn bessel_i1_over_i0(x: Scalar) -> Scalar {
    let i0e = bessel_i0e(x);
    if i0e <= 0.0 {
        return 0.0;
    }
    bessel_i1e(x) / i0e
}
