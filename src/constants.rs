//! Physical constants and numerical guards shared by the field models.
//!
//! ## References
//!
//! - CODATA 2018 recommended values (NIST, published May 2019).
//! - Copper resistivity at 20 °C and its temperature coefficient follow IEC 60028.

use std::f64::consts::PI;

/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
/// Resistivity of annealed copper at 20 °C in ohm-meters (Ω·m).
pub const COPPER_RESISTIVITY_20C: f64 = 1.724_1e-8;
/// Linear temperature coefficient of copper resistivity (1/K) around 20 °C.
pub const COPPER_TEMPERATURE_COEFFICIENT: f64 = 0.003_93;
/// Default ambient temperature in degrees Celsius.
pub const DEFAULT_AMBIENT_TEMPERATURE: f64 = 25.0;

/// Upper clamp applied to the elliptic modulus `k` of a current loop.
pub const MAX_ELLIPTIC_MODULUS: f64 = 0.999_999;
/// Radii below this value are treated as lying on the symmetry axis.
pub const AXIS_TOLERANCE: f64 = 1.0e-10;
/// Gap heights below this value are treated as the uniform-field limit.
pub const MINIMUM_GAP_HEIGHT: f64 = 1.0e-6;
/// Skin depth used when no frequency information is available (m).
pub const UNBOUNDED_SKIN_DEPTH: f64 = 1.0e9;

/// Returns the resistivity of copper at `temperature` degrees Celsius.
#[inline]
#[must_use]
pub fn copper_resistivity(temperature: f64) -> f64 {
    COPPER_RESISTIVITY_20C * (1.0 + COPPER_TEMPERATURE_COEFFICIENT * (temperature - 20.0))
}

/// Returns the skin depth δ = √(ρ / (π f μ₀)) of copper in meters.
///
/// Non-positive frequencies return [`UNBOUNDED_SKIN_DEPTH`].
#[must_use]
pub fn skin_depth(frequency: f64, temperature: f64) -> f64 {
    if frequency <= 0.0 {
        return UNBOUNDED_SKIN_DEPTH;
    }
    (copper_resistivity(temperature) / (PI * frequency * VACUUM_PERMEABILITY)).sqrt()
}
