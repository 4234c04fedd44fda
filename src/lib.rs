#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and numerical guards.
pub mod constants;
/// Scalar aliases and small numerical helpers.
pub mod math;
/// Error types shared between modules.
pub mod errors;
/// Elliptic integrals and Bessel functions.
pub mod special;
/// Numerical integration.
pub mod quadrature;
/// Field points, field maps and result containers.
pub mod fields;
/// Core, coil and wire data model.
pub mod component;
/// Operating-point excitations and harmonic selection.
pub mod excitation;
/// Immutable computation settings.
pub mod config;
/// Inducing and induced point generation.
pub mod mesher;
/// Near-field conductor models.
pub mod strength;
/// Gap fringing models.
pub mod fringing;
/// Axisymmetric boundary-value solution of the winding window.
pub mod albach2d;
/// Field-map orchestration.
pub mod magnetic_field;

/// Common exports for downstream crates.
pub mod prelude;

#[cfg(test)]
mod test_support;

pub use magnetic_field::MagneticField;
