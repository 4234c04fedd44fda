//! Albach's two-dimensional boundary-value model of a gapped axisymmetric core.
//!
//! [`solver::solve`] computes the expansion coefficients once per geometry
//! and excitation; [`Albach2DModel`] memoises that solution and evaluates H
//! anywhere in the window.

mod geometry;
mod model;
mod solution;
pub mod solver;

pub use self::geometry::{Albach2DCoreGeometry, Albach2DGap, Albach2DTurnPosition, Filament};
pub use self::model::{turn_position, Albach2DModel, DEFAULT_TERMS};
pub use self::solution::{Albach2DGapSolution, Albach2DSolution};
pub use self::solver::AirCoil;
