//! Field primitives: sample points, harmonic field values, and field maps.

mod map;
mod point;

pub use map::{ComplexField, Field, ResultOrigin, WindingWindowMagneticStrengthFieldOutput};
pub use point::{ComplexFieldPoint, FieldPoint, MeshLabel};
