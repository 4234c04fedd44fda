//! Convenience re-exports for computing winding-window fields.

pub use crate::albach2d::{Albach2DCoreGeometry, Albach2DModel, Albach2DSolution, Albach2DTurnPosition};
pub use crate::component::{
    Coil, Core, CoreGap, CoreShapeFamily, GapType, Magnetic, Turn, Winding, WindingWindow, Wire, WireType,
};
pub use crate::config::{FringingEffectModels, MagneticFieldConfig, MagneticFieldStrengthModels};
pub use crate::constants::{skin_depth, VACUUM_PERMEABILITY};
pub use crate::errors::MagneticFieldError;
pub use crate::excitation::{Excitation, Harmonics, OperatingPoint};
pub use crate::fields::{
    ComplexField, ComplexFieldPoint, Field, FieldPoint, MeshLabel, ResultOrigin,
    WindingWindowMagneticStrengthFieldOutput,
};
pub use crate::fringing::{FringingEffectModel, FringingQueryMode};
pub use crate::magnetic_field::{magnetic_field_strength_gap, turn_currents, MagneticField};
pub use crate::math::{Scalar, R2};
pub use crate::mesher::{CoilMesher, MesherKind};
pub use crate::strength::MagneticFieldStrengthModel;
