use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::math::Scalar;

/// Sample points of one harmonic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Harmonic frequency in hertz.
    pub frequency: Scalar,
    /// Points of the field.
    pub data: Vec<FieldPoint>,
}

impl Field {
    /// Creates a field at `frequency`.
    #[must_use]
    pub fn new(frequency: Scalar, data: Vec<FieldPoint>) -> Self {
        Self { frequency, data }
    }
}

/// Computed H values of one harmonic, aligned with the induced points.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexField {
    /// Harmonic frequency in hertz.
    pub frequency: Scalar,
    /// One value per induced point.
    pub data: Vec<ComplexFieldPoint>,
}

/// Provenance of a result.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOrigin {
    /// Computed by this crate.
    Simulation,
    /// Measured externally.
    Measurement,
}

/// One field map per processed harmonic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct WindingWindowMagneticStrengthFieldOutput {
    /// Field maps ordered by harmonic index.
    pub field_per_frequency: Vec<ComplexField>,
    /// Name of the near-field model used.
    pub method_used: String,
    /// Provenance of the result.
    pub origin: ResultOrigin,
}

impl WindingWindowMagneticStrengthFieldOutput {
    /// Returns the field map whose frequency equals `frequency`.
    #[must_use]
    pub fn at_frequency(&self, frequency: Scalar) -> Option<&ComplexField> {
        self.field_per_frequency
            .iter()
            .find(|field| (field.frequency - frequency).abs() <= 1.0e-9 * frequency.abs().max(1.0))
    }
}
