use crate::math::Scalar;

/// Conductor cross-section family.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Solid round wire.
    Round,
    /// Stranded litz wire, treated as round.
    Litz,
    /// Rectangular magnet wire.
    Rectangular,
    /// Foil conductor spanning most of the window height.
    Foil,
    /// PCB trace.
    Planar,
}

/// Conductor dimensions, all in meters.
///
/// For round wires `conducting_width` and `conducting_height` both hold the
/// conducting diameter and the outer values hold the insulated diameter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    /// Cross-section family.
    pub wire_type: WireType,
    /// Width of the copper.
    pub conducting_width: Scalar,
    /// Height of the copper.
    pub conducting_height: Scalar,
    /// Width including insulation.
    pub outer_width: Scalar,
    /// Height including insulation.
    pub outer_height: Scalar,
}

impl Wire {
    /// Round wire from its conducting and insulated diameters.
    #[must_use]
    pub const fn round(conducting_diameter: Scalar, outer_diameter: Scalar) -> Self {
        Self {
            wire_type: WireType::Round,
            conducting_width: conducting_diameter,
            conducting_height: conducting_diameter,
            outer_width: outer_diameter,
            outer_height: outer_diameter,
        }
    }

    /// Litz bundle from its equivalent conducting and outer diameters.
    #[must_use]
    pub const fn litz(conducting_diameter: Scalar, outer_diameter: Scalar) -> Self {
        Self {
            wire_type: WireType::Litz,
            ..Self::round(conducting_diameter, outer_diameter)
        }
    }

    /// Rectangular wire.
    #[must_use]
    pub const fn rectangular(
        conducting_width: Scalar,
        conducting_height: Scalar,
        outer_width: Scalar,
        outer_height: Scalar,
    ) -> Self {
        Self {
            wire_type: WireType::Rectangular,
            conducting_width,
            conducting_height,
            outer_width,
            outer_height,
        }
    }

    /// Foil conductor.
    #[must_use]
    pub const fn foil(conducting_width: Scalar, conducting_height: Scalar) -> Self {
        Self {
            wire_type: WireType::Foil,
            conducting_width,
            conducting_height,
            outer_width: conducting_width,
            outer_height: conducting_height,
        }
    }

    /// Planar trace.
    #[must_use]
    pub const fn planar(conducting_width: Scalar, conducting_height: Scalar) -> Self {
        Self {
            wire_type: WireType::Planar,
            conducting_width,
            conducting_height,
            outer_width: conducting_width,
            outer_height: conducting_height,
        }
    }

    /// Returns `true` for round and litz conductors.
    #[must_use]
    pub const fn is_round(&self) -> bool {
        matches!(self.wire_type, WireType::Round | WireType::Litz)
    }

    /// Returns `true` if `offset` from the conductor centre lies inside its insulation.
    #[must_use]
    pub fn contains(&self, dx: Scalar, dy: Scalar) -> bool {
        if self.is_round() {
            dx.hypot(dy) < self.outer_width / 2.0
        } else {
            dx.abs() < self.outer_width / 2.0 && dy.abs() < self.outer_height / 2.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_follows_cross_section() {
        let round = Wire::round(1.0e-3, 1.1e-3);
        assert!(round.contains(0.3e-3, 0.3e-3));
        assert!(!round.contains(0.5e-3, 0.5e-3));

        let rectangular = Wire::rectangular(2.0e-3, 1.0e-3, 2.1e-3, 1.1e-3);
        assert!(rectangular.contains(1.0e-3, 0.5e-3));
        assert!(!rectangular.is_round());
    }
}
