//! Axisymmetric winding-window geometry and turn filaments for the Albach solver.

use crate::constants::AXIS_TOLERANCE;
use crate::math::Scalar;

/// One air gap cut into the central column.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Albach2DGap {
    /// Gap length (m).
    pub length: Scalar,
    /// Axial position of the gap centre (m).
    pub z_center: Scalar,
    /// Lower gap face, derived from `length` and `z_center`.
    pub z_lower: Scalar,
    /// Upper gap face, derived from `length` and `z_center`.
    pub z_upper: Scalar,
}

impl Albach2DGap {
    /// Gap of `length` centred at `z_center`, with its faces already derived.
    #[must_use]
    pub fn new(length: Scalar, z_center: Scalar) -> Self {
        let mut gap = Self {
            length,
            z_center,
            z_lower: 0.0,
            z_upper: 0.0,
        };
        gap.compute_derived_values();
        gap
    }

    /// Recomputes the face positions after `length` or `z_center` changed.
    pub fn compute_derived_values(&mut self) {
        self.z_lower = self.z_center - self.length / 2.0;
        self.z_upper = self.z_center + self.length / 2.0;
    }

    /// Distance between the faces.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.z_upper - self.z_lower
    }

    /// Returns `true` if `z` lies between the faces.
    #[inline]
    #[must_use]
    pub fn contains(&self, z: Scalar) -> bool {
        z >= self.z_lower && z <= self.z_upper
    }
}

/// Winding window of an axisymmetric core.
///
/// The window spans `r ∈ [a, b]`, `z ∈ [-c, c]`. Toroids have no central
/// column, so `a = 0` and `b` is the inner radius of the ring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Albach2DCoreGeometry {
    /// Radius of the central column (m).
    pub a: Scalar,
    /// Radius of the outer core wall (m).
    pub b: Scalar,
    /// Half-height of the window (m).
    pub c: Scalar,
    /// Relative permeability of the core material.
    pub core_permeability: Scalar,
    /// Toroidal core.
    pub is_toroidal: bool,
    /// Adds an image loop at `b²/r0` for every turn of a toroid.
    pub use_image_currents: bool,
    /// Gaps of the central column, ordered by position.
    pub gaps: Vec<Albach2DGap>,
}

impl Albach2DCoreGeometry {
    /// Ungapped concentric window.
    #[must_use]
    pub fn new(a: Scalar, b: Scalar, c: Scalar, core_permeability: Scalar) -> Self {
        Self {
            a,
            b,
            c,
            core_permeability,
            is_toroidal: false,
            use_image_currents: true,
            gaps: Vec::new(),
        }
    }

    /// Toroidal window with no central column.
    #[must_use]
    pub fn toroidal(b: Scalar, c: Scalar, core_permeability: Scalar) -> Self {
        Self {
            is_toroidal: true,
            ..Self::new(0.0, b, c, core_permeability)
        }
    }

    /// Appends a gap of `length` centred at `z_center`.
    #[must_use]
    pub fn with_gap(mut self, length: Scalar, z_center: Scalar) -> Self {
        self.add_gap(length, z_center);
        self
    }

    /// Appends a gap; faces are derived immediately.
    pub fn add_gap(&mut self, length: Scalar, z_center: Scalar) {
        self.gaps.push(Albach2DGap::new(length, z_center));
        self.gaps.sort_by(|lhs, rhs| lhs.z_center.total_cmp(&rhs.z_center));
    }

    /// Recomputes every gap's faces. Must run after mutating `gaps` in place.
    pub fn compute_derived_values(&mut self) {
        for gap in &mut self.gaps {
            gap.compute_derived_values();
        }
    }

    /// Returns `true` if the first gap has a non-negligible length.
    #[must_use]
    pub fn has_gaps(&self) -> bool {
        self.gaps.first().is_some_and(|gap| gap.length > AXIS_TOLERANCE)
    }

    /// Sum of all gap lengths.
    #[must_use]
    pub fn total_gap_length(&self) -> Scalar {
        self.gaps.iter().map(|gap| gap.length).sum()
    }

    /// Returns `true` when the window has a central column.
    #[inline]
    #[must_use]
    pub fn has_column(&self) -> bool {
        self.a > AXIS_TOLERANCE
    }
}

/// A turn as seen by the axisymmetric solver.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Albach2DTurnPosition {
    /// Radial position of the conductor centre (m).
    pub r: Scalar,
    /// Axial position of the conductor centre (m).
    pub z: Scalar,
    /// Current amplitude (A).
    pub current: Scalar,
    /// Index of the turn in the coil.
    pub turn_index: usize,
    /// Radial extent of a rectangular cross-section; zero for round conductors.
    pub width: Scalar,
    /// Axial extent of a rectangular cross-section; zero for round conductors.
    pub height: Scalar,
    /// Skin depth at the current frequency (m).
    pub skin_depth: Scalar,
}

/// One circular current loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filament {
    /// Loop radius (m).
    pub r: Scalar,
    /// Loop height (m).
    pub z: Scalar,
    /// Loop current (A).
    pub current: Scalar,
}

/// Filaments per side used to subdivide rectangular conductors.
const SUBDIVISIONS: usize = 3;

impl Albach2DTurnPosition {
    /// Round-conductor turn carrying `current`.
    #[must_use]
    pub const fn new(turn_index: usize, r: Scalar, z: Scalar, current: Scalar) -> Self {
        Self {
            r,
            z,
            current,
            turn_index,
            width: 0.0,
            height: 0.0,
            skin_depth: crate::constants::UNBOUNDED_SKIN_DEPTH,
        }
    }

    /// Gives the turn a rectangular cross-section.
    #[must_use]
    pub const fn with_cross_section(mut self, width: Scalar, height: Scalar) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Returns `true` when the turn is subdivided into filaments.
    #[inline]
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        self.width > AXIS_TOLERANCE && self.height > AXIS_TOLERANCE
    }

    /// Current loops representing this turn.
    ///
    /// Rectangular turns become a 3×3 grid whose currents are weighted by
    /// `exp(-d/δ)`, `d` being the distance of a filament to the nearest edge,
    /// so the current crowds towards the surface when δ is small. The weights
    /// are normalised to the turn current.
    #[must_use]
    pub fn filaments(&self) -> Vec<Filament> {
        if !self.is_rectangular() {
            return vec![Filament {
                r: self.r,
                z: self.z,
                current: self.current,
            }];
        }

        let divisions = SUBDIVISIONS as Scalar;
        let mut filaments = Vec::with_capacity(SUBDIVISIONS * SUBDIVISIONS);
        let mut total_weight = 0.0;
        for ir in 0..SUBDIVISIONS {
            for iz in 0..SUBDIVISIONS {
                let fr = (ir as Scalar + 0.5) / divisions;
                let fz = (iz as Scalar + 0.5) / divisions;
                let r = self.r - self.width / 2.0 + self.width * fr;
                let z = self.z - self.height / 2.0 + self.height * fz;
                let edge_distance = (self.width * fr.min(1.0 - fr)).min(self.height * fz.min(1.0 - fz));
                let weight = if self.skin_depth > 0.0 {
                    (-edge_distance / self.skin_depth).exp()
                } else {
                    1.0
                };
                total_weight += weight;
                filaments.push(Filament { r, z, current: weight });
            }
        }
        for filament in &mut filaments {
            filament.current *= self.current / total_weight;
        }
        filaments.retain(|filament| filament.r >= AXIS_TOLERANCE);
        filaments
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn gap_faces_follow_length_and_centre() {
        let mut geometry = Albach2DCoreGeometry::new(5.0e-3, 10.0e-3, 8.0e-3, 2000.0).with_gap(1.0e-3, 0.0);
        assert!(geometry.has_gaps());
        assert_relative_eq!(geometry.gaps[0].z_lower, -0.5e-3);
        assert_relative_eq!(geometry.gaps[0].height(), 1.0e-3);

        geometry.gaps[0].z_center = 2.0e-3;
        geometry.compute_derived_values();
        assert_relative_eq!(geometry.gaps[0].z_upper, 2.5e-3);
    }

    #[test]
    fn distributed_gaps_are_ordered_and_summed() {
        let geometry = Albach2DCoreGeometry::new(5.0e-3, 10.0e-3, 8.0e-3, 2000.0)
            .with_gap(0.5e-3, 4.0e-3)
            .with_gap(0.5e-3, -4.0e-3)
            .with_gap(0.5e-3, 0.0);
        let centres: Vec<_> = geometry.gaps.iter().map(|gap| gap.z_center).collect();
        assert_eq!(centres, vec![-4.0e-3, 0.0, 4.0e-3]);
        assert_relative_eq!(geometry.total_gap_length(), 1.5e-3);
    }

    #[test]
    fn ungapped_geometry_has_no_gaps() {
        let geometry = Albach2DCoreGeometry::toroidal(10.0e-3, 10.0e-3, 2000.0);
        assert!(!geometry.has_gaps());
        assert!(!geometry.has_column());
        assert!(geometry.is_toroidal);
    }

    #[test]
    fn round_turn_is_a_single_filament() {
        let filaments = Albach2DTurnPosition::new(0, 6.0e-3, 0.0, 2.0).filaments();
        assert_eq!(filaments.len(), 1);
        assert_relative_eq!(filaments[0].current, 2.0);
    }

    #[test]
    fn rectangular_turn_splits_current_uniformly_at_low_frequency() {
        let turn = Albach2DTurnPosition::new(0, 6.0e-3, 0.0, 9.0).with_cross_section(1.0e-3, 2.0e-3);
        let filaments = turn.filaments();
        assert_eq!(filaments.len(), 9);
        for filament in &filaments {
            assert_relative_eq!(filament.current, 1.0, max_relative = 1.0e-9);
        }
    }

    #[test]
    fn small_skin_depth_crowds_current_to_the_edges() {
        let mut turn = Albach2DTurnPosition::new(0, 6.0e-3, 0.0, 9.0).with_cross_section(1.0e-3, 1.0e-3);
        turn.skin_depth = 0.1e-3;
        let filaments = turn.filaments();
        let total: Scalar = filaments.iter().map(|filament| filament.current).sum();
        assert_relative_eq!(total, 9.0, max_relative = 1.0e-12);

        let centre = filaments
            .iter()
            .find(|filament| (filament.r - 6.0e-3).abs() < 1.0e-12 && filament.z.abs() < 1.0e-12)
            .unwrap();
        let corner = filaments[0];
        assert!(corner.current > centre.current);
    }
}
