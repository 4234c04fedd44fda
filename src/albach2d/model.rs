//! Memoised Albach 2-D model of a magnetic component.
//!
//! [`Albach2DModel`] keeps the geometry and turns derived from a
//! [`Magnetic`] and re-solves the expansion only when they change.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::albach2d::geometry::{Albach2DCoreGeometry, Albach2DTurnPosition};
use crate::albach2d::solution::Albach2DSolution;
use crate::albach2d::solver::{self, AirCoil};
use crate::component::{GapType, Magnetic, Wire};
use crate::constants::UNBOUNDED_SKIN_DEPTH;
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{ComplexFieldPoint, FieldPoint};
use crate::math::Scalar;
use crate::strength::MagneticFieldStrengthModel;

/// Default number of expansion terms.
pub const DEFAULT_TERMS: usize = 10;

#[derive(Debug, Clone)]
struct CachedSolution {
    key: u64,
    solution: Albach2DSolution,
    air_coil: AirCoil,
}

/// Near-field model backed by the axisymmetric boundary-value solution.
///
/// The model holds one geometry and one set of turns. The solution is
/// memoised on a hash of both, so changing the geometry, the turns, their
/// currents or their skin depths leads to a fresh solve on the next
/// evaluation.
#[derive(Debug, Clone)]
pub struct Albach2DModel {
    geometry: Option<Albach2DCoreGeometry>,
    turns: Vec<Albach2DTurnPosition>,
    n_max: usize,
    m_max: usize,
    cache: Option<CachedSolution>,
}

impl Default for Albach2DModel {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS, DEFAULT_TERMS)
    }
}

impl Albach2DModel {
    /// Empty model solving with `n_max` winding and `m_max` gap terms.
    #[must_use]
    pub const fn new(n_max: usize, m_max: usize) -> Self {
        Self {
            geometry: None,
            turns: Vec::new(),
            n_max,
            m_max,
            cache: None,
        }
    }

    /// Builds geometry and unit-current turns from a magnetic component.
    ///
    /// Concentric cores map to `a = column/2`, `b = a + window width`,
    /// `c = window height/2`; subtractive and additive gaps of the central
    /// column become gap regions. Toroids have no column (`a = 0`).
    pub fn from_magnetic(magnetic: &Magnetic, n_max: usize, m_max: usize) -> Result<Self> {
        let core = &magnetic.core;
        let window = core.winding_window;
        let mut geometry = if core.is_toroidal() {
            Albach2DCoreGeometry::toroidal(window.width, window.height / 2.0, core.initial_permeability)
        } else {
            let a = core.column_width / 2.0;
            Albach2DCoreGeometry::new(a, a + window.width, window.height / 2.0, core.initial_permeability)
        };
        if !core.is_toroidal() {
            for gap in core.central_gaps().filter(|gap| gap.gap_type != GapType::Residual) {
                let z_center = gap.coordinates.map_or(0.0, |coordinates| coordinates.y);
                geometry.add_gap(gap.length, z_center);
            }
        }

        let turns = magnetic
            .coil
            .turns
            .iter()
            .enumerate()
            .map(|(index, turn)| {
                let wire = &magnetic.coil.winding_of(turn)?.wire;
                Ok(turn_position(index, turn.coordinates.x, turn.coordinates.y, 1.0, Some(wire)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut model = Self::new(n_max, m_max);
        model.set_core_geometry(geometry);
        model.set_turns(turns);
        Ok(model)
    }

    /// Replaces the geometry; the cached solution becomes stale.
    pub fn set_core_geometry(&mut self, mut geometry: Albach2DCoreGeometry) {
        geometry.compute_derived_values();
        self.geometry = Some(geometry);
    }

    /// Replaces the turns; the cached solution becomes stale.
    pub fn set_turns(&mut self, turns: Vec<Albach2DTurnPosition>) {
        self.turns = turns;
    }

    /// Sets the current of every turn, in turn order.
    pub fn update_turn_currents(&mut self, currents: &[Scalar]) -> Result<()> {
        if currents.len() != self.turns.len() {
            return Err(MagneticFieldError::InvalidInput(format!(
                "expected {} turn currents, got {}",
                self.turns.len(),
                currents.len()
            )));
        }
        for (turn, current) in self.turns.iter_mut().zip(currents) {
            turn.current = *current;
        }
        Ok(())
    }

    /// Sets the skin depth of every turn.
    pub fn update_skin_depths(&mut self, skin_depth: Scalar) {
        for turn in &mut self.turns {
            turn.skin_depth = skin_depth;
        }
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> Option<&Albach2DCoreGeometry> {
        self.geometry.as_ref()
    }

    /// Current turns.
    #[must_use]
    pub fn turns(&self) -> &[Albach2DTurnPosition] {
        &self.turns
    }

    /// Returns `true` if the cached solution matches the current state.
    #[must_use]
    pub fn is_solution_valid(&self) -> bool {
        self.cache.as_ref().is_some_and(|cache| cache.key == self.memo_key())
    }

    /// Cached solution, if it is up to date.
    #[must_use]
    pub fn solution(&self) -> Option<&Albach2DSolution> {
        if self.is_solution_valid() {
            self.cache.as_ref().map(|cache| &cache.solution)
        } else {
            None
        }
    }

    /// Solves unconditionally.
    pub fn pre_solve(&mut self) -> Result<&Albach2DSolution> {
        let geometry = self.geometry.as_ref().ok_or_else(|| {
            MagneticFieldError::InvalidInput("Albach2D model needs a core geometry before solving".into())
        })?;
        let solution = solver::solve(geometry, &self.turns, self.n_max, self.m_max)?;
        let air_coil = AirCoil::new(geometry, &self.turns);
        let key = self.memo_key();
        Ok(&self
            .cache
            .insert(CachedSolution {
                key,
                solution,
                air_coil,
            })
            .solution)
    }

    /// Solves only if the geometry, turns or currents changed since the last solve.
    pub fn ensure_solution_valid(&mut self) -> Result<&Albach2DSolution> {
        if !self.is_solution_valid() {
            if self.cache.is_some() {
                debug!("Albach2D inputs changed, re-solving");
            }
            return self.pre_solve();
        }
        self.cache
            .as_ref()
            .map(|cache| &cache.solution)
            .ok_or_else(|| MagneticFieldError::InvalidInput("Albach2D model has no cached solution".into()))
    }

    /// H at `induced` due to every turn, gaps included.
    pub fn calculate_total_field_at_point(&mut self, induced: &FieldPoint) -> Result<ComplexFieldPoint> {
        self.ensure_solution_valid()?;
        let (geometry, cache) = match (&self.geometry, &self.cache) {
            (Some(geometry), Some(cache)) => (geometry, cache),
            _ => {
                return Err(MagneticFieldError::InvalidInput(
                    "Albach2D model has no solution to evaluate".into(),
                ))
            }
        };
        let r = induced.x().abs();
        let z = induced.y();
        let (h_r, h_z) = solver::magnetic_field_with(&cache.solution, geometry, &cache.air_coil, r, z)?;
        trace!(r, z, h_r, h_z, "Albach2D field");
        if h_r.is_nan() || h_z.is_nan() {
            return Err(MagneticFieldError::NaNResult("Albach2D magnetic field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, h_r, h_z))
    }

    fn memo_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.n_max.hash(&mut hasher);
        self.m_max.hash(&mut hasher);
        if let Some(geometry) = &self.geometry {
            for value in [geometry.a, geometry.b, geometry.c, geometry.core_permeability] {
                value.to_bits().hash(&mut hasher);
            }
            geometry.is_toroidal.hash(&mut hasher);
            geometry.use_image_currents.hash(&mut hasher);
            for gap in &geometry.gaps {
                gap.length.to_bits().hash(&mut hasher);
                gap.z_center.to_bits().hash(&mut hasher);
            }
        }
        for turn in &self.turns {
            for value in [turn.r, turn.z, turn.current, turn.width, turn.height, turn.skin_depth] {
                value.to_bits().hash(&mut hasher);
            }
            turn.turn_index.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Solver turn for a conductor centred at `(x, y)`.
///
/// Non-round wires are given their conducting cross-section so they are
/// subdivided into filaments.
#[must_use]
pub fn turn_position(
    turn_index: usize,
    x: Scalar,
    y: Scalar,
    current: Scalar,
    wire: Option<&Wire>,
) -> Albach2DTurnPosition {
    let turn = Albach2DTurnPosition::new(turn_index, x.abs(), y, current);
    match wire {
        Some(wire) if !wire.is_round() => turn.with_cross_section(wire.conducting_width, wire.conducting_height),
        _ => turn,
    }
}

impl MagneticFieldStrengthModel for Albach2DModel {
    fn name(&self) -> &'static str {
        "Albach2D"
    }

    /// Loop field of the inducing conductor alone, treated as a circular
    /// filament (or 3×3 filaments for non-round wire) about the core axis.
    /// Gap effects need [`Albach2DModel::calculate_total_field_at_point`].
    fn magnetic_field_strength_between_two_points(
        &self,
        inducing: &FieldPoint,
        induced: &FieldPoint,
        wire: Option<&Wire>,
    ) -> Result<ComplexFieldPoint> {
        let mut turn = turn_position(0, inducing.x(), inducing.y(), inducing.value, wire);
        turn.skin_depth = UNBOUNDED_SKIN_DEPTH;
        let r = induced.x().abs();
        let z = induced.y();
        let (h_r, h_z) = turn
            .filaments()
            .iter()
            .map(|filament| solver::circular_filament_field(filament.current, filament.r, filament.z, r, z))
            .fold((0.0, 0.0), |(sum_r, sum_z), (h_r, h_z)| (sum_r + h_r, sum_z + h_z));
        if h_r.is_nan() || h_z.is_nan() {
            return Err(MagneticFieldError::NaNResult("Albach2D loop field".into()));
        }
        Ok(ComplexFieldPoint::at(induced, h_r, h_z))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::test_support::{gapped_concentric_magnetic, toroidal_magnetic};

    #[test]
    fn solution_is_memoised_until_currents_change() {
        let magnetic = gapped_concentric_magnetic(6);
        let mut model = Albach2DModel::from_magnetic(&magnetic, 6, 6).unwrap();
        assert!(!model.is_solution_valid());
        assert!(model.solution().is_none());

        let first = model.ensure_solution_valid().unwrap().clone();
        assert!(model.is_solution_valid());

        model.update_turn_currents(&[1.0; 6]).unwrap();
        assert!(model.is_solution_valid());

        model.update_turn_currents(&[2.0; 6]).unwrap();
        assert!(!model.is_solution_valid());
        let second = model.ensure_solution_valid().unwrap();
        assert_relative_eq!(second.c2n[0], 2.0 * first.c2n[0], max_relative = 1.0e-9);
    }

    #[test]
    fn skin_depth_changes_force_a_new_solve() {
        let mut model = Albach2DModel::from_magnetic(&gapped_concentric_magnetic(4), 4, 4).unwrap();
        model.pre_solve().unwrap();
        model.update_skin_depths(0.2e-3);
        assert!(!model.is_solution_valid());
    }

    #[test]
    fn mismatched_current_count_is_rejected() {
        let mut model = Albach2DModel::from_magnetic(&gapped_concentric_magnetic(4), 4, 4).unwrap();
        assert!(model.update_turn_currents(&[1.0; 3]).is_err());
    }

    #[test]
    fn solving_without_geometry_fails() {
        let mut model = Albach2DModel::default();
        assert!(model.pre_solve().is_err());
    }

    #[test]
    fn geometry_follows_the_core() {
        let magnetic = gapped_concentric_magnetic(4);
        let model = Albach2DModel::from_magnetic(&magnetic, 4, 4).unwrap();
        let geometry = model.geometry().unwrap();
        assert_relative_eq!(geometry.a, magnetic.core.column_width / 2.0);
        assert_relative_eq!(geometry.b - geometry.a, magnetic.core.winding_window.width);
        assert_relative_eq!(geometry.c, magnetic.core.winding_window.height / 2.0);
        assert_eq!(geometry.gaps.len(), 1);
        assert_eq!(model.turns().len(), 4);
    }

    #[test]
    fn toroid_evaluates_without_a_column() {
        let magnetic = toroidal_magnetic(4);
        let mut model = Albach2DModel::from_magnetic(&magnetic, 4, 4).unwrap();
        let geometry = model.geometry().unwrap();
        assert!(geometry.is_toroidal);
        assert_relative_eq!(geometry.a, 0.0);

        let field = model.calculate_total_field_at_point(&FieldPoint::new(2.0e-3, 0.0)).unwrap();
        assert!(!field.is_nan());
        assert!(model.solution().unwrap().has_zero_expansion());
    }

    #[test]
    fn gap_field_reaches_the_lumped_value() {
        let magnetic = gapped_concentric_magnetic(10);
        let mut model = Albach2DModel::from_magnetic(&magnetic, 10, 10).unwrap();
        model.update_turn_currents(&[1.0; 10]).unwrap();
        let gap_length = magnetic.core.gapping[0].length;
        let inside_gap = FieldPoint::new(magnetic.core.column_width / 4.0, 0.0);
        let field = model.calculate_total_field_at_point(&inside_gap).unwrap();
        assert_relative_eq!(field.imaginary, 10.0 / gap_length, max_relative = 0.05);
    }

    #[test]
    fn pairwise_query_is_a_loop_field() {
        let model = Albach2DModel::default();
        let inducing = FieldPoint::new(10.0e-3, 0.0).with_value(1.0);
        let left = model
            .magnetic_field_strength_between_two_points(&inducing, &FieldPoint::new(9.0e-3, 0.0), None)
            .unwrap();
        let right = model
            .magnetic_field_strength_between_two_points(&inducing, &FieldPoint::new(11.0e-3, 0.0), None)
            .unwrap();
        assert!(left.imaginary > 0.0);
        assert!(right.imaginary < 0.0);
        assert_relative_eq!(left.real, 0.0, epsilon = 1.0e-9);

        let foil = Wire::foil(0.1e-3, 10.0e-3);
        let spread = model
            .magnetic_field_strength_between_two_points(&inducing, &FieldPoint::new(9.0e-3, 0.0), Some(&foil))
            .unwrap();
        assert!(spread.imaginary > 0.0);
    }
}
