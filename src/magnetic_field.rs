//! Winding-window field maps.
//!
//! [`MagneticField`] turns an operating point and a magnetic component into
//! one H map per processed harmonic: per-turn currents are derived from the
//! winding excitations, the coil is meshed, and the near-field model is
//! superposed over every inducing/induced pair. Gap fringing is added at the
//! primary excitation frequency.

use tracing::{debug, debug_span, trace};

use crate::albach2d::Albach2DModel;
use crate::component::{CoreGap, Magnetic, Wire};
use crate::config::{MagneticFieldConfig, MagneticFieldStrengthModels};
use crate::constants::skin_depth;
use crate::errors::{MagneticFieldError, Result};
use crate::excitation::OperatingPoint;
use crate::fields::{ComplexField, ComplexFieldPoint, Field, FieldPoint, ResultOrigin, WindingWindowMagneticStrengthFieldOutput};
use crate::fringing::{self, FringingEffectModel, FringingQueryMode};
use crate::math::Scalar;
use crate::mesher::{CoilMesher, MesherKind};
use crate::strength::{self, BinnsLawrensonModel, MagneticFieldStrengthModel};

/// Computes winding-window field maps with the models selected in the
/// [`MagneticFieldConfig`] of each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagneticField;

/// Near-field and fringing models resolved from one config.
struct Models {
    strength_model: MagneticFieldStrengthModels,
    strength: Box<dyn MagneticFieldStrengthModel>,
    fringing: Box<dyn FringingEffectModel>,
}

/// Gap sources active for one harmonic.
enum GapSources<'a> {
    Equivalent(Vec<FieldPoint>),
    Direct { gaps: Vec<&'a CoreGap>, h_gap: Scalar },
}

impl MagneticField {
    /// H field maps of `magnetic` under `operating_point`.
    ///
    /// Without `induced_field` the field is evaluated at the turns (their
    /// centres, or their edge midpoints for the Wang model) for every main
    /// harmonic. With it, only the harmonic at `induced_field.frequency` is
    /// processed, at the given points. Each output map has one value per
    /// induced point, in input order.
    pub fn calculate_magnetic_field_strength_field(
        &self,
        operating_point: &OperatingPoint,
        magnetic: &Magnetic,
        induced_field: Option<&Field>,
        config: &MagneticFieldConfig,
    ) -> Result<WindingWindowMagneticStrengthFieldOutput> {
        let _span = debug_span!(
            "magnetic_field_strength_field",
            model = ?config.strength_model,
            fringing = ?config.fringing_model,
            turns = magnetic.coil.turns.len()
        )
        .entered();

        let windings = magnetic.coil.windings.len();
        if operating_point.excitations_per_winding.len() < windings {
            return Err(MagneticFieldError::InvalidInput(format!(
                "{} excitations for {} windings",
                operating_point.excitations_per_winding.len(),
                windings
            )));
        }
        operating_point.validate()?;
        let directions = current_directions(operating_point, windings, config)?;
        let harmonics = match induced_field {
            Some(field) => vec![harmonic_index_at(operating_point, field.frequency)?],
            None => operating_point.common_harmonic_indexes(config.harmonic_amplitude_threshold),
        };
        if harmonics.is_empty() {
            return Err(MagneticFieldError::InvalidInput("no harmonic above the amplitude threshold".into()));
        }

        let models = Models::from_config(config);
        let kind = if models.strength_model == MagneticFieldStrengthModels::Wang {
            MesherKind::Wang
        } else {
            MesherKind::Center
        };
        let mesher = CoilMesher::new(magnetic).with_image_order(config.image_order()).with_kind(kind);
        let induced = match induced_field {
            Some(field) => field.data.clone(),
            None => mesher.induced_points()?,
        };
        if induced.is_empty() {
            return Err(MagneticFieldError::InvalidInput("no induced points to evaluate".into()));
        }

        let mut albach = if models.strength_model == MagneticFieldStrengthModels::Albach2D {
            let (n_max, m_max) = config.albach_terms;
            Some(Albach2DModel::from_magnetic(magnetic, n_max, m_max)?)
        } else {
            None
        };

        let primary_frequency = operating_point.primary()?.frequency;
        let mut field_per_frequency = Vec::with_capacity(harmonics.len());
        for index in harmonics {
            let frequency = operating_point
                .harmonic_frequency(index)
                .filter(|&frequency| frequency > 0.0)
                .ok_or_else(|| MagneticFieldError::InvalidInput(format!("harmonic {index} has no positive frequency")))?;
            let currents = turn_currents(operating_point, magnetic, index, &directions)?;
            trace!(index, frequency, "processing harmonic");

            let gap_sources = if config.include_fringing && same_frequency(frequency, primary_frequency) {
                Some(models.gap_sources(operating_point, magnetic, index)?)
            } else {
                None
            };

            let data = match albach.as_mut() {
                Some(model) => {
                    model.update_turn_currents(&currents)?;
                    model.update_skin_depths(skin_depth(frequency, config.temperature));
                    models.albach_field(model, magnetic, &induced, gap_sources.as_ref())?
                }
                None => {
                    let inducing = mesher.inducing_points(&currents)?;
                    models.superposed_field(magnetic, &inducing, &induced, gap_sources.as_ref())?
                }
            };
            field_per_frequency.push(ComplexField { frequency, data });
        }

        debug!(
            harmonics = field_per_frequency.len(),
            points = induced.len(),
            "field maps computed"
        );
        Ok(WindingWindowMagneticStrengthFieldOutput {
            field_per_frequency,
            method_used: models.strength.name().to_string(),
            origin: ResultOrigin::Simulation,
        })
    }
}

impl Models {
    fn from_config(config: &MagneticFieldConfig) -> Self {
        Self {
            strength_model: config.strength_model,
            strength: strength::factory(config.strength_model),
            fringing: fringing::factory(config.fringing_model),
        }
    }

    fn gap_sources<'a>(
        &self,
        operating_point: &OperatingPoint,
        magnetic: &'a Magnetic,
        harmonic_index: usize,
    ) -> Result<GapSources<'a>> {
        let h_gap = magnetic_field_strength_gap(operating_point, magnetic, harmonic_index)?;
        // Lateral gaps at negative x mirror the positive ones.
        let gaps: Vec<&CoreGap> = magnetic
            .core
            .gapping
            .iter()
            .filter(|gap| gap.coordinates.map_or(true, |c| c.x >= 0.0))
            .collect();
        debug!(gaps = gaps.len(), h_gap, fringing = self.fringing.name(), "gap fringing enabled");
        Ok(match self.fringing.mode() {
            FringingQueryMode::EquivalentCurrent => GapSources::Equivalent(
                gaps.into_iter()
                    .map(|gap| self.fringing.equivalent_inducing_point_for_gap(gap, h_gap))
                    .collect::<Result<_>>()?,
            ),
            FringingQueryMode::DirectContribution => GapSources::Direct { gaps, h_gap },
        })
    }

    fn add_fringing(&self, sources: &GapSources<'_>, induced: &FieldPoint, total: &mut ComplexFieldPoint) -> Result<()> {
        match sources {
            GapSources::Equivalent(points) => {
                for point in points {
                    total.accumulate(&BinnsLawrensonModel.magnetic_field_strength_between_two_points(point, induced, None)?);
                }
            }
            GapSources::Direct { gaps, h_gap } => {
                for gap in gaps {
                    total.accumulate(&self.fringing.magnetic_field_strength_between_gap_and_point(gap, *h_gap, induced)?);
                }
            }
        }
        Ok(())
    }

    fn superposed_field(
        &self,
        magnetic: &Magnetic,
        inducing: &[FieldPoint],
        induced: &[FieldPoint],
        gap_sources: Option<&GapSources<'_>>,
    ) -> Result<Vec<ComplexFieldPoint>> {
        let wires = magnetic
            .coil
            .turns
            .iter()
            .map(|turn| magnetic.coil.winding_of(turn).map(|winding| &winding.wire))
            .collect::<Result<Vec<&Wire>>>()?;

        induced
            .iter()
            .map(|induced| {
                if magnetic.core.contains_point(&induced.point) {
                    return Ok(ComplexFieldPoint::zero(induced));
                }
                let mut total = ComplexFieldPoint::zero(induced);
                for source in inducing {
                    if source.turn_index.is_some() && source.turn_index == induced.turn_index {
                        continue;
                    }
                    let wire = source.turn_index.and_then(|index| wires.get(index).copied());
                    total.accumulate(&self.strength.magnetic_field_strength_between_two_points(source, induced, wire)?);
                }
                if let Some(sources) = gap_sources {
                    self.add_fringing(sources, induced, &mut total)?;
                }
                if total.is_nan() {
                    return Err(MagneticFieldError::NaNResult("magnetic field calculation".into()));
                }
                Ok(total)
            })
            .collect()
    }

    fn albach_field(
        &self,
        model: &mut Albach2DModel,
        magnetic: &Magnetic,
        induced: &[FieldPoint],
        gap_sources: Option<&GapSources<'_>>,
    ) -> Result<Vec<ComplexFieldPoint>> {
        model.ensure_solution_valid()?;
        let mut data = Vec::with_capacity(induced.len());
        for point in induced {
            if magnetic.core.contains_point(&point.point) {
                data.push(ComplexFieldPoint::zero(point));
                continue;
            }
            let mut total = model.calculate_total_field_at_point(point)?;
            if let Some(sources) = gap_sources {
                self.add_fringing(sources, point, &mut total)?;
            }
            if total.is_nan() {
                return Err(MagneticFieldError::NaNResult("Albach2D magnetic field calculation".into()));
            }
            data.push(total);
        }
        Ok(data)
    }
}

/// Lumped gap field `H = N·I / (Σ l_gap + l_e/μr)` of the primary winding.
///
/// `I` is the magnetizing current peak when known, otherwise the primary
/// current amplitude at `harmonic_index`.
pub fn magnetic_field_strength_gap(
    operating_point: &OperatingPoint,
    magnetic: &Magnetic,
    harmonic_index: usize,
) -> Result<Scalar> {
    let primary = operating_point.primary()?;
    let current = primary
        .magnetizing_current_peak
        .unwrap_or_else(|| primary.current.amplitude(harmonic_index));
    let core = &magnetic.core;
    let magnetic_length = core.total_gap_length() + core.effective_length / core.initial_permeability;
    if magnetic_length <= 0.0 {
        return Err(MagneticFieldError::InvalidInput(
            "core has no positive magnetic path length".into(),
        ));
    }
    Ok(magnetic.coil.number_turns(0) as Scalar * current / magnetic_length)
}

/// Current of every turn at harmonic `harmonic_index`.
///
/// Each turn carries its winding's amplitude divided by the parallels, signed
/// by `directions` and projected on the primary phase.
pub fn turn_currents(
    operating_point: &OperatingPoint,
    magnetic: &Magnetic,
    harmonic_index: usize,
    directions: &[Scalar],
) -> Result<Vec<Scalar>> {
    let reference_phase = operating_point.primary()?.current.phase(harmonic_index);
    magnetic
        .coil
        .turns
        .iter()
        .map(|turn| {
            let excitation = operating_point.excitations_per_winding.get(turn.winding).ok_or_else(|| {
                MagneticFieldError::InvalidInput(format!("winding {} has no excitation", turn.winding))
            })?;
            let direction = directions.get(turn.winding).copied().ok_or_else(|| {
                MagneticFieldError::InvalidInput(format!("winding {} has no current direction", turn.winding))
            })?;
            let harmonics = &excitation.current;
            let alignment = (harmonics.phase(harmonic_index) - reference_phase).cos();
            let current =
                harmonics.amplitude(harmonic_index) * magnetic.coil.current_divider(turn)? * direction * alignment;
            if current.is_nan() {
                return Err(MagneticFieldError::NaNResult("turn current".into()));
            }
            Ok(current)
        })
        .collect()
}

fn current_directions(
    operating_point: &OperatingPoint,
    windings: usize,
    config: &MagneticFieldConfig,
) -> Result<Vec<Scalar>> {
    if let Some(custom) = &config.current_directions {
        if custom.len() < windings {
            return Err(MagneticFieldError::InvalidInput(format!(
                "{} current directions for {} windings",
                custom.len(),
                windings
            )));
        }
        return Ok(custom.iter().map(|&direction| Scalar::from(direction)).collect());
    }
    // With phases the sign comes from the phase difference.
    let phased = operating_point.has_phases();
    Ok((0..windings)
        .map(|winding| if winding == 0 || phased { 1.0 } else { -1.0 })
        .collect())
}

fn harmonic_index_at(operating_point: &OperatingPoint, frequency: Scalar) -> Result<usize> {
    let count = operating_point
        .excitations_per_winding
        .iter()
        .map(|excitation| excitation.current.frequencies.len())
        .max()
        .unwrap_or(0);
    (1..count)
        .find(|&index| {
            operating_point
                .harmonic_frequency(index)
                .is_some_and(|candidate| same_frequency(candidate, frequency))
        })
        .ok_or_else(|| MagneticFieldError::InvalidInput(format!("no harmonic at {frequency} Hz")))
}

#[inline]
fn same_frequency(a: Scalar, b: Scalar) -> bool {
    (a - b).abs() <= 1.0e-9 * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::config::FringingEffectModels;
    use crate::excitation::{Excitation, Harmonics};
    use crate::test_support::{
        gapped_concentric_magnetic, single_turn_magnetic, sinusoidal_operating_point, toroidal_magnetic,
        two_winding_magnetic, COLUMN_WIDTH, GAP_LENGTH,
    };

    const FREQUENCY: Scalar = 100.0e3;

    fn points(coordinates: &[(Scalar, Scalar)]) -> Field {
        Field::new(FREQUENCY, coordinates.iter().map(|&(x, y)| FieldPoint::new(x, y)).collect())
    }

    fn without_images() -> MagneticFieldConfig {
        MagneticFieldConfig::default().with_mirroring_dimension(None)
    }

    #[test]
    fn single_turn_field_is_antisymmetric_about_the_turn() {
        let magnetic = single_turn_magnetic(Wire::round(0.5e-3, 0.55e-3), 7.5e-3, 0.0);
        let induced = points(&[(6.5e-3, 0.0), (8.5e-3, 0.0)]);
        let output = MagneticField::default()
            .calculate_magnetic_field_strength_field(
                &sinusoidal_operating_point(1, 1.0),
                &magnetic,
                Some(&induced),
                &MagneticFieldConfig::default(),
            )
            .unwrap();
        let data = &output.field_per_frequency[0].data;
        assert_eq!(data.len(), 2);
        assert!(data[0].imaginary > 0.0);
        assert_relative_eq!(data[0].imaginary, -data[1].imaginary, max_relative = 0.05);
        assert_relative_eq!(data[0].imaginary, 1.0 / (2.0 * PI * 1.0e-3), max_relative = 0.5);
        assert_eq!(output.method_used, "BinnsLawrenson");
        assert_eq!(output.origin, ResultOrigin::Simulation);
    }

    #[test]
    fn lone_turn_field_matches_the_line_current() {
        let magnetic = single_turn_magnetic(Wire::round(0.5e-3, 0.55e-3), 7.5e-3, 0.0);
        let d = 1.0e-3;
        let induced = points(&[(7.5e-3 - d, 0.0), (7.5e-3 + d, 0.0), (7.5e-3, d), (7.5e-3, -d)]);
        let config = without_images();
        let output = MagneticField
            .calculate_magnetic_field_strength_field(&sinusoidal_operating_point(1, 1.0), &magnetic, Some(&induced), &config)
            .unwrap();
        let data = &output.field_per_frequency[0].data;
        let expected = 1.0 / (2.0 * PI * d);
        for point in data {
            assert_relative_eq!(point.magnitude(), expected, max_relative = 0.05);
        }
        assert!(data[0].imaginary > 0.0 && data[1].imaginary < 0.0);
        assert!(data[2].real > 0.0 && data[3].real < 0.0);
    }

    #[test]
    fn equal_currents_cancel_between_turns() {
        let magnetic = two_winding_magnetic(6.5e-3, 8.5e-3);
        let config = without_images().with_current_directions(vec![1, 1]);
        let output = MagneticField
            .calculate_magnetic_field_strength_field(
                &sinusoidal_operating_point(2, 1.0),
                &magnetic,
                Some(&points(&[(7.5e-3, 0.0)])),
                &config,
            )
            .unwrap();
        let midpoint = &output.field_per_frequency[0].data[0];
        assert_relative_eq!(midpoint.imaginary, 0.0, epsilon = 1.0e-9);
        assert_relative_eq!(midpoint.real, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn opposite_currents_add_between_turns() {
        let magnetic = two_winding_magnetic(6.5e-3, 8.5e-3);
        let config = without_images();
        let output = MagneticField
            .calculate_magnetic_field_strength_field(
                &sinusoidal_operating_point(2, 1.0),
                &magnetic,
                Some(&points(&[(7.5e-3, 0.0)])),
                &config,
            )
            .unwrap();
        let midpoint = &output.field_per_frequency[0].data[0];
        assert_relative_eq!(midpoint.imaginary, -2.0 / (2.0 * PI * 1.0e-3), max_relative = 1.0e-9);
        assert_relative_eq!(midpoint.real, 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn turn_mesh_skips_self_contributions() {
        let magnetic = two_winding_magnetic(6.5e-3, 8.5e-3);
        let config = without_images();
        let output = MagneticField
            .calculate_magnetic_field_strength_field(&sinusoidal_operating_point(2, 1.0), &magnetic, None, &config)
            .unwrap();
        let data = &output.field_per_frequency[0].data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].turn_index, Some(0));
        // Turn 1 carries -1 A, 2 mm to the right of turn 0.
        assert_relative_eq!(data[0].imaginary, -1.0 / (2.0 * PI * 2.0e-3), max_relative = 1.0e-9);
    }

    #[test]
    fn triangular_current_yields_weaker_higher_harmonics() {
        let samples: Vec<Scalar> = (0..256)
            .map(|i| {
                let t = i as Scalar / 256.0;
                if t < 0.5 { 4.0 * t - 1.0 } else { 3.0 - 4.0 * t }
            })
            .collect();
        let harmonics = Harmonics::from_waveform(&samples, FREQUENCY).unwrap();
        let operating_point = OperatingPoint::new(vec![Excitation::new(FREQUENCY, harmonics)]);
        let magnetic = single_turn_magnetic(Wire::round(0.5e-3, 0.55e-3), 7.5e-3, 0.0);
        let config = without_images();
        let field = MagneticField;

        let at = |frequency: Scalar| {
            let induced = Field::new(frequency, vec![FieldPoint::new(8.5e-3, 0.0)]);
            field
                .calculate_magnetic_field_strength_field(&operating_point, &magnetic, Some(&induced), &config)
                .unwrap()
                .field_per_frequency[0]
                .data[0]
                .magnitude()
        };
        let fundamental = at(FREQUENCY);
        assert!(at(3.0 * FREQUENCY) < fundamental);
        assert!(at(5.0 * FREQUENCY) < at(3.0 * FREQUENCY));

        let all = field
            .calculate_magnetic_field_strength_field(&operating_point, &magnetic, None, &config)
            .unwrap();
        assert!(all.at_frequency(3.0 * FREQUENCY).is_some());
        assert!(all.at_frequency(2.0 * FREQUENCY).is_none());
    }

    #[test]
    fn phases_carry_the_current_sign() {
        let magnetic = two_winding_magnetic(6.5e-3, 8.5e-3);
        let excitation = |phase: Scalar| {
            Excitation::new(
                FREQUENCY,
                Harmonics::new(vec![0.0, 1.0], vec![0.0, FREQUENCY])
                    .unwrap()
                    .with_phases(vec![0.0, phase])
                    .unwrap(),
            )
        };
        let operating_point = OperatingPoint::new(vec![excitation(0.0), excitation(PI)]);
        let currents = turn_currents(&operating_point, &magnetic, 1, &[1.0, 1.0]).unwrap();
        assert_relative_eq!(currents[0], 1.0);
        assert_relative_eq!(currents[1], -1.0, max_relative = 1.0e-12);

        let directions = current_directions(&operating_point, 2, &MagneticFieldConfig::default()).unwrap();
        assert_eq!(directions, vec![1.0, 1.0]);
    }

    #[test]
    fn gap_field_follows_the_magnetic_circuit() {
        let magnetic = gapped_concentric_magnetic(10);
        let operating_point = sinusoidal_operating_point(1, 2.0);
        let h_gap = magnetic_field_strength_gap(&operating_point, &magnetic, 1).unwrap();
        let core = &magnetic.core;
        let expected = 10.0 * 2.0 / (core.total_gap_length() + core.effective_length / core.initial_permeability);
        assert_relative_eq!(h_gap, expected, max_relative = 1.0e-12);

        let with_peak = OperatingPoint::new(vec![Excitation::sinusoidal(FREQUENCY, 2.0).with_magnetizing_current_peak(0.5)]);
        let reduced = magnetic_field_strength_gap(&with_peak, &magnetic, 1).unwrap();
        assert_relative_eq!(reduced, expected / 4.0, max_relative = 1.0e-12);
    }

    #[test]
    fn fringing_adds_a_field_near_the_gap() {
        let magnetic = gapped_concentric_magnetic(10);
        let operating_point = sinusoidal_operating_point(1, 1.0);
        let induced = points(&[(COLUMN_WIDTH / 2.0 + 0.5e-3, 0.3e-3)]);
        let without = without_images().with_fringing(false);
        let base = MagneticField
            .calculate_magnetic_field_strength_field(&operating_point, &magnetic, Some(&induced), &without)
            .unwrap();
        for model in [FringingEffectModels::Roshen, FringingEffectModels::Albach, FringingEffectModels::Sullivan] {
            let config = without_images().with_fringing_model(model);
            let fringed = MagneticField
                .calculate_magnetic_field_strength_field(&operating_point, &magnetic, Some(&induced), &config)
                .unwrap();
            let difference = fringed.field_per_frequency[0].data[0].magnitude()
                - base.field_per_frequency[0].data[0].magnitude();
            assert!(difference.abs() > 1.0, "{model} left the field unchanged");
        }
    }

    #[test]
    fn albach_field_matches_the_gap_estimate() {
        let magnetic = gapped_concentric_magnetic(10);
        let config = MagneticFieldConfig::default()
            .with_strength_model(MagneticFieldStrengthModels::Albach2D)
            .with_fringing(false);
        let induced = points(&[(COLUMN_WIDTH / 4.0, 0.0), (7.0e-3, 7.0e-3)]);
        let output = MagneticField
            .calculate_magnetic_field_strength_field(&sinusoidal_operating_point(1, 1.0), &magnetic, Some(&induced), &config)
            .unwrap();
        assert_eq!(output.method_used, "Albach2D");
        let data = &output.field_per_frequency[0].data;
        assert_relative_eq!(data[0].imaginary, 10.0 / GAP_LENGTH, max_relative = 0.05);
        assert!(!data[1].is_nan());
    }

    #[test]
    fn toroid_material_points_stay_aligned_with_zero_field() {
        let magnetic = toroidal_magnetic(4);
        let config = without_images();
        let induced = points(&[(15.0e-3, 0.0), (0.0, 0.0)]);
        let output = MagneticField
            .calculate_magnetic_field_strength_field(&sinusoidal_operating_point(1, 1.0), &magnetic, Some(&induced), &config)
            .unwrap();
        let data = &output.field_per_frequency[0].data;
        assert_eq!(data.len(), 2);
        assert_relative_eq!(data[0].magnitude(), 0.0);
        assert!(data[1].magnitude() > 0.0);
    }

    #[test]
    fn wang_model_meshes_edges() {
        let wire = Wire::rectangular(2.0e-3, 0.5e-3, 2.1e-3, 0.6e-3);
        let magnetic = single_turn_magnetic(wire, 7.5e-3, 0.0);
        let config = without_images()
            .with_strength_model(MagneticFieldStrengthModels::Wang)
            .with_fringing(false);
        let output = MagneticField
            .calculate_magnetic_field_strength_field(&sinusoidal_operating_point(1, 1.0), &magnetic, None, &config)
            .unwrap();
        // Own-turn pairs are skipped, so a lone turn has four zero edge values.
        let data = &output.field_per_frequency[0].data;
        assert_eq!(data.len(), 4);
        assert!(data.iter().all(|point| point.label.is_some() && point.magnitude() == 0.0));
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let magnetic = two_winding_magnetic(6.5e-3, 8.5e-3);
        let field = MagneticField::default();
        let config = MagneticFieldConfig::default();

        let missing_excitation = field.calculate_magnetic_field_strength_field(
            &sinusoidal_operating_point(1, 1.0),
            &magnetic,
            None,
            &config,
        );
        assert!(matches!(missing_excitation, Err(MagneticFieldError::InvalidInput(_))));

        let wrong_frequency = Field::new(42.0, vec![FieldPoint::new(7.5e-3, 0.0)]);
        let unknown = field.calculate_magnetic_field_strength_field(
            &sinusoidal_operating_point(2, 1.0),
            &magnetic,
            Some(&wrong_frequency),
            &config,
        );
        assert!(matches!(unknown, Err(MagneticFieldError::InvalidInput(_))));

        let short_directions = config.with_current_directions(vec![1]);
        let directions = field.calculate_magnetic_field_strength_field(
            &sinusoidal_operating_point(2, 1.0),
            &magnetic,
            None,
            &short_directions,
        );
        assert!(directions.is_err());
    }

    #[test]
    fn models_follow_the_config_of_each_call() {
        let magnetic = gapped_concentric_magnetic(10);
        let operating_point = sinusoidal_operating_point(1, 1.0);
        let induced = points(&[(COLUMN_WIDTH / 4.0, 0.0)]);
        let field = MagneticField::default();
        for model in [
            MagneticFieldStrengthModels::BinnsLawrenson,
            MagneticFieldStrengthModels::Lammeraner,
            MagneticFieldStrengthModels::Albach2D,
        ] {
            let config = without_images().with_strength_model(model).with_fringing(false);
            let output = field
                .calculate_magnetic_field_strength_field(&operating_point, &magnetic, Some(&induced), &config)
                .unwrap();
            assert_eq!(output.method_used, model.to_string());
        }
    }

    #[test]
    fn mismatched_harmonics_are_an_input_error() {
        let magnetic = single_turn_magnetic(Wire::round(0.5e-3, 0.55e-3), 7.5e-3, 0.0);
        let harmonics = Harmonics {
            amplitudes: vec![0.0, 1.0, 0.5],
            frequencies: vec![0.0, FREQUENCY],
            phases: None,
        };
        let operating_point = OperatingPoint::new(vec![Excitation::new(FREQUENCY, harmonics)]);
        let result =
            MagneticField.calculate_magnetic_field_strength_field(&operating_point, &magnetic, None, &without_images());
        assert!(matches!(result, Err(MagneticFieldError::InvalidInput(_))));
    }

    #[test]
    fn roshen_geometry_errors_propagate() {
        let mut magnetic = gapped_concentric_magnetic(4);
        magnetic.core.gapping[0].section_dimensions = None;
        let config = without_images();
        let result = MagneticField.calculate_magnetic_field_strength_field(
            &sinusoidal_operating_point(1, 1.0),
            &magnetic,
            None,
            &config,
        );
        assert!(matches!(result, Err(MagneticFieldError::GapGeometry(_))));
    }
}
