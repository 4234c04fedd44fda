//! Boundary-value solver for the vector potential of an axisymmetric gapped core.
//!
//! The air-coil potential of the turns is corrected by eigenfunction
//! expansions that enforce the high-permeability boundary conditions: a
//! Bessel series `A1` for the top and bottom yokes, a Fourier series `A2` for
//! the outer wall, and one modified-Bessel series `A3` per gap.

use std::f64::consts::PI;

use tracing::{debug, warn};

use crate::albach2d::geometry::{Albach2DCoreGeometry, Albach2DTurnPosition, Filament};
use crate::albach2d::solution::{Albach2DGapSolution, Albach2DSolution};
use crate::constants::{AXIS_TOLERANCE, MAX_ELLIPTIC_MODULUS, MINIMUM_GAP_HEIGHT, VACUUM_PERMEABILITY};
use crate::errors::{MagneticFieldError, Result};
use crate::math::{cosh_ratio, sinh_ratio, Coefficients, Scalar};
use crate::quadrature::Simpson;
use crate::special::{
    bessel_i0_ratio, bessel_i0e, bessel_i1_over_i0, bessel_j0, bessel_j1, bessel_k0e, bessel_y0, bessel_y1, ellipke,
};

/// Coefficients below this magnitude are treated as zero.
const NEGLIGIBLE_COEFFICIENT: Scalar = 1.0e-15;

/// Central-difference step for a coordinate of magnitude `scale`.
#[inline]
fn derivative_step(scale: Scalar) -> Scalar {
    (1.0e-4 * scale).max(1.0e-6)
}

/// Radial eigenfunction `S1n(r) = J1(p r)Y0(p a) − Y1(p r)J0(p a)`.
///
/// It satisfies `∂A/∂r = 0` at the column surface `r = a`.
#[must_use]
pub fn s1n(p: Scalar, r: Scalar, a: Scalar) -> Scalar {
    bessel_j1(p * r) * bessel_y0(p * a) - bessel_y1(p * r) * bessel_j0(p * a)
}

/// `R2n(r)/R2n(a)` with `R2n(r) = I0(p r)K0(p b) − K0(p r)I0(p b)`, evaluated
/// through exponentially scaled Bessel functions.
#[must_use]
pub fn radial_ratio(p: Scalar, r: Scalar, a: Scalar, b: Scalar) -> Scalar {
    if p * r <= AXIS_TOLERANCE || p * a <= AXIS_TOLERANCE {
        return 0.0;
    }
    let scaled = |x: Scalar| {
        bessel_i0e(p * x) * bessel_k0e(p * b) * (2.0 * p * (x - b)).exp() - bessel_k0e(p * x) * bessel_i0e(p * b)
    };
    let denominator = scaled(a);
    if denominator.abs() < 1.0e-300 {
        return 0.0;
    }
    (p * (a - r)).exp() * scaled(r) / denominator
}

/// Finds the first `n_max` roots of `S1n(p, b, a)`.
///
/// The scan advances in steps of `π/(20(b−a))` and refines each sign change
/// by bisection. Missing roots, and every root when `a` is on the axis, fall
/// back to `(n+1)π/(b−a)`.
#[must_use]
pub fn find_eigenvalues_p1n(a: Scalar, b: Scalar, n_max: usize) -> Coefficients {
    let width = b - a;
    let spacing = PI / width;
    let mut roots = Vec::with_capacity(n_max);

    if a > AXIS_TOLERANCE && width > 0.0 {
        let step = spacing / 20.0;
        let limit = (n_max as Scalar + 4.0) * spacing;
        let characteristic = |p: Scalar| s1n(p, b, a);
        let mut lower = 0.05 * spacing;
        let mut lower_value = characteristic(lower);
        while roots.len() < n_max && lower < limit {
            let upper = lower + step;
            let upper_value = characteristic(upper);
            if lower_value == 0.0 {
                roots.push(lower);
            } else if lower_value.signum() != upper_value.signum() {
                roots.push(bisect(&characteristic, lower, upper, lower_value));
            }
            lower = upper;
            lower_value = upper_value;
        }
    }

    if roots.len() < n_max {
        if a > AXIS_TOLERANCE {
            warn!(found = roots.len(), n_max, "S1n root search incomplete, using asymptotic eigenvalues");
        }
        for n in roots.len()..n_max {
            roots.push((n as Scalar + 1.0) * spacing);
        }
    }
    Coefficients::from_vec(roots)
}

fn bisect<F>(f: F, mut lower: Scalar, mut upper: Scalar, mut lower_value: Scalar) -> Scalar
where
    F: Fn(Scalar) -> Scalar,
{
    for _ in 0..200 {
        let middle = 0.5 * (lower + upper);
        let value = f(middle);
        if value == 0.0 || (upper - lower) <= 1.0e-12 * middle.abs() {
            return middle;
        }
        if value.signum() == lower_value.signum() {
            lower = middle;
            lower_value = value;
        } else {
            upper = middle;
        }
    }
    0.5 * (lower + upper)
}

/// Potential of a single circular loop of radius `r0` at height `z0`.
fn loop_potential(current: Scalar, r0: Scalar, z0: Scalar, r: Scalar, z: Scalar) -> Scalar {
    let dz = z - z0;
    let denominator = (r + r0).powi(2) + dz * dz;
    if denominator < 1.0e-20 || r <= 1.0e-15 {
        return 0.0;
    }
    let k_squared = 4.0 * r * r0 / denominator;
    let k = k_squared.sqrt().min(MAX_ELLIPTIC_MODULUS);
    if k <= 1.0e-10 {
        return 0.0;
    }
    let (elliptic_k, elliptic_e) = ellipke(k * k);
    VACUUM_PERMEABILITY * current / PI * (r0 / r).sqrt() * ((1.0 - k_squared / 2.0) * elliptic_k - elliptic_e) / k
}

/// The turns as a set of current loops, images included.
#[derive(Debug, Clone, PartialEq)]
pub struct AirCoil {
    filaments: Vec<Filament>,
    total_current: Scalar,
}

impl AirCoil {
    /// Expands `turns` into loops. Toroids with image currents get an extra
    /// loop at `b²/r0` for every filament.
    #[must_use]
    pub fn new(geometry: &Albach2DCoreGeometry, turns: &[Albach2DTurnPosition]) -> Self {
        let mut filaments: Vec<Filament> = turns.iter().flat_map(Albach2DTurnPosition::filaments).collect();
        if geometry.is_toroidal && geometry.use_image_currents {
            let images: Vec<Filament> = filaments
                .iter()
                .filter(|filament| filament.r > 1.0e-15)
                .map(|filament| Filament {
                    r: geometry.b * geometry.b / filament.r,
                    ..*filament
                })
                .collect();
            filaments.extend(images);
        }
        Self {
            filaments,
            total_current: turns.iter().map(|turn| turn.current).sum(),
        }
    }

    /// Loops making up the coil.
    #[must_use]
    pub fn filaments(&self) -> &[Filament] {
        &self.filaments
    }

    /// Sum of the turn currents, images excluded.
    #[must_use]
    pub const fn total_current(&self) -> Scalar {
        self.total_current
    }

    /// Vector potential of all loops at `(r, z)`.
    #[must_use]
    pub fn potential(&self, r: Scalar, z: Scalar) -> Scalar {
        self.filaments
            .iter()
            .map(|filament| loop_potential(filament.current, filament.r, filament.z, r, z))
            .sum()
    }

    /// `∂A/∂r` by central differences.
    #[must_use]
    pub fn d_dr(&self, r: Scalar, z: Scalar) -> Scalar {
        let step = derivative_step(r);
        (self.potential(r + step, z) - self.potential(r - step, z)) / (2.0 * step)
    }

    /// `∂A/∂z` by central differences; `c` sets the step.
    #[must_use]
    pub fn d_dz(&self, r: Scalar, z: Scalar, c: Scalar) -> Scalar {
        let step = derivative_step(c);
        (self.potential(r, z + step) - self.potential(r, z - step)) / (2.0 * step)
    }
}

/// Air-coil vector potential of `turns` at `(r, z)`.
#[must_use]
pub fn air_coil_potential(
    geometry: &Albach2DCoreGeometry,
    turns: &[Albach2DTurnPosition],
    r: Scalar,
    z: Scalar,
) -> Scalar {
    AirCoil::new(geometry, turns).potential(r, z)
}

/// Solves for the expansion coefficients of `geometry` excited by `turns`.
///
/// A geometry without a central column or without turns yields an all-zero
/// expansion, which leaves the air-coil potential as the solution.
pub fn solve(
    geometry: &Albach2DCoreGeometry,
    turns: &[Albach2DTurnPosition],
    n_max: usize,
    m_max: usize,
) -> Result<Albach2DSolution> {
    if geometry.c <= 0.0 || geometry.b <= geometry.a {
        return Err(MagneticFieldError::InvalidInput(format!(
            "Albach2D window needs c > 0 and b > a, got a = {}, b = {}, c = {}",
            geometry.a, geometry.b, geometry.c
        )));
    }
    let a = geometry.a;
    let b = geometry.b;
    let c = geometry.c;

    let mut solution = Albach2DSolution::new(n_max, m_max);
    solution.p1n = find_eigenvalues_p1n(a, b, n_max);
    solution.p2n = Coefficients::from_fn(n_max, |n, _| (n as Scalar + 1.0) * PI / c);
    solution.gap_solutions = geometry
        .gaps
        .iter()
        .map(|gap| {
            let mut gap_solution = Albach2DGapSolution::zeros(gap.z_lower, gap.z_upper, m_max);
            if gap.height() > 0.0 {
                gap_solution.p3m = Coefficients::from_fn(m_max, |m, _| (m as Scalar + 1.0) * PI / gap.height());
            }
            gap_solution
        })
        .collect();

    if !geometry.has_column() || turns.is_empty() {
        debug!(a, turns = turns.len(), "Albach2D expansion skipped");
        solution.is_valid = true;
        return Ok(solution);
    }

    let air_coil = AirCoil::new(geometry, turns);
    compute_a1_coefficients(&mut solution, geometry, &air_coil);
    compute_c2n_coefficients(&mut solution, geometry, &air_coil);

    if geometry.has_gaps() && geometry.total_gap_length() > AXIS_TOLERANCE {
        let gap_count = solution.gap_solutions.len() as Scalar;
        let magnetomotive_force = air_coil.total_current() / gap_count;
        for gap_solution in &mut solution.gap_solutions {
            let height = gap_solution.height();
            if height > AXIS_TOLERANCE {
                gap_solution.c30 = magnetomotive_force / (2.0 * height);
                gap_solution.c30_air_coil = Simpson::GAP
                    .integrate(gap_solution.z_lower, gap_solution.z_upper, |z| air_coil.potential(a, z))
                    / (VACUUM_PERMEABILITY * height);
            }
            compute_c3m_coefficients(gap_solution, a, &air_coil);
        }
        compute_d2n_coefficients(&mut solution, geometry);
    }

    solution.is_valid = true;
    debug!(
        n_max,
        m_max,
        gaps = solution.gap_solutions.len(),
        c1n = solution.c1n.norm(),
        d1n = solution.d1n.norm(),
        c2n = solution.c2n.norm(),
        d2n = solution.d2n.norm(),
        "Albach2D solved"
    );
    Ok(solution)
}

fn compute_a1_coefficients(solution: &mut Albach2DSolution, geometry: &Albach2DCoreGeometry, air_coil: &AirCoil) {
    let (a, b, c) = (geometry.a, geometry.b, geometry.c);
    for n in 0..solution.n_max {
        let p = solution.p1n[n];
        let normalisation = Simpson::WINDOW.integrate(a, b, |r| r * s1n(p, r, a).powi(2));
        if normalisation.abs() < 1.0e-20 {
            continue;
        }
        if (p * c).cosh() > 1.0e-10 {
            let projection = Simpson::WINDOW.integrate(a, b, |r| r * s1n(p, r, a) * air_coil.d_dz(r, c, c));
            solution.c1n[n] = -projection / (normalisation * p * (p * c).sinh());
        }
        if (p * c).sinh().abs() > 1.0e-10 {
            let projection = Simpson::WINDOW.integrate(a, b, |r| r * s1n(p, r, a) * air_coil.d_dz(r, 0.0, c));
            solution.d1n[n] = -projection / (normalisation * p * (p * c).cosh());
        }
    }
}

fn compute_c2n_coefficients(solution: &mut Albach2DSolution, geometry: &Albach2DCoreGeometry, air_coil: &AirCoil) {
    let (b, c) = (geometry.b, geometry.c);
    for n in 0..solution.n_max {
        let p = solution.p2n[n];
        let projection = Simpson::WINDOW.integrate(-c, c, |z| air_coil.d_dr(b, z) * (p * z).cos());
        solution.c2n[n] = -projection / c;
    }
}

fn compute_c3m_coefficients(gap_solution: &mut Albach2DGapSolution, a: Scalar, air_coil: &AirCoil) {
    let height = gap_solution.height();
    if height < MINIMUM_GAP_HEIGHT {
        gap_solution.c3m.fill(0.0);
        return;
    }
    let z_lower = gap_solution.z_lower;
    for m in 0..gap_solution.c3m.len() {
        let p = gap_solution.p3m[m];
        let projection = Simpson::GAP.integrate(z_lower, gap_solution.z_upper, |z| {
            (air_coil.potential(a, z) + a * air_coil.d_dr(a, z)) * (p * (z - z_lower)).cos()
        }) * 2.0
            / height;
        let ratio = bessel_i1_over_i0(p * a);
        gap_solution.c3m[m] = if ratio.abs() > NEGLIGIBLE_COEFFICIENT {
            projection / (VACUUM_PERMEABILITY * a * ratio)
        } else {
            0.0
        };
    }
}

fn compute_d2n_coefficients(solution: &mut Albach2DSolution, geometry: &Albach2DCoreGeometry) {
    let uniform = solution
        .gap_solutions
        .iter()
        .all(|gap| gap.c3m.iter().all(|value| value.abs() <= NEGLIGIBLE_COEFFICIENT));
    if uniform {
        solution.d2n.fill(0.0);
        return;
    }

    let (a, c) = (geometry.a, geometry.c);
    for n in 0..solution.n_max {
        let p2 = solution.p2n[n];
        let mut sum = 0.0;
        for gap in &solution.gap_solutions {
            for (c3m, p3) in gap.c3m.iter().zip(gap.p3m.iter()) {
                if c3m.abs() <= NEGLIGIBLE_COEFFICIENT {
                    continue;
                }
                let coupling = Simpson::GAP.integrate(gap.z_lower, gap.z_upper, |z| {
                    (p2 * z).cos() * (p3 * (z - gap.z_lower)).cos()
                });
                sum += c3m * p3 * bessel_i1_over_i0(p3 * a) * coupling;
            }
        }
        solution.d2n[n] = sum / c;
    }
}

fn expansion_potential(
    solution: &Albach2DSolution,
    geometry: &Albach2DCoreGeometry,
    air_coil: &AirCoil,
    r: Scalar,
    z: Scalar,
) -> Scalar {
    let (a, b, c) = (geometry.a, geometry.b, geometry.c);
    if !geometry.has_column() {
        return air_coil.potential(r, z);
    }

    if r < a {
        return match solution.gap_at(z) {
            Some(gap) => {
                let mut potential = VACUUM_PERMEABILITY * gap.c30 * r;
                for (c3m, p3) in gap.c3m.iter().zip(gap.p3m.iter()) {
                    potential += VACUUM_PERMEABILITY
                        * c3m
                        * bessel_i0_ratio(p3 * r, p3 * a)
                        * (p3 * (z - gap.z_lower)).cos();
                }
                potential
            }
            None => air_coil.potential(r, z),
        };
    }

    let mut potential = air_coil.potential(r, z);
    for n in 0..solution.n_max {
        let p1 = solution.p1n[n];
        let radial = s1n(p1, r, a);
        potential += radial * (solution.c1n[n] * cosh_ratio(p1, z, c) + solution.d1n[n] * sinh_ratio(p1, z, c));

        let p2 = solution.p2n[n];
        potential += (solution.c2n[n] + solution.d2n[n]) * radial_ratio(p2, r, a, b) * (p2 * z).cos();
    }
    potential
}

/// Vector potential at `(r, z)` from a solved expansion.
pub fn vector_potential(
    solution: &Albach2DSolution,
    geometry: &Albach2DCoreGeometry,
    turns: &[Albach2DTurnPosition],
    r: Scalar,
    z: Scalar,
) -> Result<Scalar> {
    ensure_solved(solution)?;
    Ok(expansion_potential(solution, geometry, &AirCoil::new(geometry, turns), r, z))
}

/// Field `(H_r, H_z)` at `(r, z)`, with `H_r = −(1/μ0)∂A/∂z` and
/// `H_z = (A/r + ∂A/∂r)/μ0`.
pub fn magnetic_field(
    solution: &Albach2DSolution,
    geometry: &Albach2DCoreGeometry,
    turns: &[Albach2DTurnPosition],
    r: Scalar,
    z: Scalar,
) -> Result<(Scalar, Scalar)> {
    magnetic_field_with(solution, geometry, &AirCoil::new(geometry, turns), r, z)
}

/// [`magnetic_field`] with a pre-built [`AirCoil`].
pub fn magnetic_field_with(
    solution: &Albach2DSolution,
    geometry: &Albach2DCoreGeometry,
    air_coil: &AirCoil,
    r: Scalar,
    z: Scalar,
) -> Result<(Scalar, Scalar)> {
    ensure_solved(solution)?;
    if r < AXIS_TOLERANCE {
        return Ok((0.0, 0.0));
    }
    let dr = derivative_step(r);
    let dz = derivative_step(geometry.c);
    let potential = |r: Scalar, z: Scalar| expansion_potential(solution, geometry, air_coil, r, z);

    let centre = potential(r, z);
    let d_dr = (potential(r + dr, z) - potential(r - dr, z)) / (2.0 * dr);
    let d_dz = (potential(r, z + dz) - potential(r, z - dz)) / (2.0 * dz);

    let h_r = -d_dz / VACUUM_PERMEABILITY;
    let h_z = (centre / r + d_dr) / VACUUM_PERMEABILITY;
    Ok((h_r, h_z))
}

fn ensure_solved(solution: &Albach2DSolution) -> Result<()> {
    if solution.is_valid {
        Ok(())
    } else {
        Err(MagneticFieldError::InvalidInput("Albach2D solution has not been solved".into()))
    }
}

/// Field `(H_r, H_z)` of a circular filament of radius `r0` at height `z0`.
#[must_use]
pub fn circular_filament_field(current: Scalar, r0: Scalar, z0: Scalar, r: Scalar, z: Scalar) -> (Scalar, Scalar) {
    if current.abs() < NEGLIGIBLE_COEFFICIENT || r <= 1.0e-15 || r0 <= 1.0e-15 {
        return (0.0, 0.0);
    }
    let dz = z - z0;
    let denominator = (r + r0).powi(2) + dz * dz;
    if denominator <= 1.0e-20 {
        return (0.0, 0.0);
    }
    let k = (4.0 * r * r0 / denominator).sqrt().min(MAX_ELLIPTIC_MODULUS);
    if k <= 1.0e-10 {
        return (0.0, 0.0);
    }
    let near = (r - r0).powi(2) + dz * dz;
    if near <= 1.0e-20 {
        return (0.0, 0.0);
    }
    let (elliptic_k, elliptic_e) = ellipke(k * k);
    let root = denominator.sqrt();
    let prefactor = current / (2.0 * PI);
    let h_r = prefactor * dz / (r * root) * (-elliptic_k + elliptic_e * (r0 * r0 + r * r + dz * dz) / near);
    let h_z = prefactor / root * (elliptic_k + elliptic_e * (r0 * r0 - r * r - dz * dz) / near);
    (h_r, h_z)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn gapped_pot_core() -> Albach2DCoreGeometry {
        Albach2DCoreGeometry::new(5.0e-3, 10.0e-3, 8.0e-3, 2000.0).with_gap(1.0e-3, 0.0)
    }

    fn winding(turns: usize, current: Scalar) -> Vec<Albach2DTurnPosition> {
        (0..turns)
            .map(|i| {
                let z = -6.0e-3 + 12.0e-3 * i as Scalar / (turns.max(2) - 1) as Scalar;
                Albach2DTurnPosition::new(i, 7.0e-3, z, current)
            })
            .collect()
    }

    #[test]
    fn eigenvalues_are_roots_of_the_characteristic_function() {
        let p1n = find_eigenvalues_p1n(5.0e-3, 10.0e-3, 5);
        assert_eq!(p1n.len(), 5);
        for n in 0..p1n.len() {
            assert!(s1n(p1n[n], 10.0e-3, 5.0e-3).abs() < 1.0e-8);
            if n > 0 {
                assert!(p1n[n] > p1n[n - 1]);
            }
        }
    }

    #[test]
    fn axis_geometry_uses_asymptotic_eigenvalues() {
        let p1n = find_eigenvalues_p1n(0.0, 10.0e-3, 3);
        assert_relative_eq!(p1n[2], 3.0 * PI / 10.0e-3, max_relative = 1.0e-12);
    }

    #[test]
    fn solution_is_valid_only_after_solving() {
        let geometry = gapped_pot_core();
        let turns = winding(4, 1.0);
        let unsolved = Albach2DSolution::new(4, 4);
        assert!(magnetic_field(&unsolved, &geometry, &turns, 7.0e-3, 0.0).is_err());

        let solution = solve(&geometry, &turns, 4, 4).unwrap();
        assert!(solution.is_valid);
    }

    #[test]
    fn repeated_solves_are_identical() {
        let geometry = gapped_pot_core();
        let turns = winding(6, 0.5);
        let first = solve(&geometry, &turns, 6, 6).unwrap();
        let second = solve(&geometry, &turns, 6, 6).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn toroid_and_empty_coils_have_zero_expansion() {
        let toroid = Albach2DCoreGeometry::toroidal(10.0e-3, 10.0e-3, 2000.0);
        let solution = solve(&toroid, &winding(3, 1.0), 5, 5).unwrap();
        assert!(solution.is_valid);
        assert!(solution.has_zero_expansion());

        let empty = solve(&gapped_pot_core(), &[], 5, 5).unwrap();
        assert!(empty.is_valid);
        assert!(empty.has_zero_expansion());
    }

    #[test]
    fn gap_field_matches_the_lumped_circuit() {
        let geometry = gapped_pot_core();
        let turns = winding(10, 1.0);
        let solution = solve(&geometry, &turns, 10, 10).unwrap();
        let (h_r, h_z) = magnetic_field(&solution, &geometry, &turns, 2.5e-3, 0.0).unwrap();
        let lumped = 10.0 * 1.0 / 1.0e-3;
        assert_relative_eq!(h_z, lumped, max_relative = 0.05);
        assert!(h_r.abs() < 0.05 * lumped);
    }

    #[test]
    fn gap_field_error_does_not_grow_with_more_terms() {
        let geometry = gapped_pot_core();
        let turns = winding(10, 1.0);
        let lumped = 10.0 * 1.0 / 1.0e-3;
        let errors: Vec<Scalar> = [5, 10, 20]
            .into_iter()
            .map(|terms| {
                let solution = solve(&geometry, &turns, terms, terms).unwrap();
                let (_, h_z) = magnetic_field(&solution, &geometry, &turns, 2.5e-3, 0.25e-3).unwrap();
                ((h_z - lumped) / lumped).abs()
            })
            .collect();
        for pair in errors.windows(2) {
            assert!(pair[0] < 0.05 && pair[1] < 0.05, "{errors:?}");
            assert!(pair[1] <= pair[0] + 1.0e-3, "{errors:?}");
        }
    }

    #[test]
    fn vector_potential_without_a_column_is_the_air_coil() {
        let toroid = Albach2DCoreGeometry::toroidal(10.0e-3, 10.0e-3, 2000.0);
        let turns = winding(3, 1.0);
        let solution = solve(&toroid, &turns, 5, 5).unwrap();
        for (r, z) in [(2.0e-3, 0.0), (6.0e-3, 3.0e-3), (9.0e-3, -5.0e-3)] {
            let potential = vector_potential(&solution, &toroid, &turns, r, z).unwrap();
            assert_relative_eq!(potential, air_coil_potential(&toroid, &turns, r, z), max_relative = 1.0e-12);
        }
        assert!(vector_potential(&Albach2DSolution::new(5, 5), &toroid, &turns, 6.0e-3, 0.0).is_err());
    }

    #[test]
    fn field_is_the_curl_of_the_vector_potential() {
        let geometry = gapped_pot_core();
        let turns = winding(10, 1.0);
        let solution = solve(&geometry, &turns, 10, 10).unwrap();
        let step = 2.0e-6;
        for (r, z) in [(8.5e-3, 2.5e-3), (2.5e-3, 0.2e-3)] {
            let potential = |r: Scalar, z: Scalar| vector_potential(&solution, &geometry, &turns, r, z).unwrap();
            let d_dr = (potential(r + step, z) - potential(r - step, z)) / (2.0 * step);
            let d_dz = (potential(r, z + step) - potential(r, z - step)) / (2.0 * step);
            let expected_r = -d_dz / VACUUM_PERMEABILITY;
            let expected_z = (potential(r, z) / r + d_dr) / VACUUM_PERMEABILITY;

            let (h_r, h_z) = magnetic_field(&solution, &geometry, &turns, r, z).unwrap();
            let scale = expected_r.hypot(expected_z);
            assert!(scale > 0.0);
            assert_relative_eq!(h_r, expected_r, epsilon = 1.0e-3 * scale);
            assert_relative_eq!(h_z, expected_z, epsilon = 1.0e-3 * scale);
        }
    }

    #[test]
    fn distributed_gaps_share_the_magnetomotive_force() {
        let geometry = Albach2DCoreGeometry::new(5.0e-3, 10.0e-3, 8.0e-3, 2000.0)
            .with_gap(0.5e-3, -4.0e-3)
            .with_gap(0.5e-3, 4.0e-3);
        let turns = winding(8, 1.0);
        let solution = solve(&geometry, &turns, 6, 6).unwrap();
        for gap in &solution.gap_solutions {
            assert_relative_eq!(gap.c30, 8.0 / (2.0 * 2.0 * 0.5e-3), max_relative = 1.0e-12);
        }
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let geometry = Albach2DCoreGeometry::new(5.0e-3, 4.0e-3, 8.0e-3, 2000.0);
        assert!(solve(&geometry, &winding(2, 1.0), 3, 3).is_err());
    }

    #[test]
    fn loop_field_on_axis_side_matches_inside_direction() {
        // Just inside a loop the axial field points along +z for positive current.
        let (_, h_z) = circular_filament_field(1.0, 10.0e-3, 0.0, 9.0e-3, 0.0);
        assert!(h_z > 0.0);
        let (_, h_z) = circular_filament_field(1.0, 10.0e-3, 0.0, 11.0e-3, 0.0);
        assert!(h_z < 0.0);
    }

    #[test]
    fn loop_field_close_to_the_wire_approaches_the_line_current() {
        let d = 0.1e-3;
        let (h_r, h_z) = circular_filament_field(1.0, 10.0e-3, 0.0, 10.0e-3, d);
        assert_relative_eq!(h_r.hypot(h_z), 1.0 / (2.0 * PI * d), max_relative = 0.05);
    }

    #[test]
    fn scaled_radial_ratio_is_one_at_the_column() {
        assert_relative_eq!(radial_ratio(PI / 8.0e-3, 5.0e-3, 5.0e-3, 10.0e-3), 1.0, max_relative = 1.0e-12);
        assert_relative_eq!(radial_ratio(PI / 8.0e-3, 10.0e-3, 5.0e-3, 10.0e-3), 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn air_coil_potential_is_linear_in_current() {
        let geometry = gapped_pot_core();
        let single = air_coil_potential(&geometry, &winding(3, 1.0), 8.0e-3, 1.0e-3);
        let double = air_coil_potential(&geometry, &winding(3, 2.0), 8.0e-3, 1.0e-3);
        assert_relative_eq!(double, 2.0 * single, max_relative = 1.0e-12);
        assert!(single > 0.0);
    }
}
