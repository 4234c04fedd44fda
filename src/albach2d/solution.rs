use crate::math::{Coefficients, Scalar};

/// Coefficients of the modified-Bessel expansion inside one gap.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Albach2DGapSolution {
    /// Lower gap face (m).
    pub z_lower: Scalar,
    /// Upper gap face (m).
    pub z_upper: Scalar,
    /// Uniform term; `2·C30` is the axial field in the gap.
    pub c30: Scalar,
    /// Uniform term estimated from the air-coil potential alone, kept for comparison.
    pub c30_air_coil: Scalar,
    /// Fringing-profile coefficients, one per eigenvalue.
    pub c3m: Coefficients,
    /// Eigenvalues `mπ/l`, `m = 1..=m_max`.
    pub p3m: Coefficients,
}

impl Albach2DGapSolution {
    /// All-zero coefficients for a gap between `z_lower` and `z_upper`.
    #[must_use]
    pub fn zeros(z_lower: Scalar, z_upper: Scalar, m_max: usize) -> Self {
        Self {
            z_lower,
            z_upper,
            c30: 0.0,
            c30_air_coil: 0.0,
            c3m: Coefficients::zeros(m_max),
            p3m: Coefficients::zeros(m_max),
        }
    }

    /// Gap height (m).
    #[inline]
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.z_upper - self.z_lower
    }

    /// Returns `true` if `z` lies inside the gap.
    #[inline]
    #[must_use]
    pub fn contains(&self, z: Scalar) -> bool {
        z >= self.z_lower && z <= self.z_upper
    }
}

/// Expansion coefficients of the vector potential.
///
/// In the winding region `A = A_air + A1 + A2`, with
/// `A1 = Σ S1n(r)·(C1n·cosh(p1n z)/cosh(p1n c) + D1n·sinh(p1n z)/sinh(p1n c))` and
/// `A2 = Σ (C2n + D2n)·R2n(r)/R2n(a)·cos(p2n z)`. Inside gap `i`,
/// `A = μ0·C30 r + Σ μ0·C3m·I0(p3m r)/I0(p3m a)·cos(p3m (z − z_lo))`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Albach2DSolution {
    /// Number of winding-region terms.
    pub n_max: usize,
    /// Number of gap-region terms.
    pub m_max: usize,
    /// Radial eigenvalues, roots of `S1n(p, b, a)`.
    pub p1n: Coefficients,
    /// Axial eigenvalues `nπ/c`, `n = 1..=n_max`.
    pub p2n: Coefficients,
    /// Symmetric radial-expansion coefficients.
    pub c1n: Coefficients,
    /// Antisymmetric radial-expansion coefficients.
    pub d1n: Coefficients,
    /// Axial-expansion coefficients from the outer wall.
    pub c2n: Coefficients,
    /// Axial-expansion coefficients coupled to the gaps.
    pub d2n: Coefficients,
    /// Per-gap coefficients, in the order of the geometry's gaps.
    pub gap_solutions: Vec<Albach2DGapSolution>,
    /// Set once the solver has filled every coefficient.
    pub is_valid: bool,
}

impl Albach2DSolution {
    /// Unsolved, all-zero solution.
    #[must_use]
    pub fn new(n_max: usize, m_max: usize) -> Self {
        Self {
            n_max,
            m_max,
            p1n: Coefficients::zeros(n_max),
            p2n: Coefficients::zeros(n_max),
            c1n: Coefficients::zeros(n_max),
            d1n: Coefficients::zeros(n_max),
            c2n: Coefficients::zeros(n_max),
            d2n: Coefficients::zeros(n_max),
            gap_solutions: Vec::new(),
            is_valid: false,
        }
    }

    /// Gap region containing `z`, if any.
    #[must_use]
    pub fn gap_at(&self, z: Scalar) -> Option<&Albach2DGapSolution> {
        self.gap_solutions.iter().find(|gap| gap.contains(z))
    }

    /// Returns `true` if every expansion coefficient is zero.
    #[must_use]
    pub fn has_zero_expansion(&self) -> bool {
        let winding = [&self.c1n, &self.d1n, &self.c2n, &self.d2n]
            .iter()
            .all(|coefficients| coefficients.iter().all(|value| *value == 0.0));
        winding
            && self
                .gap_solutions
                .iter()
                .all(|gap| gap.c30 == 0.0 && gap.c3m.iter().all(|value| *value == 0.0))
    }
}
