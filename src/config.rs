//! Configuration of a field computation.
//!
//! [`MagneticFieldConfig`] is an immutable value passed into every top-level
//! call; there is no process-wide state.

use std::fmt;

use crate::constants::DEFAULT_AMBIENT_TEMPERATURE;
use crate::math::Scalar;

/// Near-field conductor model variants.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MagneticFieldStrengthModels {
    /// Wang's edge-point model for rectangular and foil conductors.
    Wang,
    /// Binns & Lawrenson infinite line and rectangular conductor fields.
    #[default]
    BinnsLawrenson,
    /// Lammeraner finite-length line current.
    Lammeraner,
    /// Albach axisymmetric boundary-value solution.
    Albach2D,
}

impl fmt::Display for MagneticFieldStrengthModels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wang => "Wang",
            Self::BinnsLawrenson => "BinnsLawrenson",
            Self::Lammeraner => "Lammeraner",
            Self::Albach2D => "Albach2D",
        })
    }
}

/// Gap fringing model variants.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FringingEffectModels {
    /// Roshen's direct fringing field.
    #[default]
    Roshen,
    /// Albach's equivalent current filament.
    Albach,
    /// Sullivan's image-tiled gap filaments.
    Sullivan,
}

impl fmt::Display for FringingEffectModels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Roshen => "Roshen",
            Self::Albach => "Albach",
            Self::Sullivan => "Sullivan",
        })
    }
}

/// Settings for [`crate::MagneticField`] computations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticFieldConfig {
    /// Near-field model.
    pub strength_model: MagneticFieldStrengthModels,
    /// Fringing model.
    pub fringing_model: FringingEffectModels,
    /// Add the gap fringing field at the fundamental.
    pub include_fringing: bool,
    /// Image order of the centre mesher; `None` or `Some(0)` disables images.
    pub mirroring_dimension: Option<usize>,
    /// Harmonics whose `amplitude·√f` is below this fraction of the largest are skipped.
    pub harmonic_amplitude_threshold: Scalar,
    /// Horizontal resolution of [`crate::mesher::CoilMesher::window_grid`].
    pub number_points_x: usize,
    /// Vertical resolution of [`crate::mesher::CoilMesher::window_grid`].
    pub number_points_y: usize,
    /// Number of winding-region (n) and gap-region (m) eigenfunctions.
    pub albach_terms: (usize, usize),
    /// Current sign per winding; defaults to `+1` for the primary and `-1` otherwise.
    pub current_directions: Option<Vec<i8>>,
    /// Conductor temperature used for skin depth (°C).
    pub temperature: Scalar,
}

impl Default for MagneticFieldConfig {
    fn default() -> Self {
        Self {
            strength_model: MagneticFieldStrengthModels::default(),
            fringing_model: FringingEffectModels::default(),
            include_fringing: true,
            mirroring_dimension: Some(1),
            harmonic_amplitude_threshold: 0.05,
            number_points_x: 25,
            number_points_y: 50,
            albach_terms: (10, 10),
            current_directions: None,
            temperature: DEFAULT_AMBIENT_TEMPERATURE,
        }
    }
}

impl MagneticFieldConfig {
    /// Selects the near-field model.
    #[must_use]
    pub fn with_strength_model(mut self, model: MagneticFieldStrengthModels) -> Self {
        self.strength_model = model;
        self
    }

    /// Selects the fringing model.
    #[must_use]
    pub fn with_fringing_model(mut self, model: FringingEffectModels) -> Self {
        self.fringing_model = model;
        self
    }

    /// Enables or disables fringing.
    #[must_use]
    pub fn with_fringing(mut self, include: bool) -> Self {
        self.include_fringing = include;
        self
    }

    /// Sets the image order; `None` disables images.
    #[must_use]
    pub fn with_mirroring_dimension(mut self, dimension: Option<usize>) -> Self {
        self.mirroring_dimension = dimension;
        self
    }

    /// Sets the harmonic threshold.
    #[must_use]
    pub fn with_harmonic_amplitude_threshold(mut self, threshold: Scalar) -> Self {
        self.harmonic_amplitude_threshold = threshold;
        self
    }

    /// Sets the window grid resolution.
    #[must_use]
    pub fn with_grid(mut self, number_points_x: usize, number_points_y: usize) -> Self {
        self.number_points_x = number_points_x;
        self.number_points_y = number_points_y;
        self
    }

    /// Sets the number of BVP eigenfunctions.
    #[must_use]
    pub fn with_albach_terms(mut self, n_max: usize, m_max: usize) -> Self {
        self.albach_terms = (n_max, m_max);
        self
    }

    /// Overrides the per-winding current signs.
    #[must_use]
    pub fn with_current_directions(mut self, directions: Vec<i8>) -> Self {
        self.current_directions = Some(directions);
        self
    }

    /// Image order in effect (zero when disabled).
    #[must_use]
    pub fn image_order(&self) -> usize {
        self.mirroring_dimension.unwrap_or(0)
    }
}
