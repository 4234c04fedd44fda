use crate::component::Wire;
use crate::errors::{MagneticFieldError, Result};
use crate::math::{Scalar, R2};

/// A winding: one wire type and its parallel count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Winding {
    /// Winding name, e.g. `Primary`.
    pub name: String,
    /// Wire used by every turn of the winding.
    pub wire: Wire,
    /// Number of conductors in parallel.
    pub number_parallels: usize,
}

impl Winding {
    /// Creates a winding with a single conductor in parallel.
    #[must_use]
    pub fn new(name: impl Into<String>, wire: Wire) -> Self {
        Self {
            name: name.into(),
            wire,
            number_parallels: 1,
        }
    }

    /// Sets the number of parallels.
    #[must_use]
    pub fn with_parallels(mut self, number_parallels: usize) -> Self {
        self.number_parallels = number_parallels.max(1);
        self
    }
}

/// One placed turn in the winding-window cross-section.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Turn {
    /// Index of the owning winding in [`Coil::windings`].
    pub winding: usize,
    /// Centre of the conductor: (radial, axial) for concentric cores,
    /// cartesian (x, y) for toroids.
    pub coordinates: R2,
    /// Mean turn length (m).
    pub length: Option<Scalar>,
    /// Rotation of the conductor in degrees (toroids).
    pub rotation: Option<Scalar>,
}

impl Turn {
    /// Creates a turn of winding `winding` centred at `(x, y)`.
    #[must_use]
    pub fn new(winding: usize, x: Scalar, y: Scalar) -> Self {
        Self {
            winding,
            coordinates: R2::new(x, y),
            length: None,
            rotation: None,
        }
    }

    /// Sets the mean turn length.
    #[must_use]
    pub fn with_length(mut self, length: Scalar) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the conductor rotation.
    #[must_use]
    pub fn with_rotation(mut self, degrees: Scalar) -> Self {
        self.rotation = Some(degrees);
        self
    }
}

/// Windings plus the placed turns.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct Coil {
    /// Windings, primary first.
    pub windings: Vec<Winding>,
    /// Placed turns of every winding.
    pub turns: Vec<Turn>,
}

impl Coil {
    /// Creates a coil.
    #[must_use]
    pub const fn new(windings: Vec<Winding>, turns: Vec<Turn>) -> Self {
        Self { windings, turns }
    }

    /// Number of turns per parallel of `winding`.
    #[must_use]
    pub fn number_turns(&self, winding: usize) -> usize {
        let placed = self.turns.iter().filter(|turn| turn.winding == winding).count();
        let parallels = self.windings.get(winding).map_or(1, |w| w.number_parallels.max(1));
        placed / parallels
    }

    /// Winding that owns `turn`.
    pub fn winding_of(&self, turn: &Turn) -> Result<&Winding> {
        self.windings.get(turn.winding).ok_or_else(|| {
            MagneticFieldError::InvalidInput(format!(
                "turn references winding {} but the coil has {} windings",
                turn.winding,
                self.windings.len()
            ))
        })
    }

    /// Fraction of the winding current carried by one turn.
    pub fn current_divider(&self, turn: &Turn) -> Result<Scalar> {
        Ok(1.0 / self.winding_of(turn)?.number_parallels.max(1) as Scalar)
    }
}
