//! Geometric description of a magnetic component: core, coil, and wires.
//!
//! These types are the minimal data model the field calculation consumes.
//! Their construction from catalogue data lives outside this crate.

mod coil;
mod magnetic_core;
mod wire;

pub use self::coil::{Coil, Turn, Winding};
pub use self::magnetic_core::{Core, CoreGap, CoreShapeFamily, GapType, WindingWindow};
pub use self::wire::{Wire, WireType};

/// A core plus the coil wound on it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct Magnetic {
    /// Magnetic core.
    pub core: Core,
    /// Coil description including placed turns.
    pub coil: Coil,
}

impl Magnetic {
    /// Creates a magnetic component.
    #[must_use]
    pub const fn new(core: Core, coil: Coil) -> Self {
        Self { core, coil }
    }
}
