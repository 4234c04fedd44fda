//! Sample points for the field computation.
//!
//! Inducing points carry the current of a turn (or of one of its images);
//! induced points are where the field is evaluated. Concentric cores are
//! meshed with the centre mesher, which tiles the window with image currents
//! to approximate the high-permeability walls. Rectangular, foil and planar
//! conductors can instead be split into Wang's two edge filaments.

use crate::component::{Core, Magnetic, Turn, Wire, WireType};
use crate::errors::{MagneticFieldError, Result};
use crate::fields::{FieldPoint, MeshLabel};
use crate::math::Scalar;
use crate::strength::{wang_dimensions, wang_lambda};

/// How the conductors of a coil are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MesherKind {
    /// One filament at the conductor centre, plus window images.
    #[default]
    Center,
    /// Wang's edge filaments for non-round conductors.
    Wang,
}

/// Builds inducing and induced points for the turns of a magnetic.
#[derive(Debug, Clone, Copy)]
pub struct CoilMesher<'a> {
    magnetic: &'a Magnetic,
    image_order: usize,
    kind: MesherKind,
}

impl<'a> CoilMesher<'a> {
    /// Centre mesher without images.
    #[must_use]
    pub const fn new(magnetic: &'a Magnetic) -> Self {
        Self {
            magnetic,
            image_order: 0,
            kind: MesherKind::Center,
        }
    }

    /// Sets the image order `M`; `(2M + 1)²` points are produced per turn.
    #[must_use]
    pub const fn with_image_order(mut self, order: usize) -> Self {
        self.image_order = order;
        self
    }

    /// Selects the conductor representation.
    #[must_use]
    pub const fn with_kind(mut self, kind: MesherKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mesher kind that applies to `wire`.
    #[must_use]
    pub const fn kind_for(&self, wire: &Wire) -> MesherKind {
        match self.kind {
            MesherKind::Wang if !wire.is_round() => MesherKind::Wang,
            _ => MesherKind::Center,
        }
    }

    /// Inducing points of every turn. `currents[i]` is the current of turn `i`.
    pub fn inducing_points(&self, currents: &[Scalar]) -> Result<Vec<FieldPoint>> {
        let turns = &self.magnetic.coil.turns;
        if currents.len() != turns.len() {
            return Err(MagneticFieldError::InvalidInput(format!(
                "{} currents for {} turns",
                currents.len(),
                turns.len()
            )));
        }
        let mut points = Vec::new();
        for (index, (turn, &current)) in turns.iter().zip(currents).enumerate() {
            points.extend(self.inducing_turn(index, turn, current)?);
        }
        Ok(points)
    }

    /// Inducing points of a single turn.
    pub fn inducing_turn(&self, turn_index: usize, turn: &Turn, current: Scalar) -> Result<Vec<FieldPoint>> {
        let core = &self.magnetic.core;
        let wire = &self.magnetic.coil.winding_of(turn)?.wire;
        match self.kind_for(wire) {
            MesherKind::Wang => wang_inducing_points(turn_index, turn, wire, current, core),
            MesherKind::Center if core.is_toroidal() => Ok(vec![FieldPoint::new(
                turn.coordinates.x,
                turn.coordinates.y,
            )
            .with_value(current)
            .with_turn_index(turn_index)
            .with_turn_length(turn.length)
            .with_rotation(turn.rotation)]),
            MesherKind::Center => Ok(centre_images(turn_index, turn, current, core, self.image_order)),
        }
    }

    /// Induced points of every turn, in turn order.
    pub fn induced_points(&self) -> Result<Vec<FieldPoint>> {
        let mut points = Vec::new();
        for (index, turn) in self.magnetic.coil.turns.iter().enumerate() {
            let wire = &self.magnetic.coil.winding_of(turn)?.wire;
            match self.kind_for(wire) {
                MesherKind::Wang => points.extend(wang_induced_points(index, turn, wire)),
                MesherKind::Center => points.push(
                    FieldPoint::new(turn.coordinates.x, turn.coordinates.y)
                        .with_turn_index(index)
                        .with_turn_length(turn.length)
                        .with_label(MeshLabel::Center)
                        .with_rotation(turn.rotation),
                ),
            }
        }
        Ok(points)
    }

    /// Regular `nx × ny` grid of cell centres covering the winding window.
    ///
    /// For toroids the grid spans the square enclosing the central hole.
    #[must_use]
    pub fn window_grid(&self, nx: usize, ny: usize) -> Vec<FieldPoint> {
        let core = &self.magnetic.core;
        let window = core.winding_window;
        let (x_start, x_span) = if core.is_toroidal() {
            (-window.width, 2.0 * window.width)
        } else {
            (core.column_width / 2.0, window.width)
        };
        let y_start = -window.height / 2.0;
        let dx = x_span / nx.max(1) as Scalar;
        let dy = window.height / ny.max(1) as Scalar;

        let mut points = Vec::with_capacity(nx * ny);
        for i in 0..nx {
            let x = x_start + (i as Scalar + 0.5) * dx;
            for j in 0..ny {
                points.push(FieldPoint::new(x, y_start + (j as Scalar + 0.5) * dy));
            }
        }
        points
    }
}

/// Image currents of one turn of a concentric core.
///
/// Image `(m, n)` mirrors the turn `|m|` times across the window's vertical
/// walls and `|n|` times across the horizontal ones, scaled by
/// `(μr − k)/(μr + k)` with `k = max(|m|, |n|)`.
#[must_use]
pub fn centre_images(turn_index: usize, turn: &Turn, current: Scalar, core: &Core, order: usize) -> Vec<FieldPoint> {
    let window_width = core.winding_window.width;
    let window_height = core.winding_window.height;
    let half_column = core.column_width / 2.0;
    let permeability = core.initial_permeability;
    let turn_a = turn.coordinates.x - half_column;
    let turn_b = turn.coordinates.y + window_height / 2.0;
    let order = order as i64;

    let mut points = Vec::with_capacity(((2 * order + 1) * (2 * order + 1)) as usize);
    for m in -order..=order {
        for n in -order..=order {
            let k = m.abs().max(n.abs()) as Scalar;
            let scale = (permeability - k) / (permeability + k);
            let a = reflect(m, window_width, turn_a);
            let b = reflect(n, window_height, turn_b);
            points.push(
                FieldPoint::new(a + half_column, b - window_height / 2.0)
                    .with_value(current * scale)
                    .with_turn_index(turn_index)
                    .with_turn_length(turn.length),
            );
        }
    }
    points
}

#[inline]
fn reflect(index: i64, span: Scalar, offset: Scalar) -> Scalar {
    let base = index as Scalar * span;
    if index % 2 == 0 {
        base + offset
    } else {
        base + span - offset
    }
}

/// Wang's edge filaments of one turn, each carrying the full turn current.
pub fn wang_inducing_points(
    turn_index: usize,
    turn: &Turn,
    wire: &Wire,
    current: Scalar,
    core: &Core,
) -> Result<Vec<FieldPoint>> {
    if core.is_toroidal() {
        return Err(MagneticFieldError::UnsupportedOperation {
            model: "Wang",
            operation: "inducing_points",
            message: "Wang mesher is not implemented for toroidal cores",
        });
    }
    let (c, h) = wang_dimensions(wire);
    let inset = wang_lambda(c, h) * h;
    let (x, y) = (turn.coordinates.x, turn.coordinates.y);
    let filament = |x: Scalar, y: Scalar, label: MeshLabel| {
        FieldPoint::new(x, y)
            .with_value(current)
            .with_turn_index(turn_index)
            .with_turn_length(turn.length)
            .with_label(label)
    };
    Ok(match wire.wire_type {
        WireType::Foil => vec![
            filament(x, y + wire.conducting_height / 2.0 - inset, MeshLabel::Top),
            filament(x, y - wire.conducting_height / 2.0 + inset, MeshLabel::Bottom),
        ],
        _ => vec![
            filament(x + wire.conducting_width / 2.0 - inset, y, MeshLabel::Right),
            filament(x - wire.conducting_width / 2.0 + inset, y, MeshLabel::Left),
        ],
    })
}

/// The four edge midpoints of a conductor.
#[must_use]
pub fn wang_induced_points(turn_index: usize, turn: &Turn, wire: &Wire) -> Vec<FieldPoint> {
    let (x, y) = (turn.coordinates.x, turn.coordinates.y);
    let half_width = wire.conducting_width / 2.0;
    let half_height = wire.conducting_height / 2.0;
    [
        (x + half_width, y, MeshLabel::Right),
        (x - half_width, y, MeshLabel::Left),
        (x, y + half_height, MeshLabel::Top),
        (x, y - half_height, MeshLabel::Bottom),
    ]
    .into_iter()
    .map(|(x, y, label)| {
        FieldPoint::new(x, y)
            .with_turn_index(turn_index)
            .with_turn_length(turn.length)
            .with_label(label)
    })
    .collect()
}
