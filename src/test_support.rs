//! Shared fixtures for unit tests.

use crate::component::{Coil, Core, CoreGap, CoreShapeFamily, GapType, Magnetic, Turn, Winding, Wire, WindingWindow};
use crate::excitation::{Excitation, OperatingPoint};
use crate::math::Scalar;

pub const COLUMN_WIDTH: Scalar = 10.0e-3;
pub const WINDOW_WIDTH: Scalar = 5.0e-3;
pub const WINDOW_HEIGHT: Scalar = 16.0e-3;
pub const GAP_LENGTH: Scalar = 1.0e-3;

fn linspace(start: Scalar, end: Scalar, count: usize) -> impl Iterator<Item = Scalar> {
    let step = if count > 1 { (end - start) / (count - 1) as Scalar } else { 0.0 };
    (0..count).map(move |i| start + i as Scalar * step)
}

/// Concentric core without gaps and an empty coil.
pub fn concentric_core() -> Core {
    let window = WindingWindow {
        width: WINDOW_WIDTH,
        height: WINDOW_HEIGHT,
    };
    Core::concentric(CoreShapeFamily::Etd, COLUMN_WIDTH, 30.0e-3, window)
}

/// ETD-like core with a ground central gap and `turns` primary turns stacked
/// at `r = 7 mm` between `z = ±6 mm`.
pub fn gapped_concentric_magnetic(turns: usize) -> Magnetic {
    let core = concentric_core().with_gapping(vec![
        CoreGap::new(GapType::Subtractive, GAP_LENGTH, 0.0, 0.0, COLUMN_WIDTH),
        CoreGap::new(GapType::Residual, 1.0e-5, 12.5e-3, 0.0, 2.5e-3),
        CoreGap::new(GapType::Residual, 1.0e-5, -12.5e-3, 0.0, 2.5e-3),
    ]);
    let coil = Coil::new(
        vec![Winding::new("Primary", Wire::round(0.8e-3, 0.85e-3))],
        linspace(-6.0e-3, 6.0e-3, turns)
            .map(|z| Turn::new(0, 7.0e-3, z).with_length(0.044))
            .collect(),
    );
    Magnetic::new(core, coil)
}

/// Ungapped core carrying a single turn of `wire` at `(x, y)`.
pub fn single_turn_magnetic(wire: Wire, x: Scalar, y: Scalar) -> Magnetic {
    let coil = Coil::new(vec![Winding::new("Primary", wire)], vec![Turn::new(0, x, y)]);
    Magnetic::new(concentric_core(), coil)
}

/// Two windings of one round turn each, at `(x0, 0)` and `(x1, 0)`.
pub fn two_winding_magnetic(x0: Scalar, x1: Scalar) -> Magnetic {
    let wire = Wire::round(0.5e-3, 0.55e-3);
    let coil = Coil::new(
        vec![Winding::new("Primary", wire.clone()), Winding::new("Secondary", wire)],
        vec![Turn::new(0, x0, 0.0), Turn::new(1, x1, 0.0)],
    );
    Magnetic::new(concentric_core(), coil)
}

/// Toroid (OD 40 mm, ID 20 mm) with `turns` turns on a 9 mm circle in the hole.
pub fn toroidal_magnetic(turns: usize) -> Magnetic {
    let core = Core::toroidal(40.0e-3, 20.0e-3, 10.0e-3);
    let coil = Coil::new(
        vec![Winding::new("Primary", Wire::round(0.5e-3, 0.55e-3))],
        linspace(-60.0, 60.0, turns)
            .map(|degrees: Scalar| {
                let (sin, cos) = degrees.to_radians().sin_cos();
                Turn::new(0, 9.0e-3 * cos, 9.0e-3 * sin).with_rotation(degrees)
            })
            .collect(),
    );
    Magnetic::new(core, coil)
}

/// Sinusoidal excitation of `peak` amperes at 100 kHz on every winding.
pub fn sinusoidal_operating_point(windings: usize, peak: Scalar) -> OperatingPoint {
    OperatingPoint::new((0..windings).map(|_| Excitation::sinusoidal(100.0e3, peak)).collect())
}
