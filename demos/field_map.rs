use magnetic_field::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MagneticFieldError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ETD-like core, 1 mm central gap, two layers of 12 turns.
    let window = WindingWindow {
        width: 5.0e-3,
        height: 16.0e-3,
    };
    let core = Core::concentric(CoreShapeFamily::Etd, 10.0e-3, 30.0e-3, window).with_gapping(vec![
        CoreGap::new(GapType::Subtractive, 1.0e-3, 0.0, 0.0, 10.0e-3),
        CoreGap::new(GapType::Residual, 1.0e-5, 12.5e-3, 0.0, 2.5e-3),
        CoreGap::new(GapType::Residual, 1.0e-5, -12.5e-3, 0.0, 2.5e-3),
    ]);
    let wire = Wire::round(0.8e-3, 0.85e-3);
    let turns = [6.0e-3, 7.0e-3]
        .into_iter()
        .enumerate()
        .flat_map(|(winding, x)| (0..12).map(move |i| Turn::new(winding, x, -6.6e-3 + 1.2e-3 * i as f64)))
        .collect();
    let coil = Coil::new(
        vec![Winding::new("Primary", wire.clone()), Winding::new("Secondary", wire)],
        turns,
    );
    let magnetic = Magnetic::new(core, coil);

    let operating_point = OperatingPoint::new(vec![
        Excitation::sinusoidal(100.0e3, 2.0),
        Excitation::sinusoidal(100.0e3, 2.0),
    ]);

    let config = MagneticFieldConfig::default().with_grid(10, 16);
    let grid = CoilMesher::new(&magnetic).window_grid(config.number_points_x, config.number_points_y);
    let induced = Field::new(100.0e3, grid);
    let field = MagneticField;
    let output = field.calculate_magnetic_field_strength_field(&operating_point, &magnetic, Some(&induced), &config)?;

    println!("method: {}", output.method_used);
    println!("x(m), y(m), Hx(A/m), Hy(A/m)");
    for harmonic in &output.field_per_frequency {
        for point in &harmonic.data {
            println!(
                "{:.4e}, {:.4e}, {:.4e}, {:.4e}",
                point.point.x, point.point.y, point.real, point.imaginary
            );
        }
    }
    Ok(())
}
