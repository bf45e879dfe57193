//! CLT Solver Example - 8-ply cross-ply panel

use std::sync::Arc;

use clt_solver::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== CLT Solver Example: Cross-Ply Panel ===\n");

    // Carbon/epoxy lamina (MPa, mm)
    let ply = Arc::new(Ply::new(129_500.0, 9_370.0, 0.38, 5_240.0, 0.2)?);

    // Stacking sequence, bottom to top: [90/90/0/90/90/0/90/90]
    let laminate = Laminate::from_angles(
        &[90.0, 90.0, 0.0, 90.0, 90.0, 0.0, 90.0, 90.0],
        Arc::clone(&ply),
    )?;

    println!("Plies: {}", laminate.layup().len());
    println!("Total thickness: {:.3} mm", laminate.total_thickness());
    println!("Symmetric layup: {}\n", laminate.is_symmetric());

    println!("{laminate}");

    let props = laminate.engineering_constants()?;
    println!("Membrane engineering constants:");
    println!("  Ex  = {:.1} MPa", props.ex);
    println!("  Ey  = {:.1} MPa", props.ey);
    println!("  Gxy = {:.1} MPa", props.gxy);
    println!("  vxy = {:.4}, vyx = {:.4}\n", props.vxy, props.vyx);

    // Simply supported 360 mm x 360 mm plate under uniaxial compression
    let (width, length) = (360.0, 360.0);

    let closed = buckling_load_with(width, length, laminate.d(), &BucklingOptions::default())?;
    let reference = critical_buckling_with(width, length, laminate.d(), &SearchParams::default())?;

    println!("Critical buckling ({width} x {length} mm):");
    println!(
        "  Closed-form: Nx = {:.4} N/mm (P = {:.1} N), mode (m={}, n={})",
        closed.load,
        closed.total_load(),
        closed.m,
        closed.n
    );
    println!(
        "  Reference:   Nx = {:.4} N/mm (P = {:.1} N), mode (m={}, n={})",
        reference.load,
        reference.total_load(),
        reference.m,
        reference.n
    );
    println!(
        "  Relative difference: {:.3e}",
        closed.relative_difference(&reference)
    );

    // Same panel under equal biaxial compression
    let biaxial = buckling_load_with(
        width,
        length,
        laminate.d(),
        &BucklingOptions::default().with_load_case(LoadCase::Biaxial { ratio: 1.0 }),
    )?;
    println!(
        "  Biaxial (Ny = Nx): Nx = {:.4} N/mm, mode (m={}, n={})",
        biaxial.load, biaxial.m, biaxial.n
    );

    println!("\n=== Analysis Complete ===");
    Ok(())
}
