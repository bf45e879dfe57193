use std::sync::Arc;

use approx::assert_relative_eq;
use clt_solver::math;
use clt_solver::prelude::*;

const CROSS_PLY: [f64; 8] = [90.0, 90.0, 0.0, 90.0, 90.0, 0.0, 90.0, 90.0];

fn carbon_epoxy(thickness: f64) -> Arc<Ply> {
    Arc::new(Ply::new(129_500.0, 9_370.0, 0.38, 5_240.0, thickness).unwrap())
}

fn cross_ply_laminate() -> Laminate {
    Laminate::from_angles(&CROSS_PLY, carbon_epoxy(0.2)).unwrap()
}

/// Cross-ply stack where the 0° layers use a separate ply of the given thickness
fn cross_ply_with_zero_thickness(t0: f64) -> Laminate {
    let ninety = carbon_epoxy(0.2);
    let zero = carbon_epoxy(t0);
    let layup = CROSS_PLY
        .iter()
        .map(|&angle| {
            let ply = if angle == 0.0 { &zero } else { &ninety };
            LayupEntry::new(angle, Arc::clone(ply))
        })
        .collect();
    Laminate::new(layup).unwrap()
}

fn assert_finite_symmetric(m: &Mat3) {
    assert!(m.iter().all(|v| v.is_finite()));
    assert_eq!(*m, m.transpose());
}

#[test]
fn documented_cross_ply_example() {
    let laminate = cross_ply_laminate();

    assert_eq!(laminate.layup().len(), 8);
    assert_relative_eq!(laminate.total_thickness(), 1.6, epsilon = 1e-12);
    assert_finite_symmetric(laminate.a());
    assert_finite_symmetric(laminate.b());
    assert_finite_symmetric(laminate.d());

    // Mirror-symmetric stack has no extension-bending coupling
    assert!(laminate.is_symmetric());
    assert!(math::max_abs(laminate.b()) < 1e-9 * math::max_abs(laminate.a()));

    let closed = buckling_load(360.0, 360.0, laminate.d()).unwrap();
    let reference = critical_buckling(360.0, 360.0, laminate.d()).unwrap();

    assert!(closed.is_finite() && closed > 0.0);
    assert!(reference.is_finite() && reference > 0.0);
    assert_relative_eq!(closed, reference, max_relative = 1e-6);
}

#[test]
fn cross_ply_in_plane_stiffness() {
    // Two 0° and six 90° layers of 0.2 mm each
    let laminate = cross_ply_laminate();
    let ply = carbon_epoxy(0.2);
    let q = ply.q0();

    assert_relative_eq!(laminate.a()[(0, 0)], 0.4 * q[(0, 0)] + 1.2 * q[(1, 1)], max_relative = 1e-9);
    assert_relative_eq!(laminate.a()[(1, 1)], 1.2 * q[(0, 0)] + 0.4 * q[(1, 1)], max_relative = 1e-9);
    assert_relative_eq!(laminate.a()[(2, 2)], 1.6 * q[(2, 2)], max_relative = 1e-9);
    assert!(laminate.a()[(0, 2)].abs() < 1e-6);
    assert!(laminate.d()[(1, 2)].abs() < 1e-6);
}

#[test]
fn closed_form_mode_matches_reference() {
    let laminate = cross_ply_laminate();
    for (width, length) in [(360.0, 360.0), (200.0, 900.0), (500.0, 150.0)] {
        let closed =
            buckling_load_with(width, length, laminate.d(), &BucklingOptions::default()).unwrap();
        let reference =
            critical_buckling_with(width, length, laminate.d(), &SearchParams::default()).unwrap();

        assert_relative_eq!(closed.load, reference.load, max_relative = 1e-6);
        assert_eq!(closed.mode(), reference.mode());
        assert!(closed.converged && reference.converged);
        assert_relative_eq!(closed.total_load(), closed.load * width, max_relative = 1e-15);
    }
}

#[test]
fn angle_ply_solvers_agree_despite_coupling() {
    // ±45 stacks carry D16/D26; both solvers ignore them in the same way
    let laminate =
        Laminate::from_angles(&[45.0, -45.0, 45.0, -45.0, -45.0, 45.0, -45.0, 45.0], carbon_epoxy(0.2))
            .unwrap();
    assert!(laminate.d()[(0, 2)].abs() > 0.0);

    let closed = buckling_load(250.0, 400.0, laminate.d()).unwrap();
    let reference = critical_buckling(250.0, 400.0, laminate.d()).unwrap();
    assert_relative_eq!(closed, reference, max_relative = 1e-6);
}

/// [45]_8 of a shear-stiff ply, giving D12 + 2·D66 < 0 with no bending-twisting terms
fn negative_twist_laminate() -> Laminate {
    let ply = Arc::new(Ply::new(1_000.0, 1_000.0, 0.0, 5_000.0, 0.2).unwrap());
    Laminate::from_angles(&[45.0; 8], ply).unwrap()
}

#[test]
fn short_plate_with_negative_twist_term_matches_reference() {
    let laminate = negative_twist_laminate();
    let d = laminate.d();
    assert!(d[(0, 1)] + 2.0 * d[(2, 2)] < 0.0);
    assert!(d[(0, 2)].abs() < 1e-9 * d[(0, 0)]);

    let closed = buckling_load_with(360.0, 36.0, d, &BucklingOptions::default()).unwrap();
    let reference = critical_buckling_with(360.0, 36.0, d, &SearchParams::default()).unwrap();

    assert_relative_eq!(closed.load, reference.load, max_relative = 1e-6);
    assert_eq!(closed.mode(), (1, 8));
    assert_eq!(closed.mode(), reference.mode());
    assert!(closed.converged && reference.converged);
}

#[test]
fn closed_form_cap_exhausted_across_width() {
    let laminate = negative_twist_laminate();
    let capped = BucklingOptions::default().with_mode_cap(3);

    let closed = buckling_load_with(360.0, 36.0, laminate.d(), &capped).unwrap();
    assert_eq!(closed.mode(), (1, 3));
    assert!(!closed.converged);

    let reference = critical_buckling(360.0, 36.0, laminate.d()).unwrap();
    assert!(closed.load > reference);
    assert!(matches!(
        buckling_load_with(360.0, 36.0, laminate.d(), &capped.strict()),
        Err(LaminateError::NumericConvergenceFailure { m: 1, n: 3, .. })
    ));
}

#[test]
fn thicker_plies_stiffen_and_raise_buckling_load() {
    let base = cross_ply_with_zero_thickness(0.2);
    let thick = cross_ply_with_zero_thickness(0.3);

    for i in 0..3 {
        assert!(thick.a()[(i, i)] > base.a()[(i, i)]);
        assert!(thick.d()[(i, i)] > base.d()[(i, i)]);
    }

    let base_load = buckling_load(360.0, 360.0, base.d()).unwrap();
    let thick_load = buckling_load(360.0, 360.0, thick.d()).unwrap();
    assert!(thick_load >= base_load);

    // Uniform thickening of every ply
    let uniform = Laminate::from_angles(&CROSS_PLY, carbon_epoxy(0.25)).unwrap();
    let uniform_load = buckling_load(360.0, 360.0, uniform.d()).unwrap();
    assert!(uniform_load > base_load);
}

#[test]
fn rebuilding_is_deterministic() {
    let ply = carbon_epoxy(0.2);
    let layup: Vec<LayupEntry> = CROSS_PLY
        .iter()
        .map(|&angle| LayupEntry::new(angle, Arc::clone(&ply)))
        .collect();

    let first = Laminate::new(layup.clone()).unwrap();
    let second = Laminate::new(layup).unwrap();

    assert_eq!(first.a(), second.a());
    assert_eq!(first.b(), second.b());
    assert_eq!(first.d(), second.d());
    assert_eq!(
        buckling_load(360.0, 360.0, first.d()).unwrap().to_bits(),
        buckling_load(360.0, 360.0, second.d()).unwrap().to_bits()
    );
}

#[test]
fn invalid_inputs_are_rejected() {
    assert!(matches!(
        Ply::new(-1.0, 9_370.0, 0.38, 5_240.0, 0.2),
        Err(LaminateError::InvalidMaterialParameter { .. })
    ));
    assert!(matches!(Laminate::new(Vec::new()), Err(LaminateError::InvalidLayup(_))));

    let laminate = cross_ply_laminate();
    assert!(matches!(
        buckling_load(0.0, 360.0, laminate.d()),
        Err(LaminateError::InvalidGeometry(_))
    ));
    assert!(matches!(
        critical_buckling(360.0, 0.0, laminate.d()),
        Err(LaminateError::InvalidGeometry(_))
    ));
}

#[test]
fn layup_from_json_matches_builder() {
    let json = r#"[
        {"angle": 0.0, "ply": {"e1": 129500.0, "e2": 9370.0, "v12": 0.38, "g12": 5240.0, "thickness": 0.2}},
        {"angle": 90.0, "ply": {"e1": 129500.0, "e2": 9370.0, "v12": 0.38, "g12": 5240.0, "thickness": 0.2}}
    ]"#;
    let from_json = Laminate::from_json(json).unwrap();
    let built = Laminate::from_angles(&[0.0, 90.0], carbon_epoxy(0.2)).unwrap();

    assert_eq!(from_json, built);
    assert_eq!(from_json.d(), built.d());

    let serialized = serde_json::to_value(&built).unwrap();
    assert_eq!(serialized["layup"].as_array().map(Vec::len), Some(2));
    assert_eq!(serialized["z"].as_array().map(Vec::len), Some(3));
}
