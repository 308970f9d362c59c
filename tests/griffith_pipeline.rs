//! End-to-end pipeline: orientation resolution -> tensor rotation -> Stroh
//! solution -> Griffith toughness and crack-tip displacement field.

use approx::assert_relative_eq;
use crackmech::displacement::{displaced_positions, CrackTip, StressIntensity};
use crackmech::elasticity::{rotate_stiffness, ElasticConstants};
use crackmech::griffith::griffith_toughness;
use crackmech::orientation::{resolve_orientation, CrystalFamily, OrientationFrame};
use crackmech::stroh::solve_stroh;

#[test]
fn tungsten_cube_orientation_end_to_end() {
    // Cube-oriented tungsten-like crystal: the identity frame must leave
    // the base tensor untouched.
    let (ex, ey, ez) =
        resolve_orientation(CrystalFamily::Cubic, &[1, 0, 0], &[0, 1, 0], &[0, 0, 1]).unwrap();
    let frame = OrientationFrame::new(ex, ey, ez).unwrap();
    let constants = ElasticConstants::cubic(522.0, 203.0, 160.0).unwrap();
    let rotated = rotate_stiffness(&constants, &frame);
    assert_relative_eq!(rotated, constants.voigt_matrix(), epsilon = 1e-10);

    let stroh = solve_stroh(&rotated).unwrap();
    let k_griffith = griffith_toughness(&stroh, 2.0).unwrap();
    assert!(
        k_griffith > 0.5 && k_griffith < 5.0,
        "K_Griffith = {} MPa*sqrt(m) not of the expected order",
        k_griffith
    );

    // Pre-strain a few atoms around the tip at the Griffith load.
    let tip = CrackTip { x: 40.0, y: 40.0 };
    let k = StressIntensity::mode_i(k_griffith);
    let positions = vec![
        [40.0, 40.0, 0.0],
        [55.0, 40.0, 1.5],
        [25.0, 41.0, 3.0],
        [40.0, 60.0, 4.5],
    ];
    let displaced = displaced_positions(&stroh, &tip, &k, &positions);

    // Atom exactly at the tip does not move, the rest do, and the caller's
    // array is untouched.
    assert_eq!(displaced[0], positions[0]);
    for (before, after) in positions.iter().zip(&displaced).skip(1) {
        assert!(before != after, "atom at {:?} did not move", before);
    }
    assert_eq!(positions[2], [25.0, 41.0, 3.0]);

    // Displacements at tens of Angstroms from the tip stay sub-Angstrom at
    // the Griffith load.
    for (before, after) in positions.iter().zip(&displaced) {
        let d = ((after[0] - before[0]).powi(2)
            + (after[1] - before[1]).powi(2)
            + (after[2] - before[2]).powi(2))
        .sqrt();
        assert!(d < 3.0, "implausible displacement {} A", d);
    }
}

#[test]
fn hexagonal_basal_crack_system_end_to_end() {
    // Basal cleavage: crack plane normal to the c-axis, front along an
    // a-axis.
    let (ex, ey, ez) = resolve_orientation(
        CrystalFamily::Hexagonal,
        &[1, -1, 0, 0],
        &[0, 0, 0, 1],
        &[2, -1, -1, 0],
    )
    .unwrap();
    let frame = OrientationFrame::new(ex, ey, ez).unwrap();
    // Magnesium-like hexagonal constants (GPa).
    let constants = ElasticConstants::hexagonal(59.5, 26.1, 21.8, 61.6, 16.4).unwrap();
    let rotated = rotate_stiffness(&constants, &frame);
    assert_relative_eq!(rotated, rotated.transpose(), epsilon = 1e-9);

    let stroh = solve_stroh(&rotated).unwrap();
    for p in stroh.p().iter() {
        assert!(p.im > 0.0);
    }
    let k_griffith = griffith_toughness(&stroh, 0.6).unwrap();
    assert!(k_griffith > 0.0 && k_griffith < 2.0);
}

#[test]
fn basal_plane_crack_front_along_c_axis_is_degenerate() {
    // With the crack front along the c-axis the in-plane response is
    // exactly isotropic (c66 = (c11 - c12)/2), a repeated Stroh root.
    let (ex, ey, ez) = resolve_orientation(
        CrystalFamily::Hexagonal,
        &[1, 0, -1, 0],
        &[1, -1, 0, 0],
        &[0, 0, 0, 1],
    )
    .unwrap();
    let frame = OrientationFrame::new(ex, ey, ez).unwrap();
    let constants = ElasticConstants::hexagonal(59.5, 26.1, 21.8, 61.6, 16.4).unwrap();
    let rotated = rotate_stiffness(&constants, &frame);
    assert!(matches!(
        solve_stroh(&rotated),
        Err(crackmech::Error::DegenerateSpectrum(_))
    ));
}
