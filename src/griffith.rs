//! Theoretical Griffith fracture toughness from surface energy and the
//! anisotropic elastic response.

use crate::elasticity::StiffnessMatrix;
use crate::error::{Error, Result};
use crate::stroh::StrohSolution;

/// Mode-I critical stress-intensity factor in MPa·sqrt(m).
///
/// lambda = (L^-1)[1,1] with the Stroh energy-factor matrix L and mode
/// ordering [II, I, III]; gamma_s is the surface energy in J/m^2 and the
/// stiffness behind `stroh` is in GPa, hence the 10^9 / 10^-6 rescale.
pub fn griffith_toughness(stroh: &StrohSolution, gamma_s: f64) -> Result<f64> {
    if gamma_s < 0.0 {
        return Err(Error::InvalidInput(format!(
            "surface energy must be non-negative, got {} J/m^2",
            gamma_s
        )));
    }
    let l = stroh.energy_factor_matrix();
    let l_inv = l
        .try_inverse()
        .ok_or_else(|| Error::SingularMatrix("energy-factor matrix L is not invertible".into()))?;
    let lambda = l_inv[(1, 1)];
    Ok((2.0 * gamma_s * lambda * 1.0e9).sqrt() * 1.0e-6)
}

/// Effective plane-strain modulus (GPa) from the compliance sub-blocks.
///
/// The closed-form b11/b22/b12/b66 route; for orientations with the crack
/// front along a symmetry axis it agrees with the lambda coefficient of the
/// Stroh route, which is the canonical one here because it feeds the
/// displacement field as well.
pub fn plane_strain_modulus(c: &StiffnessMatrix) -> Result<f64> {
    let s = c
        .try_inverse()
        .ok_or_else(|| Error::SingularMatrix("stiffness tensor is not invertible".into()))?;
    let s33 = s[(2, 2)];
    if s33 == 0.0 {
        return Err(Error::SingularMatrix(
            "compliance component S33 vanishes".into(),
        ));
    }
    let b11 = (s[(0, 0)] * s33 - s[(0, 2)] * s[(0, 2)]) / s33;
    let b22 = (s[(1, 1)] * s33 - s[(1, 2)] * s[(1, 2)]) / s33;
    let b12 = (s[(0, 1)] * s33 - s[(0, 2)] * s[(1, 2)]) / s33;
    let b66 = (s[(5, 5)] * s33 - s[(1, 5)] * s[(1, 5)]) / s33;

    let estar = ((b11 * b22 / 2.0) * ((b22 / b11).sqrt() + (2.0 * b12 + b66) / (2.0 * b11)))
        .powf(-0.5);
    if !estar.is_finite() {
        return Err(Error::SingularMatrix(
            "compliance sub-blocks give no finite plane-strain modulus".into(),
        ));
    }
    Ok(estar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elasticity::{rotate_stiffness, ElasticConstants};
    use crate::orientation::OrientationFrame;
    use crate::stroh::solve_stroh;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn tungsten_stiffness() -> StiffnessMatrix {
        let constants = ElasticConstants::cubic(522.0, 203.0, 160.0).unwrap();
        rotate_stiffness(&constants, &OrientationFrame::identity())
    }

    #[test]
    fn tungsten_toughness_is_of_order_mpa_sqrt_m() {
        let sol = solve_stroh(&tungsten_stiffness()).unwrap();
        let k = griffith_toughness(&sol, 2.0).unwrap();
        assert!(k > 0.5 && k < 5.0, "K = {} MPa*sqrt(m) out of range", k);
    }

    #[test]
    fn nearly_isotropic_limit_matches_classical_formula() {
        // Tungsten is almost isotropic (Zener ratio 1.003): mu = c44,
        // lambda = c12, E = mu (3 lambda + 2 mu) / (lambda + mu).
        let (mu, lambda): (f64, f64) = (160.0, 203.0);
        let e = mu * (3.0 * lambda + 2.0 * mu) / (lambda + mu);
        let nu = lambda / (2.0 * (lambda + mu));
        let gamma_s = 2.0;
        let k_classical = (2.0 * gamma_s * e / (1.0 - nu * nu) * 1.0e9).sqrt() * 1.0e-6;

        let sol = solve_stroh(&tungsten_stiffness()).unwrap();
        let k = griffith_toughness(&sol, gamma_s).unwrap();
        assert_relative_eq!(k, k_classical, max_relative = 0.02);
    }

    #[test]
    fn stroh_route_agrees_with_compliance_route() {
        let c = tungsten_stiffness();
        let estar = plane_strain_modulus(&c).unwrap();
        let sol = solve_stroh(&c).unwrap();
        let lambda = sol
            .energy_factor_matrix()
            .try_inverse()
            .unwrap()[(1, 1)];
        assert_relative_eq!(lambda, estar, max_relative = 1e-3);
    }

    #[test]
    fn agreement_holds_for_rotated_cube_orientation() {
        let constants = ElasticConstants::cubic(522.0, 203.0, 160.0).unwrap();
        let frame = OrientationFrame::new(
            Vector3::new(1.0, 1.0, 0.0) / 2.0_f64.sqrt(),
            Vector3::new(-1.0, 1.0, 0.0) / 2.0_f64.sqrt(),
            Vector3::z(),
        )
        .unwrap();
        let c = rotate_stiffness(&constants, &frame);
        let estar = plane_strain_modulus(&c).unwrap();
        let sol = solve_stroh(&c).unwrap();
        let lambda = sol
            .energy_factor_matrix()
            .try_inverse()
            .unwrap()[(1, 1)];
        assert_relative_eq!(lambda, estar, max_relative = 1e-3);
    }

    #[test]
    fn zero_surface_energy_gives_zero_toughness() {
        let sol = solve_stroh(&tungsten_stiffness()).unwrap();
        let k = griffith_toughness(&sol, 0.0).unwrap();
        assert_relative_eq!(k, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn negative_surface_energy_is_rejected() {
        let sol = solve_stroh(&tungsten_stiffness()).unwrap();
        let err = griffith_toughness(&sol, -0.5).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
