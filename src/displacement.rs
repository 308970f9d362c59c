//! Near-tip anisotropic displacement field for K-controlled crack setups.
//!
//! Evaluates u = sqrt(2r/pi) Re(A P(theta) B^-1) [K_II, K_I, K_III] at
//! atom positions relative to the crack tip and adds it to a copy of the
//! caller's coordinates. The field is plane-strain: constant along z, with
//! u_z only excited by K_III (or by monoclinic coupling terms).

use std::f64::consts::PI;

use nalgebra::{Complex, Matrix3, Vector3};

use crate::stroh::StrohSolution;

/// Crack-tip position in the x-y plane, in the same length unit as the
/// atom coordinates (Angstrom).
#[derive(Debug, Clone, Copy)]
pub struct CrackTip {
    pub x: f64,
    pub y: f64,
}

/// Stress-intensity factors for the three fracture modes, in MPa·sqrt(m).
#[derive(Debug, Clone, Copy)]
pub struct StressIntensity {
    pub k_i: f64,
    pub k_ii: f64,
    pub k_iii: f64,
}

/// 1 MPa·sqrt(m) = 100 GPa·sqrt(Angstrom); with stiffnesses in GPa and
/// coordinates in Angstrom the displacement comes out in Angstrom.
const MPA_SQRT_M_TO_GPA_SQRT_ANG: f64 = 100.0;

impl StressIntensity {
    pub fn mode_i(k_i: f64) -> Self {
        Self {
            k_i,
            k_ii: 0.0,
            k_iii: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.k_i == 0.0 && self.k_ii == 0.0 && self.k_iii == 0.0
    }

    /// The mode vector of the Stroh formula, ordered [K_II, K_I, K_III]
    /// and rescaled to GPa·sqrt(Angstrom).
    fn mode_vector(&self) -> Vector3<Complex<f64>> {
        Vector3::new(
            Complex::new(self.k_ii * MPA_SQRT_M_TO_GPA_SQRT_ANG, 0.0),
            Complex::new(self.k_i * MPA_SQRT_M_TO_GPA_SQRT_ANG, 0.0),
            Complex::new(self.k_iii * MPA_SQRT_M_TO_GPA_SQRT_ANG, 0.0),
        )
    }
}

/// Displacement (Angstrom) at a single position.
///
/// theta = atan2(x2, x1) and the complex square roots take the principal
/// branch; its cut lies along theta = +-pi, i.e. on the crack faces where
/// the physical field is discontinuous anyway. The sqrt(r) prefactor sends
/// the displacement to zero at the tip itself.
pub fn displacement_at(
    stroh: &StrohSolution,
    tip: &CrackTip,
    k: &StressIntensity,
    position: &[f64; 3],
) -> Vector3<f64> {
    let x1 = position[0] - tip.x;
    let x2 = position[1] - tip.y;
    let r = (x1 * x1 + x2 * x2).sqrt();
    let theta = x2.atan2(x1);
    let (sin_t, cos_t) = theta.sin_cos();

    let p = stroh.p();
    let phase = Matrix3::from_diagonal(&Vector3::new(
        (Complex::new(cos_t, 0.0) + p[0] * sin_t).sqrt(),
        (Complex::new(cos_t, 0.0) + p[1] * sin_t).sqrt(),
        (Complex::new(cos_t, 0.0) + p[2] * sin_t).sqrt(),
    ));

    let u = stroh.a() * phase * stroh.b_inv() * k.mode_vector();
    (2.0 * r / PI).sqrt() * u.map(|z| z.re)
}

/// Add the crack-tip field to every position in place.
///
/// Positions are rows [x, y, z]; each atom is independent of the others.
pub fn displace_positions(
    stroh: &StrohSolution,
    tip: &CrackTip,
    k: &StressIntensity,
    positions: &mut [[f64; 3]],
) {
    if k.is_zero() {
        return;
    }
    for position in positions.iter_mut() {
        let u = displacement_at(stroh, tip, k, position);
        position[0] += u[0];
        position[1] += u[1];
        position[2] += u[2];
    }
}

/// Copy-then-mutate variant: returns displaced positions, the input slice
/// is left untouched.
pub fn displaced_positions(
    stroh: &StrohSolution,
    tip: &CrackTip,
    k: &StressIntensity,
    positions: &[[f64; 3]],
) -> Vec<[f64; 3]> {
    let mut displaced = positions.to_vec();
    displace_positions(stroh, tip, k, &mut displaced);
    displaced
}
