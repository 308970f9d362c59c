//! Voigt stiffness tensors and their rotation into the crack frame.
//!
//! The 6x6 Bond transformation conjugates a stiffness matrix in Voigt
//! notation by the direction-cosine matrix of an [`OrientationFrame`]; the
//! stress convention puts the factor 2 on the upper-right block.

use nalgebra::SMatrix;

use crate::error::{Error, Result};
use crate::orientation::OrientationFrame;

pub type StiffnessMatrix = SMatrix<f64, 6, 6>;

/// Independent elastic constants of the supported crystal families, in GPa.
#[derive(Debug, Clone, Copy)]
pub enum ElasticConstants {
    Cubic {
        c11: f64,
        c12: f64,
        c44: f64,
    },
    Hexagonal {
        c11: f64,
        c12: f64,
        c13: f64,
        c33: f64,
        c44: f64,
    },
}

impl ElasticConstants {
    pub fn cubic(c11: f64, c12: f64, c44: f64) -> Result<Self> {
        if c11 <= 0.0 || c44 <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "cubic constants need c11 > 0 and c44 > 0, got c11 = {}, c44 = {}",
                c11, c44
            )));
        }
        Ok(Self::Cubic { c11, c12, c44 })
    }

    pub fn hexagonal(c11: f64, c12: f64, c13: f64, c33: f64, c44: f64) -> Result<Self> {
        if c11 <= 0.0 || c33 <= 0.0 || c44 <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "hexagonal constants need c11, c33, c44 > 0, got c11 = {}, c33 = {}, c44 = {}",
                c11, c33, c44
            )));
        }
        Ok(Self::Hexagonal {
            c11,
            c12,
            c13,
            c33,
            c44,
        })
    }

    /// Base stiffness matrix in the crystal frame.
    ///
    /// The hexagonal pattern carries the derived shear term (c11 - c12)/2 in
    /// the 66 position; the cubic pattern repeats c44 there.
    pub fn voigt_matrix(&self) -> StiffnessMatrix {
        match *self {
            Self::Cubic { c11, c12, c44 } => StiffnessMatrix::new(
                c11, c12, c12, 0.0, 0.0, 0.0, //
                c12, c11, c12, 0.0, 0.0, 0.0, //
                c12, c12, c11, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, c44, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, c44, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, c44,
            ),
            Self::Hexagonal {
                c11,
                c12,
                c13,
                c33,
                c44,
            } => {
                let c66 = (c11 - c12) / 2.0;
                StiffnessMatrix::new(
                    c11, c12, c13, 0.0, 0.0, 0.0, //
                    c12, c11, c13, 0.0, 0.0, 0.0, //
                    c13, c13, c33, 0.0, 0.0, 0.0, //
                    0.0, 0.0, 0.0, c44, 0.0, 0.0, //
                    0.0, 0.0, 0.0, 0.0, c44, 0.0, //
                    0.0, 0.0, 0.0, 0.0, 0.0, c66,
                )
            }
        }
    }
}

/// The 6x6 Bond stress-transformation matrix KK = [[K1, 2 K2], [K3, K4]].
///
/// K1..K4 are the quadratic and cross products of the direction-cosine
/// entries; indices follow the standard Voigt pairing (23, 13, 12).
pub fn bond_matrix(frame: &OrientationFrame) -> SMatrix<f64, 6, 6> {
    let q = frame.rotation_matrix();
    let mut kk = SMatrix::<f64, 6, 6>::zeros();
    for i in 0..3 {
        let i1 = (i + 1) % 3;
        let i2 = (i + 2) % 3;
        for j in 0..3 {
            let j1 = (j + 1) % 3;
            let j2 = (j + 2) % 3;
            kk[(i, j)] = q[(i, j)] * q[(i, j)];
            kk[(i, j + 3)] = 2.0 * q[(i, j1)] * q[(i, j2)];
            kk[(i + 3, j)] = q[(i1, j)] * q[(i2, j)];
            kk[(i + 3, j + 3)] = q[(i1, j1)] * q[(i2, j2)] + q[(i1, j2)] * q[(i2, j1)];
        }
    }
    kk
}

/// Conjugate an arbitrary Voigt matrix by the Bond transformation of `frame`.
pub fn rotate_voigt(c: &StiffnessMatrix, frame: &OrientationFrame) -> StiffnessMatrix {
    let kk = bond_matrix(frame);
    kk * c * kk.transpose()
}

/// Rotate the base stiffness tensor of `constants` into the lab frame.
pub fn rotate_stiffness(
    constants: &ElasticConstants,
    frame: &OrientationFrame,
) -> StiffnessMatrix {
    rotate_voigt(&constants.voigt_matrix(), frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn tungsten() -> ElasticConstants {
        ElasticConstants::cubic(522.0, 203.0, 160.0).unwrap()
    }

    fn tilted_frame() -> OrientationFrame {
        let x = Vector3::new(1.0, 1.0, 1.0) / 3.0_f64.sqrt();
        let y = Vector3::new(1.0, -1.0, 0.0) / 2.0_f64.sqrt();
        let z = Vector3::new(1.0, 1.0, -2.0) / 6.0_f64.sqrt();
        OrientationFrame::new(x, y, z).unwrap()
    }

    #[test]
    fn identity_frame_returns_base_tensor() {
        let base = tungsten().voigt_matrix();
        let rotated = rotate_stiffness(&tungsten(), &OrientationFrame::identity());
        assert_relative_eq!(rotated, base, epsilon = 1e-12);
    }

    #[test]
    fn rotation_preserves_symmetry() {
        let rotated = rotate_stiffness(&tungsten(), &tilted_frame());
        assert_relative_eq!(rotated, rotated.transpose(), epsilon = 1e-9);
    }

    #[test]
    fn rotation_round_trips_through_inverse_frame() {
        let frame = tilted_frame();
        let base = tungsten().voigt_matrix();
        let there = rotate_voigt(&base, &frame);
        let back = rotate_voigt(&there, &frame.inverse());
        assert_relative_eq!(back, base, epsilon = 1e-8);
    }

    #[test]
    fn hexagonal_shear_term_is_derived() {
        let c = ElasticConstants::hexagonal(64.3, 25.7, 20.1, 70.9, 18.4)
            .unwrap()
            .voigt_matrix();
        assert_relative_eq!(c[(5, 5)], (64.3 - 25.7) / 2.0, epsilon = 1e-14);
        assert_relative_eq!(c, c.transpose(), epsilon = 1e-14);
    }

    #[test]
    fn nonpositive_constants_are_rejected() {
        assert!(ElasticConstants::cubic(0.0, 100.0, 50.0).is_err());
        assert!(ElasticConstants::hexagonal(60.0, 20.0, 20.0, 70.0, -1.0).is_err());
    }

    #[test]
    fn bond_matrix_of_identity_is_identity() {
        let kk = bond_matrix(&OrientationFrame::identity());
        assert_relative_eq!(kk, SMatrix::<f64, 6, 6>::identity(), epsilon = 1e-14);
    }
}
