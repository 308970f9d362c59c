//! Mapping of crystallographic direction notations to Cartesian unit vectors.
//!
//! Cubic-family directions are plain Miller index triples. Hexagonal and C14
//! Laves orientations use the 4-index Miller–Bravais notation and are limited
//! to the canonical basal/prismatic directions of the lookup table below.

use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};
use strum_macros::EnumString;

use crate::error::{Error, Result};

/// Crystal family tag selecting the direction notation and the pattern of
/// independent elastic constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CrystalFamily {
    #[strum(serialize = "cubic", serialize = "bcc", serialize = "fcc")]
    Cubic,
    #[strum(serialize = "hexagonal", serialize = "hcp", serialize = "c14")]
    Hexagonal,
}

impl CrystalFamily {
    pub fn parse(tag: &str) -> Result<Self> {
        Self::from_str(tag)
            .map_err(|_| Error::InvalidInput(format!("unknown crystal family '{}'", tag)))
    }
}

/// Cartesian image of the nine canonical Miller–Bravais directions used for
/// hexagonal and C14 crack systems.
fn miller_bravais_direction(indices: &[i64; 4]) -> Option<Vector3<f64>> {
    let v = match indices {
        [0, 0, 0, 1] => [0.0, 0.0, 1.0],
        [1, -1, 0, 0] => [0.0, 1.0, 0.0],
        [-1, 1, 0, 0] => [0.0, -1.0, 0.0],
        [1, 0, -1, 0] => [1.0, 0.0, 0.0],
        [-1, 0, 1, 0] => [-1.0, 0.0, 0.0],
        [2, -1, -1, 0] => [1.0, 0.0, 0.0],
        [-2, 1, 1, 0] => [-1.0, 0.0, 0.0],
        [1, -2, 1, 0] => [0.0, -1.0, 0.0],
        [-1, 2, -1, 0] => [0.0, 1.0, 0.0],
        _ => return None,
    };
    Some(Vector3::new(v[0], v[1], v[2]))
}

fn normalized(v: Vector3<f64>, indices: &[i64]) -> Result<Vector3<f64>> {
    let norm = v.norm();
    if norm == 0.0 {
        return Err(Error::DegenerateDirection(format!(
            "direction {:?} has zero length",
            indices
        )));
    }
    Ok(v / norm)
}

/// Map a single integer direction to a Cartesian unit vector.
///
/// Cubic families take a Miller triple directly; hexagonal families require
/// one of the nine canonical 4-index directions.
pub fn resolve_direction(family: CrystalFamily, indices: &[i64]) -> Result<Vector3<f64>> {
    match family {
        CrystalFamily::Cubic => {
            let miller: &[i64; 3] = indices.try_into().map_err(|_| {
                Error::InvalidInput(format!(
                    "cubic direction needs 3 Miller indices, got {:?}",
                    indices
                ))
            })?;
            let v = Vector3::new(miller[0] as f64, miller[1] as f64, miller[2] as f64);
            normalized(v, indices)
        }
        CrystalFamily::Hexagonal => {
            let mb: &[i64; 4] = indices.try_into().map_err(|_| {
                Error::InvalidInput(format!(
                    "hexagonal direction needs 4 Miller-Bravais indices, got {:?}",
                    indices
                ))
            })?;
            let v = miller_bravais_direction(mb).ok_or_else(|| {
                Error::UnsupportedOrientation(format!(
                    "{:?} is not a canonical Miller-Bravais direction",
                    indices
                ))
            })?;
            normalized(v, indices)
        }
    }
}

/// Resolve the three axes of a crack coordinate system to unit vectors.
///
/// Pure lookup and normalization; orthogonality of the triple is checked
/// when an [`OrientationFrame`] is built from the result.
pub fn resolve_orientation(
    family: CrystalFamily,
    x: &[i64],
    y: &[i64],
    z: &[i64],
) -> Result<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
    Ok((
        resolve_direction(family, x)?,
        resolve_direction(family, y)?,
        resolve_direction(family, z)?,
    ))
}

/// An orthonormal triple of lab-frame axes expressed in the crystal frame.
///
/// The rows of [`OrientationFrame::rotation_matrix`] are the axes, so the
/// matrix Q satisfies Q·Qᵗ = I; this is validated on construction.
#[derive(Debug, Clone, Copy)]
pub struct OrientationFrame {
    x: Vector3<f64>,
    y: Vector3<f64>,
    z: Vector3<f64>,
}

const ORTHONORMALITY_TOL: f64 = 1e-8;

impl OrientationFrame {
    pub fn new(x: Vector3<f64>, y: Vector3<f64>, z: Vector3<f64>) -> Result<Self> {
        let frame = Self { x, y, z };
        let q = frame.rotation_matrix();
        let defect = (q * q.transpose() - Matrix3::identity()).norm();
        if defect > ORTHONORMALITY_TOL {
            return Err(Error::InvalidOrientation(format!(
                "direction triple is not orthonormal (|QQ^T - I| = {:.3e})",
                defect
            )));
        }
        Ok(frame)
    }

    /// The crystal frame itself: x = e1, y = e2, z = e3.
    pub fn identity() -> Self {
        Self {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }

    /// Direction-cosine matrix Q with the frame axes as rows.
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.x[0], self.x[1], self.x[2], //
            self.y[0], self.y[1], self.y[2], //
            self.z[0], self.z[1], self.z[2],
        )
    }

    /// The frame that undoes this one (axes = columns of Q).
    pub fn inverse(&self) -> Self {
        let q = self.rotation_matrix();
        Self {
            x: Vector3::new(q[(0, 0)], q[(1, 0)], q[(2, 0)]),
            y: Vector3::new(q[(0, 1)], q[(1, 1)], q[(2, 1)]),
            z: Vector3::new(q[(0, 2)], q[(1, 2)], q[(2, 2)]),
        }
    }
}
