//! Stroh sextic eigenvalue solution for 2D anisotropic elasticity.
//!
//! The crack front lies along z and the crack plane is x-y; the sub-blocks
//! Q, R, T picked out of the rotated stiffness tensor encode exactly that
//! geometry. Eigenvalues are the roots of the characteristic sextic
//! det(Q + p (R + R^T) + p^2 T) = 0, found by a bounded simultaneous root
//! iteration in complex arithmetic, and the eigenvectors are recovered per
//! root from the nullspace of the same matrix, so the result does not
//! depend on the column order of any library eigensolver.

use nalgebra::{Complex, Matrix3, Vector3};
use simba::scalar::ComplexField;

use crate::elasticity::StiffnessMatrix;
use crate::error::{Error, Result};

type CMatrix3 = Matrix3<Complex<f64>>;
type CVector3 = Vector3<Complex<f64>>;

/// Minimum distance between selected eigenvalues; the p_k are
/// dimensionless and of order one.
const ROOT_SEPARATION_TOL: f64 = 1e-4;

/// Sweep cap for the sextic root iteration.
const MAX_ROOT_SWEEPS: usize = 200;

/// The normalized Stroh eigen-solution {A, B^-1, p}.
///
/// Immutable once computed; both the Griffith toughness and the crack-tip
/// displacement field consume it as an opaque value. Columns of A and the
/// entries of p are ordered consistently (ascending real part of p).
#[derive(Debug, Clone)]
pub struct StrohSolution {
    a: CMatrix3,
    b_inv: CMatrix3,
    p: CVector3,
}

impl StrohSolution {
    pub fn a(&self) -> &CMatrix3 {
        &self.a
    }

    pub fn b_inv(&self) -> &CMatrix3 {
        &self.b_inv
    }

    /// The three eigenvalues with positive imaginary part.
    pub fn p(&self) -> &CVector3 {
        &self.p
    }

    /// Barnett-Lothe style energy-factor matrix L = 1/2 Re(i A B^-1).
    ///
    /// Re(i z) = -Im(z). The matrix i A B^-1 is Hermitian for a stable
    /// material, so L is symmetric.
    pub fn energy_factor_matrix(&self) -> Matrix3<f64> {
        (self.a * self.b_inv).map(|z| -0.5 * z.im)
    }
}

fn complex(m: &Matrix3<f64>) -> CMatrix3 {
    m.map(|x| Complex::new(x, 0.0))
}

/// Cross product of two complex 3-vectors (no conjugation).
fn cross(u: &CVector3, v: &CVector3) -> CVector3 {
    CVector3::new(
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    )
}

/// A nonzero nullspace vector of a rank-2 complex 3x3 matrix.
///
/// The columns of the adjugate are the pairwise cross products of the rows
/// of `m`; for a rank-2 matrix every nonzero one spans the nullspace. A
/// vanishing adjugate means the root is repeated (rank <= 1).
fn nullspace_vector(m: &CMatrix3) -> Option<CVector3> {
    let r0 = CVector3::new(m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let r1 = CVector3::new(m[(1, 0)], m[(1, 1)], m[(1, 2)]);
    let r2 = CVector3::new(m[(2, 0)], m[(2, 1)], m[(2, 2)]);
    let candidates = [cross(&r1, &r2), cross(&r2, &r0), cross(&r0, &r1)];
    let scale = r0.norm().max(r1.norm()).max(r2.norm());

    let mut best: Option<CVector3> = None;
    let mut best_norm = 0.0;
    for c in candidates {
        let n = c.norm();
        if n > best_norm {
            best_norm = n;
            best = Some(c);
        }
    }
    if best_norm <= 1e-10 * scale * scale {
        return None;
    }
    best.map(|v| v / Complex::new(best_norm, 0.0))
}

/// Plane-problem sub-blocks Q, R, T for a crack front along z.
fn plane_blocks(c: &StiffnessMatrix) -> (Matrix3<f64>, Matrix3<f64>, Matrix3<f64>) {
    let qq = Matrix3::new(
        c[(0, 0)], c[(0, 5)], c[(0, 4)], //
        c[(0, 5)], c[(5, 5)], c[(4, 5)], //
        c[(0, 4)], c[(4, 5)], c[(4, 4)],
    );
    let r = Matrix3::new(
        c[(0, 5)], c[(0, 1)], c[(0, 3)], //
        c[(5, 5)], c[(1, 5)], c[(3, 5)], //
        c[(4, 5)], c[(1, 4)], c[(3, 4)],
    );
    let t = Matrix3::new(
        c[(5, 5)], c[(1, 5)], c[(3, 5)], //
        c[(1, 5)], c[(1, 1)], c[(1, 3)], //
        c[(3, 5)], c[(1, 3)], c[(3, 3)],
    );
    (qq, r, t)
}

/// Coefficients, ascending in p, of det(Q + p (R + R^T) + p^2 T).
///
/// Every entry of the matrix is a quadratic in p, so the determinant is a
/// sextic; its leading coefficient is det(T).
fn sextic_coefficients(qq: &Matrix3<f64>, rr: &Matrix3<f64>, t: &Matrix3<f64>) -> [f64; 7] {
    let e = |i: usize, j: usize| [qq[(i, j)], rr[(i, j)], t[(i, j)]];
    // 2x2 minor a d - b c of quadratic entries, a quartic.
    let minor = |a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]| {
        let mut m = [0.0; 5];
        for i in 0..3 {
            for j in 0..3 {
                m[i + j] += a[i] * d[j] - b[i] * c[j];
            }
        }
        m
    };
    let m00 = minor(e(1, 1), e(1, 2), e(2, 1), e(2, 2));
    let m01 = minor(e(1, 0), e(1, 2), e(2, 0), e(2, 2));
    let m02 = minor(e(1, 0), e(1, 1), e(2, 0), e(2, 1));
    let mut det = [0.0; 7];
    for (row, m, sign) in [(e(0, 0), m00, 1.0), (e(0, 1), m01, -1.0), (e(0, 2), m02, 1.0)] {
        for i in 0..3 {
            for j in 0..5 {
                det[i + j] += sign * row[i] * m[j];
            }
        }
    }
    det
}

/// All six roots of a real sextic by simultaneous (Durand-Kerner)
/// iteration in complex arithmetic.
///
/// The 6x6 fundamental matrix of the sextic formalism defeats nalgebra's
/// real Schur iteration (its spectrum comes in equal-modulus conjugate
/// pairs), so the roots are taken from the characteristic polynomial
/// instead, with a hard sweep cap. A stalled iteration means repeated or
/// clustered roots and is reported as a degenerate spectrum.
fn sextic_roots(coeffs: &[f64; 7]) -> Result<[Complex<f64>; 6]> {
    let lead = coeffs[6];
    let mut monic = [Complex::new(0.0, 0.0); 6];
    for (k, m) in monic.iter_mut().enumerate() {
        *m = Complex::new(coeffs[k] / lead, 0.0);
    }
    let eval = |z: Complex<f64>| {
        let mut acc = Complex::new(1.0, 0.0);
        for k in (0..6).rev() {
            acc = acc * z + monic[k];
        }
        acc
    };

    // Distinct non-real seeds; each sweep updates the roots in place.
    let seed = Complex::new(0.4, 0.9);
    let mut roots = [Complex::new(1.0, 0.0); 6];
    for k in 1..6 {
        roots[k] = roots[k - 1] * seed;
    }
    for _ in 0..MAX_ROOT_SWEEPS {
        let mut worst = 0.0_f64;
        for k in 0..6 {
            let mut denom = Complex::new(1.0, 0.0);
            for j in 0..6 {
                if j != k {
                    denom *= roots[k] - roots[j];
                }
            }
            if denom.modulus() == 0.0 {
                return Err(Error::DegenerateSpectrum(
                    "sextic root iterates collapsed onto each other".into(),
                ));
            }
            let step = eval(roots[k]) / denom;
            roots[k] -= step;
            let rel = step.modulus() / (1.0 + roots[k].modulus());
            if !rel.is_finite() {
                return Err(Error::DegenerateSpectrum(
                    "sextic root iteration diverged".into(),
                ));
            }
            worst = worst.max(rel);
        }
        if worst < 1e-13 {
            return Ok(roots);
        }
    }
    Err(Error::DegenerateSpectrum(
        "sextic root iteration did not converge (repeated or clustered roots)".into(),
    ))
}

/// Solve the Stroh eigenvalue problem for a rotated stiffness tensor (GPa).
///
/// Returns the three eigenpairs with strictly positive imaginary part,
/// normalized against the skew-symplectic form so that 2 a_k^T b_k = 1.
pub fn solve_stroh(c: &StiffnessMatrix) -> Result<StrohSolution> {
    let (qq, r, t) = plane_blocks(c);
    let rr = r + r.transpose();

    let coeffs = sextic_coefficients(&qq, &rr, &t);
    let scale = coeffs.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    // Leading coefficient is det(T).
    if coeffs[6].abs() <= 1e-12 * scale {
        return Err(Error::SingularMatrix(
            "Stroh block T is not invertible (degenerate orientation)".into(),
        ));
    }

    // Three roots with Im(p) > 0, ordered by a stable key. Positional
    // selection from a raw decomposition is not reproducible across
    // eigensolvers.
    let mut roots: Vec<Complex<f64>> = sextic_roots(&coeffs)?
        .into_iter()
        .filter(|p| p.im > 0.0)
        .collect();
    if roots.len() != 3 {
        return Err(Error::DegenerateSpectrum(format!(
            "expected 3 eigenvalues with positive imaginary part, found {}",
            roots.len()
        )));
    }
    roots.sort_by(|a, b| {
        (a.re, a.im)
            .partial_cmp(&(b.re, b.im))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // A repeated sextic root (e.g. in-plane isotropy) has no eigenvector
    // basis; computed roots that slip through the iteration collapse into
    // a cluster far tighter than any genuine anisotropic splitting.
    for i in 0..3 {
        for j in (i + 1)..3 {
            if (roots[i] - roots[j]).modulus() < ROOT_SEPARATION_TOL {
                return Err(Error::DegenerateSpectrum(format!(
                    "repeated Stroh eigenvalue near p = {:.6} + {:.6}i",
                    roots[i].re, roots[i].im
                )));
            }
        }
    }

    let qq_c = complex(&qq);
    let rr_c = complex(&rr);
    let rt_c = complex(&r.transpose());
    let t_c = complex(&t);

    let mut a_cols = [CVector3::zeros(); 3];
    let mut b_cols = [CVector3::zeros(); 3];
    for (k, &p) in roots.iter().enumerate() {
        let m = qq_c + rr_c * p + t_c * (p * p);
        let a = nullspace_vector(&m).ok_or_else(|| {
            Error::DegenerateSpectrum(format!(
                "repeated Stroh eigenvalue p = {:.6} + {:.6}i (isotropic degeneracy)",
                p.re, p.im
            ))
        })?;
        let b = (rt_c + t_c * p) * a;

        // Symplectic normalization: [a; b]^T J [a; b] = 2 a^T b = 1.
        // nalgebra's `dot` on complex vectors is the unconjugated sum.
        let d = 2.0 * a.dot(&b);
        if d.modulus() <= 1e-14 {
            return Err(Error::DegenerateSpectrum(format!(
                "eigenvector pair for p = {:.6} + {:.6}i cannot be normalized",
                p.re, p.im
            )));
        }
        let scale = Complex::new(1.0, 0.0) / d.sqrt();
        a_cols[k] = a * scale;
        b_cols[k] = b * scale;
    }

    let a_mat = CMatrix3::from_columns(&a_cols);
    let b_mat = CMatrix3::from_columns(&b_cols);
    let b_inv = b_mat
        .try_inverse()
        .ok_or_else(|| Error::SingularMatrix("Stroh matrix B is not invertible".into()))?;

    Ok(StrohSolution {
        a: a_mat,
        b_inv,
        p: CVector3::new(roots[0], roots[1], roots[2]),
    })
}
