//! Anisotropic fracture-mechanics kernels for K-controlled crack workflows:
//! elasticity-tensor rotation, the Stroh sextic eigensolution, theoretical
//! Griffith toughness and the near-tip displacement field. The Rust API is
//! pure and typed; the pyo3 module at the bottom mirrors the signatures of
//! the original workflow nodes.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

pub mod displacement;
pub mod elasticity;
pub mod error;
pub mod griffith;
pub mod orientation;
pub mod stroh;

pub use displacement::{CrackTip, StressIntensity};
pub use elasticity::{ElasticConstants, StiffnessMatrix};
pub use error::{Error, Result};
pub use orientation::{CrystalFamily, OrientationFrame};
pub use stroh::StrohSolution;

/// Opaque wrapper for the Stroh eigensolution in Python.
#[pyclass(name = "StrohSolution")]
#[derive(Clone)]
struct PyStrohSolution {
    solution: StrohSolution,
}

#[pymethods]
impl PyStrohSolution {
    /// The three eigenvalues with positive imaginary part as (re, im) pairs.
    fn eigenvalues(&self) -> Vec<(f64, f64)> {
        self.solution.p().iter().map(|p| (p.re, p.im)).collect()
    }

    fn __repr__(&self) -> String {
        let p = self.solution.p();
        format!(
            "StrohSolution(p=[{:.4}{:+.4}j, {:.4}{:+.4}j, {:.4}{:+.4}j])",
            p[0].re, p[0].im, p[1].re, p[1].im, p[2].re, p[2].im
        )
    }
}

fn stiffness_from_numpy(c: &PyReadonlyArray2<f64>) -> PyResult<StiffnessMatrix> {
    let view = c.as_array();
    if view.nrows() != 6 || view.ncols() != 6 {
        return Err(Error::InvalidInput(format!(
            "stiffness tensor must be 6x6, got {:?}",
            view.shape()
        ))
        .into());
    }
    Ok(StiffnessMatrix::from_fn(|i, j| view[[i, j]]))
}

/// Map symmetry-direction notations to Cartesian unit vectors.
#[pyfunction]
fn resolve_orientation(
    crystal: &str,
    orient_x: Vec<i64>,
    orient_y: Vec<i64>,
    orient_z: Vec<i64>,
) -> PyResult<([f64; 3], [f64; 3], [f64; 3])> {
    let family = CrystalFamily::parse(crystal)?;
    let (ex, ey, ez) = orientation::resolve_orientation(family, &orient_x, &orient_y, &orient_z)?;
    Ok((ex.into(), ey.into(), ez.into()))
}

/// Rotated 6x6 stiffness tensor for a crack coordinate system.
///
/// All-in-one node behavior: resolves the directions, validates the frame
/// and applies the Bond rotation. Hexagonal/C14 families need c13 and c33.
#[pyfunction]
#[pyo3(signature = (c11, c12, c44, orient_x, orient_y, orient_z, crystal, c13=None, c33=None))]
#[allow(clippy::too_many_arguments)]
fn rotate_elasticity_tensor<'py>(
    py: Python<'py>,
    c11: f64,
    c12: f64,
    c44: f64,
    orient_x: Vec<i64>,
    orient_y: Vec<i64>,
    orient_z: Vec<i64>,
    crystal: &str,
    c13: Option<f64>,
    c33: Option<f64>,
) -> PyResult<&'py PyArray2<f64>> {
    let family = CrystalFamily::parse(crystal)?;
    let constants = match family {
        CrystalFamily::Cubic => ElasticConstants::cubic(c11, c12, c44)?,
        CrystalFamily::Hexagonal => {
            let (c13, c33) = c13.zip(c33).ok_or_else(|| {
                Error::InvalidInput("hexagonal crystals need c13 and c33".into())
            })?;
            ElasticConstants::hexagonal(c11, c12, c13, c33, c44)?
        }
    };
    let (ex, ey, ez) = orientation::resolve_orientation(family, &orient_x, &orient_y, &orient_z)?;
    let frame = OrientationFrame::new(ex, ey, ez)?;
    let c = elasticity::rotate_stiffness(&constants, &frame);
    Ok(Array2::from_shape_fn((6, 6), |(i, j)| c[(i, j)]).into_pyarray(py))
}

/// Stroh eigensolution of a rotated stiffness tensor.
#[pyfunction]
fn solve_stroh(stiffness: PyReadonlyArray2<f64>) -> PyResult<PyStrohSolution> {
    let c = stiffness_from_numpy(&stiffness)?;
    let solution = stroh::solve_stroh(&c)?;
    Ok(PyStrohSolution { solution })
}

/// Mode-I Griffith toughness (MPa*sqrt(m)) from a Stroh solution.
#[pyfunction]
fn theoretical_griffith_toughness(stroh: &PyStrohSolution, gamma_s: f64) -> PyResult<f64> {
    Ok(griffith::griffith_toughness(&stroh.solution, gamma_s)?)
}

/// Mode-I Griffith toughness straight from a 6x6 stiffness tensor.
///
/// Signature of the original workflow node: solve + toughness in one step.
#[pyfunction]
fn theoretical_griffith_fracture_toughness(
    stiffness: PyReadonlyArray2<f64>,
    gamma_s: f64,
) -> PyResult<f64> {
    let c = stiffness_from_numpy(&stiffness)?;
    let solution = stroh::solve_stroh(&c)?;
    Ok(griffith::griffith_toughness(&solution, gamma_s)?)
}

/// Displace atom positions by the near-tip crack field.
///
/// `positions` is the (n, 3) coordinate array of the structure; a new array
/// is returned and the input is never mutated.
#[pyfunction]
#[allow(clippy::too_many_arguments)]
fn apply_crack_displacement<'py>(
    py: Python<'py>,
    positions: PyReadonlyArray2<f64>,
    k_i: f64,
    k_ii: f64,
    k_iii: f64,
    tip_x: f64,
    tip_y: f64,
    stroh: &PyStrohSolution,
) -> PyResult<&'py PyArray2<f64>> {
    let view = positions.as_array();
    if view.ncols() != 3 {
        return Err(Error::InvalidInput(format!(
            "positions must be an (n, 3) array, got {:?}",
            view.shape()
        ))
        .into());
    }
    let mut owned: Vec<[f64; 3]> = view
        .outer_iter()
        .map(|row| [row[0], row[1], row[2]])
        .collect();

    let tip = CrackTip { x: tip_x, y: tip_y };
    let k = StressIntensity { k_i, k_ii, k_iii };
    displacement::displace_positions(&stroh.solution, &tip, &k, &mut owned);

    let n = owned.len();
    Ok(Array2::from_shape_fn((n, 3), |(i, j)| owned[i][j]).into_pyarray(py))
}

/// Fracture-mechanics nodes implemented in Rust.
#[pymodule]
fn crackmech(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyStrohSolution>()?;
    m.add_function(wrap_pyfunction!(resolve_orientation, m)?)?;
    m.add_function(wrap_pyfunction!(rotate_elasticity_tensor, m)?)?;
    m.add_function(wrap_pyfunction!(solve_stroh, m)?)?;
    m.add_function(wrap_pyfunction!(theoretical_griffith_toughness, m)?)?;
    m.add_function(wrap_pyfunction!(theoretical_griffith_fracture_toughness, m)?)?;
    m.add_function(wrap_pyfunction!(apply_crack_displacement, m)?)?;
    Ok(())
}
