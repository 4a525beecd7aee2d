//! Linear algebra utilities.
//!
//! Dense matrix-vector product and residual norms for checking solver
//! output.

use ndarray::{Array1, Array2};
use numpro_types::error::{NumError, NumResult};

/// `y = A x` for an n x m matrix `A` and a length-m vector `x`.
pub fn matrix_vector_product(a: &Array2<f64>, x: &Array1<f64>) -> NumResult<Array1<f64>> {
    if a.ncols() != x.len() {
        return Err(NumError::DimensionMismatch {
            context: "matrix_vector_product",
            expected: a.ncols(),
            actual: x.len(),
        });
    }
    Ok(a.dot(x))
}

/// Residual `A x - b`.
pub fn residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> NumResult<Array1<f64>> {
    if a.nrows() != b.len() {
        return Err(NumError::DimensionMismatch {
            context: "residual right-hand side",
            expected: a.nrows(),
            actual: b.len(),
        });
    }
    let ax = matrix_vector_product(a, x)?;
    Ok(ax - b)
}

/// Maximum absolute entry; 0 for an empty vector.
pub fn inf_norm(v: &Array1<f64>) -> f64 {
    v.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()))
}
