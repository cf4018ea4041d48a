//! Parameter covariance and standard errors at convergence.
//!
//! For a nonlinear least-squares fit the parameter covariance is estimated
//! as `redchi * inv(J^T J)`, where `J` is the Jacobian at the converged
//! parameters and `redchi` the reduced chi-squared (sum of squared residuals
//! over degrees of freedom). The reported standard errors are the square
//! roots of the covariance diagonal.

use ndarray::{Array1, Array2};

use crate::error::{FitError, Result};
use crate::linalg::invert_spd;

/// Covariance matrix from the converged Jacobian.
///
/// Fails with `FitError::SingularMatrix` when `J^T J` is not invertible; a
/// fit whose information matrix is singular has no meaningful standard
/// errors.
pub fn covariance(jacobian: &Array2<f64>, reduced_chi_squared: f64) -> Result<Array2<f64>> {
    let jtj = jacobian.t().dot(jacobian);
    let inv = invert_spd(&jtj).ok_or(FitError::SingularMatrix)?;
    Ok(inv * reduced_chi_squared)
}

/// Standard errors: square roots of the covariance diagonal.
///
/// Rounding can leave a tiny negative diagonal entry for a near-degenerate
/// parameter; those report a standard error of zero.
pub fn standard_errors(covariance: &Array2<f64>) -> Array1<f64> {
    covariance
        .diag()
        .mapv(|c| if c > 0.0 { c.sqrt() } else { 0.0 })
}
