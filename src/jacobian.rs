//! Finite-difference estimation of the model Jacobian.
//!
//! The Jacobian is the N x P sensitivity matrix of model outputs to
//! parameters: `J[i, j] = d model(params, xs)[i] / d params[j]`. It is
//! estimated column by column with forward differences, falling back to the
//! backward one-sided difference when a perturbation leaves the model domain.

use log::warn;
use ndarray::{Array1, Array2};

use crate::error::{FitError, Result};
use crate::model::Model;

/// Relative perturbation for finite differences, with the same value used as
/// an absolute floor for near-zero parameters.
pub(crate) const RELATIVE_STEP: f64 = 1e-6;

/// Perturbation step for parameter value `p`: `max(|p| * eps, eps)`.
fn step_for(p: f64) -> f64 {
    (p.abs() * RELATIVE_STEP).max(RELATIVE_STEP)
}

/// Estimate the Jacobian of `model` at `params` over the samples `xs`.
///
/// `base` must be the model values at `params` (the caller already has them
/// from the residual computation, so the base point is not re-evaluated).
/// Returns the Jacobian together with the number of model evaluations spent
/// on it: one per column, or two when a column fell back to the backward
/// difference.
///
/// A domain error on the forward perturbation of a parameter falls back to
/// the backward difference; if both directions are inadmissible the fit
/// cannot proceed and `FitError::JacobianUndefined` is returned.
pub fn jacobian<M: Model>(
    model: &M,
    params: &Array1<f64>,
    xs: &Array1<f64>,
    base: &Array1<f64>,
) -> Result<(Array2<f64>, usize)> {
    let n = xs.len();
    let p = params.len();

    let mut jac = Array2::zeros((n, p));
    let mut perturbed = params.clone();
    let mut evals = 0;

    for j in 0..p {
        let step = step_for(params[j]);

        perturbed[j] = params[j] + step;
        evals += 1;
        let column = match model.eval(&perturbed, xs) {
            Ok(forward) => (&forward - base) / step,
            Err(_) => {
                // Forward perturbation left the domain; difference from the
                // other side instead.
                warn!(
                    "forward perturbation of parameter {} left the model domain; \
                     using backward difference",
                    j
                );
                perturbed[j] = params[j] - step;
                evals += 1;
                let backward = model
                    .eval(&perturbed, xs)
                    .map_err(|_| FitError::JacobianUndefined)?;
                (base - &backward) / step
            }
        };
        jac.column_mut(j).assign(&column);

        perturbed[j] = params[j];
    }

    Ok((jac, evals))
}
