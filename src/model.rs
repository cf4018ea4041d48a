//! Model callback definition.
//!
//! This module defines the `Model` trait, the contract between the fitting
//! engine and the parametric function being fitted. The engine has no
//! knowledge of model semantics; it only evaluates the callback and reacts
//! to domain errors.

use ndarray::Array1;
use thiserror::Error;

/// Signal that a model was evaluated with parameters outside its admissible
/// domain (e.g. a negative scale or rate parameter).
///
/// This is a recoverable condition inside the engine: the Jacobian estimator
/// falls back to one-sided differencing, and the iteration loop treats a
/// domain error on a trial step as a rejected step. It is only fatal when the
/// initial guess itself is inadmissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("model parameters are outside the admissible domain")]
pub struct DomainError;

/// Result type for model evaluations.
pub type ModelResult = std::result::Result<Array1<f64>, DomainError>;

/// A parametric model `y = f(params, x)` evaluated over a batch of
/// independent-variable samples.
///
/// Implementations must be pure: repeated evaluation at the same parameters
/// and samples must yield the same values, so that residual and Jacobian rows
/// stay aligned across iterations.
pub trait Model {
    /// Evaluate the model at `params` for every sample in `xs`.
    ///
    /// Returns one predicted value per sample, or `DomainError` when the
    /// parameters are outside the model's admissible domain.
    fn eval(&self, params: &Array1<f64>, xs: &Array1<f64>) -> ModelResult;
}

/// Any plain function or closure with the right shape is a model.
impl<F> Model for F
where
    F: Fn(&Array1<f64>, &Array1<f64>) -> ModelResult,
{
    fn eval(&self, params: &Array1<f64>, xs: &Array1<f64>) -> ModelResult {
        self(params, xs)
    }
}
