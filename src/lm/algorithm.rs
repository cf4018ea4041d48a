//! The damped Gauss-Newton (Levenberg-Marquardt) iteration.
//!
//! One `evaluate` call runs the full loop to a terminal state: it builds the
//! damped normal equations from a finite-difference Jacobian, solves for the
//! parameter step, accepts or rejects the trial, adapts the damping factor,
//! and finally extracts the covariance statistics from the converged
//! Jacobian.

use log::{debug, warn};
use ndarray::{Array1, Array2};
use std::fmt;

use crate::error::{FitError, PartialFit, Result};
use crate::jacobian::jacobian;
use crate::linalg::solve_spd;
use crate::model::Model;
use crate::uncertainty::{covariance, standard_errors};

use super::config::FitConfig;
use super::convergence::{ConvergenceCriteria, ConvergenceReason, IterationStatus};

/// Result of a converged fit.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Fitted parameter values.
    pub params: Array1<f64>,

    /// Estimated standard error of each parameter.
    pub standard_errors: Array1<f64>,

    /// Sum of squared residuals at the fitted parameters, for goodness-of-fit
    /// comparison against a chi-squared distribution with
    /// `degrees_of_freedom` degrees of freedom.
    pub chi_squared: f64,

    /// Parameter covariance matrix (scaled by the reduced chi-squared).
    pub covariance: Array2<f64>,

    /// Data points minus parameters.
    pub degrees_of_freedom: usize,

    /// Number of trial steps performed (accepted and rejected).
    pub iterations: usize,

    /// Number of model evaluations performed.
    pub func_evals: usize,

    /// Objective value at the initial guess and after each accepted step;
    /// non-increasing by construction.
    pub cost_history: Vec<f64>,
}

impl fmt::Display for FitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit result:")?;
        writeln!(f, "  chi-squared: {:.6e}", self.chi_squared)?;
        writeln!(f, "  degrees of freedom: {}", self.degrees_of_freedom)?;
        writeln!(f, "  iterations: {}", self.iterations)?;
        writeln!(f, "  function evaluations: {}", self.func_evals)?;
        for (i, (p, e)) in self
            .params
            .iter()
            .zip(self.standard_errors.iter())
            .enumerate()
        {
            writeln!(f, "  param[{}] = {:.6e} +/- {:.6e}", i, p, e)?;
        }
        Ok(())
    }
}

/// The Levenberg-Marquardt curve fitter.
///
/// Constructed with a model callback, an initial parameter guess and a data
/// set; [`evaluate`](LevenbergMarquardt::evaluate) runs the iteration to a
/// terminal state and returns the fitted parameters, their standard errors
/// and the chi-squared statistic.
///
/// Each instance owns its buffers exclusively for the duration of an
/// `evaluate` call; independent fits may run concurrently on separate
/// instances (see [`fit_all`](super::parallel::fit_all)).
pub struct LevenbergMarquardt<M: Model> {
    model: M,
    initial_params: Array1<f64>,
    xs: Array1<f64>,
    ys: Array1<f64>,
    config: FitConfig,
}

impl<M: Model> LevenbergMarquardt<M> {
    /// Create a fitter for `model` over the observed `data` pairs, starting
    /// from `initial_params`.
    ///
    /// Fails with `FitError::InvalidDegreesOfFreedom` unless the number of
    /// data points exceeds the number of parameters; the chi-squared
    /// statistic is meaningless otherwise, and the engine never proceeds
    /// with such a fit.
    pub fn new(model: M, initial_params: Array1<f64>, data: &[(f64, f64)]) -> Result<Self> {
        if initial_params.is_empty() {
            return Err(FitError::DimensionMismatch(
                "at least one free parameter is required".to_string(),
            ));
        }
        if data.len() <= initial_params.len() {
            return Err(FitError::InvalidDegreesOfFreedom {
                points: data.len(),
                params: initial_params.len(),
            });
        }

        let xs = data.iter().map(|&(x, _)| x).collect();
        let ys = data.iter().map(|&(_, y)| y).collect();

        Ok(Self {
            model,
            initial_params,
            xs,
            ys,
            config: FitConfig::default(),
        })
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: FitConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the maximum number of trial steps.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Set the tolerance on the relative objective decrease.
    pub fn with_ftol(mut self, ftol: f64) -> Self {
        self.config.ftol = ftol;
        self
    }

    /// Set the tolerance on the relative parameter change.
    pub fn with_xtol(mut self, xtol: f64) -> Self {
        self.config.xtol = xtol;
        self
    }

    /// Set the initial value of the damping factor.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.config.initial_lambda = lambda;
        self
    }

    /// Run the fit to a terminal state.
    ///
    /// Returns the converged [`FitResult`], or a distinct error for each
    /// failure outcome: an inadmissible initial guess, an undefined Jacobian,
    /// exceeding the iteration bound, or divergence of the damping schedule.
    /// The non-convergence errors carry the best parameters found so far.
    pub fn evaluate(&self) -> Result<FitResult> {
        let n = self.xs.len();
        let p = self.initial_params.len();
        let criteria = ConvergenceCriteria {
            ftol: self.config.ftol,
            xtol: self.config.xtol,
        };

        // A domain error at the initial guess is fatal: there is no previous
        // accepted point to retreat to.
        let mut params = self.initial_params.clone();
        let mut model_values = self
            .model
            .eval(&params, &self.xs)
            .map_err(|_| FitError::InadmissibleInitialGuess)?;
        let mut func_evals = 1;
        if model_values.len() != n {
            return Err(FitError::DimensionMismatch(format!(
                "model returned {} values for {} samples",
                model_values.len(),
                n
            )));
        }

        let mut residuals = &self.ys - &model_values;
        let mut objective = residuals.dot(&residuals);
        let mut cost_history = vec![objective];

        let mut lambda = self.config.initial_lambda;
        let mut iterations = 0;
        let mut status = IterationStatus::Iterating;

        // The Jacobian is only recomputed after an accepted step; rejected
        // trials reuse it, since the base parameters have not moved.
        let (mut jac, evals) = jacobian(&self.model, &params, &self.xs, &model_values)?;
        func_evals += evals;

        while !status.is_terminal() {
            if iterations >= self.config.max_iterations {
                status = IterationStatus::MaxIterationsExceeded;
                break;
            }
            iterations += 1;

            // Damped normal equations: (J^T J + lambda diag(J^T J)) dp = J^T r.
            let jtj = jac.t().dot(&jac);
            let jtr = jac.t().dot(&residuals);
            let mut damped = jtj.clone();
            for i in 0..p {
                damped[[i, i]] += lambda * jtj[[i, i]];
            }

            let step = match solve_spd(&damped, &jtr) {
                Some(step) => step,
                None => {
                    warn!(
                        "singular normal equations at iteration {}; \
                         increasing damping from {:.2e}",
                        iterations, lambda
                    );
                    if self.reject(&mut lambda) {
                        status = IterationStatus::Diverged;
                    }
                    continue;
                }
            };

            let trial = &params + &step;
            let trial_values = match self.model.eval(&trial, &self.xs) {
                Ok(values) => values,
                Err(_) => {
                    // The trial left the model domain: a rejected step, not
                    // a failure.
                    func_evals += 1;
                    if self.reject(&mut lambda) {
                        status = IterationStatus::Diverged;
                    }
                    continue;
                }
            };
            func_evals += 1;

            let trial_residuals = &self.ys - &trial_values;
            let trial_objective = trial_residuals.dot(&trial_residuals);

            // Strict improvement required: an exactly-equal objective is a
            // rejection, so accepted objectives are strictly decreasing.
            if trial_objective < objective {
                status = criteria.check(&params, &step, objective, trial_objective);

                params = trial;
                model_values = trial_values;
                residuals = trial_residuals;
                objective = trial_objective;
                cost_history.push(objective);
                lambda = (lambda * self.config.lambda_down_factor).max(self.config.min_lambda);

                debug!(
                    "iteration {}: accepted step, objective {:.6e}, lambda {:.2e}",
                    iterations, objective, lambda
                );

                if !status.is_terminal() {
                    let (new_jac, evals) =
                        jacobian(&self.model, &params, &self.xs, &model_values)?;
                    jac = new_jac;
                    func_evals += evals;
                }
            } else if criteria.step_negligible(&params, &step) {
                // The damped step is a descent direction; when a negligible
                // step still fails to improve the objective, the current
                // point is a stationary point.
                status = IterationStatus::Converged(ConvergenceReason::StepSize);
            } else if self.reject(&mut lambda) {
                status = IterationStatus::Diverged;
            }
        }

        match status {
            IterationStatus::Converged(reason) => {
                debug!(
                    "converged ({:?}) after {} iterations, objective {:.6e}",
                    reason, iterations, objective
                );
            }
            IterationStatus::MaxIterationsExceeded => {
                return Err(FitError::MaxIterationsExceeded(PartialFit {
                    params,
                    objective,
                    iterations,
                }));
            }
            IterationStatus::Diverged => {
                return Err(FitError::Diverged(PartialFit {
                    params,
                    objective,
                    iterations,
                }));
            }
            IterationStatus::Iterating => unreachable!("loop exits only in a terminal state"),
        }

        // Statistics from the converged point: covariance from the Jacobian
        // at the final parameters, scaled by the reduced chi-squared.
        let (final_jac, evals) = jacobian(&self.model, &params, &self.xs, &model_values)?;
        func_evals += evals;

        let degrees_of_freedom = n - p;
        let reduced_chi_squared = objective / degrees_of_freedom as f64;
        let covar = covariance(&final_jac, reduced_chi_squared)?;
        let errors = standard_errors(&covar);

        Ok(FitResult {
            params,
            standard_errors: errors,
            chi_squared: objective,
            covariance: covar,
            degrees_of_freedom,
            iterations,
            func_evals,
            cost_history,
        })
    }

    /// Raise the damping factor after a rejected trial. Returns true when
    /// lambda was already at its ceiling, which the caller treats as
    /// divergence.
    fn reject(&self, lambda: &mut f64) -> bool {
        if *lambda >= self.config.max_lambda {
            return true;
        }
        *lambda = (*lambda * self.config.lambda_up_factor).min(self.config.max_lambda);
        false
    }
}
