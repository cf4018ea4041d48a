//! Configuration options for the Levenberg-Marquardt fit.

/// Configuration options for the Levenberg-Marquardt iteration: the damping
/// schedule, the convergence tolerances, and the iteration bound.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Maximum number of trial steps (accepted or rejected). Default: 500
    pub max_iterations: usize,

    /// Tolerance on the relative objective decrease of an accepted step.
    /// Default: 1e-10
    pub ftol: f64,

    /// Tolerance on the largest relative parameter change of an accepted
    /// step. Default: 1e-10
    pub xtol: f64,

    /// Initial value for the damping factor. Default: 1e-3
    pub initial_lambda: f64,

    /// Factor by which to increase lambda on a rejected step. Default: 10.0
    pub lambda_up_factor: f64,

    /// Factor by which to decrease lambda on an accepted step. Default: 0.1
    pub lambda_down_factor: f64,

    /// Floor for lambda. Default: 1e-12
    pub min_lambda: f64,

    /// Ceiling for lambda; a rejection with lambda already at the ceiling is
    /// treated as divergence. Default: 1e10
    pub max_lambda: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            ftol: 1e-10,
            xtol: 1e-10,
            initial_lambda: 1e-3,
            lambda_up_factor: 10.0,
            lambda_down_factor: 0.1,
            min_lambda: 1e-12,
            max_lambda: 1e10,
        }
    }
}
