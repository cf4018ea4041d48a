use ndarray::Array1;
use thiserror::Error;

/// The best point found before a fit stopped making progress.
///
/// Carried by the non-convergence error variants so a caller can inspect
/// (or log) how far the iteration got before it gave up.
#[derive(Debug, Clone)]
pub struct PartialFit {
    /// Parameter values at the best accepted step.
    pub params: Array1<f64>,

    /// Sum of squared residuals at those parameters.
    pub objective: f64,

    /// Number of trial steps performed.
    pub iterations: usize,
}

/// Error types for the histfit library.
#[derive(Error, Debug)]
pub enum FitError {
    /// The fit has no positive degrees of freedom (N <= P). Raised at
    /// construction, before any iteration is performed.
    #[error("invalid degrees of freedom: {points} data points for {params} parameters")]
    InvalidDegreesOfFreedom { points: usize, params: usize },

    /// The initial parameter guess is outside the model's admissible domain.
    #[error("initial parameter guess is outside the model domain")]
    InadmissibleInitialGuess,

    /// Both finite-difference perturbation directions left the model domain,
    /// so the Jacobian is undefined at the current parameters.
    #[error("Jacobian is undefined: both perturbation directions left the model domain")]
    JacobianUndefined,

    /// The iteration bound was reached before convergence.
    #[error("maximum iterations exceeded after {} trials (objective {:.6e})",
            .0.iterations, .0.objective)]
    MaxIterationsExceeded(PartialFit),

    /// Damping grew to its ceiling without finding an acceptable step.
    #[error("diverged: damping reached its maximum without an accepted step \
             (objective {:.6e})", .0.objective)]
    Diverged(PartialFit),

    /// The normal-equations matrix was singular at convergence, so no
    /// covariance (and hence no standard errors) can be reported.
    #[error("singular normal equations at convergence")]
    SingularMatrix,

    /// Mismatch between supplied vector lengths.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
}

impl FitError {
    /// The best point reached before a non-convergence failure, if any.
    pub fn partial_fit(&self) -> Option<&PartialFit> {
        match self {
            FitError::MaxIterationsExceeded(best) | FitError::Diverged(best) => Some(best),
            _ => None,
        }
    }
}

/// Result type alias for histfit operations.
pub type Result<T> = std::result::Result<T, FitError>;
