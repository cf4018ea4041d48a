//! # histfit
//!
//! `histfit` is a nonlinear least-squares curve-fitting engine built around
//! damped Gauss-Newton (Levenberg-Marquardt) iteration. It was written to
//! fit statistical models to the k-mer frequency histograms produced by a
//! sequence-assembly pipeline, but the engine itself knows nothing about
//! models: callers supply an arbitrary model callback.
//!
//! The library provides:
//! - The [`LevenbergMarquardt`] solver: construct it with a model callback,
//!   an initial parameter guess and a data set, then call `evaluate` to get
//!   the fitted parameters, their standard errors and a chi-squared
//!   goodness-of-fit statistic
//! - The [`Model`] trait (implemented for free by plain closures), with
//!   domain errors as an explicit, recoverable signal
//! - Bundled model callbacks in [`models`]: a weighted Gaussian and the
//!   Poisson/Gaussian k-mer coverage mixture
//! - [`lm::fit_all`] for running several independent fits in parallel
//!
//! ## Example
//!
//! ```
//! use histfit::{models, LevenbergMarquardt};
//! use ndarray::array;
//!
//! // A coarse histogram of a Gaussian bump, y = 10 * N(5, 2).pdf(x).
//! let data: Vec<(f64, f64)> = (1..=10)
//!     .map(|x| {
//!         let x = x as f64;
//!         let y = 10.0 / (2.0 * (2.0 * std::f64::consts::PI).sqrt())
//!             * (-0.5 * ((x - 5.0) / 2.0).powi(2)).exp();
//!         (x, y)
//!     })
//!     .collect();
//!
//! let solver = LevenbergMarquardt::new(models::gaussian, array![8.0, 4.0, 1.5], &data)?;
//! let fit = solver.evaluate()?;
//!
//! assert!((fit.params[1] - 5.0).abs() < 1e-4);
//! # Ok::<(), histfit::FitError>(())
//! ```

pub mod error;
pub mod jacobian;
pub mod linalg;
pub mod lm;
pub mod model;
pub mod models;
pub mod uncertainty;

// Re-exports for convenience
pub use error::{FitError, PartialFit, Result};
pub use lm::{FitConfig, FitResult, LevenbergMarquardt};
pub use model::{DomainError, Model, ModelResult};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
