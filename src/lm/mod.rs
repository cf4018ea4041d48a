//! Levenberg-Marquardt algorithm implementation.
//!
//! This module provides the damped Gauss-Newton iteration at the heart of
//! the crate: configuration, the convergence state machine, the solver
//! itself, and a helper for running several independent fits in parallel.

pub mod algorithm;
pub mod config;
pub mod convergence;
pub mod parallel;

pub use algorithm::{FitResult, LevenbergMarquardt};
pub use config::FitConfig;
pub use convergence::{ConvergenceCriteria, ConvergenceReason, IterationStatus};
pub use parallel::fit_all;
