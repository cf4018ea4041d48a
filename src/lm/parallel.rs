//! Parallel evaluation of independent fits.
//!
//! A single fit is strictly sequential, but a pipeline often has several
//! histograms to fit at once (one per k-mer size, say). Each solver owns its
//! buffers exclusively, so independent fits need no synchronization and can
//! simply be spread across a thread pool.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Model;

use super::algorithm::{FitResult, LevenbergMarquardt};

/// Evaluate every solver, in parallel, collecting one outcome per fit in the
/// input order. A failed fit does not affect its neighbours.
pub fn fit_all<M>(solvers: &[LevenbergMarquardt<M>]) -> Vec<Result<FitResult>>
where
    M: Model + Sync,
{
    solvers.par_iter().map(|solver| solver.evaluate()).collect()
}
