//! Bundled model callbacks for coverage-histogram fitting.
//!
//! These are the two models the assembly pipeline fits to k-mer frequency
//! histograms: a weighted Gaussian, and a Poisson/Gaussian mixture in which
//! the Poisson component captures sequencing-error k-mers and the Gaussian
//! component captures true-coverage k-mers.
//!
//! Both are plain functions, usable directly wherever a [`Model`](crate::Model)
//! is expected; callers are free to supply their own callbacks instead.

use ndarray::Array1;
use statrs::distribution::{Continuous, Discrete, Normal, Poisson};

use crate::model::{DomainError, ModelResult};

/// Weighted Gaussian: `y = w * Normal(mean, stddev).pdf(x)`.
///
/// Parameters: `[w, mean, stddev]`. Fails with a domain error when
/// `stddev <= 0`.
pub fn gaussian(params: &Array1<f64>, xs: &Array1<f64>) -> ModelResult {
    let w = params[0];
    let mean = params[1];
    let stddev = params[2];

    let norm = Normal::new(mean, stddev).map_err(|_| DomainError)?;

    Ok(xs.mapv(|x| w * norm.pdf(x)))
}

/// K-mer coverage model: a Poisson/Gaussian mixture over coverage counts.
///
/// Parameters: `[mix, lambda, mean, stddev]`, where `mix` is the Poisson
/// (error k-mer) weight, `lambda` its rate, and `mean`/`stddev` describe the
/// true-coverage Gaussian. Histograms are truncated below count 2 (counts 0
/// and 1 are dominated by artefacts and dropped upstream), so the mixture
/// mass at 0 and 1 is excluded and the remainder rescaled to a total of 1000.
///
/// Fails with a domain error when `lambda <= 0` or `stddev <= 0`.
pub fn kmer_coverage(params: &Array1<f64>, xs: &Array1<f64>) -> ModelResult {
    let mix = params[0];
    let lambda = params[1];
    let mean = params[2];
    let stddev = params[3];

    let poiss = Poisson::new(lambda).map_err(|_| DomainError)?;
    let norm = Normal::new(mean, stddev).map_err(|_| DomainError)?;

    let mass_at_zero = mix * poiss.pmf(0) + (1.0 - mix) * norm.pdf(0.0);
    let mass_at_one = mix * poiss.pmf(1) + (1.0 - mix) * norm.pdf(1.0);
    let scale = 1000.0 / (1.0 - mass_at_zero - mass_at_one);

    Ok(xs.mapv(|x| {
        scale * (mix * poiss.pmf(x.round() as u64) + (1.0 - mix) * norm.pdf(x))
    }))
}
