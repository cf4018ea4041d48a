//! Dense linear-algebra primitives for the normal equations.
//!
//! The damped normal-equations matrix `J^T J + lambda * diag(J^T J)` is
//! symmetric positive-(semi)definite, so a plain Cholesky factorization is
//! the right tool: it either succeeds, or it detects a non-positive pivot,
//! which the iteration loop treats as a singular system and recovers from by
//! increasing the damping.

use ndarray::{Array1, Array2};

/// Cholesky factorization of a symmetric matrix, `A = L L^T`.
///
/// Returns the lower-triangular factor, or `None` when a pivot is not
/// strictly positive (the matrix is singular or indefinite).
fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols());

    let mut l = a.clone();

    for k in 0..n {
        for j in 0..k {
            l[[k, k]] -= l[[k, j]] * l[[k, j]];
        }

        if l[[k, k]] <= 0.0 {
            return None;
        }

        let pivot = l[[k, k]].sqrt();
        l[[k, k]] = pivot;

        for i in k + 1..n {
            for j in 0..k {
                l[[i, k]] -= l[[i, j]] * l[[k, j]];
            }
            l[[i, k]] /= pivot;
        }
    }

    Some(l)
}

/// Solve `L L^T x = b` given the Cholesky factor `L`.
fn cholesky_solve(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = l.nrows();

    // Forward substitution: L y = b.
    let mut y = b.clone();
    for i in 0..n {
        for j in 0..i {
            let yj = y[j];
            y[i] -= l[[i, j]] * yj;
        }
        y[i] /= l[[i, i]];
    }

    // Backward substitution: L^T x = y.
    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        x[i] = y[i];
        for j in i + 1..n {
            x[i] -= l[[j, i]] * x[j];
        }
        x[i] /= l[[i, i]];
    }

    x
}

/// Solve the symmetric positive-definite system `A x = b`.
///
/// Returns `None` when `A` is singular (or not positive definite), which the
/// caller handles by adapting the damping factor.
pub fn solve_spd(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let l = cholesky(a)?;
    Some(cholesky_solve(&l, b))
}

/// Invert the symmetric positive-definite matrix `A` by solving `A x = e_i`
/// for each column of the identity.
pub fn invert_spd(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let l = cholesky(a)?;

    let mut inv = Array2::zeros((n, n));
    for i in 0..n {
        let mut e = Array1::zeros(n);
        e[i] = 1.0;
        let col = cholesky_solve(&l, &e);
        inv.column_mut(i).assign(&col);
    }

    Some(inv)
}
