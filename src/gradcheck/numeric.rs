use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// Default finite-difference step.
pub const DEFAULT_STEP: f64 = 1e-5;

/// Smallest denominator `relative_error` will divide by.
const TINY: f64 = 1e-12;

/// Outcome of checking one entry of an analytic gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradCheck {
    /// (row, col) of the checked weight.
    pub index: (usize, usize),
    pub numerical: f64,
    pub analytic: f64,
    pub relative_error: f64,
}

/// |a - b| / (|a| + |b|), with two exact zeros counting as agreement.
pub fn relative_error(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    if diff == 0.0 {
        return 0.0;
    }
    diff / (a.abs() + b.abs()).max(TINY)
}

/// Central difference ∂f/∂W[row][col] ≈ (f(W + h) - f(W - h)) / 2h.
pub fn numerical_partial<F>(f: &F, w: &Matrix, row: usize, col: usize, h: f64) -> Result<f64>
where
    F: Fn(&Matrix) -> Result<f64>,
{
    let mut probe = w.clone();

    probe.data[row][col] = w.data[row][col] + h;
    let plus = f(&probe)?;
    probe.data[row][col] = w.data[row][col] - h;
    let minus = f(&probe)?;

    Ok((plus - minus) / (2.0 * h))
}

/// Central-difference gradient of `f` at every entry of `w`.
pub fn numerical_gradient<F>(f: &F, w: &Matrix, h: f64) -> Result<Matrix>
where
    F: Fn(&Matrix) -> Result<f64>,
{
    let mut grad = Matrix::zeros(w.rows, w.cols);
    for row in 0..w.rows {
        for col in 0..w.cols {
            grad.data[row][col] = numerical_partial(f, w, row, col, h)?;
        }
    }
    Ok(grad)
}

/// Compares `analytic` with the central difference of `f` at every entry.
pub fn grad_check_full<F>(f: &F, w: &Matrix, analytic: &Matrix, h: f64) -> Result<Vec<GradCheck>>
where
    F: Fn(&Matrix) -> Result<f64>,
{
    check_same_shape(w, analytic)?;

    let mut checks = Vec::with_capacity(w.rows * w.cols);
    for row in 0..w.rows {
        for col in 0..w.cols {
            checks.push(check_entry(f, w, analytic, row, col, h)?);
        }
    }
    Ok(checks)
}

/// Compares `analytic` with the central difference of `f` at `num_checks`
/// uniformly sampled entries. Entries may repeat.
pub fn grad_check_sparse<F, R>(
    f: &F,
    w: &Matrix,
    analytic: &Matrix,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Result<Vec<GradCheck>>
where
    F: Fn(&Matrix) -> Result<f64>,
    R: Rng,
{
    check_same_shape(w, analytic)?;
    if w.rows == 0 || w.cols == 0 {
        return Ok(Vec::new());
    }

    (0..num_checks)
        .map(|_| {
            let row = rng.gen_range(0..w.rows);
            let col = rng.gen_range(0..w.cols);
            check_entry(f, w, analytic, row, col, h)
        })
        .collect()
}

/// Largest relative error across a set of checks; 0.0 for no checks.
/// NaN if any check produced NaN, so a non-finite gradient never passes.
pub fn max_relative_error(checks: &[GradCheck]) -> f64 {
    checks.iter()
        .map(|c| c.relative_error)
        .fold(0.0, |worst, e| if worst.is_nan() || e.is_nan() { f64::NAN } else { worst.max(e) })
}

fn check_entry<F>(f: &F, w: &Matrix, analytic: &Matrix, row: usize, col: usize, h: f64) -> Result<GradCheck>
where
    F: Fn(&Matrix) -> Result<f64>,
{
    let numerical = numerical_partial(f, w, row, col, h)?;
    let analytic = analytic.data[row][col];
    let relative_error = relative_error(numerical, analytic);

    debug!(
        "grad check ({}, {}): numerical {:.6e} analytic {:.6e} relative error {:.3e}",
        row, col, numerical, analytic, relative_error
    );

    Ok(GradCheck { index: (row, col), numerical, analytic, relative_error })
}

fn check_same_shape(w: &Matrix, analytic: &Matrix) -> Result<()> {
    if w.shape() != analytic.shape() {
        return Err(SoftmaxError::ShapeMismatch {
            context: "analytic gradient vs weights",
            expected: w.shape(),
            found: analytic.shape(),
        });
    }
    Ok(())
}
