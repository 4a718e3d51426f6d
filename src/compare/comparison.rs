use std::time::Instant;

use log::info;
use serde::{Serialize, Deserialize};

use crate::error::{Result, SoftmaxError};
use crate::loss::softmax_naive::softmax_loss_naive;
use crate::loss::softmax_vectorized::softmax_loss_vectorized;
use crate::math::matrix::Matrix;

/// Side-by-side result of running both loss variants on one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub naive_loss: f64,
    pub vectorized_loss: f64,
    /// |naive_loss - vectorized_loss|
    pub loss_difference: f64,
    /// Largest element-wise |dW_naive - dW_vectorized|.
    pub max_grad_difference: f64,
    /// Wall-clock time of the naive call in microseconds.
    pub naive_elapsed_us: u64,
    /// Wall-clock time of the vectorized call in microseconds.
    pub vectorized_elapsed_us: u64,
    /// dW from the vectorized call, kept for gradient checking.
    #[serde(skip)]
    pub vectorized_grad: Matrix,
}

impl Comparison {
    /// True when both the loss and every gradient entry agree within `tolerance`.
    pub fn agrees(&self, tolerance: f64) -> bool {
        self.loss_difference <= tolerance && self.max_grad_difference <= tolerance
    }
}

/// Runs the naive and vectorized variants on the same inputs and reports how
/// far apart their outputs are and how long each took.
pub fn compare_variants(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<Comparison> {
    let t_start = Instant::now();
    let (naive_loss, naive_grad) = softmax_loss_naive(w, x, y, reg)?;
    let naive_elapsed_us = t_start.elapsed().as_micros() as u64;

    let t_start = Instant::now();
    let (vectorized_loss, vectorized_grad) = softmax_loss_vectorized(w, x, y, reg)?;
    let vectorized_elapsed_us = t_start.elapsed().as_micros() as u64;

    let max_grad_difference = naive_grad.max_abs_diff(&vectorized_grad)
        .ok_or(SoftmaxError::ShapeMismatch {
            context: "naive vs vectorized gradient",
            expected: naive_grad.shape(),
            found: vectorized_grad.shape(),
        })?;

    let comparison = Comparison {
        naive_loss,
        vectorized_loss,
        loss_difference: (naive_loss - vectorized_loss).abs(),
        max_grad_difference,
        naive_elapsed_us,
        vectorized_elapsed_us,
        vectorized_grad,
    };

    info!(
        "naive loss {:.10} in {}us, vectorized loss {:.10} in {}us; loss diff {:.3e}, grad diff {:.3e}",
        comparison.naive_loss,
        comparison.naive_elapsed_us,
        comparison.vectorized_loss,
        comparison.vectorized_elapsed_us,
        comparison.loss_difference,
        comparison.max_grad_difference,
    );

    Ok(comparison)
}
