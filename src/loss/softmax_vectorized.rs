use log::debug;

use crate::activation::softmax::log_softmax_rows;
use crate::error::Result;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Everything the batched pass computes, including the class probabilities
/// it derived the gradient from.
#[derive(Debug, Clone)]
pub struct SoftmaxPass {
    pub loss: f64,
    /// ∂loss/∂W, shape D x C.
    pub grad: Matrix,
    /// Row-wise softmax of X·W, shape N x C. Left untouched by the backward step.
    pub probs: Matrix,
}

/// Softmax loss and gradient computed with whole-matrix operations.
///
/// Same contract as `softmax_loss_naive`; the two agree to floating-point
/// tolerance.
pub fn softmax_loss_vectorized(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix)> {
    let pass = softmax_pass(w, x, y, reg)?;
    Ok((pass.loss, pass.grad))
}

/// Batched forward and backward pass that also hands back the probabilities.
pub fn softmax_pass(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<SoftmaxPass> {
    let dims = check_inputs(w, x, y, reg)?;
    debug!("softmax_loss_vectorized: N={} D={} C={} reg={}", dims.n, dims.d, dims.c, reg);

    let inv_n = 1.0 / dims.n as f64;

    // N x C
    let scores = x.try_matmul(w)?;
    let log_probs = log_softmax_rows(&scores);
    let probs = log_probs.map(f64::exp);

    let data_loss: f64 = log_probs.data.iter()
        .zip(y.iter())
        .map(|(row, &label)| -row[label])
        .sum();
    let loss = data_loss * inv_n + 0.5 * reg * w.sum_squares();

    // dscores = probs - onehot(y), built in its own buffer.
    let mut dscores = probs.clone();
    for (row, &label) in dscores.data.iter_mut().zip(y.iter()) {
        row[label] -= 1.0;
    }

    let grad = x.transpose().try_matmul(&dscores)?.scale(inv_n) + w.scale(reg);

    Ok(SoftmaxPass { loss, grad, probs })
}
