use log::debug;

use crate::activation::softmax::log_softmax;
use crate::error::Result;
use crate::loss::validate::check_inputs;
use crate::math::matrix::Matrix;

/// Softmax loss and gradient with explicit loops over examples and classes.
///
/// `w` is D x C, `x` is N x D, `y` holds one class id per row of `x`.
/// Returns `(loss, dW)` where `dW` has the shape of `w`:
///
///   loss = mean_i(-ln p_i[y_i]) + 0.5·reg·Σ W²
///   dW   = mean_i(x_iᵀ (p_i - onehot(y_i))) + reg·W
pub fn softmax_loss_naive(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<(f64, Matrix)> {
    let dims = check_inputs(w, x, y, reg)?;
    debug!("softmax_loss_naive: N={} D={} C={} reg={}", dims.n, dims.d, dims.c, reg);

    let mut loss = 0.0;
    let mut dw = Matrix::zeros(dims.d, dims.c);

    for i in 0..dims.n {
        let xi = x.row(i);

        let mut scores = vec![0.0; dims.c];
        for (c, score) in scores.iter_mut().enumerate() {
            for (k, &xk) in xi.iter().enumerate() {
                *score += xk * w.data[k][c];
            }
        }

        let log_probs = log_softmax(&scores);
        loss -= log_probs[y[i]];

        for (c, &lp) in log_probs.iter().enumerate() {
            let p = lp.exp();
            let coeff = if c == y[i] { p - 1.0 } else { p };
            for (k, &xk) in xi.iter().enumerate() {
                dw.data[k][c] += xk * coeff;
            }
        }
    }

    let inv_n = 1.0 / dims.n as f64;
    loss = loss * inv_n + 0.5 * reg * w.sum_squares();

    for k in 0..dims.d {
        for c in 0..dims.c {
            dw.data[k][c] = dw.data[k][c] * inv_n + reg * w.data[k][c];
        }
    }

    Ok((loss, dw))
}
