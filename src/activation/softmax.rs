use crate::math::matrix::Matrix;

/// Numerically stable softmax of one score row.
///
/// The row maximum is subtracted before exponentiating so that large scores
/// cannot overflow `exp`. The result sums to 1 for any finite input; an empty
/// row yields an empty vector.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Numerically stable log-softmax of one score row.
///
/// Computed as `s - max - ln Σ exp(s - max)`, which stays finite even when a
/// probability underflows to zero, so `-log_softmax(s)[y]` is a usable
/// cross-entropy term for arbitrarily large scores.
pub fn log_softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let log_sum = scores.iter().map(|s| (s - max).exp()).sum::<f64>().ln();
    scores.iter().map(|s| s - max - log_sum).collect()
}

/// Applies `log_softmax` to every row of `scores`, producing a fresh matrix.
pub fn log_softmax_rows(scores: &Matrix) -> Matrix {
    Matrix {
        rows: scores.rows,
        cols: scores.cols,
        data: scores.data.iter().map(|row| log_softmax(row)).collect(),
    }
}

/// Applies `softmax` to every row of `scores`, producing a fresh matrix.
pub fn softmax_rows(scores: &Matrix) -> Matrix {
    Matrix {
        rows: scores.rows,
        cols: scores.cols,
        data: scores.data.iter().map(|row| softmax(row)).collect(),
    }
}
