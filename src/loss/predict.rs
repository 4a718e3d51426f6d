use crate::activation::softmax::softmax_rows;
use crate::error::{Result, SoftmaxError};
use crate::loss::validate::{check_labels, check_shapes};
use crate::math::matrix::Matrix;

/// Row-wise class probabilities softmax(X·W), shape N x C.
pub fn class_probabilities(w: &Matrix, x: &Matrix) -> Result<Matrix> {
    check_shapes(w, x)?;
    Ok(softmax_rows(&x.try_matmul(w)?))
}

/// Most likely class for each row of `x`.
pub fn predict(w: &Matrix, x: &Matrix) -> Result<Vec<usize>> {
    check_shapes(w, x)?;
    let scores = x.try_matmul(w)?;
    Ok(scores.data.iter().map(|row| argmax(row)).collect())
}

/// Fraction of rows of `x` whose predicted class equals the label.
/// An empty batch scores 0.0.
pub fn accuracy(w: &Matrix, x: &Matrix, y: &[usize]) -> Result<f64> {
    if x.rows == 0 && y.is_empty() && x.cols == w.rows {
        return Ok(0.0);
    }
    if y.len() != x.rows {
        return Err(SoftmaxError::ShapeMismatch {
            context: "labels vs data rows",
            expected: (x.rows, 1),
            found: (y.len(), 1),
        });
    }
    check_labels(y, w.cols)?;

    let predicted = predict(w, x)?;
    let correct = predicted.iter().zip(y.iter()).filter(|(p, l)| p == l).count();
    Ok(correct as f64 / y.len() as f64)
}

/// Index of the maximum element in a slice; ties resolve to the lowest index.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &x)| {
            if x > best { (i, x) } else { (best_i, best) }
        })
        .0
}
