use crate::error::{Result, SoftmaxError};
use crate::math::matrix::Matrix;

/// Problem dimensions shared by both loss variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
    /// Number of examples (rows of X).
    pub n: usize,
    /// Number of features (rows of W, columns of X).
    pub d: usize,
    /// Number of classes (columns of W).
    pub c: usize,
}

/// Checks W, X and y against each other and returns the problem dimensions.
///
/// Runs before any arithmetic so that a bad call fails without producing
/// partial output.
pub fn check_inputs(w: &Matrix, x: &Matrix, y: &[usize], reg: f64) -> Result<Dims> {
    check_reg(reg)?;
    let dims = check_shapes(w, x)?;

    if y.len() != dims.n {
        return Err(SoftmaxError::ShapeMismatch {
            context: "labels vs data rows",
            expected: (dims.n, 1),
            found: (y.len(), 1),
        });
    }
    check_labels(y, dims.c)?;

    Ok(dims)
}

/// Shape checks for W and X alone, used where no labels are involved.
pub fn check_shapes(w: &Matrix, x: &Matrix) -> Result<Dims> {
    if x.cols != w.rows {
        return Err(SoftmaxError::ShapeMismatch {
            context: "data columns vs weight rows",
            expected: (x.rows, w.rows),
            found: x.shape(),
        });
    }
    if x.rows == 0 {
        return Err(SoftmaxError::EmptyBatch);
    }
    if w.cols == 0 {
        return Err(SoftmaxError::NoClasses);
    }

    Ok(Dims { n: x.rows, d: w.rows, c: w.cols })
}

pub fn check_labels(y: &[usize], classes: usize) -> Result<()> {
    match y.iter().enumerate().find(|(_, &label)| label >= classes) {
        Some((index, &label)) => Err(SoftmaxError::LabelOutOfRange { index, label, classes }),
        None => Ok(()),
    }
}

pub fn check_reg(reg: f64) -> Result<()> {
    if reg.is_finite() && reg >= 0.0 {
        Ok(())
    } else {
        Err(SoftmaxError::InvalidRegularization(reg))
    }
}
