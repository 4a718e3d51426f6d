use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::loss::softmax_naive::softmax_loss_naive;
use crate::loss::softmax_vectorized::softmax_loss_vectorized;
use crate::math::matrix::Matrix;

/// Selects which implementation computes the softmax loss.
///
/// - `Naive`      — explicit per-example, per-class loops.
/// - `Vectorized` — whole-matrix products; same result, faster on large batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossVariant {
    Naive,
    #[default]
    Vectorized,
}

impl LossVariant {
    pub const ALL: [LossVariant; 2] = [LossVariant::Naive, LossVariant::Vectorized];

    pub fn name(&self) -> &'static str {
        match self {
            LossVariant::Naive => "naive",
            LossVariant::Vectorized => "vectorized",
        }
    }
}

/// Loss and gradient for one batch — dispatches on `LossVariant`.
pub fn softmax_loss(
    variant: LossVariant,
    w: &Matrix,
    x: &Matrix,
    y: &[usize],
    reg: f64,
) -> Result<(f64, Matrix)> {
    match variant {
        LossVariant::Naive      => softmax_loss_naive(w, x, y, reg),
        LossVariant::Vectorized => softmax_loss_vectorized(w, x, y, reg),
    }
}
