use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::json;
use crate::loss::loss_type::{softmax_loss, LossVariant};
use crate::loss::validate::check_reg;
use crate::math::matrix::Matrix;

/// Settings for evaluating the softmax loss on a batch.
///
/// # Fields
/// - `reg`     — L2 regularization strength; must be finite and `>= 0`
/// - `variant` — which implementation to run (`Naive` or `Vectorized`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossConfig {
    #[serde(default)]
    pub reg: f64,
    #[serde(default)]
    pub variant: LossVariant,
}

impl LossConfig {
    pub fn new(reg: f64, variant: LossVariant) -> Self {
        LossConfig { reg, variant }
    }

    pub fn validate(&self) -> Result<()> {
        check_reg(self.reg)
    }

    /// Runs the configured variant on one batch.
    pub fn evaluate(&self, w: &Matrix, x: &Matrix, y: &[usize]) -> Result<(f64, Matrix)> {
        softmax_loss(self.variant, w, x, y, self.reg)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        json::save_json(self, path)
    }

    /// Deserializes a `LossConfig` from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<LossConfig> {
        json::load_json(path)
    }
}

impl Default for LossConfig {
    fn default() -> Self {
        LossConfig::new(0.0, LossVariant::Vectorized)
    }
}
