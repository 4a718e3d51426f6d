use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{Result, SoftmaxError};
use crate::json;
use crate::loss::validate::check_reg;
use crate::math::matrix::Matrix;

/// Size and settings of a randomly generated batch used to compare the two
/// loss variants and gradient-check them.
///
/// # Fields
/// - `num_train`    — examples in the batch (N)
/// - `dim`          — features per example (D)
/// - `classes`      — number of classes (C)
/// - `reg`          — L2 regularization strength
/// - `weight_scale` — weights are drawn uniformly from `[-weight_scale, weight_scale)`
/// - `grad_checks`  — number of sampled entries for the sparse gradient check
/// - `seed`         — RNG seed; `None` seeds from the thread RNG
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub num_train: usize,
    pub dim: usize,
    pub classes: usize,
    pub reg: f64,
    pub weight_scale: f64,
    pub grad_checks: usize,
    pub seed: Option<u64>,
}

/// A generated batch: weights, data and labels.
#[derive(Debug, Clone)]
pub struct Batch {
    pub w: Matrix,
    pub x: Matrix,
    pub y: Vec<usize>,
}

impl CompareConfig {
    pub fn validate(&self) -> Result<()> {
        check_reg(self.reg)?;
        if !self.weight_scale.is_finite() {
            return Err(SoftmaxError::InvalidWeightScale(self.weight_scale));
        }
        Ok(())
    }

    /// RNG for `generate` and the sparse gradient check: seeded from `seed`
    /// when set, otherwise from the thread RNG.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::thread_rng().gen()),
        }
    }

    /// Draws W (dim x classes), X (num_train x dim) uniform in [-1, 1) and
    /// labels uniform over the classes.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Batch {
        let w = Matrix::random(self.dim, self.classes, self.weight_scale, rng);
        let x = Matrix::random(self.num_train, self.dim, 1.0, rng);
        let y = (0..self.num_train)
            .map(|_| if self.classes == 0 { 0 } else { rng.gen_range(0..self.classes) })
            .collect();
        Batch { w, x, y }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        json::save_json(self, path)
    }

    /// Deserializes a `CompareConfig` from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<CompareConfig> {
        json::load_json(path)
    }
}

impl Default for CompareConfig {
    // A development-sized batch of 32x32x3 images over 10 classes.
    fn default() -> Self {
        CompareConfig {
            num_train: 500,
            dim: 3073,
            classes: 10,
            reg: 5e-6,
            weight_scale: 1e-4,
            grad_checks: 10,
            seed: None,
        }
    }
}
