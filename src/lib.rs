pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod gradcheck;
pub mod compare;
pub mod json;

// Convenience re-exports
pub use error::{Result, SoftmaxError};
pub use math::matrix::Matrix;
pub use loss::softmax_naive::softmax_loss_naive;
pub use loss::softmax_vectorized::softmax_loss_vectorized;
pub use loss::loss_type::{softmax_loss, LossVariant};
pub use loss::loss_config::LossConfig;
pub use compare::comparison::{compare_variants, Comparison};
pub use compare::compare_config::CompareConfig;
