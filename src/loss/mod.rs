pub mod validate;
pub mod softmax_naive;
pub mod softmax_vectorized;
pub mod loss_type;
pub mod loss_config;
pub mod predict;

pub use softmax_naive::softmax_loss_naive;
pub use softmax_vectorized::{softmax_loss_vectorized, softmax_pass, SoftmaxPass};
pub use loss_type::{softmax_loss, LossVariant};
pub use loss_config::LossConfig;
pub use predict::{accuracy, class_probabilities, predict};
