pub mod softmax;

pub use softmax::{softmax, softmax_rows, log_softmax, log_softmax_rows};
