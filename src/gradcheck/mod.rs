pub mod numeric;

pub use numeric::{
    grad_check_full, grad_check_sparse, max_relative_error, numerical_gradient,
    relative_error, GradCheck, DEFAULT_STEP,
};
