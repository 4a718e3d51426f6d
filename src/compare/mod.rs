pub mod comparison;
pub mod compare_config;

pub use comparison::{compare_variants, Comparison};
pub use compare_config::{Batch, CompareConfig};
