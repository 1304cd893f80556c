//! Pipeline module - stratify keys, allocation and the two-stage split

pub mod allocation;
pub mod split;
pub mod strata;

pub use allocation::{allocate_holdout, holdout_size, SplitRatio, HOLDOUT_RATIO, TEST_RATIO};
pub use split::*;
pub use strata::*;
