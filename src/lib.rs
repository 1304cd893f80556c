//! Stratified train/validation/test splitting for Polars DataFrames.
//!
//! Splits a dataset 80/10/10 while preserving the relative frequency of
//! one or more categorical columns in every partition.
//!
//! ```
//! use polars::prelude::*;
//! use stratsplit::split_dataframe;
//!
//! let types: Vec<&str> = (0..100).map(|i| if i < 50 { "A" } else { "B" }).collect();
//! let df = df! { "type" => types }.unwrap();
//!
//! let (train, validation, test) = split_dataframe(&df, &["type"], 42).unwrap().into_parts();
//! assert_eq!((train.height(), validation.height(), test.height()), (80, 10, 10));
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{SplitConfig, DEFAULT_SEED};
pub use error::{SplitError, SplitStage};
pub use pipeline::{split_dataframe, split_indices, split_with_config, SplitIndices, StratifiedSplit};
pub use report::SplitSummary;
