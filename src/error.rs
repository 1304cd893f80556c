//! Error types for stratified splitting.
//!
//! Every failure is local to a single split call: the operation either
//! returns all three partitions or one of these errors, never partial output.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Which of the two stratified splits rejected a stratum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStage {
    /// Train vs held-out (80/20).
    Holdout,
    /// Validation vs test within the held-out rows (50/50).
    Evaluation,
}

impl SplitStage {
    /// Names of the (kept, held-out) sides of this stage.
    pub fn sides(&self) -> (&'static str, &'static str) {
        match self {
            SplitStage::Holdout => ("train", "held-out"),
            SplitStage::Evaluation => ("validation", "test"),
        }
    }
}

impl std::fmt::Display for SplitStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitStage::Holdout => write!(f, "train/held-out split"),
            SplitStage::Evaluation => write!(f, "validation/test split"),
        }
    }
}

/// Errors that can occur while splitting a dataset.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A requested stratify column is not part of the dataset schema.
    #[error("Stratify column '{column}' not found in dataset. Available columns: {available:?}")]
    Schema {
        column: String,
        available: Vec<String>,
    },

    /// A stratum cannot be divided across the required partitions.
    ///
    /// `count` is the stratum size at this stage; `allocated` is what the
    /// starved `partition` would receive and `required` its minimum.
    #[error(
        "Stratum {stratum} is too small for the {stage}: its {count} record(s) leave {allocated} for {partition}, at least {required} required. Supply more data, merge small strata or stratify on fewer columns"
    )]
    InsufficientData {
        stage: SplitStage,
        stratum: String,
        count: usize,
        partition: &'static str,
        allocated: usize,
        required: usize,
    },

    /// The dataset has no rows.
    #[error("Cannot split an empty dataset")]
    EmptyDataset,

    /// No stratify columns were given.
    #[error("At least one stratify column is required")]
    NoStratifyColumns,

    /// Per-row data does not cover the rows a split refers to.
    #[error("Split refers to {expected} rows but the dataset has {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    /// Underlying DataFrame operation failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
